//! UI rendering functions.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use crate::app::{App, AppStatus};
use crate::form::FieldId;

/// Fixed order of the form fields, top to bottom.
const FIELD_ORDER: [FieldId; 7] = [
    FieldId::Prompt,
    FieldId::Role,
    FieldId::Topic,
    FieldId::Goal,
    FieldId::OutputFormat,
    FieldId::ExpertiseLevel,
    FieldId::Details,
];

fn field_label(field: FieldId) -> &'static str {
    match field {
        FieldId::Prompt => "Prompt*",
        FieldId::Role => "Role",
        FieldId::Topic => "Topic",
        FieldId::Goal => "Goal",
        FieldId::OutputFormat => "Format",
        FieldId::ExpertiseLevel => "Expertise",
        FieldId::Details => "Details",
    }
}

pub fn draw_ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Status panel
            Constraint::Min(1),    // Main panes
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    draw_status_bar(f, app, chunks[0]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    draw_form(f, app, panes[0]);
    draw_output(f, app, panes[1]);
    draw_footer(f, app, chunks[2]);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let mut status_spans = vec![
        Span::styled("● ", Style::default().fg(app.status.color())),
        Span::styled(
            app.status.label(),
            Style::default()
                .fg(app.status.color())
                .add_modifier(Modifier::BOLD),
        ),
    ];

    status_spans.push(Span::raw("    Model: "));
    status_spans.push(Span::styled(
        app.config.api.model.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ));

    status_spans.push(Span::raw("    Session: "));
    status_spans.push(Span::styled(
        app.session_id.as_deref().unwrap_or("---").to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ));

    status_spans.push(Span::raw("    "));
    if let Some(ref error) = app.logging_error {
        status_spans.push(Span::styled("⚠ ", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::styled(
            error.clone(),
            Style::default().fg(Color::Yellow),
        ));
    } else if let Some(ref log_dir) = app.log_directory {
        status_spans.push(Span::raw("Logs: "));
        status_spans.push(Span::styled(
            log_dir.display().to_string(),
            Style::default().add_modifier(Modifier::DIM),
        ));
    }

    let status_panel = Paragraph::new(Line::from(status_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(status_panel, area);
}

/// Render a text field value, with a block cursor when focused.
///
/// `cursor` is a byte offset into `value`; the value is windowed so the
/// cursor stays visible in narrow panes.
fn render_text_value(
    value: &str,
    focused: bool,
    cursor: usize,
    width: usize,
) -> Vec<Span<'static>> {
    let chars: Vec<char> = value.chars().collect();
    let cursor_chars = value[..cursor.min(value.len())].chars().count();

    let (start, end) = if chars.len() > width && width > 0 {
        let start = cursor_chars.saturating_sub(width / 2);
        let end = (start + width).min(chars.len());
        let start = end.saturating_sub(width);
        (start, end)
    } else {
        (0, chars.len())
    };
    let visible: Vec<char> = chars[start..end].to_vec();

    if !focused {
        let text: String = visible.into_iter().collect();
        return vec![Span::styled(text, Style::default().fg(Color::White))];
    }

    let at = (cursor_chars - start).min(visible.len());
    let before: String = visible[..at].iter().collect();
    let cursor_char: String = visible.get(at).copied().unwrap_or(' ').to_string();
    let after: String = if at < visible.len() {
        visible[at + 1..].iter().collect()
    } else {
        String::new()
    };

    vec![
        Span::styled(before, Style::default().fg(Color::White)),
        Span::styled(
            cursor_char,
            Style::default().fg(Color::Black).bg(Color::White),
        ),
        Span::styled(after, Style::default().fg(Color::White)),
    ]
}

fn draw_form(f: &mut Frame, app: &App, area: Rect) {
    let label_style = Style::default().fg(Color::DarkGray);
    let focused_label_style = Style::default().fg(Color::Cyan);
    let label_width = 11;
    let value_width = area
        .width
        .saturating_sub(label_width as u16 + 5)
        .max(8) as usize;

    let mut content: Vec<Line> = Vec::new();
    content.push(Line::from(""));

    for field in FIELD_ORDER {
        let focused = app.form.focus == field;
        let style = if focused { focused_label_style } else { label_style };
        let label = format!("  {:<width$}", field_label(field), width = label_width);
        let mut spans = vec![Span::styled(label, style)];

        match field {
            FieldId::OutputFormat => {
                spans.push(render_selector(
                    app.form.fields.output_format.map(|v| v.label()),
                    focused,
                ));
            }
            FieldId::ExpertiseLevel => {
                spans.push(render_selector(
                    app.form.fields.expertise_level.map(|v| v.label()),
                    focused,
                ));
            }
            _ => {
                if let Some(value) = app.form.fields.text_value(field) {
                    spans.extend(render_text_value(
                        value,
                        focused,
                        app.form.cursor_pos,
                        value_width,
                    ));
                }
            }
        }
        content.push(Line::from(spans));

        // Divider between the required prompt and the optional fields
        if field == FieldId::Prompt {
            let divider_width = area.width.saturating_sub(4) as usize;
            content.push(Line::from(Span::styled(
                format!("  {}", "─".repeat(divider_width)),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    if app.form.fields.prompt.is_empty() {
        content.push(Line::from(""));
        content.push(Line::from(Span::styled(
            "  Enter a prompt to generate",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let form_pane = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Create Your Prompt "),
    );
    f.render_widget(form_pane, area);
}

fn render_selector(label: Option<&'static str>, focused: bool) -> Span<'static> {
    let value = label.unwrap_or("(not set)");
    if focused {
        Span::styled(format!("< {} >", value), Style::default().fg(Color::Cyan))
    } else if label.is_some() {
        Span::styled(value, Style::default().fg(Color::White))
    } else {
        Span::styled(value, Style::default().fg(Color::DarkGray))
    }
}

fn draw_output(f: &mut Frame, app: &mut App, area: Rect) {
    // Update pane dimensions for scroll calculations
    app.output_pane_height = area.height.saturating_sub(2);
    app.output_pane_width = area.width;
    app.output_scroll = app.output_scroll.min(app.max_output_scroll());

    let content: Vec<Line> = if app.generated.is_empty() {
        vec![Line::from(Span::styled(
            "Your generated prompt will appear here.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        app.generated.lines().map(Line::raw).collect()
    };

    let output_pane = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Generated Prompt "),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.output_scroll, 0));
    f.render_widget(output_pane, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let hint_style = Style::default().fg(Color::DarkGray);
    let mut spans: Vec<Span> = Vec::new();

    if app.status == AppStatus::Generating {
        spans.push(Span::styled(
            "Creating prompt…  ",
            Style::default().fg(Color::Green),
        ));
    }

    let generate_style = if app.status == AppStatus::Idle && !app.form.fields.prompt.is_empty() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    };

    spans.push(Span::styled("[Tab] Next field  ", hint_style));
    spans.push(Span::styled("[^G] Generate  ", generate_style));
    spans.push(Span::styled(
        "[^Y] Copy  [PgUp/PgDn] Scroll  [Esc] Quit",
        hint_style,
    ));

    if app.copied_notice_visible() {
        spans.push(Span::styled(
            "   Copied ✓",
            Style::default().fg(Color::Green),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
