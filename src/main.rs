mod app;
mod clipboard;
mod client;
mod config;
mod form;
mod logging;
mod prompt;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{DefaultTerminal, Terminal};
use tracing::{debug, info};

use crate::app::App;
use crate::client::CompletionClient;

/// Terminal prompt builder backed by the OpenAI chat API.
#[derive(Parser, Debug)]
#[command(name = "promptforge", version, about)]
struct Cli {
    /// Path to an alternate config file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the configured model identifier.
    #[arg(long)]
    model: Option<String>,
}

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();

    // Load configuration before logging so the configured level applies
    let loaded = config::load_config(cli.config);
    let mut config = loaded.config;
    if let Some(model) = cli.model {
        config.api.model = model;
    }

    let (session_id, log_directory, logging_error, _guard) =
        match logging::init(&config.logging.level) {
            Ok(ctx) => (
                Some(ctx.session_id),
                Some(ctx.log_directory),
                None,
                Some(ctx._guard),
            ),
            Err(e) => {
                eprintln!("Warning: Failed to initialize logging: {}", e);
                (None, None, Some(e.message), None)
            }
        };

    if let Some(ref log_dir) = log_directory {
        logging::cleanup_old_logs(log_dir);
    }

    debug!(
        config_path = %loaded.config_path.display(),
        status = ?loaded.status,
        "config_loaded"
    );

    // The credential/base-url/model are fixed into the client here; nothing
    // reads them implicitly later. A missing key surfaces at generation time.
    let completion_client = CompletionClient::new(&config.api);
    let app = App::new(
        completion_client,
        config,
        session_id.clone(),
        log_directory,
        logging_error,
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(ratatui::backend::CrosstermBackend::new(stdout))?;

    let result = run_app(terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;

    // Log session end
    if let Some(sid) = session_id {
        let duration = start_time.elapsed();
        info!(
            session_id = %sid,
            duration_secs = duration.as_secs_f64(),
            "session_end"
        );
    }

    result
}

fn run_app(mut terminal: DefaultTerminal, mut app: App) -> Result<()> {
    loop {
        // Pick up the outcome of an outstanding request, if any
        app.poll_generation();

        terminal.draw(|f| ui::draw_ui(f, &mut app))?;

        // Poll with a short timeout so the outcome channel stays drained
        if crossterm::event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = crossterm::event::read()?
            && handle_key(&mut app, key)
        {
            return Ok(());
        }
    }
}

/// Dispatch a key event. Returns true when the app should exit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => return true,
            KeyCode::Char('g') => app.start_generation(),
            KeyCode::Char('y') => app.copy_output(),
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Esc => return true,
        KeyCode::Tab | KeyCode::Down | KeyCode::Enter => app.form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.form.focus_prev(),
        KeyCode::Left => {
            if app.form.focus.is_text() {
                app.form.cursor_left();
            } else {
                app.form.selector_prev();
            }
        }
        KeyCode::Right => {
            if app.form.focus.is_text() {
                app.form.cursor_right();
            } else {
                app.form.selector_next();
            }
        }
        KeyCode::Home => app.form.cursor_home(),
        KeyCode::End => app.form.cursor_end(),
        KeyCode::Backspace => app.form.delete_char_before(),
        KeyCode::Delete => app.form.delete_char_at(),
        KeyCode::PageUp => {
            let page = app.output_pane_height.max(1);
            app.scroll_output_up(page);
        }
        KeyCode::PageDown => {
            let page = app.output_pane_height.max(1);
            app.scroll_output_down(page);
        }
        KeyCode::Char(c) => app.form.insert_char(c),
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppStatus;
    use crate::config::{ApiConfig, Config};
    use crate::form::FieldId;

    fn test_app() -> App {
        let client = CompletionClient::new(&ApiConfig::default());
        App::new(client, Config::default(), None, None, None)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_escape_and_ctrl_c_quit() {
        let mut app = test_app();
        assert!(handle_key(&mut app, key(KeyCode::Esc)));
        assert!(handle_key(&mut app, ctrl('c')));
        assert!(handle_key(&mut app, ctrl('q')));
    }

    #[test]
    fn test_typing_edits_focused_field() {
        let mut app = test_app();
        handle_key(&mut app, key(KeyCode::Char('h')));
        handle_key(&mut app, key(KeyCode::Char('i')));
        assert_eq!(app.form.fields.prompt, "hi");

        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.form.focus, FieldId::Role);
        handle_key(&mut app, key(KeyCode::Char('x')));
        assert_eq!(app.form.fields.role, "x");
    }

    #[test]
    fn test_generate_with_empty_prompt_dispatches_nothing() {
        let mut app = test_app();
        handle_key(&mut app, ctrl('g'));
        assert_eq!(app.status, AppStatus::Idle);
        assert!(app.outcome_receiver.is_none());
        assert_eq!(app.generation_count, 0);
    }

    #[test]
    fn test_arrows_cycle_selector_fields() {
        let mut app = test_app();
        // Focus the output format selector (fifth field)
        for _ in 0..4 {
            handle_key(&mut app, key(KeyCode::Tab));
        }
        assert_eq!(app.form.focus, FieldId::OutputFormat);

        handle_key(&mut app, key(KeyCode::Right));
        assert!(app.form.fields.output_format.is_some());
        handle_key(&mut app, key(KeyCode::Left));
        assert!(app.form.fields.output_format.is_none());
    }
}
