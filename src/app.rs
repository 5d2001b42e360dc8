//! Application state and core logic.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Instant;

use anyhow::anyhow;
use ratatui::style::Color;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tracing::{debug, info, warn};

use crate::client::{CompletionClient, GenerationOutcome, spawn_generate};
use crate::clipboard;
use crate::config::Config;
use crate::form::FormState;
use crate::prompt::{GENERATION_FAILED_MESSAGE, SYSTEM_INSTRUCTION, build_user_message};

/// Application status states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppStatus {
    Idle,
    Generating,
}

impl AppStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AppStatus::Idle => "IDLE",
            AppStatus::Generating => "GENERATING",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            AppStatus::Idle => Color::Cyan,
            AppStatus::Generating => Color::Green,
        }
    }
}

/// How long the "Copied" footer notice stays visible.
pub const COPIED_NOTICE_SECS: u64 = 2;

/// Main application state.
pub struct App {
    pub status: AppStatus,
    /// The seven user-editable fields plus focus/cursor state.
    pub form: FormState,
    /// Last generation result: completion text, the failure placeholder, or
    /// empty before the first attempt. Overwritten on every attempt.
    pub generated: String,
    pub output_scroll: u16,
    pub output_pane_height: u16,
    pub output_pane_width: u16,
    /// Receiver for the outcome of the outstanding request, if any.
    pub outcome_receiver: Option<Receiver<GenerationOutcome>>,
    /// Client for the completion service, configured at startup.
    pub client: CompletionClient,
    /// Session ID for this invocation (always populated when logging works).
    pub session_id: Option<String>,
    /// Directory where logs are written.
    pub log_directory: Option<PathBuf>,
    /// Error that occurred during logging initialization.
    pub logging_error: Option<String>,
    /// Loaded configuration.
    pub config: Config,
    /// Generation counter for logging, incremented on each dispatched request.
    pub generation_count: u64,
    /// When the result was last copied (for the "Copied" notice fade).
    pub copied_at: Option<Instant>,
}

impl App {
    pub fn new(
        client: CompletionClient,
        config: Config,
        session_id: Option<String>,
        log_directory: Option<PathBuf>,
        logging_error: Option<String>,
    ) -> Self {
        Self {
            status: AppStatus::Idle,
            form: FormState::default(),
            generated: String::new(),
            output_scroll: 0,
            output_pane_height: 0,
            output_pane_width: 0,
            outcome_receiver: None,
            client,
            session_id,
            log_directory,
            logging_error,
            config,
            generation_count: 0,
            copied_at: None,
        }
    }

    /// Whether a request is currently outstanding.
    pub fn in_flight(&self) -> bool {
        self.status == AppStatus::Generating
    }

    /// Check the generation preconditions and, when they pass, flip the
    /// in-flight flag and return the assembled user instruction.
    ///
    /// Returns None — and dispatches nothing — when the prompt is empty or a
    /// request is already outstanding. The in-flight flag is the only mutual
    /// exclusion: there is no queue and no second request while one is out.
    pub fn begin_generation(&mut self) -> Option<String> {
        if self.in_flight() {
            debug!("generation_already_in_flight");
            return None;
        }
        if self.form.fields.prompt.is_empty() {
            debug!("generation_blocked_empty_prompt");
            return None;
        }

        self.generation_count += 1;
        info!(generation = self.generation_count, "generation_start");
        self.status = AppStatus::Generating;
        Some(build_user_message(&self.form.fields))
    }

    /// Trigger a generation: assemble the instructions and hand them to a
    /// background task, keeping the event loop responsive.
    pub fn start_generation(&mut self) {
        let Some(user) = self.begin_generation() else {
            return;
        };
        let rx = spawn_generate(self.client.clone(), SYSTEM_INSTRUCTION.to_string(), user);
        self.outcome_receiver = Some(rx);
    }

    /// Drain the outcome channel; called every tick of the event loop.
    pub fn poll_generation(&mut self) {
        let Some(rx) = &self.outcome_receiver else {
            return;
        };
        match rx.try_recv() {
            Ok(outcome) => {
                self.outcome_receiver = None;
                self.complete_generation(outcome);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                // The task died without delivering; the flag must not stick.
                warn!("generation_channel_disconnected");
                self.outcome_receiver = None;
                self.complete_generation(Err(anyhow!("generation task exited without a result")));
            }
        }
    }

    /// Store the outcome of a generation attempt and clear the in-flight
    /// flag — always, success or failure.
    ///
    /// Every failure collapses to the one fixed user-visible string; the
    /// underlying reason goes to the log for the operator.
    pub fn complete_generation(&mut self, outcome: GenerationOutcome) {
        match outcome {
            Ok(text) => {
                info!(
                    generation = self.generation_count,
                    chars = text.len(),
                    "generation_complete"
                );
                self.generated = text;
            }
            Err(e) => {
                warn!(generation = self.generation_count, error = ?e, "generation_failed");
                self.generated = GENERATION_FAILED_MESSAGE.to_string();
            }
        }
        self.status = AppStatus::Idle;
        self.output_scroll = 0;
    }

    /// Copy the current result to the system clipboard, best effort.
    pub fn copy_output(&mut self) {
        if self.generated.is_empty() {
            debug!("copy_skipped_empty_output");
            return;
        }
        if clipboard::copy_text(&self.generated) {
            self.copied_at = Some(Instant::now());
        }
    }

    /// Whether the "Copied" notice should still be shown.
    pub fn copied_notice_visible(&self) -> bool {
        self.copied_at
            .is_some_and(|at| at.elapsed().as_secs() < COPIED_NOTICE_SECS)
    }

    /// Number of wrapped display lines the current result occupies.
    pub fn output_line_count(&self) -> u16 {
        if self.output_pane_width == 0 {
            return 0;
        }
        let content: Vec<Line> = self.generated.lines().map(Line::raw).collect();
        let paragraph = Paragraph::new(content)
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        paragraph.line_count(self.output_pane_width) as u16
    }

    pub fn max_output_scroll(&self) -> u16 {
        self.output_line_count()
            .saturating_sub(self.output_pane_height)
    }

    pub fn scroll_output_up(&mut self, amount: u16) {
        self.output_scroll = self.output_scroll.saturating_sub(amount);
    }

    pub fn scroll_output_down(&mut self, amount: u16) {
        self.output_scroll = (self.output_scroll + amount).min(self.max_output_scroll());
    }
}
