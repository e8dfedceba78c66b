//! State management for cosvalue.
//!
//! This module provides centralized state management with a unidirectional
//! data flow pattern inspired by Redux/Elm architecture. Widgets only read
//! the [`Store`]; every change goes through [`Store::reduce`].

mod app_state;
mod backdrop_state;
mod history_state;
mod lookup_state;

pub use app_state::{AppState, InputMode};
pub use backdrop_state::{BACKDROP_HEIGHT, BACKDROP_WIDTH, BackdropState, Stroke};
pub use history_state::HistoryState;
pub use lookup_state::{LookupState, LookupStatus};

use crate::config::Config;
use crate::error::FetchError;
use crate::market::MarketSnapshot;
use tokio::sync::mpsc;

/// Shown when a lookup is submitted with a blank name.
pub const INVALID_NAME_MESSAGE: &str = "Please enter a valid creature name.";

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone)]
pub enum Action {
    // Input
    SetInputMode(InputMode),
    InputChar(char),
    InsertText(String),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    ClearInput,

    // Autocomplete
    SuggestionNext,
    SuggestionPrev,
    AcceptSuggestion,
    HistoryLoaded(Vec<String>),
    HistoryRecorded(String),

    // Lookup
    Submit,
    Refresh,
    LookupStarted {
        request_id: u64,
        name: String,
    },
    /// Raw result delivered by the background task.
    LookupFinished {
        request_id: u64,
        name: String,
        result: std::result::Result<MarketSnapshot, FetchError>,
    },
    /// Result together with the tips derived from it.
    LookupCompleted {
        request_id: u64,
        result: std::result::Result<MarketSnapshot, FetchError>,
        tips: Vec<String>,
    },

    // UI
    ToggleHelp,
    ShowNotification(Notification),
    DismissNotification,
    Tick,

    // Quit
    Quit,
}

/// A notification to display to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub duration_secs: u64,
}

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Info,
            duration_secs: 3,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Warning,
            duration_secs: 5,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Error,
            duration_secs: 10,
        }
    }

    /// Title for the popup.
    pub fn title(&self) -> &'static str {
        match self.level {
            NotificationLevel::Info => "Info",
            NotificationLevel::Warning => "Input Error",
            NotificationLevel::Error => "Error",
        }
    }
}

/// The global state store.
#[derive(Debug)]
pub struct Store {
    /// Application state.
    pub app: AppState,
    /// Lookup state.
    pub lookup: LookupState,
    /// History and autocomplete state.
    pub history: HistoryState,
    /// Backdrop animation state.
    pub backdrop: BackdropState,
    /// Display settings.
    pub ui: crate::config::UiConfig,
    /// Normal-mode key bindings, for the help panel.
    pub keys: crate::config::KeyBindings,
    /// Ticks left before the notification is dismissed.
    notification_ticks: u64,
    /// Action sender for dispatching actions.
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Store {
    /// Create a new store with the given action sender.
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self::with_config(&Config::default(), action_tx)
    }

    /// Create a store configured from `config`.
    pub fn with_config(config: &Config, action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            app: AppState::new(),
            lookup: LookupState::new(config.tips.policy.build().name()),
            history: HistoryState::new(config.history.max_suggestions),
            backdrop: BackdropState::new(config.ui.animate_backdrop, config.ui.backdrop_strokes),
            ui: config.ui.clone(),
            keys: config.keybindings.clone(),
            notification_ticks: 0,
            action_tx,
        }
    }

    /// Sender for background tasks.
    pub fn sender(&self) -> mpsc::UnboundedSender<Action> {
        self.action_tx.clone()
    }

    /// Apply an action to update state.
    pub fn reduce(&mut self, action: Action) {
        match action {
            // Input
            Action::SetInputMode(mode) => {
                self.app.input_mode = mode;
                if mode == InputMode::Normal {
                    self.history.clear();
                }
            }
            Action::InputChar(c) => {
                self.app.push_char(c);
                self.refresh_suggestions();
            }
            Action::InsertText(text) => {
                for c in text.chars().filter(|c| !c.is_control()) {
                    self.app.push_char(c);
                }
                self.refresh_suggestions();
            }
            Action::Backspace => {
                self.app.pop_char();
                self.refresh_suggestions();
            }
            Action::Delete => {
                self.app.delete_char();
                self.refresh_suggestions();
            }
            Action::CursorLeft => self.app.cursor_left(),
            Action::CursorRight => self.app.cursor_right(),
            Action::CursorHome => self.app.cursor_home(),
            Action::CursorEnd => self.app.cursor_end(),
            Action::ClearInput => {
                self.app.clear_input();
                self.history.clear();
            }

            // Autocomplete
            Action::SuggestionNext => self.history.select_next(),
            Action::SuggestionPrev => self.history.select_previous(),
            Action::AcceptSuggestion => {
                if let Some(name) = self.history.chosen().map(str::to_string) {
                    self.app.set_input(&name);
                    self.history.clear();
                }
            }
            Action::HistoryLoaded(entries) => {
                self.history.entries = entries;
                self.refresh_suggestions();
            }
            Action::HistoryRecorded(name) => self.history.add(&name),

            // Lookup
            Action::Submit => {
                if self.app.query().is_none() {
                    self.notify(Notification::warning(INVALID_NAME_MESSAGE));
                } else {
                    self.history.clear();
                }
            }
            Action::Refresh => {
                if self.lookup.last_query.is_none() {
                    self.notify(Notification::info("Nothing to refresh yet"));
                }
            }
            Action::LookupStarted { request_id, name } => {
                self.lookup.start(request_id, name);
            }
            Action::LookupFinished { request_id, .. } => {
                // Tips are attached by the controller before the result lands.
                tracing::debug!(request_id, "Ignoring unprocessed lookup result");
            }
            Action::LookupCompleted {
                request_id,
                result,
                tips,
            } => {
                if !self.lookup.finish(request_id, result, tips) {
                    tracing::debug!(request_id, "Discarded stale lookup result");
                }
            }

            // UI
            Action::ToggleHelp => self.app.show_help = !self.app.show_help,
            Action::ShowNotification(notification) => self.notify(notification),
            Action::DismissNotification => {
                self.app.notification = None;
                self.notification_ticks = 0;
            }
            Action::Tick => self.tick(),

            // Quit
            Action::Quit => {
                self.app.should_quit = true;
            }
        }
    }

    fn notify(&mut self, notification: Notification) {
        let tick_ms = self.ui.tick_rate_ms.max(1);
        self.notification_ticks = (notification.duration_secs * 1000).div_ceil(tick_ms);
        self.app.notification = Some(notification);
    }

    fn tick(&mut self) {
        self.backdrop.regenerate(&mut rand::thread_rng());

        if self.app.notification.is_some() {
            self.notification_ticks = self.notification_ticks.saturating_sub(1);
            if self.notification_ticks == 0 {
                self.app.notification = None;
            }
        }
    }

    fn refresh_suggestions(&mut self) {
        if self.app.is_editing() {
            self.history.refresh(&self.app.input_buffer);
        }
    }
}
