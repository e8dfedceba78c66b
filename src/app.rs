//! Main application module.
//!
//! This module contains the main `App` struct that coordinates
//! the event loop, state management, and rendering.

use crate::config::Config;
use crate::controller::Controller;
use crate::error::Result;
use crate::events::EventHandler;
use crate::fetch::{SnapshotFetcher, SnapshotSource};
use crate::history::HistoryStore;
use crate::state::{Action, Notification, Store};
use crate::ui::Ui;

use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// The main application.
pub struct App {
    /// Terminal.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application store.
    store: Store,
    /// Event handler.
    event_handler: EventHandler,
    /// Action receiver.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Lookup controller.
    controller: Controller,
}

impl App {
    /// Create a new application.
    pub async fn new(config: Config) -> Result<Self> {
        // Build everything that can fail before touching the terminal
        let fetcher = SnapshotFetcher::new(config.scraper.clone())?;
        let source: Arc<dyn SnapshotSource> = Arc::new(fetcher);

        let history_path = config.history_path()?;
        let (history, history_error) = match HistoryStore::open(&history_path) {
            Ok(history) => (history, None),
            Err(e) => {
                tracing::warn!(path = %history_path.display(), error = %e, "Starting with empty history");
                (HistoryStore::empty(&history_path), Some(e))
            }
        };

        let policy = config.tips.policy.build();
        tracing::info!(policy = policy.name(), "Using trading tip policy");

        // Create action channel
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        // Create store
        let mut store = Store::with_config(&config, action_tx);
        let controller = Controller::new(source, history, policy);
        controller.load_history(&mut store);
        if let Some(e) = history_error {
            store.reduce(Action::ShowNotification(Notification::error(e.to_string())));
        }

        // Create event handler
        let event_handler = EventHandler::new(
            config.keybindings.clone(),
            Duration::from_millis(config.ui.tick_rate_ms.max(10)),
        );

        // Set up terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            store,
            event_handler,
            action_rx,
            controller,
        })
    }

    /// Run the application event loop.
    pub async fn run(&mut self) -> Result<()> {
        // Main event loop
        loop {
            // Update event handler with current state
            self.event_handler.update_store_snapshot(&self.store);

            // Render UI
            self.terminal.draw(|frame| {
                Ui::render(frame, &self.store);
            })?;

            // Handle events and actions
            tokio::select! {
                // Handle terminal events
                result = self.event_handler.next() => {
                    if let Some(action) = result? {
                        self.handle_action(action);
                    }
                }

                // Handle actions from the channel
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }
            }

            // Check if we should quit
            if self.store.app.should_quit {
                break;
            }
        }

        self.controller.cancel();
        Ok(())
    }

    /// Handle an action.
    fn handle_action(&mut self, action: Action) {
        if !matches!(action, Action::Tick) {
            tracing::trace!(?action, "Handling action");
        }
        self.controller.handle(&mut self.store, action);
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        );
        let _ = self.terminal.show_cursor();
    }
}
