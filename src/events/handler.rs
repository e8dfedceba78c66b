//! Event handler for processing input events.

use super::{InputEvent, Key};
use crate::config::KeyBindings;
use crate::error::Result;
use crate::state::{Action, InputMode, Store};
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::time::{Duration, Instant};

/// Handles input events and produces actions.
pub struct EventHandler {
    /// Key bindings.
    keybindings: KeyBindings,
    /// Interval between ticks.
    tick_rate: Duration,
    /// When the last tick was emitted.
    last_tick: Instant,
    /// Store reference for state-aware handling.
    store_snapshot: Option<StoreSnapshot>,
}

/// Snapshot of relevant store state for event handling.
#[derive(Debug, Clone, Copy)]
struct StoreSnapshot {
    input_mode: InputMode,
    show_help: bool,
    has_notification: bool,
}

impl EventHandler {
    /// Create a new event handler.
    pub fn new(keybindings: KeyBindings, tick_rate: Duration) -> Self {
        Self {
            keybindings,
            tick_rate,
            last_tick: Instant::now(),
            store_snapshot: None,
        }
    }

    /// Update the store snapshot for state-aware event handling.
    pub fn update_store_snapshot(&mut self, store: &Store) {
        self.store_snapshot = Some(StoreSnapshot {
            input_mode: store.app.input_mode,
            show_help: store.app.show_help,
            has_notification: store.app.notification.is_some(),
        });
    }

    /// Get the next action: a tick once per tick rate, otherwise user input.
    ///
    /// Ticks are emitted on elapsed time, so a steady stream of keys does
    /// not hold them back.
    pub async fn next(&mut self) -> Result<Option<Action>> {
        let now = Instant::now();
        if self.tick_due(now) {
            return Ok(Some(Action::Tick));
        }

        if !event::poll(self.until_next_tick(now))? {
            let tick = self.tick_due(Instant::now());
            return Ok(tick.then_some(Action::Tick));
        }

        match event::read()? {
            CrosstermEvent::Key(key) => Ok(self.handle_key(key)),
            CrosstermEvent::Paste(text) => Ok(self.handle_paste(&text)),
            // Terminal will automatically redraw
            _ => Ok(None),
        }
    }

    /// Whether a tick is due at `now`; restarts the interval when it is.
    fn tick_due(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_tick) >= self.tick_rate {
            self.last_tick = now;
            true
        } else {
            false
        }
    }

    fn until_next_tick(&self, now: Instant) -> Duration {
        self.tick_rate.saturating_sub(now.saturating_duration_since(self.last_tick))
    }

    /// Handle a key event and return an optional action.
    fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        // Only process key press events
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let snapshot = self.store_snapshot?;
        let input = InputEvent::from(key);

        if input.matches("Ctrl+c") {
            return Some(Action::Quit);
        }

        match snapshot.input_mode {
            InputMode::Normal => self.handle_normal_mode(input, snapshot),
            InputMode::Search => self.handle_search_mode(input),
        }
    }

    fn handle_normal_mode(&self, input: InputEvent, snapshot: StoreSnapshot) -> Option<Action> {
        if snapshot.show_help {
            if input.matches(&self.keybindings.help) || input.key == Key::Escape {
                return Some(Action::ToggleHelp);
            }
            if !input.matches(&self.keybindings.quit) {
                return None;
            }
        }

        if input.matches(&self.keybindings.quit) {
            return Some(Action::Quit);
        }
        if input.matches(&self.keybindings.help) {
            return Some(Action::ToggleHelp);
        }
        if input.matches(&self.keybindings.search) || input.matches(&self.keybindings.insert) {
            return Some(Action::SetInputMode(InputMode::Search));
        }
        if input.matches(&self.keybindings.refresh) {
            return Some(Action::Refresh);
        }
        if input.key == Key::Escape && snapshot.has_notification {
            return Some(Action::DismissNotification);
        }

        None
    }

    fn handle_search_mode(&self, input: InputEvent) -> Option<Action> {
        if input.matches("Ctrl+u") {
            return Some(Action::ClearInput);
        }

        match input.key {
            Key::Enter => Some(Action::Submit),
            Key::Escape => Some(Action::SetInputMode(InputMode::Normal)),
            Key::Tab => Some(Action::AcceptSuggestion),
            Key::Up | Key::BackTab => Some(Action::SuggestionPrev),
            Key::Down => Some(Action::SuggestionNext),
            Key::Backspace => Some(Action::Backspace),
            Key::Delete => Some(Action::Delete),
            Key::Left => Some(Action::CursorLeft),
            Key::Right => Some(Action::CursorRight),
            Key::Home => Some(Action::CursorHome),
            Key::End => Some(Action::CursorEnd),
            _ => input.text_char().map(Action::InputChar),
        }
    }

    /// Pasted text is typed into the search box, first line only.
    fn handle_paste(&self, text: &str) -> Option<Action> {
        let snapshot = self.store_snapshot?;
        if snapshot.input_mode != InputMode::Search {
            return None;
        }
        text.lines()
            .next()
            .filter(|line| !line.is_empty())
            .map(|line| Action::InsertText(line.to_string()))
    }
}
