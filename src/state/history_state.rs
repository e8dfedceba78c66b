//! Autocomplete state over the lookup history.

use crate::history::suggest;

/// History entries and the suggestions for the current input.
#[derive(Debug)]
pub struct HistoryState {
    /// Known names, first-seen order.
    pub entries: Vec<String>,
    /// Suggestions for the current input.
    pub suggestions: Vec<String>,
    /// Highlighted suggestion.
    pub selected: Option<usize>,
    /// Maximum number of suggestions.
    pub limit: usize,
}

impl Default for HistoryState {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            suggestions: Vec::new(),
            selected: None,
            limit: 5,
        }
    }
}

impl HistoryState {
    /// Create with a suggestion limit.
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            ..Default::default()
        }
    }

    /// Recompute suggestions for `input`.
    pub fn refresh(&mut self, input: &str) {
        self.suggestions = suggest(&self.entries, input, self.limit);
        self.selected = None;
    }

    /// Clear suggestions.
    pub fn clear(&mut self) {
        self.suggestions.clear();
        self.selected = None;
    }

    /// Add a name if it is new.
    pub fn add(&mut self, name: &str) {
        if !self.entries.iter().any(|e| e == name) {
            self.entries.push(name.to_string());
        }
    }

    /// Highlight the next suggestion, wrapping around.
    pub fn select_next(&mut self) {
        if self.suggestions.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1) % self.suggestions.len(),
            None => 0,
        });
    }

    /// Highlight the previous suggestion, wrapping around.
    pub fn select_previous(&mut self) {
        if self.suggestions.is_empty() {
            return;
        }
        let last = self.suggestions.len() - 1;
        self.selected = Some(match self.selected {
            Some(0) | None => last,
            Some(i) => i - 1,
        });
    }

    /// Highlighted suggestion, or the first one.
    pub fn chosen(&self) -> Option<&str> {
        self.suggestions
            .get(self.selected.unwrap_or(0))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn state() -> HistoryState {
        let mut state = HistoryState::new(3);
        for name in ["Giga Rex", "Garra", "Jotunn", "Gigantis"] {
            state.add(name);
        }
        state
    }

    #[test]
    fn test_refresh_and_cycle() {
        let mut state = state();
        state.refresh("gi");
        assert_eq!(state.suggestions, vec!["Giga Rex", "Gigantis"]);
        assert_eq!(state.chosen(), Some("Giga Rex"));

        state.select_next();
        state.select_next();
        assert_eq!(state.chosen(), Some("Gigantis"));
        state.select_next();
        assert_eq!(state.chosen(), Some("Giga Rex"));
        state.select_previous();
        assert_eq!(state.chosen(), Some("Gigantis"));
    }

    #[test]
    fn test_limit_and_clear() {
        let mut state = state();
        state.add("Garra");
        assert_eq!(state.entries.len(), 4);

        state.refresh("g");
        assert_eq!(state.suggestions.len(), 3);
        state.clear();
        assert_eq!(state.chosen(), None);
    }
}
