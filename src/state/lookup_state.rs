//! Lookup state: the request in flight and the last outcome.

use crate::error::FetchError;
use crate::market::{MarketSnapshot, NO_TIPS, NOT_AVAILABLE, UNKNOWN, format_timestamp};
use chrono::{DateTime, Utc};

/// Progress of the current lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LookupStatus {
    /// Nothing searched yet.
    #[default]
    Idle,
    /// A fetch is running.
    Loading { request_id: u64, name: String },
    /// The last fetch produced a snapshot.
    Loaded,
    /// The last fetch failed.
    Failed(FetchError),
}

/// Lookup state.
#[derive(Debug, Default)]
pub struct LookupState {
    /// Current status.
    pub status: LookupStatus,
    /// Snapshot from the last successful lookup.
    pub snapshot: Option<MarketSnapshot>,
    /// Tips shown under the snapshot.
    pub tips: Vec<String>,
    /// Name of the last submitted lookup.
    pub last_query: Option<String>,
    /// Id of the newest lookup; older results are ignored.
    pub current_request: Option<u64>,
    /// Name of the active tip policy.
    pub policy_name: String,
    /// When the last lookup finished.
    pub finished_at: Option<DateTime<Utc>>,
}

impl LookupState {
    /// Create a lookup state for the given tip policy.
    pub fn new(policy_name: impl Into<String>) -> Self {
        Self {
            tips: vec![NOT_AVAILABLE.to_string()],
            policy_name: policy_name.into(),
            ..Default::default()
        }
    }

    /// Whether `request_id` is the newest lookup.
    pub fn is_current(&self, request_id: u64) -> bool {
        self.current_request == Some(request_id)
    }

    /// Whether a fetch is running.
    pub fn is_loading(&self) -> bool {
        matches!(self.status, LookupStatus::Loading { .. })
    }

    /// Record the start of a lookup.
    pub fn start(&mut self, request_id: u64, name: String) {
        self.current_request = Some(request_id);
        self.last_query = Some(name.clone());
        self.status = LookupStatus::Loading { request_id, name };
    }

    /// Apply a finished lookup. Returns `false` for a stale result.
    pub fn finish(
        &mut self,
        request_id: u64,
        result: Result<MarketSnapshot, FetchError>,
        tips: Vec<String>,
    ) -> bool {
        if !self.is_current(request_id) {
            return false;
        }

        match result {
            Ok(snapshot) => {
                self.finished_at = Some(snapshot.fetched_at());
                self.snapshot = Some(snapshot);
                self.status = LookupStatus::Loaded;
                self.tips = tips;
            }
            Err(err) => {
                self.finished_at = Some(Utc::now());
                self.snapshot = None;
                self.status = LookupStatus::Failed(err);
                self.tips = vec![NO_TIPS.to_string()];
            }
        }
        true
    }

    /// Error to show, if the last lookup failed.
    pub fn error(&self) -> Option<&FetchError> {
        match &self.status {
            LookupStatus::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Value field text.
    pub fn value_text(&self) -> &str {
        self.snapshot
            .as_ref()
            .map(|s| s.value_label())
            .unwrap_or(NOT_AVAILABLE)
    }

    /// Demand field text.
    pub fn demand_text(&self) -> &str {
        self.snapshot
            .as_ref()
            .map(|s| s.demand_label())
            .unwrap_or(NOT_AVAILABLE)
    }

    /// Stability field text.
    pub fn stability_text(&self) -> &str {
        self.snapshot
            .as_ref()
            .map(|s| s.stability_label())
            .unwrap_or(NOT_AVAILABLE)
    }

    /// Whether the failed lookup is worth repeating as is.
    pub fn can_retry(&self) -> bool {
        self.error().is_some_and(|err| err.kind.is_retryable())
    }

    /// Time the last lookup finished, as `HH:MM:SS` UTC.
    pub fn finished_at_text(&self) -> Option<String> {
        self.finished_at.map(|at| at.format("%H:%M:%S").to_string())
    }

    /// Page timestamp, formatted for display.
    pub fn last_updated_text(&self) -> String {
        match self.snapshot.as_ref().and_then(|s| s.last_updated()) {
            Some(raw) => format_timestamp(raw),
            None => UNKNOWN.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn snapshot() -> MarketSnapshot {
        MarketSnapshot::builder("Giga Rex")
            .value(Some("1200".to_string()))
            .demand(Some("8/10".to_string()))
            .stability(Some("STABLE".to_string()))
            .build()
    }

    #[test]
    fn test_initial_placeholders() {
        let state = LookupState::new("combined");
        assert_eq!(state.value_text(), "N/A");
        assert_eq!(state.demand_text(), "N/A");
        assert_eq!(state.stability_text(), "N/A");
        assert_eq!(state.last_updated_text(), "Unknown");
        assert_eq!(state.tips, vec!["N/A"]);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_finish_current_request() {
        let mut state = LookupState::new("combined");
        state.start(1, "Giga Rex".to_string());
        assert!(state.is_loading());

        assert!(state.finish(1, Ok(snapshot()), vec!["tip".to_string()]));
        assert_eq!(state.status, LookupStatus::Loaded);
        assert_eq!(state.value_text(), "1200");
        assert_eq!(state.tips, vec!["tip"]);
    }

    #[test]
    fn test_finished_at_is_fetch_time() {
        let mut state = LookupState::new("combined");
        assert_eq!(state.finished_at_text(), None);

        let fetched = snapshot();
        let fetched_at = fetched.fetched_at();
        state.start(1, "Giga Rex".to_string());
        state.finish(1, Ok(fetched), vec!["tip".to_string()]);

        assert_eq!(state.finished_at, Some(fetched_at));
        assert_eq!(
            state.finished_at_text(),
            Some(fetched_at.format("%H:%M:%S").to_string())
        );
    }

    #[test]
    fn test_can_retry_follows_error_kind() {
        let mut state = LookupState::new("combined");
        assert!(!state.can_retry());

        state.start(1, "Giga Rex".to_string());
        state.finish(1, Err(FetchError::transport("reset")), Vec::new());
        assert!(state.can_retry());

        state.start(2, "Giga Rex".to_string());
        state.finish(2, Err(FetchError::status(503, "x")), Vec::new());
        assert!(state.can_retry());

        state.start(3, "Nope".to_string());
        state.finish(3, Err(FetchError::status(404, "x")), Vec::new());
        assert!(!state.can_retry());
    }

    #[test]
    fn test_stale_result_ignored() {
        let mut state = LookupState::new("combined");
        state.start(1, "Old".to_string());
        state.start(2, "New".to_string());

        assert!(!state.finish(1, Ok(snapshot()), vec!["tip".to_string()]));
        assert!(state.snapshot.is_none());
        assert_eq!(
            state.status,
            LookupStatus::Loading {
                request_id: 2,
                name: "New".to_string()
            }
        );
    }

    #[test]
    fn test_failure_resets_fields() {
        let mut state = LookupState::new("combined");
        state.start(1, "Giga Rex".to_string());
        state.finish(1, Ok(snapshot()), vec!["tip".to_string()]);

        state.start(2, "Nope".to_string());
        state.finish(2, Err(FetchError::status(404, "x")), Vec::new());
        assert_eq!(state.value_text(), "N/A");
        assert_eq!(state.tips, vec![NO_TIPS]);
        assert_eq!(
            state.error().map(|e| e.kind.label()),
            Some("Creature not found (HTTP 404)".to_string())
        );
    }
}
