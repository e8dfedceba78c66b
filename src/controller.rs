//! Lookup controller.
//!
//! Sits between the event loop and the [`Store`]: lookup actions start or
//! finish background fetches, everything else goes straight to the reducer.

use crate::error::FetchError;
use crate::fetch::SnapshotSource;
use crate::history::HistoryStore;
use crate::market::{MarketSnapshot, NO_TIPS, TipPolicy};
use crate::state::{Action, Notification, Store};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// A running snapshot fetch.
///
/// Dropping or superseding the task aborts it.
#[derive(Debug)]
pub struct LookupTask {
    request_id: u64,
    handle: JoinHandle<()>,
}

impl LookupTask {
    /// Spawn a fetch for `name`; the result arrives as
    /// [`Action::LookupFinished`] on the store's channel.
    pub fn spawn(
        request_id: u64,
        name: String,
        source: Arc<dyn SnapshotSource>,
        store: &Store,
    ) -> Self {
        let action_tx = store.sender();
        let handle = tokio::spawn(async move {
            let result = source.fetch(&name).await;
            if let Err(e) = &result {
                tracing::warn!(request_id, name = %name, error = %e, "Lookup failed");
            }
            if action_tx
                .send(Action::LookupFinished {
                    request_id,
                    name,
                    result,
                })
                .is_err()
            {
                tracing::debug!(request_id, "Store gone before lookup finished");
            }
        });

        Self { request_id, handle }
    }

    /// Id of this lookup.
    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    /// Stop the fetch.
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for LookupTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Runs lookups and feeds their results through the tip policy and history.
pub struct Controller {
    source: Arc<dyn SnapshotSource>,
    history: HistoryStore,
    policy: Box<dyn TipPolicy>,
    next_request_id: u64,
    in_flight: Option<LookupTask>,
}

impl Controller {
    /// Create a controller.
    pub fn new(
        source: Arc<dyn SnapshotSource>,
        history: HistoryStore,
        policy: Box<dyn TipPolicy>,
    ) -> Self {
        Self {
            source,
            history,
            policy,
            next_request_id: 0,
            in_flight: None,
        }
    }

    /// Push the stored history into the store.
    pub fn load_history(&self, store: &mut Store) {
        store.reduce(Action::HistoryLoaded(self.history.list_all().to_vec()));
    }

    /// The history backing autocomplete.
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// The running lookup, if any.
    pub fn in_flight(&self) -> Option<&LookupTask> {
        self.in_flight.as_ref()
    }

    /// Handle an action.
    pub fn handle(&mut self, store: &mut Store, action: Action) {
        match action {
            Action::Submit => {
                let query = store.app.query();
                store.reduce(Action::Submit);
                if let Some(name) = query {
                    self.start_lookup(store, name);
                }
            }
            Action::Refresh => {
                let last = store.lookup.last_query.clone();
                store.reduce(Action::Refresh);
                if let Some(name) = last {
                    self.start_lookup(store, name);
                }
            }
            Action::LookupFinished {
                request_id,
                name,
                result,
            } => self.finish_lookup(store, request_id, name, result),
            Action::Quit => {
                self.cancel();
                store.reduce(Action::Quit);
            }
            other => store.reduce(other),
        }
    }

    /// Abort the running lookup, if any.
    pub fn cancel(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.cancel();
            tracing::debug!(request_id = task.request_id(), "Cancelled lookup");
        }
    }

    fn start_lookup(&mut self, store: &mut Store, name: String) {
        self.cancel();

        self.next_request_id += 1;
        let request_id = self.next_request_id;
        tracing::info!(request_id, name = %name, "Starting lookup");

        store.reduce(Action::LookupStarted {
            request_id,
            name: name.clone(),
        });
        self.in_flight = Some(LookupTask::spawn(
            request_id,
            name,
            Arc::clone(&self.source),
            store,
        ));
    }

    fn finish_lookup(
        &mut self,
        store: &mut Store,
        request_id: u64,
        name: String,
        result: std::result::Result<MarketSnapshot, FetchError>,
    ) {
        if !store.lookup.is_current(request_id) {
            tracing::debug!(request_id, "Ignoring superseded lookup");
            return;
        }
        if self
            .in_flight
            .as_ref()
            .is_some_and(|task| task.request_id() == request_id)
        {
            self.in_flight = None;
        }

        let tips = match &result {
            Ok(snapshot) => self
                .policy
                .tips(snapshot.demand_label(), snapshot.stability_label()),
            Err(_) => vec![NO_TIPS.to_string()],
        };
        let succeeded = result.is_ok();

        store.reduce(Action::LookupCompleted {
            request_id,
            result,
            tips,
        });

        if succeeded {
            match self.history.record_if_absent(&name) {
                Ok(true) => store.reduce(Action::HistoryRecorded(name.trim().to_string())),
                Ok(false) => {}
                Err(e) => {
                    tracing::error!(error = %e, "Failed to record history");
                    store.reduce(Action::ShowNotification(Notification::error(e.to_string())));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MockSnapshotSource;
    use crate::market::{CombinedScorePolicy, IndependentAxisPolicy};
    use crate::state::{LookupStatus, NotificationLevel};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use tokio::sync::mpsc;

    fn snapshot(name: &str) -> MarketSnapshot {
        MarketSnapshot::builder(name)
            .value(Some("1500".to_string()))
            .demand(Some("9/10".to_string()))
            .stability(Some("RISING".to_string()))
            .build()
    }

    fn setup(
        source: MockSnapshotSource,
        policy: Box<dyn TipPolicy>,
    ) -> (
        Controller,
        Store,
        mpsc::UnboundedReceiver<Action>,
        TempDir,
    ) {
        let dir = tempfile::tempdir().unwrap();
        let history = HistoryStore::open(dir.path().join("history.txt")).unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        let store = Store::new(tx);
        let controller = Controller::new(Arc::new(source), history, policy);
        (controller, store, rx, dir)
    }

    fn submit(controller: &mut Controller, store: &mut Store, name: &str) {
        store.app.set_input(name);
        controller.handle(store, Action::Submit);
    }

    async fn pump(
        controller: &mut Controller,
        store: &mut Store,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) {
        let action = rx.recv().await.unwrap();
        controller.handle(store, action);
    }

    #[tokio::test]
    async fn test_successful_lookup_records_history() {
        let mut source = MockSnapshotSource::new();
        source
            .expect_fetch()
            .times(1)
            .returning(|name| Ok(snapshot(name)));
        let (mut controller, mut store, mut rx, _dir) =
            setup(source, Box::new(CombinedScorePolicy));

        submit(&mut controller, &mut store, "  Giga Rex ");
        assert!(store.lookup.is_loading());
        pump(&mut controller, &mut store, &mut rx).await;

        assert_eq!(store.lookup.status, LookupStatus::Loaded);
        assert_eq!(store.lookup.value_text(), "1500");
        assert_eq!(
            store.lookup.tips,
            vec!["The market conditions are excellent! It's a great time to sell for high value."]
        );
        assert_eq!(controller.history().list_all(), ["Giga Rex"]);
        assert_eq!(store.history.entries, vec!["Giga Rex"]);
        assert!(controller.in_flight().is_none());
    }

    #[tokio::test]
    async fn test_failed_lookup_not_recorded() {
        let mut source = MockSnapshotSource::new();
        source
            .expect_fetch()
            .returning(|_| Err(FetchError::status(404, "https://example.invalid")));
        let (mut controller, mut store, mut rx, _dir) =
            setup(source, Box::new(CombinedScorePolicy));

        submit(&mut controller, &mut store, "Nope");
        pump(&mut controller, &mut store, &mut rx).await;

        assert!(store.lookup.error().is_some());
        assert_eq!(store.lookup.tips, vec![NO_TIPS]);
        assert!(controller.history().is_empty());
    }

    #[tokio::test]
    async fn test_blank_submit_never_fetches() {
        let mut source = MockSnapshotSource::new();
        source.expect_fetch().times(0);
        let (mut controller, mut store, _rx, _dir) =
            setup(source, Box::new(CombinedScorePolicy));

        submit(&mut controller, &mut store, "   ");
        assert!(!store.lookup.is_loading());
        assert!(controller.in_flight().is_none());
        assert_eq!(
            store.app.notification.as_ref().map(|n| n.level),
            Some(NotificationLevel::Warning)
        );
    }

    #[tokio::test]
    async fn test_newer_lookup_supersedes_older() {
        let mut source = MockSnapshotSource::new();
        source.expect_fetch().returning(|name| Ok(snapshot(name)));
        let (mut controller, mut store, mut rx, _dir) =
            setup(source, Box::new(CombinedScorePolicy));

        submit(&mut controller, &mut store, "First");
        submit(&mut controller, &mut store, "Second");
        assert_eq!(controller.in_flight().map(|t| t.request_id()), Some(2));

        // A late result from the first request must not land.
        controller.handle(
            &mut store,
            Action::LookupFinished {
                request_id: 1,
                name: "First".to_string(),
                result: Ok(snapshot("First")),
            },
        );
        assert!(store.lookup.is_loading());
        assert!(controller.history().is_empty());

        loop {
            pump(&mut controller, &mut store, &mut rx).await;
            if !store.lookup.is_loading() {
                break;
            }
        }
        assert_eq!(
            store.lookup.snapshot.as_ref().map(|s| s.creature_name()),
            Some("Second")
        );
        assert_eq!(controller.history().list_all(), ["Second"]);
    }

    #[tokio::test]
    async fn test_refresh_repeats_last_lookup() {
        let mut source = MockSnapshotSource::new();
        source
            .expect_fetch()
            .times(2)
            .returning(|name| Ok(snapshot(name)));
        let (mut controller, mut store, mut rx, _dir) =
            setup(source, Box::new(IndependentAxisPolicy));

        submit(&mut controller, &mut store, "Jotunn");
        pump(&mut controller, &mut store, &mut rx).await;

        store.app.clear_input();
        controller.handle(&mut store, Action::Refresh);
        assert!(store.lookup.is_loading());
        pump(&mut controller, &mut store, &mut rx).await;

        assert_eq!(store.lookup.tips.len(), 2);
        assert_eq!(controller.history().list_all(), ["Jotunn"]);
    }

    #[tokio::test]
    async fn test_history_write_failure_shows_error() {
        let mut source = MockSnapshotSource::new();
        source.expect_fetch().returning(|name| Ok(snapshot(name)));

        let dir = tempfile::tempdir().unwrap();
        let blocked = dir.path().join("blocked");
        let history = HistoryStore::open(&blocked).unwrap();
        std::fs::create_dir_all(&blocked).unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut store = Store::new(tx);
        let mut controller =
            Controller::new(Arc::new(source), history, Box::new(CombinedScorePolicy));

        submit(&mut controller, &mut store, "Giga Rex");
        pump(&mut controller, &mut store, &mut rx).await;

        assert_eq!(store.lookup.status, LookupStatus::Loaded);
        assert_eq!(
            store.app.notification.as_ref().map(|n| n.level),
            Some(NotificationLevel::Error)
        );
    }
}
