use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use neet_pg_page_model::{NoticeSurface, SelectionControl};
use tracing::{debug, info, instrument, warn};

use crate::quota::{FetchError, QuotaSource, FETCH_FAILURE_NOTICE};

/// What a course change did to the quota control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Empty course: control reset to the placeholder, nothing requested.
    Cleared,
    /// Response applied; `count` options follow the placeholder.
    Populated { count: usize },
    /// Request failed; control left at the placeholder and a notice shown.
    Failed(FetchError),
    /// A newer course change arrived first; the result was dropped.
    Superseded { sequence: u64 },
}

/// A course change that has been registered but not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub sequence: u64,
    pub course: String,
}

/// Repopulates the quota dropdown whenever the selected course changes.
///
/// Each change takes the next sequence number. A response (or failure) is
/// only applied while its number is still the latest, so a slow reply for
/// an earlier course never overwrites a newer selection.
pub struct QuotaLoader<S> {
    source: S,
    control: Arc<Mutex<SelectionControl>>,
    notice: Arc<dyn NoticeSurface>,
    sequence: AtomicU64,
}

impl<S: QuotaSource> QuotaLoader<S> {
    pub fn new(
        source: S,
        control: Arc<Mutex<SelectionControl>>,
        notice: Arc<dyn NoticeSurface>,
    ) -> Self {
        Self {
            source,
            control,
            notice,
            sequence: AtomicU64::new(0),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn control(&self) -> Arc<Mutex<SelectionControl>> {
        Arc::clone(&self.control)
    }

    pub(crate) fn control_mutex(&self) -> &Mutex<SelectionControl> {
        &self.control
    }

    /// Copy of the quota control as it stands.
    pub fn snapshot(&self) -> SelectionControl {
        lock(&self.control).clone()
    }

    /// Sequence number of the most recent course change.
    pub fn latest_sequence(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    /// Handles a course change end to end.
    pub async fn course_changed(&self, course: &str) -> LoadOutcome {
        let ticket = self.begin(course);
        self.complete(ticket).await
    }

    /// Synchronous half of a course change: takes the next sequence number
    /// and resets the control to the placeholder. Call this when the event
    /// fires so event order, not task scheduling order, decides which
    /// response wins.
    pub fn begin(&self, course: &str) -> LoadTicket {
        let mut control = lock(&self.control);
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        control.reset();
        LoadTicket {
            sequence,
            course: course.to_string(),
        }
    }

    /// Asynchronous half: requests the quotas and applies them if the
    /// ticket is still the latest.
    #[instrument(skip(self, ticket), fields(course = %ticket.course, sequence = ticket.sequence))]
    pub async fn complete(&self, ticket: LoadTicket) -> LoadOutcome {
        let LoadTicket { sequence, course } = ticket;

        if course.is_empty() {
            debug!("course cleared, quota list reset");
            return LoadOutcome::Cleared;
        }

        let result = self.source.fetch_quotas(&course).await;

        // Checked and applied under the same lock that `begin` takes.
        let mut control = lock(&self.control);
        let latest = self.latest_sequence();
        if latest != sequence {
            debug!(latest, "dropping superseded quota response");
            return LoadOutcome::Superseded { sequence };
        }

        match result {
            Ok(quotas) => {
                control.reset();
                let count = control.extend_values(quotas);
                info!(count, "quota list populated");
                LoadOutcome::Populated { count }
            }
            Err(err) => {
                control.reset();
                warn!(error = %err, "failed to load quotas");
                // Notified under the lock so a newer `begin` cannot interleave.
                self.notice.notify(FETCH_FAILURE_NOTICE);
                LoadOutcome::Failed(err)
            }
        }
    }
}

// Controls hold plain data, so a poisoned lock is still consistent.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use neet_pg_page_model::NoticeOverlay;
    use std::collections::HashMap;

    struct StaticSource(HashMap<&'static str, Vec<&'static str>>);

    impl QuotaSource for StaticSource {
        async fn fetch_quotas(&self, course: &str) -> Result<Vec<String>, FetchError> {
            self.0
                .get(course)
                .map(|q| q.iter().map(|s| s.to_string()).collect())
                .ok_or_else(|| FetchError::Network("connection refused".to_string()))
        }
    }

    fn loader() -> (QuotaLoader<StaticSource>, Arc<NoticeOverlay>) {
        let mut catalog = HashMap::new();
        catalog.insert("MD PAEDIATRICS", vec!["All India", "Deemed", "Central Institute"]);
        catalog.insert("MD DERMATOLOGY", vec![]);
        let notice = Arc::new(NoticeOverlay::new());
        let loader = QuotaLoader::new(
            StaticSource(catalog),
            Arc::new(Mutex::new(SelectionControl::quota())),
            notice.clone(),
        );
        (loader, notice)
    }

    #[tokio::test]
    async fn test_populates_in_server_order() {
        let (loader, notice) = loader();
        let outcome = loader.course_changed("MD PAEDIATRICS").await;

        assert_eq!(outcome, LoadOutcome::Populated { count: 3 });
        let control = loader.snapshot();
        assert_eq!(control.options()[0].label, "-- choose quota --");
        assert_eq!(control.values(), vec!["All India", "Deemed", "Central Institute"]);
        assert_eq!(notice.shown_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_course_clears_without_request() {
        let (loader, _) = loader();
        loader.course_changed("MD PAEDIATRICS").await;
        assert_eq!(loader.course_changed("").await, LoadOutcome::Cleared);
        assert!(loader.snapshot().is_empty());
        assert_eq!(loader.latest_sequence(), 2);
    }

    #[tokio::test]
    async fn test_course_without_quotas() {
        let (loader, notice) = loader();
        assert_eq!(
            loader.course_changed("MD DERMATOLOGY").await,
            LoadOutcome::Populated { count: 0 }
        );
        assert!(loader.snapshot().is_empty());
        assert!(!notice.is_visible());
    }

    #[tokio::test]
    async fn test_failure_shows_notice_once() {
        let (loader, notice) = loader();
        loader.course_changed("MD PAEDIATRICS").await;
        let outcome = loader.course_changed("UNKNOWN").await;

        assert!(matches!(outcome, LoadOutcome::Failed(FetchError::Network(_))));
        assert!(loader.snapshot().is_empty());
        assert_eq!(notice.shown_count(), 1);
        assert_eq!(notice.message(), FETCH_FAILURE_NOTICE);
    }

    /// Records whether the quota control was locked when notified.
    struct LockCheckingNotice {
        control: Arc<Mutex<SelectionControl>>,
        held: Mutex<Vec<bool>>,
    }

    impl NoticeSurface for LockCheckingNotice {
        fn notify(&self, _message: &str) {
            let held = self.control.try_lock().is_err();
            self.held.lock().unwrap().push(held);
        }
    }

    #[tokio::test]
    async fn test_failure_notice_is_raised_under_the_control_lock() {
        let control = Arc::new(Mutex::new(SelectionControl::quota()));
        let notice = Arc::new(LockCheckingNotice {
            control: control.clone(),
            held: Mutex::new(Vec::new()),
        });
        let loader = QuotaLoader::new(StaticSource(HashMap::new()), control, notice.clone());

        let outcome = loader.course_changed("UNKNOWN").await;

        assert!(matches!(outcome, LoadOutcome::Failed(_)));
        assert_eq!(*notice.held.lock().unwrap(), vec![true]);
    }

    #[tokio::test]
    async fn test_superseded_failure_is_silent() {
        let (loader, notice) = loader();
        let failing = loader.begin("UNKNOWN");
        loader.begin("MD PAEDIATRICS");

        assert_eq!(
            loader.complete(failing).await,
            LoadOutcome::Superseded { sequence: 1 }
        );
        assert_eq!(notice.shown_count(), 0);
        assert!(!notice.is_visible());
    }

    #[tokio::test]
    async fn test_older_ticket_is_superseded() {
        let (loader, notice) = loader();
        let older = loader.begin("UNKNOWN");
        let newer = loader.begin("MD PAEDIATRICS");
        assert_eq!(newer.sequence, older.sequence + 1);

        assert_eq!(
            loader.complete(newer).await,
            LoadOutcome::Populated { count: 3 }
        );
        assert_eq!(
            loader.complete(older).await,
            LoadOutcome::Superseded { sequence: 1 }
        );
        assert_eq!(loader.snapshot().len(), 4);
        assert_eq!(notice.shown_count(), 0);
    }
}
