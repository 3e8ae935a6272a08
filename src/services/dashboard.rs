//! Dashboard state and the submission handler.
//!
//! [`Dashboard`] owns every piece of mutable state behind one mutex. The
//! gateway call runs without the lock held, and at most one call may be
//! outstanding at a time.

use super::{ComparisonView, HistoryTracker, MetricKey, MetricSelector, RecordStore};
use crate::config::DashboardSettings;
use crate::gateway::AnalysisGateway;
use crate::models::{AnalysisMode, HistoryEntry, Language, ResultEntry, ResultId};
use crate::observability::{GATEWAY_DURATION_MS, SUBMISSIONS_TOTAL};
use crate::rendering::Messages;
use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::instrument;

/// Progress of the current or most recent submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CrawlStatus {
    /// Nothing happening.
    #[default]
    Idle,
    /// Waiting on the gateway.
    Loading,
    /// The last submission succeeded. Reads as `Idle` after the hold elapses.
    Success,
    /// The last submission failed; see the error banner.
    Error,
}

impl CrawlStatus {
    /// Returns the status as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for CrawlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything the dashboard shows.
#[derive(Debug)]
pub struct DashboardState {
    /// Analysis results, newest first.
    pub store: RecordStore,
    /// Recent queries.
    pub history: HistoryTracker,
    /// Current analysis mode.
    pub mode: AnalysisMode,
    /// Display and answer language.
    pub language: Language,
    /// Pending input text.
    pub input: String,
    /// Visible optional metrics.
    pub selector: MetricSelector,
    /// Banner text for the last failure.
    pub error_message: Option<String>,
    status: CrawlStatus,
    succeeded_at: Option<Instant>,
}

impl DashboardState {
    fn new(settings: &DashboardSettings) -> Self {
        Self {
            store: RecordStore::new(),
            history: HistoryTracker::with_capacity(settings.history_capacity),
            mode: settings.mode,
            language: settings.language,
            input: String::new(),
            selector: MetricSelector::default(),
            error_message: None,
            status: CrawlStatus::Idle,
            succeeded_at: None,
        }
    }

    /// Status as of `now`, given the success hold.
    fn status_at(&self, now: Instant, hold: Duration) -> CrawlStatus {
        match (self.status, self.succeeded_at) {
            (CrawlStatus::Success, Some(at)) if now.saturating_duration_since(at) >= hold => {
                CrawlStatus::Idle
            },
            (status, _) => status,
        }
    }

    /// Returns the localized strings for the current language.
    #[must_use]
    pub const fn messages(&self) -> &'static Messages {
        Messages::for_language(self.language)
    }
}

/// Releases the in-flight flag when dropped.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| Error::SubmissionInFlight)?;
        Ok(Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// The analysis dashboard.
pub struct Dashboard {
    gateway: Arc<dyn AnalysisGateway>,
    state: Mutex<DashboardState>,
    in_flight: AtomicBool,
    success_hold: Duration,
}

impl Dashboard {
    /// Creates a dashboard with default settings.
    #[must_use]
    pub fn new(gateway: Arc<dyn AnalysisGateway>) -> Self {
        Self::with_settings(gateway, &DashboardSettings::default())
    }

    /// Creates a dashboard with the given settings.
    #[must_use]
    pub fn with_settings(gateway: Arc<dyn AnalysisGateway>, settings: &DashboardSettings) -> Self {
        Self {
            gateway,
            state: Mutex::new(DashboardState::new(settings)),
            in_flight: AtomicBool::new(false),
            success_hold: settings.success_hold,
        }
    }

    fn lock(&self) -> MutexGuard<'_, DashboardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` with read access to the state.
    pub fn with_state<R>(&self, f: impl FnOnce(&DashboardState) -> R) -> R {
        f(&self.lock())
    }

    /// Submits `target`, or the current input when `target` is `None`.
    ///
    /// An explicit `target` never touches the pending input. On success the
    /// result is prepended to the store, the query is recorded in history and
    /// the status becomes [`CrawlStatus::Success`]; the input is cleared only
    /// when it was the source of the query.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if the target is blank; nothing changes.
    /// - [`Error::SubmissionInFlight`] if another submission is outstanding;
    ///   nothing changes.
    /// - [`Error::DuplicateSubmission`] if the target was already analyzed
    ///   under the current mode; only the error banner is set.
    /// - The gateway's error on failure; the status becomes
    ///   [`CrawlStatus::Error`] and the banner shows the cause. Store and
    ///   history are untouched.
    #[instrument(skip(self), fields(gateway = self.gateway.name()))]
    pub fn submit(&self, target: Option<&str>) -> Result<ResultId> {
        let _guard = InFlightGuard::acquire(&self.in_flight).inspect_err(|_| {
            metrics::counter!(SUBMISSIONS_TOTAL, "outcome" => "in_flight").increment(1);
        })?;

        let from_input = target.is_none();
        let (query, mode, language) = {
            let mut state = self.lock();
            let query = target.unwrap_or(&state.input).trim().to_string();
            if query.is_empty() {
                return Err(Error::InvalidInput("target cannot be empty".to_string()));
            }

            let mode = state.mode;
            if state.store.is_duplicate(mode, &query) {
                state.error_message = Some(state.messages().duplicate.to_string());
                metrics::counter!(SUBMISSIONS_TOTAL, "outcome" => "duplicate").increment(1);
                tracing::info!(mode = %mode, query = %query, "Rejected duplicate submission");
                return Err(Error::DuplicateSubmission { mode, key: query });
            }

            state.status = CrawlStatus::Loading;
            state.succeeded_at = None;
            state.error_message = None;
            (query, mode, state.language)
        };

        let started = Instant::now();
        let outcome = self.gateway.analyze(&query, mode, language);
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        metrics::histogram!(GATEWAY_DURATION_MS).record(elapsed_ms);

        let mut state = self.lock();
        match outcome {
            Ok(response) => {
                let entry = ResultEntry::new(response.record, response.sources);
                let id = entry.id.clone();
                state.store.insert(entry);
                state.history.record(&query, mode);
                if from_input {
                    state.input.clear();
                }
                state.status = CrawlStatus::Success;
                state.succeeded_at = Some(Instant::now());
                metrics::counter!(SUBMISSIONS_TOTAL, "outcome" => "success").increment(1);
                tracing::info!(mode = %mode, id = %id, elapsed_ms, "Submission succeeded");
                Ok(id)
            },
            Err(e) => {
                let banner = match &e {
                    Error::GatewayFailure { cause, .. } | Error::OperationFailed { cause, .. } => {
                        cause.clone()
                    },
                    other => other.to_string(),
                };
                state.error_message = Some(if banner.trim().is_empty() {
                    state.messages().failed.to_string()
                } else {
                    banner
                });
                state.status = CrawlStatus::Error;
                metrics::counter!(SUBMISSIONS_TOTAL, "outcome" => "failure").increment(1);
                tracing::error!(mode = %mode, error = %e, elapsed_ms, "Submission failed");
                Err(e)
            },
        }
    }

    /// Re-runs the history entry at `index`: switches to its mode and submits
    /// its query verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if there is no entry at `index`, or any
    /// error of [`Dashboard::submit`].
    pub fn rerun(&self, index: usize) -> Result<ResultId> {
        let query = {
            let mut state = self.lock();
            let entry = state
                .history
                .get(index)
                .cloned()
                .ok_or_else(|| Error::InvalidInput(format!("no history entry at {index}")))?;
            state.mode = entry.mode;
            entry.query
        };
        self.submit(Some(&query))
    }

    /// Removes a result. Returns false if the ID is unknown.
    pub fn remove(&self, id: &ResultId) -> bool {
        self.lock().store.remove(id)
    }

    /// Removes the single result whose ID starts with `prefix`.
    ///
    /// Returns the removed ID, or `None` if no result or several match.
    pub fn remove_by_prefix(&self, prefix: &str) -> Option<ResultId> {
        let mut state = self.lock();
        let id = state.store.find_by_prefix(prefix)?;
        state.store.remove(&id).then_some(id)
    }

    /// Flips the visibility of `key` and returns the new state.
    pub fn toggle_metric(&self, key: MetricKey) -> bool {
        self.lock().selector.toggle(key)
    }

    /// Shows or hides `key`.
    pub fn set_metric(&self, key: MetricKey, visible: bool) {
        self.lock().selector.set(key, visible);
    }

    /// Builds the comparison view, available once there are at least two
    /// results.
    #[must_use]
    pub fn comparison(&self) -> Option<ComparisonView> {
        let state = self.lock();
        (state.store.len() > 1)
            .then(|| ComparisonView::build(state.store.entries(), &state.selector))
    }

    /// Returns the current status.
    #[must_use]
    pub fn status(&self) -> CrawlStatus {
        let mut state = self.lock();
        let status = state.status_at(Instant::now(), self.success_hold);
        if status != state.status {
            state.status = status;
            state.succeeded_at = None;
        }
        status
    }

    /// Returns the error banner, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.lock().error_message.clone()
    }

    /// Returns the current mode.
    #[must_use]
    pub fn mode(&self) -> AnalysisMode {
        self.lock().mode
    }

    /// Switches the analysis mode.
    pub fn set_mode(&self, mode: AnalysisMode) {
        self.lock().mode = mode;
    }

    /// Returns the current language.
    #[must_use]
    pub fn language(&self) -> Language {
        self.lock().language
    }

    /// Sets the language for display strings and prompts.
    pub fn set_language(&self, language: Language) {
        self.lock().language = language;
    }

    /// Switches between English and Chinese and returns the new language.
    pub fn toggle_language(&self) -> Language {
        let mut state = self.lock();
        state.language = state.language.toggled();
        state.language
    }

    /// Returns the pending input.
    #[must_use]
    pub fn input(&self) -> String {
        self.lock().input.clone()
    }

    /// Replaces the pending input.
    pub fn set_input(&self, input: impl Into<String>) {
        self.lock().input = input.into();
    }

    /// Returns a copy of the results, newest first.
    #[must_use]
    pub fn entries(&self) -> Vec<ResultEntry> {
        self.lock().store.entries().to_vec()
    }

    /// Returns a copy of the history, most recent first.
    #[must_use]
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.lock().history.entries().to_vec()
    }

    /// Returns the metric selector.
    #[must_use]
    pub fn selector(&self) -> MetricSelector {
        self.lock().selector
    }
}

impl fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dashboard")
            .field("gateway", &self.gateway.name())
            .field("in_flight", &self.in_flight.load(Ordering::Relaxed))
            .field("success_hold", &self.success_hold)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::GatewayResponse;
    use crate::models::{AppRecord, SiteRecord, Source};
    use std::sync::atomic::AtomicUsize;

    /// Answers every query with a record keyed by the query.
    struct EchoGateway {
        calls: AtomicUsize,
        fail_with: Option<String>,
    }

    impl EchoGateway {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail_with: None,
            })
        }

        fn failing(cause: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail_with: Some(cause.to_string()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl AnalysisGateway for EchoGateway {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn analyze(
            &self,
            target: &str,
            mode: AnalysisMode,
            _language: Language,
        ) -> Result<GatewayResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(cause) = &self.fail_with {
                return Err(Error::GatewayFailure {
                    operation: "echo".to_string(),
                    cause: cause.clone(),
                });
            }
            let record = match mode {
                AnalysisMode::Site => SiteRecord {
                    domain: target.to_string(),
                    ..SiteRecord::default()
                }
                .into(),
                AnalysisMode::App => AppRecord {
                    app_name: target.to_string(),
                    store_url: target.to_string(),
                    ..AppRecord::default()
                }
                .into(),
            };
            Ok(GatewayResponse {
                record,
                sources: vec![Source {
                    title: "Home".to_string(),
                    url: format!("https://{target}"),
                }],
            })
        }
    }

    fn dashboard(gateway: Arc<EchoGateway>) -> Dashboard {
        let settings = DashboardSettings {
            success_hold: Duration::from_secs(3600),
            ..DashboardSettings::default()
        };
        Dashboard::with_settings(gateway, &settings)
    }

    #[test]
    fn test_submit_success() {
        let gateway = EchoGateway::ok();
        let dashboard = dashboard(Arc::clone(&gateway));

        let id = dashboard.submit(Some("  example.com ")).unwrap();

        let entries = dashboard.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, id);
        assert_eq!(entries[0].record.natural_key(), "example.com");
        assert_eq!(entries[0].sources.len(), 1);
        assert_eq!(dashboard.history()[0].query, "example.com");
        assert!(dashboard.input().is_empty());
        assert_eq!(dashboard.status(), CrawlStatus::Success);
        assert_eq!(dashboard.error_message(), None);
        assert_eq!(gateway.calls(), 1);
    }

    #[test]
    fn test_submit_uses_pending_input() {
        let dashboard = dashboard(EchoGateway::ok());
        dashboard.set_input("example.org");
        dashboard.submit(None).unwrap();
        assert_eq!(dashboard.entries()[0].record.display_name(), "example.org");
    }

    #[test]
    fn test_blank_submission_is_rejected() {
        let gateway = EchoGateway::ok();
        let dashboard = dashboard(Arc::clone(&gateway));

        dashboard.set_input("example.org");
        dashboard.set_mode(AnalysisMode::App);

        let err = dashboard.submit(Some("   ")).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(dashboard.status(), CrawlStatus::Idle);
        assert_eq!(dashboard.input(), "example.org");
        assert_eq!(dashboard.mode(), AnalysisMode::App);
        assert_eq!(dashboard.error_message(), None);
        assert!(dashboard.entries().is_empty());
        assert_eq!(gateway.calls(), 0);
    }

    #[test]
    fn test_explicit_target_keeps_pending_input() {
        let dashboard = dashboard(EchoGateway::ok());
        dashboard.set_input("example.org");

        dashboard.submit(Some("example.com")).unwrap();
        assert_eq!(dashboard.input(), "example.org");

        dashboard.submit(None).unwrap();
        assert!(dashboard.input().is_empty());
        assert_eq!(dashboard.history()[0].query, "example.org");
    }

    #[test]
    fn test_duplicate_is_rejected_before_gateway() {
        let gateway = EchoGateway::ok();
        let dashboard = dashboard(Arc::clone(&gateway));
        dashboard.submit(Some("example.com")).unwrap();
        dashboard.set_input("other.org");
        let status = dashboard.status();

        let err = dashboard.submit(Some("example.com")).unwrap_err();

        assert!(matches!(err, Error::DuplicateSubmission { mode: AnalysisMode::Site, .. }));
        assert_eq!(dashboard.input(), "other.org");
        assert_eq!(dashboard.status(), status);
        assert_eq!(dashboard.mode(), AnalysisMode::Site);
        assert_eq!(gateway.calls(), 1);
        assert_eq!(dashboard.entries().len(), 1);
        assert_eq!(dashboard.history().len(), 1);
        assert_eq!(
            dashboard.error_message().as_deref(),
            Some(Messages::for_language(Language::En).duplicate)
        );
    }

    #[test]
    fn test_duplicate_banner_is_localized() {
        let dashboard = dashboard(EchoGateway::ok());
        dashboard.set_language(Language::Zh);
        dashboard.submit(Some("example.com")).unwrap();
        dashboard.submit(Some("example.com")).unwrap_err();
        assert_eq!(
            dashboard.error_message().as_deref(),
            Some(Messages::for_language(Language::Zh).duplicate)
        );
    }

    #[test]
    fn test_same_key_in_other_mode_is_not_duplicate() {
        let dashboard = dashboard(EchoGateway::ok());
        dashboard.submit(Some("example.com")).unwrap();
        dashboard.set_mode(AnalysisMode::App);
        dashboard.submit(Some("example.com")).unwrap();
        assert_eq!(dashboard.entries().len(), 2);
    }

    #[test]
    fn test_gateway_failure_sets_banner() {
        let dashboard = dashboard(EchoGateway::failing("quota exceeded"));
        dashboard.set_input("example.com");

        let err = dashboard.submit(None).unwrap_err();

        assert!(matches!(err, Error::GatewayFailure { .. }));
        assert_eq!(dashboard.status(), CrawlStatus::Error);
        assert_eq!(dashboard.error_message().as_deref(), Some("quota exceeded"));
        assert!(dashboard.entries().is_empty());
        assert!(dashboard.history().is_empty());
        assert_eq!(dashboard.input(), "example.com");
    }

    #[test]
    fn test_blank_failure_cause_uses_default_banner() {
        let dashboard = dashboard(EchoGateway::failing(""));
        dashboard.submit(Some("example.com")).unwrap_err();
        assert_eq!(
            dashboard.error_message().as_deref(),
            Some(Messages::for_language(Language::En).failed)
        );
    }

    #[test]
    fn test_success_clears_previous_banner() {
        let dashboard = dashboard(EchoGateway::ok());
        dashboard.submit(Some("example.com")).unwrap();
        dashboard.submit(Some("example.com")).unwrap_err();
        assert!(dashboard.error_message().is_some());

        dashboard.submit(Some("example.org")).unwrap();
        assert_eq!(dashboard.error_message(), None);
    }

    #[test]
    fn test_success_status_resets_after_hold() {
        let settings = DashboardSettings {
            success_hold: Duration::ZERO,
            ..DashboardSettings::default()
        };
        let dashboard = Dashboard::with_settings(EchoGateway::ok(), &settings);
        dashboard.submit(Some("example.com")).unwrap();
        assert_eq!(dashboard.status(), CrawlStatus::Idle);
    }

    #[test]
    fn test_in_flight_guard() {
        let flag = AtomicBool::new(false);
        let guard = InFlightGuard::acquire(&flag).unwrap();
        assert!(matches!(
            InFlightGuard::acquire(&flag),
            Err(Error::SubmissionInFlight)
        ));
        drop(guard);
        assert!(InFlightGuard::acquire(&flag).is_ok());
    }

    #[test]
    fn test_rerun_switches_mode() {
        let dashboard = dashboard(EchoGateway::ok());
        dashboard.set_mode(AnalysisMode::App);
        dashboard.submit(Some("https://apps.example/notes")).unwrap();
        dashboard.set_mode(AnalysisMode::Site);
        dashboard.submit(Some("example.com")).unwrap();

        let first = dashboard.entries()[0].id.clone();
        assert!(dashboard.remove(&first));

        dashboard.rerun(0).unwrap();
        assert_eq!(dashboard.mode(), AnalysisMode::Site);

        let err = dashboard.rerun(1).unwrap_err();
        assert!(matches!(err, Error::DuplicateSubmission { mode: AnalysisMode::App, .. }));
        assert_eq!(dashboard.mode(), AnalysisMode::App);

        assert!(matches!(dashboard.rerun(9), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_remove_by_prefix() {
        let dashboard = dashboard(EchoGateway::ok());
        let id = dashboard.submit(Some("example.com")).unwrap();

        assert_eq!(dashboard.remove_by_prefix("zzzz"), None);
        assert_eq!(dashboard.remove_by_prefix(id.short()), Some(id.clone()));
        assert!(!dashboard.remove(&id));
        assert!(dashboard.entries().is_empty());
    }

    #[test]
    fn test_comparison_needs_two_results() {
        let dashboard = dashboard(EchoGateway::ok());
        assert!(dashboard.comparison().is_none());
        dashboard.submit(Some("example.com")).unwrap();
        assert!(dashboard.comparison().is_none());
        dashboard.set_mode(AnalysisMode::App);
        dashboard.submit(Some("notes")).unwrap();

        let view = dashboard.comparison().unwrap();
        assert_eq!(view.scores.len(), 2);
        assert_eq!(view.table.rows.len(), 1);
    }

    #[test]
    fn test_toggle_metric_reaches_table() {
        let dashboard = dashboard(EchoGateway::ok());
        dashboard.set_mode(AnalysisMode::App);
        dashboard.submit(Some("notes")).unwrap();
        dashboard.submit(Some("chat")).unwrap();

        assert!(!dashboard.toggle_metric(MetricKey::Revenue));
        let view = dashboard.comparison().unwrap();
        assert_eq!(view.table.columns.len(), 4);
        assert!(!dashboard.selector().revenue);
    }

    #[test]
    fn test_toggle_language() {
        let dashboard = dashboard(EchoGateway::ok());
        assert_eq!(dashboard.toggle_language(), Language::Zh);
        assert_eq!(dashboard.toggle_language(), Language::En);
    }
}
