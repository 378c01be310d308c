use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct State {
    in_flight: usize,
    message: String,
}

/// Counts in-flight requests so overlapping calls share one indicator.
///
/// The indicator is on while the count is above zero; the message is cleared
/// when the last request finishes.
#[derive(Debug, Default)]
pub struct LoadingTracker {
    state: Mutex<State>,
}

impl LoadingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a request. A `None` message keeps the current one.
    pub fn show(&self, message: Option<&str>) {
        let mut state = self.state();
        state.in_flight += 1;
        if let Some(message) = message {
            state.message = message.to_string();
        }
    }

    /// Finishes a request; extra calls never push the count below zero.
    pub fn hide(&self) {
        let mut state = self.state();
        state.in_flight = state.in_flight.saturating_sub(1);
        if state.in_flight == 0 {
            state.message.clear();
        }
    }

    /// Resets to idle regardless of outstanding requests.
    pub fn force_hide(&self) {
        let mut state = self.state();
        state.in_flight = 0;
        state.message.clear();
    }

    pub fn set_message(&self, message: impl Into<String>) {
        self.state().message = message.into();
    }

    pub fn is_loading(&self) -> bool {
        self.state().in_flight > 0
    }

    pub fn message(&self) -> String {
        self.state().message.clone()
    }

    pub fn in_flight(&self) -> usize {
        self.state().in_flight
    }

    /// Calls [`show`](Self::show) now and [`hide`](Self::hide) when the guard
    /// drops, including on early return or error.
    pub fn begin(&self, message: &str) -> LoadingGuard<'_> {
        self.show(Some(message));
        LoadingGuard { tracker: self }
    }
}

#[must_use = "the request is marked finished as soon as the guard drops"]
pub struct LoadingGuard<'a> {
    tracker: &'a LoadingTracker,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.tracker.hide();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_requests_keep_indicator_on() {
        let loading = LoadingTracker::new();

        loading.show(Some("Loading users..."));
        loading.show(Some("Creating user..."));
        assert!(loading.is_loading());
        assert_eq!(loading.message(), "Creating user...");

        loading.hide();
        assert!(loading.is_loading());
        assert_eq!(loading.message(), "Creating user...");

        loading.hide();
        assert!(!loading.is_loading());
        assert_eq!(loading.message(), "");
    }

    #[test]
    fn show_without_message_keeps_current() {
        let loading = LoadingTracker::new();
        loading.set_message("Loading page...");
        loading.show(None);

        assert_eq!(loading.message(), "Loading page...");
    }

    #[test]
    fn hide_never_goes_negative() {
        let loading = LoadingTracker::new();
        loading.hide();
        loading.hide();
        assert_eq!(loading.in_flight(), 0);

        loading.show(None);
        assert!(loading.is_loading());
    }

    #[test]
    fn force_hide_resets_everything() {
        let loading = LoadingTracker::new();
        loading.show(Some("a"));
        loading.show(Some("b"));

        loading.force_hide();
        assert!(!loading.is_loading());
        assert_eq!(loading.message(), "");
    }

    #[test]
    fn guard_hides_on_drop() {
        let loading = LoadingTracker::new();
        {
            let _guard = loading.begin("Deleting user...");
            assert!(loading.is_loading());
            assert_eq!(loading.message(), "Deleting user...");
        }
        assert!(!loading.is_loading());
    }
}
