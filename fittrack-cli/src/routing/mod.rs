use std::sync::{Arc, Mutex, PoisonError};

/// Top-level views of the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Dashboard => "/dashboard",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Receives navigation requests from the API client and the flows
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Records every navigation so the front-end can act on it
#[derive(Debug, Clone, Default)]
pub struct RouteTracker {
    history: Arc<Mutex<Vec<Route>>>,
}

impl RouteTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent navigation, if any
    pub fn current(&self) -> Option<Route> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .copied()
    }

    pub fn history(&self) -> Vec<Route> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of times `route` was navigated to
    pub fn count(&self, route: Route) -> usize {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|r| **r == route)
            .count()
    }
}

impl Navigator for RouteTracker {
    fn navigate(&self, route: Route) {
        tracing::debug!("Navigating to {}", route);
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_records_navigation() {
        let tracker = RouteTracker::new();
        assert_eq!(tracker.current(), None);

        let shared = tracker.clone();
        shared.navigate(Route::Dashboard);
        shared.navigate(Route::Login);

        assert_eq!(tracker.current(), Some(Route::Login));
        assert_eq!(tracker.history(), vec![Route::Dashboard, Route::Login]);
        assert_eq!(tracker.count(Route::Login), 1);
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Login.path(), "/");
        assert_eq!(Route::Dashboard.to_string(), "/dashboard");
    }
}
