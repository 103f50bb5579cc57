use fittrack_cli::api::ApiClient;
use fittrack_cli::routing::RouteTracker;
use fittrack_cli::storage::{MemoryTokenStore, TokenStore};
use std::sync::Arc;

/// Client wired to in-memory token storage and a route recorder
pub struct Harness {
    pub client: ApiClient,
    pub tokens: Arc<MemoryTokenStore>,
    pub tracker: RouteTracker,
}

pub fn harness(base_url: &str, token: Option<&str>) -> Harness {
    let tokens = Arc::new(match token {
        Some(token) => MemoryTokenStore::with_token(token),
        None => MemoryTokenStore::default(),
    });
    let tracker = RouteTracker::new();

    let client = ApiClient::new(
        base_url,
        Arc::clone(&tokens) as Arc<dyn TokenStore>,
        Arc::new(tracker.clone()),
    )
    .unwrap();

    Harness {
        client,
        tokens,
        tracker,
    }
}
