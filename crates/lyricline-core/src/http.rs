//! Blocking facade over async reqwest.
//!
//! The scraper is strictly sequential, so every request is driven to completion
//! on a small shared tokio runtime with `block_on`.

use std::sync::LazyLock;
use std::time::Duration;

use crate::error::SourceError;

/// Connect timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared tokio runtime for HTTP operations.
pub static SHARED_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

/// Build a client with a per-request timeout.
///
/// Each adapter owns its client so its timeout and headers are fixed at construction.
pub fn build_client(timeout: Duration, user_agent: &str) -> Result<reqwest::Client, SourceError> {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .map_err(SourceError::from_reqwest)
}

/// GET `url` and return the body, mapping non-2xx statuses to [`SourceError::Http`].
pub fn get_text(
    client: &reqwest::Client,
    url: &str,
    bearer: Option<&str>,
) -> Result<String, SourceError> {
    SHARED_RUNTIME.handle().block_on(async {
        let mut req = client.get(url);
        if let Some(token) = bearer {
            req = req.bearer_auth(token);
        }
        let resp = req
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(SourceError::from_reqwest)?;
        resp.text().await.map_err(SourceError::from_reqwest)
    })
}
