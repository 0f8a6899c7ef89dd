//! Navigation actions: URL loads, history traversal, search, wait

use std::time::Duration;

use chromiumoxide_cdp::cdp::browser_protocol::page::{
    GetNavigationHistoryParams, NavigateToHistoryEntryParams,
};

use crate::browser::{BrowserError, BrowserResult};
use crate::session::BrowserSession;
use crate::snapshot::StateSnapshot;

/// Pause used by the wait action, for pages the agent expects to change
/// without a trigger of its own.
const WAIT_PAUSE: Duration = Duration::from_secs(5);

/// Prefix scheme-less URLs with https; http and https pass through unchanged.
pub(crate) fn ensure_scheme(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

impl BrowserSession {
    /// The first observation after session creation; nothing is driven.
    pub async fn open_browser(&self) -> BrowserResult<StateSnapshot> {
        self.capture_state().await
    }

    /// Pause for a fixed interval, then observe.
    pub async fn wait(&self) -> BrowserResult<StateSnapshot> {
        tokio::time::sleep(WAIT_PAUSE).await;
        self.capture_state().await
    }

    /// Load a URL in the active page, defaulting the scheme to https.
    pub async fn navigate(&self, url: &str) -> BrowserResult<StateSnapshot> {
        let url = ensure_scheme(url);
        self.page()
            .goto(url.as_str())
            .await
            .map_err(|e| BrowserError::NavigationFailed(e.to_string()))?;
        self.capture_state().await
    }

    /// Load the configured search-engine home page.
    pub async fn search(&self) -> BrowserResult<StateSnapshot> {
        let url = self.config().search_engine_url.clone();
        self.navigate(&url).await
    }

    /// Navigate one entry back in the page's history; a no-op at the first
    /// entry.
    pub async fn go_back(&self) -> BrowserResult<StateSnapshot> {
        self.traverse_history(-1).await
    }

    /// Navigate one entry forward in the page's history; a no-op at the last
    /// entry.
    pub async fn go_forward(&self) -> BrowserResult<StateSnapshot> {
        self.traverse_history(1).await
    }

    async fn traverse_history(&self, offset: i64) -> BrowserResult<StateSnapshot> {
        let history = self
            .page()
            .execute(GetNavigationHistoryParams::default())
            .await
            .map_err(|e| BrowserError::NavigationFailed(e.to_string()))?;

        let target_index = history.current_index + offset;
        if target_index >= 0
            && let Some(entry) = history.entries.get(target_index as usize)
        {
            self.page()
                .execute(NavigateToHistoryEntryParams::new(entry.id))
                .await
                .map_err(|e| BrowserError::NavigationFailed(e.to_string()))?;
        }

        self.capture_state().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_hosts_get_an_https_scheme() {
        assert_eq!(ensure_scheme("example.com"), "https://example.com");
        assert_eq!(
            ensure_scheme("example.com/path?q=1"),
            "https://example.com/path?q=1"
        );
    }

    #[test]
    fn explicit_schemes_pass_through_unchanged() {
        assert_eq!(ensure_scheme("http://x"), "http://x");
        assert_eq!(ensure_scheme("https://x"), "https://x");
    }
}
