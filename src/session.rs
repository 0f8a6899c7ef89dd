//! Browser session lifecycle
//!
//! One `BrowserSession` owns one browser process, one isolated profile, and
//! exactly one page. Actions (see [`crate::actions`]) are methods on the
//! session; every one of them funnels through [`BrowserSession::capture_state`]
//! so no action returns before the page has settled and been observed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chromiumoxide::Page;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide_cdp::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide_cdp::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, GetLayoutMetricsParams,
};
use tracing::{info, warn};
use url::Url;

use crate::SessionConfig;
use crate::browser::{BrowserError, BrowserResult, BrowserWrapper};
use crate::browser_setup::launch_browser;
use crate::snapshot::StateSnapshot;

/// Fixed delay after the engine reports the page settled, absorbing
/// late-finishing rendering and layout work before a screenshot is taken.
const RENDER_GRACE: Duration = Duration::from_millis(500);

/// Distinguishes profile directories when one process runs sessions back to
/// back.
static SESSION_SEQ: AtomicU64 = AtomicU64::new(0);

/// An exclusively-owned browser runtime for one agent task.
///
/// Created with [`BrowserSession::launch`], destroyed with
/// [`BrowserSession::close`]. Every action method requires a live session by
/// construction: the methods exist only on this type, and the type exists
/// only between launch and close. The session maintains a single active page;
/// popups and spawned tabs are collapsed back into it.
pub struct BrowserSession {
    config: SessionConfig,
    wrapper: BrowserWrapper,
    page: Page,
}

impl BrowserSession {
    /// Launch the session: hardened browser process, isolated profile,
    /// one page navigated to the configured initial URL.
    ///
    /// Any failure here is fatal and aborts session creation.
    pub async fn launch(config: SessionConfig) -> BrowserResult<Self> {
        validate_url(&config.initial_url)?;
        validate_url(&config.search_engine_url)?;

        let seq = SESSION_SEQ.fetch_add(1, Ordering::Relaxed);
        let user_data_dir = std::env::temp_dir().join(format!(
            "pagepilot_{}_{}",
            std::process::id(),
            seq
        ));

        let (browser, handler) = launch_browser(
            config.headless,
            user_data_dir.clone(),
            (config.width, config.height),
        )
        .await
        .map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        let wrapper = BrowserWrapper::new(browser, handler, user_data_dir);

        // Chrome opens one default page on startup; adopt it as the
        // session's single page rather than spawning a second one.
        let pages = wrapper
            .browser()
            .pages()
            .await
            .map_err(|e| BrowserError::PageCreationFailed(e.to_string()))?;
        let page = match pages.into_iter().next() {
            Some(page) => page,
            None => wrapper
                .browser()
                .new_page("about:blank")
                .await
                .map_err(|e| BrowserError::PageCreationFailed(e.to_string()))?,
        };

        // Pin the rendered viewport to the configured logical screen size so
        // agent coordinates stay valid across platforms and window chrome.
        let metrics = SetDeviceMetricsOverrideParams::builder()
            .width(i64::from(config.width))
            .height(i64::from(config.height))
            .device_scale_factor(1.0)
            .mobile(false)
            .build()
            .map_err(BrowserError::LaunchFailed)?;
        page.execute(metrics)
            .await
            .map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        page.goto(config.initial_url.as_str())
            .await
            .map_err(|e| BrowserError::NavigationFailed(e.to_string()))?;
        page.wait_for_navigation()
            .await
            .map_err(|e| BrowserError::NavigationFailed(e.to_string()))?;

        info!(
            url = %config.initial_url,
            width = config.width,
            height = config.height,
            "Browser session started"
        );

        Ok(Self {
            config,
            wrapper,
            page,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub(crate) fn page(&self) -> &Page {
        &self.page
    }

    /// Logical screen size: the live CSS layout viewport when the engine can
    /// report one, otherwise the configured size.
    pub async fn screen_size(&self) -> (u32, u32) {
        match self.page.execute(GetLayoutMetricsParams::default()).await {
            Ok(metrics) => {
                let vp = &metrics.css_layout_viewport;
                (
                    u32::try_from(vp.client_width).unwrap_or(self.config.width),
                    u32::try_from(vp.client_height).unwrap_or(self.config.height),
                )
            }
            Err(e) => {
                warn!("Failed to read layout metrics, using configured size: {}", e);
                (self.config.width, self.config.height)
            }
        }
    }

    /// Wait for the engine-reported load-settled condition.
    pub(crate) async fn wait_for_settle(&self) -> BrowserResult<()> {
        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| BrowserError::NavigationFailed(e.to_string()))?;
        Ok(())
    }

    /// Collapse spawned pages back into the single active page.
    ///
    /// When the browser opened extra pages (`target="_blank"` links,
    /// `window.open`), each one's destination URL is read, the page is
    /// closed, and the primary page is redirected there. Best-effort: every
    /// failure is logged and swallowed, a dangling extra page is never fatal.
    pub(crate) async fn reconcile_popups(&self) {
        let pages = match self.wrapper.browser().pages().await {
            Ok(pages) => pages,
            Err(e) => {
                warn!("Failed to enumerate pages for popup reconciliation: {}", e);
                return;
            }
        };

        for page in pages {
            if page.target_id() == self.page.target_id() {
                continue;
            }

            let target_url = match page.url().await {
                Ok(url) => url,
                Err(e) => {
                    warn!("Failed to read popup URL: {}", e);
                    None
                }
            };

            if let Err(e) = page.close().await {
                warn!("Failed to close popup page: {}", e);
            }

            if let Some(url) = target_url {
                info!(url = %url, "Collapsing popup into primary page");
                match self.page.goto(url.as_str()).await {
                    Ok(_) => {
                        if let Err(e) = self.page.wait_for_navigation().await {
                            warn!("Settle wait after popup redirect failed: {}", e);
                        }
                    }
                    Err(e) => {
                        warn!("Failed to redirect primary page to popup target: {}", e);
                    }
                }
            }
        }
    }

    /// Produce the canonical post-action observation.
    ///
    /// Two-phase wait (engine settle + fixed render grace), popup
    /// reconciliation, then a viewport-bound PNG screenshot and the URL read
    /// at capture time.
    pub async fn capture_state(&self) -> BrowserResult<StateSnapshot> {
        self.wait_for_settle().await?;
        self.reconcile_popups().await;
        tokio::time::sleep(RENDER_GRACE).await;

        let screenshot = self
            .page
            .screenshot(
                ScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .full_page(false)
                    .build(),
            )
            .await
            .map_err(|e| BrowserError::ScreenshotFailed(e.to_string()))?;

        let url = self
            .page
            .url()
            .await
            .map_err(|e| BrowserError::NavigationFailed(format!("failed to read page URL: {e}")))?
            .unwrap_or_else(|| "about:blank".to_string());

        Ok(StateSnapshot { screenshot, url })
    }

    /// Release the session's resources: page, then browser process, then
    /// profile directory. Each step is guarded independently so a crashed
    /// browser never prevents the rest of the teardown; the wrapper's `Drop`
    /// aborts the CDP handler task last.
    pub async fn close(mut self) {
        info!("Closing browser session");

        if let Err(e) = self.page.clone().close().await {
            warn!("Failed to close page: {}", e);
        }

        if let Err(e) = self.wrapper.browser_mut().close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }

        if let Err(e) = self.wrapper.browser_mut().wait().await {
            warn!("Failed to wait for browser exit: {}", e);
        }

        self.wrapper.cleanup_profile_dir();
    }
}

fn validate_url(url: &str) -> BrowserResult<()> {
    Url::parse(url).map_err(|e| BrowserError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_urls_validate() {
        assert!(validate_url("https://www.google.com").is_ok());
        assert!(validate_url("http://localhost:8080/path?q=1").is_ok());
    }

    #[test]
    fn malformed_urls_are_rejected_with_the_offending_value() {
        let err = validate_url("not a url").unwrap_err();
        match err {
            BrowserError::InvalidUrl { url, .. } => assert_eq!(url, "not a url"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
