//! Ownership wrapper for a launched browser process
//!
//! Couples the Browser handle with its CDP event handler task and the
//! throwaway profile directory backing the session's isolated context.

use chromiumoxide::browser::Browser;
use std::path::PathBuf;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Wrapper for a Browser, its event handler task, and its profile directory.
///
/// The handler task MUST be aborted once the browser is gone, otherwise it
/// runs indefinitely against a dead websocket; `Drop` takes care of that.
/// The profile directory MUST only be removed after the Chrome process has
/// exited (Windows refuses to delete files Chrome still holds open).
pub struct BrowserWrapper {
    browser: Browser,
    handler: JoinHandle<()>,
    user_data_dir: Option<PathBuf>,
}

impl BrowserWrapper {
    pub(crate) fn new(browser: Browser, handler: JoinHandle<()>, user_data_dir: PathBuf) -> Self {
        Self {
            browser,
            handler,
            user_data_dir: Some(user_data_dir),
        }
    }

    pub(crate) fn browser(&self) -> &Browser {
        &self.browser
    }

    pub(crate) fn browser_mut(&mut self) -> &mut Browser {
        &mut self.browser
    }

    /// Remove the profile directory (blocking operation).
    ///
    /// Call AFTER `browser.wait()` completes so Chrome has released all file
    /// handles. Blocking `std::fs` because this may run from a Drop context.
    pub(crate) fn cleanup_profile_dir(&mut self) {
        if let Some(path) = self.user_data_dir.take() {
            info!("Removing session profile directory: {}", path.display());
            if let Err(e) = std::fs::remove_dir_all(&path) {
                warn!(
                    "Failed to remove profile directory {}: {}. Manual cleanup may be required.",
                    path.display(),
                    e
                );
            }
        }
    }
}

impl Drop for BrowserWrapper {
    fn drop(&mut self) {
        self.handler.abort();

        if self.user_data_dir.is_some() {
            warn!(
                "BrowserWrapper dropped without explicit teardown. \
                Profile directory will be orphaned: {}. \
                Call BrowserSession::close() to release resources in order.",
                self.user_data_dir.as_ref().unwrap().display()
            );
        }
    }
}
