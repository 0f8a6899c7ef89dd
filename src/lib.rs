//! Coordinate-driven browser control for visual agents
//!
//! One [`BrowserSession`] owns one hardened, headless browser with a single
//! active page. Agents drive it through a fixed vocabulary of discrete UI
//! actions ([`Action`]) and observe every result as a [`StateSnapshot`]: a
//! settled, viewport-bound screenshot plus the current URL. Asynchronous
//! rendering, popup windows, and engine input semantics stay behind that
//! contract.
//!
//! ```no_run
//! use pagepilot::{BrowserSession, SessionConfig};
//!
//! # async fn run() -> pagepilot::BrowserResult<()> {
//! let session = BrowserSession::launch(SessionConfig::new(1440, 900)).await?;
//! let observation = session.click_at(640, 320).await?;
//! println!("now at {}", observation.url);
//! session.close().await;
//! # Ok(())
//! # }
//! ```

pub mod actions;
mod browser;
pub mod browser_setup;
mod input;
pub mod keymap;
mod session;
mod snapshot;
pub mod viewport;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Configuration for one browser session.
///
/// The logical screen size is required; everything else has a sensible
/// default. Supplied by the embedding collaborator at construction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Logical viewport width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Logical viewport height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// URL the session's page is navigated to on launch
    #[serde(default = "default_initial_url")]
    pub initial_url: String,

    /// URL loaded by the search action
    #[serde(default = "default_search_engine_url")]
    pub search_engine_url: String,

    /// Render a visual marker at the pointer target before each pointer
    /// action
    #[serde(default)]
    pub highlight_mouse: bool,

    /// Run the browser headless
    #[serde(default = "default_headless")]
    pub headless: bool,
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    720
}

fn default_initial_url() -> String {
    "https://www.google.com".to_string()
}

fn default_search_engine_url() -> String {
    "https://www.google.com".to_string()
}

fn default_headless() -> bool {
    true
}

impl SessionConfig {
    /// Configuration with the given logical screen size and defaults for
    /// everything else.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            initial_url: default_initial_url(),
            search_engine_url: default_search_engine_url(),
            highlight_mouse: false,
            headless: default_headless(),
        }
    }
}

/// Load session configuration from config.yaml in the package root, falling
/// back to defaults when the file is absent.
pub fn load_yaml_config() -> anyhow::Result<SessionConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config.yaml");

    if config_path.exists() {
        let contents = fs::read_to_string(&config_path)?;
        let config: SessionConfig = serde_yaml::from_str(&contents)?;
        Ok(config)
    } else {
        Ok(SessionConfig::default())
    }
}

pub use actions::{Action, ScrollDirection};
pub use browser::{BrowserError, BrowserResult, BrowserWrapper};
pub use keymap::normalize_key;
pub use session::BrowserSession;
pub use snapshot::StateSnapshot;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_match_the_documented_contract() {
        let config = SessionConfig::default();
        assert_eq!(config.width, 1280);
        assert_eq!(config.height, 720);
        assert_eq!(config.initial_url, "https://www.google.com");
        assert_eq!(config.search_engine_url, config.initial_url);
        assert!(!config.highlight_mouse);
        assert!(config.headless);
    }

    #[test]
    fn new_overrides_only_the_screen_size() {
        let config = SessionConfig::new(1920, 1080);
        assert_eq!((config.width, config.height), (1920, 1080));
        assert_eq!(config.initial_url, "https://www.google.com");
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let config: SessionConfig = serde_yaml::from_str(
            "width: 1440\nheight: 900\nhighlight_mouse: true\n",
        )
        .unwrap();
        assert_eq!((config.width, config.height), (1440, 900));
        assert!(config.highlight_mouse);
        assert!(config.headless);
        assert_eq!(config.search_engine_url, "https://www.google.com");
    }
}
