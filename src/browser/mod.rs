//! Browser infrastructure for launching and managing Chrome instances

mod wrapper;

pub use crate::browser_setup::{download_managed_browser, find_browser_executable};
pub use wrapper::BrowserWrapper;

use thiserror::Error;

/// Errors surfaced by session and action operations.
///
/// Launch-time failures are fatal and abort session creation. Everything else
/// leaves the session attached: the caller may issue further actions or close
/// the session. Teardown and popup-reconciliation failures never appear here;
/// they are logged and swallowed at their call sites.
#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("Failed to find browser executable: {0}")]
    NotFound(String),

    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    #[error("Failed to create page: {0}")]
    PageCreationFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Input dispatch failed: {0}")]
    InputFailed(String),

    #[error("Script evaluation failed: {0}")]
    EvaluationFailed(String),

    #[error("Screenshot capture failed: {0}")]
    ScreenshotFailed(String),

    #[error("Unsupported scroll direction: {0:?}")]
    UnsupportedDirection(String),

    #[error("Invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("IO error: {0}")]
    IoError(String),
}

pub type BrowserResult<T> = Result<T, BrowserError>;
