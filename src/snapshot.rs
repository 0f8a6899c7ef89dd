//! The observation type returned after every action

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

/// A normalized observation of the browser after an action has been applied
/// and the page has settled: a viewport-bound PNG screenshot plus the page's
/// URL at capture time.
///
/// Produced by [`crate::session::BrowserSession::capture_state`]; never
/// reflects a page mid-transition.
#[derive(Debug, Clone)]
pub struct StateSnapshot {
    /// PNG-encoded screenshot of the viewport (not the full page).
    pub screenshot: Vec<u8>,
    /// URL of the active page at the moment of capture.
    pub url: String,
}

impl StateSnapshot {
    /// Screenshot bytes encoded as base64, for transport layers that carry
    /// images inline.
    pub fn screenshot_base64(&self) -> String {
        BASE64.encode(&self.screenshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_accessor_encodes_raw_bytes() {
        let snapshot = StateSnapshot {
            screenshot: vec![0x89, 0x50, 0x4e, 0x47],
            url: "https://example.com".to_string(),
        };
        assert_eq!(snapshot.screenshot_base64(), "iVBORw==");
    }
}
