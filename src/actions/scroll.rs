//! Scrolling actions: whole-document and targeted wheel scrolls

use chromiumoxide_cdp::cdp::js_protocol::runtime::{CallArgument, CallFunctionOnParams};
use serde_json::json;

use crate::actions::ScrollDirection;
use crate::browser::{BrowserError, BrowserResult};
use crate::input;
use crate::session::BrowserSession;
use crate::snapshot::StateSnapshot;
use crate::viewport;

impl BrowserSession {
    /// Scroll the whole document one step in the given direction.
    ///
    /// Vertical scrolling is keyboard-driven (PageUp/PageDown), so it scrolls
    /// the document and respects focus the way a human keypress would.
    /// Horizontal scrolling shifts the document by half the live viewport
    /// width via script, since no keyboard equivalent exists.
    pub async fn scroll_document(
        &self,
        direction: ScrollDirection,
    ) -> BrowserResult<StateSnapshot> {
        match direction {
            ScrollDirection::Up => self.press_chord(&["pageup"]).await?,
            ScrollDirection::Down => self.press_chord(&["pagedown"]).await?,
            ScrollDirection::Left | ScrollDirection::Right => {
                let (width, _) = self.screen_size().await;
                let amount = viewport::horizontal_scroll_amount(width, direction);

                let call = CallFunctionOnParams::builder()
                    .function_declaration("(dx) => window.scrollBy(dx, 0)")
                    .argument(CallArgument::builder().value(json!(amount)).build())
                    .build()
                    .map_err(BrowserError::EvaluationFailed)?;

                self.page()
                    .evaluate_function(call)
                    .await
                    .map_err(|e| BrowserError::EvaluationFailed(e.to_string()))?;
            }
        }

        self.capture_state().await
    }

    /// Wheel-scroll at viewport coordinates.
    ///
    /// The wheel delta is derived from direction and magnitude (default
    /// 800 device pixels; up/left negative on their axis). Targets whatever
    /// scroll container sits under the pointer.
    pub async fn scroll_at(
        &self,
        x: u32,
        y: u32,
        direction: ScrollDirection,
        magnitude: Option<u32>,
    ) -> BrowserResult<StateSnapshot> {
        self.highlight_pointer(x, y).await?;

        let (px, py) = (f64::from(x), f64::from(y));
        input::mouse_move(self.page(), px, py).await?;
        self.wait_for_settle().await?;

        let (dx, dy) = viewport::scroll_vector(direction, magnitude);
        input::wheel(self.page(), px, py, dx, dy).await?;

        self.capture_state().await
    }
}
