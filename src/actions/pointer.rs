//! Pointer-driven actions: click, hover, drag-and-drop

use std::time::Duration;

use chromiumoxide_cdp::cdp::js_protocol::runtime::{CallArgument, CallFunctionOnParams};
use serde_json::json;

use crate::browser::{BrowserError, BrowserResult};
use crate::input;
use crate::session::BrowserSession;
use crate::snapshot::StateSnapshot;

/// Visual feedback overlay: a fixed-position ring at the pointer target,
/// auto-hidden after two seconds. Inert (`pointer-events: none`) so it never
/// intercepts the input it is announcing.
const MARKER_FN: &str = r#"(x, y) => {
    const id = 'pagepilot-pointer-marker';
    let dot = document.getElementById(id);
    if (!dot) {
        dot = document.createElement('div');
        dot.id = id;
        dot.style.pointerEvents = 'none';
        dot.style.border = '4px solid red';
        dot.style.borderRadius = '50%';
        dot.style.width = '20px';
        dot.style.height = '20px';
        dot.style.position = 'fixed';
        dot.style.zIndex = '9999';
        document.body.appendChild(dot);
    }
    dot.hidden = false;
    dot.style.left = (x - 10) + 'px';
    dot.style.top = (y - 10) + 'px';
    setTimeout(() => { dot.hidden = true; }, 2000);
}"#;

/// How long the marker is left visible before the action proceeds.
const MARKER_PAUSE: Duration = Duration::from_millis(1000);

impl BrowserSession {
    /// Render the feedback marker at (x, y) when the session is configured
    /// for it; otherwise a no-op.
    pub(crate) async fn highlight_pointer(&self, x: u32, y: u32) -> BrowserResult<()> {
        if !self.config().highlight_mouse {
            return Ok(());
        }

        let call = CallFunctionOnParams::builder()
            .function_declaration(MARKER_FN)
            .argument(CallArgument::builder().value(json!(x)).build())
            .argument(CallArgument::builder().value(json!(y)).build())
            .build()
            .map_err(BrowserError::EvaluationFailed)?;

        self.page()
            .evaluate_function(call)
            .await
            .map_err(|e| BrowserError::EvaluationFailed(e.to_string()))?;

        tokio::time::sleep(MARKER_PAUSE).await;
        Ok(())
    }

    /// Left-click at viewport coordinates.
    pub async fn click_at(&self, x: u32, y: u32) -> BrowserResult<StateSnapshot> {
        self.highlight_pointer(x, y).await?;

        let (x, y) = (f64::from(x), f64::from(y));
        input::mouse_move(self.page(), x, y).await?;
        input::mouse_down(self.page(), x, y).await?;
        input::mouse_up(self.page(), x, y).await?;

        self.capture_state().await
    }

    /// Move the pointer to viewport coordinates without pressing a button.
    pub async fn hover_at(&self, x: u32, y: u32) -> BrowserResult<StateSnapshot> {
        self.highlight_pointer(x, y).await?;
        input::mouse_move(self.page(), f64::from(x), f64::from(y)).await?;
        self.capture_state().await
    }

    /// Press at the source, drag to the destination, release.
    ///
    /// Purely coordinate-driven; no drop-target validation. The page is
    /// allowed to settle between each phase so drag handlers that trigger
    /// loads behave the same as they would under a human drag.
    pub async fn drag_and_drop(
        &self,
        x: u32,
        y: u32,
        destination_x: u32,
        destination_y: u32,
    ) -> BrowserResult<StateSnapshot> {
        let (sx, sy) = (f64::from(x), f64::from(y));
        let (dx, dy) = (f64::from(destination_x), f64::from(destination_y));

        self.highlight_pointer(x, y).await?;
        input::mouse_move(self.page(), sx, sy).await?;
        self.wait_for_settle().await?;

        input::mouse_down(self.page(), sx, sy).await?;
        self.wait_for_settle().await?;

        self.highlight_pointer(destination_x, destination_y).await?;
        input::mouse_move(self.page(), dx, dy).await?;
        self.wait_for_settle().await?;

        input::mouse_up(self.page(), dx, dy).await?;

        self.capture_state().await
    }
}
