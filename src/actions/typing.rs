//! Keyboard-driven actions: typing and key chords

use crate::browser::{BrowserError, BrowserResult};
use crate::input;
use crate::keymap;
use crate::session::BrowserSession;
use crate::snapshot::StateSnapshot;

/// Modifier for the select-all chord: the OS command key on macOS, Control
/// everywhere else.
fn select_all_modifier() -> &'static str {
    if cfg!(target_os = "macos") {
        "command"
    } else {
        "control"
    }
}

impl BrowserSession {
    /// Press a chord without producing an observation.
    ///
    /// Names are normalized, every key but the last is held in order, the
    /// last is pressed and released, and held keys are released in reverse
    /// order.
    pub(crate) async fn press_chord(&self, keys: &[&str]) -> BrowserResult<()> {
        if keys.is_empty() {
            return Err(BrowserError::InputFailed(
                "key combination requires at least one key".to_string(),
            ));
        }

        let normalized: Vec<String> = keys.iter().map(|k| keymap::normalize_key(k)).collect();
        for event in input::chord_plan(&normalized) {
            input::dispatch_key_event(self.page(), &event).await?;
        }
        Ok(())
    }

    /// Press an ordered key combination (e.g. `["control", "a"]`) and
    /// observe the result.
    pub async fn key_combination(&self, keys: &[String]) -> BrowserResult<StateSnapshot> {
        let borrowed: Vec<&str> = keys.iter().map(String::as_str).collect();
        self.press_chord(&borrowed).await?;
        self.capture_state().await
    }

    /// Click at (x, y) to focus, then type text as sequential key input.
    ///
    /// With `clear_before_typing`, the field's existing content is removed
    /// first via a select-all chord followed by Delete, issued regardless of
    /// whether the field is empty. With `press_enter`, an Enter chord follows
    /// the text.
    pub async fn type_text_at(
        &self,
        x: u32,
        y: u32,
        text: &str,
        press_enter: bool,
        clear_before_typing: bool,
    ) -> BrowserResult<StateSnapshot> {
        self.highlight_pointer(x, y).await?;

        let (fx, fy) = (f64::from(x), f64::from(y));
        input::mouse_move(self.page(), fx, fy).await?;
        input::mouse_down(self.page(), fx, fy).await?;
        input::mouse_up(self.page(), fx, fy).await?;
        self.wait_for_settle().await?;

        if clear_before_typing {
            self.press_chord(&[select_all_modifier(), "a"]).await?;
            self.press_chord(&["delete"]).await?;
        }

        input::type_text(self.page(), text).await?;

        if press_enter {
            self.press_chord(&["enter"]).await?;
        }

        self.capture_state().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_all_modifier_matches_the_platform() {
        if cfg!(target_os = "macos") {
            assert_eq!(select_all_modifier(), "command");
        } else {
            assert_eq!(select_all_modifier(), "control");
        }
    }
}
