//! Raw input dispatch over the DevTools protocol
//!
//! Mouse, wheel, and keyboard events for the action executor. Key chords are
//! planned as data first (press order, release order, modifier bitmasks) so
//! the sequencing rules are testable without a browser, then dispatched one
//! CDP command at a time.

use chromiumoxide::Page;
use chromiumoxide::keys;
use chromiumoxide_cdp::cdp::browser_protocol::input::{
    DispatchKeyEventParams, DispatchKeyEventType, DispatchMouseEventParams,
    DispatchMouseEventType, InsertTextParams, MouseButton,
};

use crate::browser::{BrowserError, BrowserResult};

// CDP modifier bitmask values
const MODIFIER_ALT: i64 = 1;
const MODIFIER_CTRL: i64 = 2;
const MODIFIER_META: i64 = 4;
const MODIFIER_SHIFT: i64 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyDirection {
    Down,
    Up,
}

/// One planned key transition within a chord, with the modifier mask in
/// effect at the moment it is dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlannedKeyEvent {
    pub direction: KeyDirection,
    pub key: String,
    pub modifiers: i64,
}

fn modifier_bit(key: &str) -> i64 {
    match key {
        "Alt" => MODIFIER_ALT,
        "Control" => MODIFIER_CTRL,
        "Meta" => MODIFIER_META,
        "Shift" => MODIFIER_SHIFT,
        _ => 0,
    }
}

/// Plan a chord over already-normalized key names.
///
/// Every key except the last is held in the given order, the last key is
/// pressed and released, then the held keys are released innermost-first:
/// release order is the exact reverse of press order. Modifier bits
/// accumulate while their key is held and are attached to every event
/// dispatched in that window (a key's own bit is set on its down event and
/// cleared after its up event, matching how Chrome reports real chording).
pub(crate) fn chord_plan(keys: &[String]) -> Vec<PlannedKeyEvent> {
    let mut plan = Vec::with_capacity(keys.len() * 2);
    let mut held: i64 = 0;

    for key in keys {
        held |= modifier_bit(key);
        plan.push(PlannedKeyEvent {
            direction: KeyDirection::Down,
            key: key.clone(),
            modifiers: held,
        });
    }
    for key in keys.iter().rev() {
        plan.push(PlannedKeyEvent {
            direction: KeyDirection::Up,
            key: key.clone(),
            modifiers: held,
        });
        held &= !modifier_bit(key);
    }
    plan
}

/// Dispatch one key transition.
///
/// Keys known to the US keyboard layout carry their full definition (code,
/// virtual key codes, character text); anything else is passed through with
/// just the key value so raw engine identifiers keep working.
pub(crate) async fn dispatch_key_event(
    page: &Page,
    event: &PlannedKeyEvent,
) -> BrowserResult<()> {
    let definition = keys::get_key_definition(&event.key).or_else(|| {
        keys::USKEYBOARD_LAYOUT
            .iter()
            .find(|d| d.key.eq_ignore_ascii_case(&event.key))
    });

    let mut builder = DispatchKeyEventParams::builder().modifiers(event.modifiers);
    let mut has_text = false;

    match definition {
        Some(def) => {
            builder = builder
                .key(def.key)
                .code(def.code)
                .windows_virtual_key_code(def.key_code)
                .native_virtual_key_code(def.key_code);

            // Character text only on plain key-downs; chords like Control+A
            // must not insert a literal "a".
            let chorded = event.modifiers & (MODIFIER_ALT | MODIFIER_CTRL | MODIFIER_META) != 0;
            if event.direction == KeyDirection::Down && !chorded {
                if let Some(text) = def.text {
                    builder = builder.text(text);
                    has_text = true;
                } else if def.key.len() == 1 {
                    builder = builder.text(def.key);
                    has_text = true;
                }
            }
        }
        None => {
            builder = builder.key(event.key.as_str());
        }
    }

    let event_type = match event.direction {
        KeyDirection::Down if has_text => DispatchKeyEventType::KeyDown,
        KeyDirection::Down => DispatchKeyEventType::RawKeyDown,
        KeyDirection::Up => DispatchKeyEventType::KeyUp,
    };

    let params = builder
        .r#type(event_type)
        .build()
        .map_err(BrowserError::InputFailed)?;

    page.execute(params)
        .await
        .map_err(|e| BrowserError::InputFailed(e.to_string()))?;

    Ok(())
}

/// Type literal text as sequential per-character key input.
///
/// Never uses clipboard paste: each character arrives as its own key event so
/// input listeners fire the way they would for a human. Characters outside
/// the US keyboard layout fall back to `Input.insertText`.
pub(crate) async fn type_text(page: &Page, text: &str) -> BrowserResult<()> {
    for ch in text.chars() {
        let ch_str = ch.to_string();
        match keys::get_key_definition(&ch_str) {
            Some(def) => {
                let down = DispatchKeyEventParams::builder()
                    .r#type(DispatchKeyEventType::KeyDown)
                    .key(def.key)
                    .code(def.code)
                    .windows_virtual_key_code(def.key_code)
                    .native_virtual_key_code(def.key_code)
                    .text(ch_str.clone())
                    .build()
                    .map_err(BrowserError::InputFailed)?;
                page.execute(down)
                    .await
                    .map_err(|e| BrowserError::InputFailed(e.to_string()))?;

                let up = DispatchKeyEventParams::builder()
                    .r#type(DispatchKeyEventType::KeyUp)
                    .key(def.key)
                    .code(def.code)
                    .windows_virtual_key_code(def.key_code)
                    .native_virtual_key_code(def.key_code)
                    .build()
                    .map_err(BrowserError::InputFailed)?;
                page.execute(up)
                    .await
                    .map_err(|e| BrowserError::InputFailed(e.to_string()))?;
            }
            None => {
                page.execute(InsertTextParams::new(ch_str))
                    .await
                    .map_err(|e| BrowserError::InputFailed(e.to_string()))?;
            }
        }
    }
    Ok(())
}

pub(crate) async fn mouse_move(page: &Page, x: f64, y: f64) -> BrowserResult<()> {
    let params = DispatchMouseEventParams::builder()
        .r#type(DispatchMouseEventType::MouseMoved)
        .x(x)
        .y(y)
        .build()
        .map_err(BrowserError::InputFailed)?;
    page.execute(params)
        .await
        .map_err(|e| BrowserError::InputFailed(e.to_string()))?;
    Ok(())
}

pub(crate) async fn mouse_down(page: &Page, x: f64, y: f64) -> BrowserResult<()> {
    let params = DispatchMouseEventParams::builder()
        .r#type(DispatchMouseEventType::MousePressed)
        .button(MouseButton::Left)
        .x(x)
        .y(y)
        .click_count(1)
        .build()
        .map_err(BrowserError::InputFailed)?;
    page.execute(params)
        .await
        .map_err(|e| BrowserError::InputFailed(e.to_string()))?;
    Ok(())
}

pub(crate) async fn mouse_up(page: &Page, x: f64, y: f64) -> BrowserResult<()> {
    let params = DispatchMouseEventParams::builder()
        .r#type(DispatchMouseEventType::MouseReleased)
        .button(MouseButton::Left)
        .x(x)
        .y(y)
        .click_count(1)
        .build()
        .map_err(BrowserError::InputFailed)?;
    page.execute(params)
        .await
        .map_err(|e| BrowserError::InputFailed(e.to_string()))?;
    Ok(())
}

/// Dispatch a wheel event at (x, y) with the given pixel deltas.
pub(crate) async fn wheel(page: &Page, x: f64, y: f64, dx: f64, dy: f64) -> BrowserResult<()> {
    let params = DispatchMouseEventParams::builder()
        .r#type(DispatchMouseEventType::MouseWheel)
        .x(x)
        .y(y)
        .delta_x(dx)
        .delta_y(dy)
        .build()
        .map_err(BrowserError::InputFailed)?;
    page.execute(params)
        .await
        .map_err(|e| BrowserError::InputFailed(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn single_key_is_pressed_and_released() {
        let plan = chord_plan(&keys(&["Enter"]));
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].direction, KeyDirection::Down);
        assert_eq!(plan[0].key, "Enter");
        assert_eq!(plan[1].direction, KeyDirection::Up);
        assert_eq!(plan[1].key, "Enter");
    }

    #[test]
    fn release_order_is_exact_reverse_of_press_order() {
        let plan = chord_plan(&keys(&["Control", "Shift", "Tab"]));
        let downs: Vec<&str> = plan
            .iter()
            .filter(|e| e.direction == KeyDirection::Down)
            .map(|e| e.key.as_str())
            .collect();
        let ups: Vec<&str> = plan
            .iter()
            .filter(|e| e.direction == KeyDirection::Up)
            .map(|e| e.key.as_str())
            .collect();
        assert_eq!(downs, ["Control", "Shift", "Tab"]);
        assert_eq!(ups, ["Tab", "Shift", "Control"]);
        // All downs precede all ups
        assert!(
            plan.iter()
                .position(|e| e.direction == KeyDirection::Up)
                .unwrap()
                == downs.len()
        );
    }

    #[test]
    fn modifier_mask_accumulates_while_held() {
        let plan = chord_plan(&keys(&["Control", "a"]));
        assert_eq!(plan[0].modifiers, MODIFIER_CTRL); // Control down
        assert_eq!(plan[1].modifiers, MODIFIER_CTRL); // a down, under Control
        assert_eq!(plan[2].modifiers, MODIFIER_CTRL); // a up, still under Control
        assert_eq!(plan[3].modifiers, MODIFIER_CTRL); // Control up
    }

    #[test]
    fn multiple_modifiers_combine_their_bits() {
        let plan = chord_plan(&keys(&["Control", "Shift", "p"]));
        assert_eq!(plan[0].modifiers, MODIFIER_CTRL);
        assert_eq!(plan[1].modifiers, MODIFIER_CTRL | MODIFIER_SHIFT);
        assert_eq!(plan[2].modifiers, MODIFIER_CTRL | MODIFIER_SHIFT);
    }

    #[test]
    fn non_modifier_keys_contribute_no_bits() {
        let plan = chord_plan(&keys(&["Delete"]));
        assert!(plan.iter().all(|e| e.modifiers == 0));
    }
}
