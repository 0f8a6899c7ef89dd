//! Viewport and coordinate policy
//!
//! Pure scroll math: logical direction + magnitude in, pixel vectors out.
//! The live viewport lookup that feeds these helpers lives on
//! [`crate::session::BrowserSession::screen_size`].

use crate::actions::ScrollDirection;

/// Wheel distance used when the agent gives no explicit magnitude, in device
/// pixels.
pub const DEFAULT_SCROLL_MAGNITUDE: u32 = 800;

/// Derive a wheel delta vector from a direction and magnitude.
///
/// Up and left are negative on their axis, down and right positive.
pub fn scroll_vector(direction: ScrollDirection, magnitude: Option<u32>) -> (f64, f64) {
    let magnitude = f64::from(magnitude.unwrap_or(DEFAULT_SCROLL_MAGNITUDE));
    match direction {
        ScrollDirection::Up => (0.0, -magnitude),
        ScrollDirection::Down => (0.0, magnitude),
        ScrollDirection::Left => (-magnitude, 0.0),
        ScrollDirection::Right => (magnitude, 0.0),
    }
}

/// Horizontal document-scroll distance for a viewport width: half the
/// viewport, signed by direction.
pub fn horizontal_scroll_amount(screen_width: u32, direction: ScrollDirection) -> i64 {
    let amount = i64::from(screen_width / 2);
    match direction {
        ScrollDirection::Left => -amount,
        _ => amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_magnitude_is_800() {
        assert_eq!(scroll_vector(ScrollDirection::Up, None), (0.0, -800.0));
        assert_eq!(scroll_vector(ScrollDirection::Right, None), (800.0, 0.0));
    }

    #[test]
    fn explicit_magnitude_scales_the_vector() {
        assert_eq!(scroll_vector(ScrollDirection::Down, Some(250)), (0.0, 250.0));
        assert_eq!(scroll_vector(ScrollDirection::Left, Some(120)), (-120.0, 0.0));
    }

    #[test]
    fn horizontal_amount_is_half_the_viewport_width() {
        assert_eq!(
            horizontal_scroll_amount(1440, ScrollDirection::Left),
            -720
        );
        assert_eq!(
            horizontal_scroll_amount(1440, ScrollDirection::Right),
            720
        );
    }

    #[test]
    fn horizontal_amount_uses_integer_division() {
        assert_eq!(horizontal_scroll_amount(1367, ScrollDirection::Right), 683);
    }
}
