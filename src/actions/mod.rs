//! Agent-facing action vocabulary
//!
//! A closed set of discrete UI actions plus the dispatch that maps each
//! variant to its executor method on [`BrowserSession`]. Every action
//! resolves to a [`StateSnapshot`]; none returns before the page has settled.

mod navigation;
mod pointer;
mod scroll;
mod typing;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::browser::{BrowserError, BrowserResult};
use crate::session::BrowserSession;
use crate::snapshot::StateSnapshot;

/// Logical scroll direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
}

impl fmt::Display for ScrollDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScrollDirection::Up => "up",
            ScrollDirection::Down => "down",
            ScrollDirection::Left => "left",
            ScrollDirection::Right => "right",
        };
        f.write_str(s)
    }
}

impl FromStr for ScrollDirection {
    type Err = BrowserError;

    /// Unsupported values are a reported error naming the offending input,
    /// never a silent no-op.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(ScrollDirection::Up),
            "down" => Ok(ScrollDirection::Down),
            "left" => Ok(ScrollDirection::Left),
            "right" => Ok(ScrollDirection::Right),
            _ => Err(BrowserError::UnsupportedDirection(s.to_string())),
        }
    }
}

/// One discrete, agent-issued browser operation.
///
/// Stateless input: the session holds all state, an `Action` is consumed by
/// a single [`BrowserSession::perform`] call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// First observation after session creation; no browser mutation.
    OpenBrowser,
    ClickAt {
        x: u32,
        y: u32,
    },
    HoverAt {
        x: u32,
        y: u32,
    },
    TypeTextAt {
        x: u32,
        y: u32,
        text: String,
        #[serde(default)]
        press_enter: bool,
        #[serde(default = "default_clear_before_typing")]
        clear_before_typing: bool,
    },
    ScrollDocument {
        direction: ScrollDirection,
    },
    ScrollAt {
        x: u32,
        y: u32,
        direction: ScrollDirection,
        #[serde(default)]
        magnitude: Option<u32>,
    },
    Wait,
    GoBack,
    GoForward,
    Search,
    Navigate {
        url: String,
    },
    KeyCombination {
        keys: Vec<String>,
    },
    DragAndDrop {
        x: u32,
        y: u32,
        destination_x: u32,
        destination_y: u32,
    },
}

fn default_clear_before_typing() -> bool {
    true
}

impl BrowserSession {
    /// Execute one action to completion and return the settled observation.
    pub async fn perform(&self, action: Action) -> BrowserResult<StateSnapshot> {
        match action {
            Action::OpenBrowser => self.open_browser().await,
            Action::ClickAt { x, y } => self.click_at(x, y).await,
            Action::HoverAt { x, y } => self.hover_at(x, y).await,
            Action::TypeTextAt {
                x,
                y,
                text,
                press_enter,
                clear_before_typing,
            } => {
                self.type_text_at(x, y, &text, press_enter, clear_before_typing)
                    .await
            }
            Action::ScrollDocument { direction } => self.scroll_document(direction).await,
            Action::ScrollAt {
                x,
                y,
                direction,
                magnitude,
            } => self.scroll_at(x, y, direction, magnitude).await,
            Action::Wait => self.wait().await,
            Action::GoBack => self.go_back().await,
            Action::GoForward => self.go_forward().await,
            Action::Search => self.search().await,
            Action::Navigate { url } => self.navigate(&url).await,
            Action::KeyCombination { keys } => self.key_combination(&keys).await,
            Action::DragAndDrop {
                x,
                y,
                destination_x,
                destination_y,
            } => self.drag_and_drop(x, y, destination_x, destination_y).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!("up".parse::<ScrollDirection>().unwrap(), ScrollDirection::Up);
        assert_eq!(
            "Right".parse::<ScrollDirection>().unwrap(),
            ScrollDirection::Right
        );
    }

    #[test]
    fn unsupported_direction_reports_the_offending_value() {
        let err = "diagonal".parse::<ScrollDirection>().unwrap_err();
        match err {
            BrowserError::UnsupportedDirection(value) => assert_eq!(value, "diagonal"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(
            "diagonal"
                .parse::<ScrollDirection>()
                .unwrap_err()
                .to_string()
                .contains("diagonal")
        );
    }

    #[test]
    fn actions_decode_from_tagged_json() {
        let action: Action =
            serde_json::from_str(r#"{"action": "click_at", "x": 100, "y": 250}"#).unwrap();
        assert_eq!(action, Action::ClickAt { x: 100, y: 250 });

        let action: Action =
            serde_json::from_str(r#"{"action": "scroll_document", "direction": "left"}"#).unwrap();
        assert_eq!(
            action,
            Action::ScrollDocument {
                direction: ScrollDirection::Left
            }
        );

        let action: Action = serde_json::from_str(r#"{"action": "wait"}"#).unwrap();
        assert_eq!(action, Action::Wait);
    }

    #[test]
    fn type_text_defaults_to_clearing_without_enter() {
        let action: Action = serde_json::from_str(
            r#"{"action": "type_text_at", "x": 10, "y": 20, "text": "hello"}"#,
        )
        .unwrap();
        assert_eq!(
            action,
            Action::TypeTextAt {
                x: 10,
                y: 20,
                text: "hello".to_string(),
                press_enter: false,
                clear_before_typing: true,
            }
        );
    }

    #[test]
    fn scroll_at_magnitude_is_optional() {
        let action: Action = serde_json::from_str(
            r#"{"action": "scroll_at", "x": 5, "y": 6, "direction": "down"}"#,
        )
        .unwrap();
        assert_eq!(
            action,
            Action::ScrollAt {
                x: 5,
                y: 6,
                direction: ScrollDirection::Down,
                magnitude: None,
            }
        );
    }

    #[test]
    fn unknown_direction_in_json_is_rejected() {
        let result: Result<Action, _> =
            serde_json::from_str(r#"{"action": "scroll_document", "direction": "sideways"}"#);
        assert!(result.is_err());
    }
}
