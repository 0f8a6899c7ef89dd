//! Key name normalization
//!
//! Agents describe keys with human-friendly names ("enter", "command",
//! "pagedown"); the protocol wants DOM key values ("Enter", "Meta",
//! "PageDown"). The table below is the fixed mapping between the two.
//! Unknown names pass through verbatim, so raw engine identifiers remain
//! usable as an escape hatch. Extend by editing the table, not at runtime.

/// Translate a human-friendly key name to its engine-native key value.
///
/// Lookup is case-insensitive; unrecognized names are returned unchanged.
pub fn normalize_key(name: &str) -> String {
    match lookup(&name.to_lowercase()) {
        Some(native) => native.to_string(),
        None => name.to_string(),
    }
}

fn lookup(lower: &str) -> Option<&'static str> {
    let native = match lower {
        "backspace" => "Backspace",
        "tab" => "Tab",
        "return" | "enter" => "Enter",
        "shift" => "Shift",
        "control" | "ctrl" => "Control",
        "alt" | "option" => "Alt",
        "escape" | "esc" => "Escape",
        "space" => " ",
        "pageup" => "PageUp",
        "pagedown" => "PageDown",
        "end" => "End",
        "home" => "Home",
        "left" => "ArrowLeft",
        "up" => "ArrowUp",
        "right" => "ArrowRight",
        "down" => "ArrowDown",
        "insert" => "Insert",
        "delete" => "Delete",
        "semicolon" => ";",
        "equals" => "=",
        "multiply" => "*",
        "add" => "+",
        "separator" => ",",
        "subtract" => "-",
        "decimal" => ".",
        "divide" => "/",
        "f1" => "F1",
        "f2" => "F2",
        "f3" => "F3",
        "f4" => "F4",
        "f5" => "F5",
        "f6" => "F6",
        "f7" => "F7",
        "f8" => "F8",
        "f9" => "F9",
        "f10" => "F10",
        "f11" => "F11",
        "f12" => "F12",
        "command" | "cmd" | "meta" | "win" => "Meta",
        _ => return None,
    };
    Some(native)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_navigation_keys() {
        assert_eq!(normalize_key("enter"), "Enter");
        assert_eq!(normalize_key("return"), "Enter");
        assert_eq!(normalize_key("pagedown"), "PageDown");
        assert_eq!(normalize_key("left"), "ArrowLeft");
        assert_eq!(normalize_key("home"), "Home");
    }

    #[test]
    fn maps_modifiers() {
        assert_eq!(normalize_key("control"), "Control");
        assert_eq!(normalize_key("ctrl"), "Control");
        assert_eq!(normalize_key("command"), "Meta");
        assert_eq!(normalize_key("cmd"), "Meta");
        assert_eq!(normalize_key("option"), "Alt");
        assert_eq!(normalize_key("shift"), "Shift");
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(normalize_key("ENTER"), "Enter");
        assert_eq!(normalize_key("PageUp"), "PageUp");
        assert_eq!(normalize_key("Command"), "Meta");
    }

    #[test]
    fn maps_function_and_editing_keys() {
        assert_eq!(normalize_key("f1"), "F1");
        assert_eq!(normalize_key("f12"), "F12");
        assert_eq!(normalize_key("delete"), "Delete");
        assert_eq!(normalize_key("backspace"), "Backspace");
        assert_eq!(normalize_key("space"), " ");
    }

    #[test]
    fn maps_punctuation_aliases() {
        assert_eq!(normalize_key("semicolon"), ";");
        assert_eq!(normalize_key("equals"), "=");
        assert_eq!(normalize_key("divide"), "/");
        assert_eq!(normalize_key("decimal"), ".");
    }

    #[test]
    fn unknown_names_pass_through_verbatim() {
        assert_eq!(normalize_key("ArrowLeft"), "ArrowLeft");
        assert_eq!(normalize_key("a"), "a");
        assert_eq!(normalize_key("MediaPlayPause"), "MediaPlayPause");
    }
}
