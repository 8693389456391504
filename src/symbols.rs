//! Symbol-name to key-code lookup.
//!
//! Presets refer to output keys by name ("a", "shift_l", "btn_left").
//! This table resolves those names to kernel `EV_KEY` codes, using the
//! evdev code constants as the authoritative values.

use std::collections::HashMap;

use evdev::Key;

use crate::error::{KrError, Result};

/// Named entries, XKB-style lowercase plus evdev button names.
const ENTRIES: &[(&str, Key)] = &[
    // Letters
    ("a", Key::KEY_A),
    ("b", Key::KEY_B),
    ("c", Key::KEY_C),
    ("d", Key::KEY_D),
    ("e", Key::KEY_E),
    ("f", Key::KEY_F),
    ("g", Key::KEY_G),
    ("h", Key::KEY_H),
    ("i", Key::KEY_I),
    ("j", Key::KEY_J),
    ("k", Key::KEY_K),
    ("l", Key::KEY_L),
    ("m", Key::KEY_M),
    ("n", Key::KEY_N),
    ("o", Key::KEY_O),
    ("p", Key::KEY_P),
    ("q", Key::KEY_Q),
    ("r", Key::KEY_R),
    ("s", Key::KEY_S),
    ("t", Key::KEY_T),
    ("u", Key::KEY_U),
    ("v", Key::KEY_V),
    ("w", Key::KEY_W),
    ("x", Key::KEY_X),
    ("y", Key::KEY_Y),
    ("z", Key::KEY_Z),
    // Digits
    ("0", Key::KEY_0),
    ("1", Key::KEY_1),
    ("2", Key::KEY_2),
    ("3", Key::KEY_3),
    ("4", Key::KEY_4),
    ("5", Key::KEY_5),
    ("6", Key::KEY_6),
    ("7", Key::KEY_7),
    ("8", Key::KEY_8),
    ("9", Key::KEY_9),
    // Function keys
    ("f1", Key::KEY_F1),
    ("f2", Key::KEY_F2),
    ("f3", Key::KEY_F3),
    ("f4", Key::KEY_F4),
    ("f5", Key::KEY_F5),
    ("f6", Key::KEY_F6),
    ("f7", Key::KEY_F7),
    ("f8", Key::KEY_F8),
    ("f9", Key::KEY_F9),
    ("f10", Key::KEY_F10),
    ("f11", Key::KEY_F11),
    ("f12", Key::KEY_F12),
    // Modifiers
    ("shift_l", Key::KEY_LEFTSHIFT),
    ("shift_r", Key::KEY_RIGHTSHIFT),
    ("control_l", Key::KEY_LEFTCTRL),
    ("control_r", Key::KEY_RIGHTCTRL),
    ("alt_l", Key::KEY_LEFTALT),
    ("alt_r", Key::KEY_RIGHTALT),
    ("super_l", Key::KEY_LEFTMETA),
    ("super_r", Key::KEY_RIGHTMETA),
    ("caps_lock", Key::KEY_CAPSLOCK),
    ("num_lock", Key::KEY_NUMLOCK),
    ("scroll_lock", Key::KEY_SCROLLLOCK),
    // Editing and whitespace
    ("space", Key::KEY_SPACE),
    ("tab", Key::KEY_TAB),
    ("return", Key::KEY_ENTER),
    ("enter", Key::KEY_ENTER),
    ("backspace", Key::KEY_BACKSPACE),
    ("escape", Key::KEY_ESC),
    ("esc", Key::KEY_ESC),
    ("delete", Key::KEY_DELETE),
    ("insert", Key::KEY_INSERT),
    // Navigation
    ("up", Key::KEY_UP),
    ("down", Key::KEY_DOWN),
    ("left", Key::KEY_LEFT),
    ("right", Key::KEY_RIGHT),
    ("home", Key::KEY_HOME),
    ("end", Key::KEY_END),
    ("page_up", Key::KEY_PAGEUP),
    ("page_down", Key::KEY_PAGEDOWN),
    // Punctuation
    ("minus", Key::KEY_MINUS),
    ("equal", Key::KEY_EQUAL),
    ("comma", Key::KEY_COMMA),
    ("period", Key::KEY_DOT),
    ("slash", Key::KEY_SLASH),
    ("backslash", Key::KEY_BACKSLASH),
    ("semicolon", Key::KEY_SEMICOLON),
    ("apostrophe", Key::KEY_APOSTROPHE),
    ("grave", Key::KEY_GRAVE),
    ("bracketleft", Key::KEY_LEFTBRACE),
    ("bracketright", Key::KEY_RIGHTBRACE),
    // Keypad
    ("kp_0", Key::KEY_KP0),
    ("kp_1", Key::KEY_KP1),
    ("kp_2", Key::KEY_KP2),
    ("kp_3", Key::KEY_KP3),
    ("kp_4", Key::KEY_KP4),
    ("kp_5", Key::KEY_KP5),
    ("kp_6", Key::KEY_KP6),
    ("kp_7", Key::KEY_KP7),
    ("kp_8", Key::KEY_KP8),
    ("kp_9", Key::KEY_KP9),
    ("kp_enter", Key::KEY_KPENTER),
    ("kp_add", Key::KEY_KPPLUS),
    ("kp_subtract", Key::KEY_KPMINUS),
    ("kp_multiply", Key::KEY_KPASTERISK),
    ("kp_divide", Key::KEY_KPSLASH),
    ("kp_decimal", Key::KEY_KPDOT),
    // Media
    ("mute", Key::KEY_MUTE),
    ("volume_up", Key::KEY_VOLUMEUP),
    ("volume_down", Key::KEY_VOLUMEDOWN),
    ("play_pause", Key::KEY_PLAYPAUSE),
    ("next_song", Key::KEY_NEXTSONG),
    ("previous_song", Key::KEY_PREVIOUSSONG),
    ("brightness_up", Key::KEY_BRIGHTNESSUP),
    ("brightness_down", Key::KEY_BRIGHTNESSDOWN),
    // Mouse buttons
    ("btn_left", Key::BTN_LEFT),
    ("btn_right", Key::BTN_RIGHT),
    ("btn_middle", Key::BTN_MIDDLE),
    ("btn_side", Key::BTN_SIDE),
    ("btn_extra", Key::BTN_EXTRA),
    // Gamepad buttons
    ("btn_south", Key::BTN_SOUTH),
    ("btn_east", Key::BTN_EAST),
    ("btn_north", Key::BTN_NORTH),
    ("btn_west", Key::BTN_WEST),
    ("btn_tl", Key::BTN_TL),
    ("btn_tr", Key::BTN_TR),
    ("btn_select", Key::BTN_SELECT),
    ("btn_start", Key::BTN_START),
    ("btn_mode", Key::BTN_MODE),
    ("btn_thumbl", Key::BTN_THUMBL),
    ("btn_thumbr", Key::BTN_THUMBR),
    ("btn_dpad_up", Key::BTN_DPAD_UP),
    ("btn_dpad_down", Key::BTN_DPAD_DOWN),
    ("btn_dpad_left", Key::BTN_DPAD_LEFT),
    ("btn_dpad_right", Key::BTN_DPAD_RIGHT),
];

/// Case-insensitive symbol-name to `EV_KEY` code lookup.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    codes: HashMap<String, u16>,
}

impl SymbolTable {
    pub fn new() -> Self {
        let codes = ENTRIES
            .iter()
            .map(|&(name, key)| (name.to_string(), key.code()))
            .collect();
        Self { codes }
    }

    /// Resolve a symbol name to its key code.
    ///
    /// Lookup is case-insensitive; the `key_` prefix used by raw evdev
    /// names ("KEY_A") is also accepted.
    pub fn get(&self, name: &str) -> Result<u16> {
        let normalized = name.trim().to_lowercase();
        if let Some(&code) = self.codes.get(&normalized) {
            return Ok(code);
        }
        if let Some(stripped) = normalized.strip_prefix("key_") {
            if let Some(&code) = self.codes.get(stripped) {
                return Ok(code);
            }
        }
        Err(KrError::UnknownSymbol {
            name: name.trim().to_string(),
        })
    }

    /// True if the name resolves to a key code.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_match_evdev() {
        let table = SymbolTable::new();
        assert_eq!(table.get("a").unwrap(), Key::KEY_A.code());
        assert_eq!(table.get("z").unwrap(), Key::KEY_Z.code());
    }

    #[test]
    fn test_case_insensitive() {
        let table = SymbolTable::new();
        assert_eq!(table.get("A").unwrap(), table.get("a").unwrap());
        assert_eq!(
            table.get("Control_L").unwrap(),
            Key::KEY_LEFTCTRL.code()
        );
    }

    #[test]
    fn test_key_prefix_alias() {
        let table = SymbolTable::new();
        assert_eq!(table.get("KEY_A").unwrap(), Key::KEY_A.code());
        assert_eq!(table.get("key_tab").unwrap(), Key::KEY_TAB.code());
    }

    #[test]
    fn test_mouse_buttons() {
        let table = SymbolTable::new();
        assert_eq!(table.get("btn_left").unwrap(), Key::BTN_LEFT.code());
    }

    #[test]
    fn test_unknown_symbol() {
        let table = SymbolTable::new();
        let err = table.get("no_such_key").unwrap_err();
        assert!(matches!(err, KrError::UnknownSymbol { name } if name == "no_such_key"));
    }

    #[test]
    fn test_whitespace_tolerated() {
        let table = SymbolTable::new();
        assert_eq!(table.get(" a ").unwrap(), Key::KEY_A.code());
    }
}
