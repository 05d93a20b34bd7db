//! Normalized keyboard input shared by the focus trap and roving navigation.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
/// A keydown event reduced to the fields the behavior layer reads.
pub struct KeyStroke {
    /// DOM `KeyboardEvent.key` value (`"ArrowDown"`, `"Tab"`, `" "`, ...).
    pub key: String,
    /// Shift modifier.
    pub shift: bool,
    /// Control modifier.
    pub ctrl: bool,
    /// Alt/Option modifier.
    pub alt: bool,
    /// Meta/Command modifier.
    pub meta: bool,
}

impl KeyStroke {
    /// Creates an unmodified key stroke.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Returns the same key with Shift held.
    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Returns the same key with Control held.
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    /// Returns whether Ctrl, Alt, or Meta is held.
    ///
    /// Chords are left to the browser and to application shortcuts.
    pub fn has_command_modifier(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }

    /// Returns whether this is a plain Tab or Shift+Tab.
    pub fn is_tab(&self) -> bool {
        self.key == "Tab" && !self.has_command_modifier()
    }

    /// Returns whether this key activates the current item.
    pub fn is_activation(&self) -> bool {
        matches!(self.key.as_str(), "Enter" | " " | "Spacebar")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Whether a controller claimed a key event.
///
/// Bindings call `preventDefault()` only for [`KeyDisposition::Handled`].
pub enum KeyDisposition {
    /// The controller acted on the key; the default browser action must be suppressed.
    Handled,
    /// The key was not claimed; default browser behavior proceeds.
    Ignored,
}

impl KeyDisposition {
    /// Returns `true` for [`KeyDisposition::Handled`].
    pub fn is_handled(self) -> bool {
        matches!(self, Self::Handled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_with_command_modifier_is_not_a_tab() {
        assert!(KeyStroke::new("Tab").is_tab());
        assert!(KeyStroke::new("Tab").with_shift().is_tab());
        assert!(!KeyStroke::new("Tab").with_ctrl().is_tab());
    }

    #[test]
    fn legacy_spacebar_is_activation() {
        assert!(KeyStroke::new("Spacebar").is_activation());
        assert!(KeyStroke::new(" ").is_activation());
        assert!(!KeyStroke::new("a").is_activation());
    }

    #[test]
    fn deserializes_with_missing_modifiers() {
        let stroke: KeyStroke = serde_json::from_str(r#"{"key":"End"}"#).expect("parse");
        assert_eq!(stroke, KeyStroke::new("End"));
    }
}
