//! ARIA attribute values derived from controller state.
//!
//! Widgets choose roles (`listbox`/`option`, `tablist`/`tab`, `radiogroup`/`radio`); this
//! module only supplies the state-dependent attribute values for the roving-tabindex pattern.

use serde::{Deserialize, Serialize};

use crate::Orientation;

/// Tab index for item `index` under the roving pattern: `0` for the active item, `-1` otherwise.
pub fn roving_tabindex(index: usize, active_index: usize) -> i32 {
    if index == active_index {
        0
    } else {
        -1
    }
}

/// Value for the container's `aria-orientation`; `None` when both axes are navigable.
pub fn aria_orientation(orientation: Orientation) -> Option<&'static str> {
    match orientation {
        Orientation::Horizontal => Some("horizontal"),
        Orientation::Vertical => Some("vertical"),
        Orientation::Both => None,
    }
}

/// `"true"` / `"false"` token for boolean ARIA states.
pub fn bool_token(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Which ARIA state attribute marks the chosen item for a role.
pub enum SelectionAttribute {
    /// `aria-selected` (`option`, `tab`, `gridcell`).
    Selected,
    /// `aria-checked` (`radio`, `menuitemradio`, `menuitemcheckbox`).
    Checked,
    /// `aria-pressed` (toggle buttons).
    Pressed,
    /// `aria-current` (navigation links, steps).
    Current,
}

impl SelectionAttribute {
    /// Attribute name.
    pub fn attribute_name(self) -> &'static str {
        match self {
            Self::Selected => "aria-selected",
            Self::Checked => "aria-checked",
            Self::Pressed => "aria-pressed",
            Self::Current => "aria-current",
        }
    }

    /// Attribute value for a chosen or unchosen item.
    ///
    /// Every supported attribute uses plain `"true"`/`"false"` tokens.
    pub fn value(self, chosen: bool) -> &'static str {
        bool_token(chosen)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Attribute set for one item in a roving group.
pub struct ItemAria {
    /// Roving tab index.
    pub tabindex: i32,
    /// State attribute name and value.
    pub selection: (&'static str, &'static str),
    /// `aria-disabled` value, present only for disabled items.
    pub disabled: Option<&'static str>,
}

impl ItemAria {
    /// Derives the attributes for item `index`.
    ///
    /// `chosen` is the widget's selected value (which may differ from the active item in
    /// listboxes with manual selection).
    pub fn for_item(
        index: usize,
        active_index: usize,
        chosen: bool,
        attribute: SelectionAttribute,
        disabled: bool,
    ) -> Self {
        Self {
            tabindex: roving_tabindex(index, active_index),
            selection: (attribute.attribute_name(), attribute.value(chosen)),
            disabled: disabled.then_some("true"),
        }
    }
}
