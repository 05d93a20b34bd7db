//! Accessible widget primitives built on the behavior hooks.
//!
//! Every primitive emits the `data-ui-primitive` / `data-ui-kind` DOM contract so shell CSS can
//! style it without relying on element structure.

use leptos::ev::KeyboardEvent;
use leptos::{html::Div, *};
use system_ui_headless::{
    aria::{aria_orientation, bool_token, ItemAria, SelectionAttribute},
    FocusTrapConfig, NavigationConfig, Orientation,
};

use crate::hooks::{
    use_controllable_state, use_focus_trap, use_roving_index, ControllableSignal, RovingOptions,
};

mod navigation;
mod overlays;

pub use navigation::{Listbox, RadioGroup, TabList, TabPanel};
pub use overlays::Modal;

pub(crate) fn merge_layout_class(base: &'static str, layout_class: Option<&'static str>) -> String {
    match layout_class {
        Some(layout_class) if !layout_class.is_empty() => format!("{base} {layout_class}"),
        _ => base.to_string(),
    }
}

pub(crate) fn open_token(open: bool) -> &'static str {
    if open {
        "open"
    } else {
        "closed"
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn layout_class_is_appended_to_base() {
        assert_eq!(merge_layout_class("ui-listbox", None), "ui-listbox");
        assert_eq!(merge_layout_class("ui-listbox", Some("")), "ui-listbox");
        assert_eq!(
            merge_layout_class("ui-listbox", Some("sidebar-list")),
            "ui-listbox sidebar-list"
        );
    }
}
