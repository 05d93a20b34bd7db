//! Accessible interaction behaviors for the browser.
//!
//! Binds the headless controllers in `system_ui_headless` to the live DOM through Leptos:
//! controlled/uncontrolled widget state, focus traps with a page-wide nesting stack, and
//! roving-index keyboard navigation. The widget primitives compose those hooks and emit the
//! stable `data-ui-*` DOM contract consumed by shell CSS.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod dom;
pub mod hooks;
mod primitives;

pub use dom::WebFocusHost;
pub use hooks::{
    use_controllable_state, use_focus_trap, use_roving_index, ControllableSignal,
    FocusTrapController, RovingOptions,
};
pub use primitives::{Listbox, Modal, RadioGroup, TabList, TabPanel};
pub use system_ui_headless::{
    FocusTrapConfig, InitialFocus, NavigationConfig, Orientation, TextDirection,
};

/// Convenience imports for application crates consuming the shared behavior set.
pub mod prelude {
    pub use crate::{
        use_controllable_state, use_focus_trap, use_roving_index, ControllableSignal,
        FocusTrapConfig, FocusTrapController, InitialFocus, Listbox, Modal, NavigationConfig,
        Orientation, RadioGroup, RovingOptions, TabList, TabPanel, TextDirection,
    };
}
