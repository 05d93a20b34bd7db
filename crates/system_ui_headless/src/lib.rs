//! Headless interaction and accessibility behavior for the shared UI primitive library.
//!
//! This crate owns the stateful controllers every composed widget depends on to be
//! keyboard-operable and screen-reader-correct, independent of any rendering runtime:
//!
//! - [`ControllableState`] reconciles a caller-owned value with internal fallback state.
//! - [`FocusTrap`] and [`FocusTrapStack`] contain keyboard focus inside modal subtrees and
//!   restore it afterwards, with strict last-in/first-out nesting.
//! - [`handle_key_down`] maps arrow/Home/End/Enter/Space keys onto roving-index transitions.
//!
//! DOM access goes through the [`FocusHost`] trait. [`MemoryDocument`] implements it for
//! headless hosts and tests; the Leptos bindings in `system_ui` implement it over `web-sys`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod aria;
mod config;
mod controllable;
pub mod document;
mod error;
mod focus_trap;
mod focusable;
mod host;
mod key;
mod navigation;

pub use config::BehaviorConfig;
pub use controllable::{ChangeHandler, ControllableOptions, ControllableState};
pub use document::{MemoryDocument, NodeId};
pub use error::{ConfigError, FocusTrapError};
pub use focus_trap::{FocusTrap, FocusTrapConfig, FocusTrapStack, InitialFocus, TrapId};
pub use focusable::{tabbable_elements, ElementTraits};
pub use host::FocusHost;
pub use key::{KeyDisposition, KeyStroke};
pub use navigation::{
    handle_key_down, intent_for, resolve_key, resolve_key_skipping, NavigationConfig,
    NavigationIntent, NavigationOutcome, NavigationState, Orientation, TextDirection,
};
