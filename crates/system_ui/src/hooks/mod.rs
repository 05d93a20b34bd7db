//! Reactive wrappers around the headless behavior controllers.

mod controllable;
mod focus_trap;
mod roving;

pub use controllable::{use_controllable_state, ControllableSignal};
pub use focus_trap::{use_focus_trap, FocusTrapController};
pub use roving::{use_roving_index, RovingOptions};
