//! Controlled/uncontrolled value reconciliation.
//!
//! Every stateful widget (disclosure open state, selected tab, select value) keeps exactly one
//! [`ControllableState`] so the precedence rule lives in one place:
//!
//! - controlled: the caller's value is authoritative; [`ControllableState::set`] only notifies.
//! - uncontrolled: the internal value is authoritative; `set` stores, then notifies.
//!
//! The mode is re-evaluated on every [`ControllableState::sync`], so a widget may switch modes
//! across its lifetime. Switching is honored silently rather than diagnosed.

use std::fmt;

/// Change notification invoked with the resolved next value.
pub type ChangeHandler<T> = Box<dyn FnMut(&T)>;

/// Construction options mirroring a widget's `value` / `default_value` / `on_change` props.
pub struct ControllableOptions<T> {
    /// Caller-owned value; `Some` puts the state in controlled mode.
    pub value: Option<T>,
    /// Seed for the internal value, read once at creation.
    pub default_value: T,
    /// Fired once per [`ControllableState::set`] / [`ControllableState::update`] call.
    pub on_change: Option<ChangeHandler<T>>,
}

impl<T> ControllableOptions<T> {
    /// Uncontrolled options with no change handler.
    pub fn uncontrolled(default_value: T) -> Self {
        Self {
            value: None,
            default_value,
            on_change: None,
        }
    }
}

/// A single current value plus setter, regardless of who owns the value.
pub struct ControllableState<T> {
    controlled: Option<T>,
    internal: T,
    on_change: Option<ChangeHandler<T>>,
}

impl<T> ControllableState<T> {
    /// Creates an uncontrolled state seeded with `default_value`.
    pub fn new(default_value: T) -> Self {
        Self::create(ControllableOptions::uncontrolled(default_value))
    }

    /// Creates a state from widget props.
    pub fn create(options: ControllableOptions<T>) -> Self {
        Self {
            controlled: options.value,
            internal: options.default_value,
            on_change: options.on_change,
        }
    }

    /// Builder form of [`Self::sync`].
    pub fn with_value(mut self, value: Option<T>) -> Self {
        self.controlled = value;
        self
    }

    /// Installs the change handler.
    pub fn with_on_change(mut self, on_change: impl FnMut(&T) + 'static) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }

    /// Replaces the caller-owned value, typically once per render.
    ///
    /// `None` returns the state to uncontrolled mode; the internal value is whatever it was
    /// when control was taken, not the last controlled value.
    pub fn sync(&mut self, value: Option<T>) {
        self.controlled = value;
    }

    /// Returns whether the caller currently owns the value.
    pub fn is_controlled(&self) -> bool {
        self.controlled.is_some()
    }

    /// The externally visible value.
    pub fn current(&self) -> &T {
        self.controlled.as_ref().unwrap_or(&self.internal)
    }

    /// The internal fallback value, untouched while controlled.
    pub fn internal(&self) -> &T {
        &self.internal
    }

    /// Requests `next` as the new value.
    pub fn set(&mut self, next: T) {
        if self.controlled.is_some() {
            self.notify(&next);
            return;
        }
        self.internal = next;
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(&self.internal);
        }
    }

    /// Requests a value derived from the current one.
    ///
    /// The updater sees [`Self::current`], so it stays correct in controlled mode where the
    /// internal value may be stale.
    pub fn update(&mut self, updater: impl FnOnce(&T) -> T) {
        let next = updater(self.current());
        self.set(next);
    }

    fn notify(&mut self, next: &T) {
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(next);
        }
    }
}

impl<T: Default> Default for ControllableState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for ControllableState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllableState")
            .field("controlled", &self.controlled)
            .field("internal", &self.internal)
            .field("has_on_change", &self.on_change.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use pretty_assertions::assert_eq;

    use super::*;

    fn recording<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl FnMut(&T) + 'static) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        (log, move |next: &T| sink.borrow_mut().push(next.clone()))
    }

    #[test]
    fn uncontrolled_set_stores_then_notifies_once() {
        let (log, on_change) = recording::<u32>();
        let mut state = ControllableState::new(1).with_on_change(on_change);

        state.set(7);

        assert_eq!(*state.current(), 7);
        assert_eq!(*state.internal(), 7);
        assert_eq!(*log.borrow(), vec![7]);
    }

    #[test]
    fn controlled_value_wins_for_every_set() {
        let (log, on_change) = recording::<&'static str>();
        let mut state = ControllableState::new("closed")
            .with_value(Some("open"))
            .with_on_change(on_change);

        for next in ["closed", "open", "closed"] {
            state.set(next);
            assert_eq!(*state.current(), "open");
        }

        assert_eq!(*state.internal(), "closed");
        assert_eq!(*log.borrow(), vec!["closed", "open", "closed"]);
    }

    #[test]
    fn updater_reads_controlled_value_not_stale_internal() {
        let (log, on_change) = recording::<i32>();
        let mut state = ControllableState::create(ControllableOptions {
            value: Some(10),
            default_value: 0,
            on_change: None,
        })
        .with_on_change(on_change);

        state.update(|prev| prev + 1);

        assert_eq!(*log.borrow(), vec![11]);
        assert_eq!(*state.current(), 10);
    }

    #[test]
    fn releasing_control_falls_back_to_internal_value() {
        let mut state = ControllableState::new(false);
        state.set(true);
        state.sync(Some(false));
        assert!(state.is_controlled());
        assert!(!*state.current());

        state.sync(None);
        assert!(!state.is_controlled());
        assert!(*state.current());
    }

    #[test]
    fn set_without_handler_is_silent() {
        let mut state = ControllableState::<usize>::default();
        state.update(|prev| prev + 3);
        assert_eq!(*state.current(), 3);
    }
}
