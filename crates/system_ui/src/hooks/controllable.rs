use leptos::*;
use system_ui_headless::ControllableState;

/// Reactive handle over a [`ControllableState`].
///
/// Reads track both the caller's `value` signal and internal writes. The change callback runs
/// after the stored state is released, so it may freely read this handle again.
pub struct ControllableSignal<T: 'static> {
    state: StoredValue<ControllableState<T>>,
    value: Signal<Option<T>>,
    trigger: Trigger,
    on_change: StoredValue<Option<Callback<T>>>,
}

impl<T: 'static> Clone for ControllableSignal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for ControllableSignal<T> {}

impl<T: Clone + 'static> ControllableSignal<T> {
    /// Current value, tracked.
    pub fn get(&self) -> T {
        self.trigger.track();
        let controlled = self.value.get();
        self.read(controlled)
    }

    /// Current value, untracked.
    pub fn get_untracked(&self) -> T {
        let controlled = self.value.get_untracked();
        self.read(controlled)
    }

    /// Returns whether the caller currently owns the value.
    pub fn is_controlled(&self) -> bool {
        self.value.with_untracked(Option::is_some)
    }

    /// Requests `next`; stores it only while uncontrolled, always notifies once.
    pub fn set(&self, next: T) {
        let controlled = self.value.get_untracked();
        self.state.update_value(|state| {
            state.sync(controlled);
            state.set(next.clone());
        });
        self.trigger.notify();
        if let Some(on_change) = self.on_change.get_value() {
            on_change.call(next);
        }
    }

    /// Requests a value derived from the current one.
    pub fn update(&self, updater: impl FnOnce(&T) -> T) {
        let next = updater(&self.get_untracked());
        self.set(next);
    }

    /// Read-only signal view for `view!` attributes.
    pub fn signal(&self) -> Signal<T> {
        let this = *self;
        Signal::derive(move || this.get())
    }

    fn read(&self, controlled: Option<T>) -> T {
        self.state.update_value(|state| state.sync(controlled));
        self.state.with_value(|state| state.current().clone())
    }
}

/// Creates controlled/uncontrolled state for a widget prop pair.
///
/// `value` returning `Some` makes the caller authoritative; `default_value` seeds internal
/// state once.
pub fn use_controllable_state<T: Clone + 'static>(
    value: MaybeSignal<Option<T>>,
    default_value: T,
    on_change: Option<Callback<T>>,
) -> ControllableSignal<T> {
    ControllableSignal {
        state: store_value(ControllableState::new(default_value)),
        value: Signal::derive(move || value.get()),
        trigger: create_trigger(),
        on_change: store_value(on_change),
    }
}
