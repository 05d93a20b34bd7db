//! Roving-index keyboard navigation.
//!
//! Pure transitions from `(state, key)` to the next active index and an optional selection.
//! The caller persists the index (usually through a [`crate::ControllableState`]) and renders
//! the roving tabindex from it. The controller knows nothing about which widget it serves;
//! menus, listboxes, tab lists, and radio groups differ only in the parameters they pass.

use serde::{Deserialize, Serialize};

use crate::{KeyDisposition, KeyStroke};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Axis along which arrow keys move the active index.
pub enum Orientation {
    /// ArrowLeft/ArrowRight.
    Horizontal,
    /// ArrowUp/ArrowDown.
    #[default]
    Vertical,
    /// All four arrows.
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Inline text direction; mirrors horizontal arrows in right-to-left layouts.
pub enum TextDirection {
    /// Left-to-right.
    #[default]
    Ltr,
    /// Right-to-left.
    Rtl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Navigation defaults for list-like widgets.
pub struct NavigationConfig {
    /// Arrow-key axis.
    pub orientation: Orientation,
    /// Wrap past either end instead of stopping.
    pub loop_focus: bool,
    /// Inline direction.
    pub direction: TextDirection,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            loop_focus: true,
            direction: TextDirection::Ltr,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Inputs for one key transition.
pub struct NavigationState {
    /// Number of items; may change between renders.
    pub item_count: usize,
    /// Currently active item, as last persisted by the caller.
    pub active_index: usize,
    /// Arrow-key axis.
    pub orientation: Orientation,
    /// Wrap past either end instead of stopping.
    pub loop_focus: bool,
    /// Inline direction.
    pub direction: TextDirection,
}

impl NavigationState {
    /// State with default configuration.
    pub fn new(item_count: usize, active_index: usize) -> Self {
        Self::from_config(NavigationConfig::default(), item_count, active_index)
    }

    /// State built from shared configuration.
    pub fn from_config(config: NavigationConfig, item_count: usize, active_index: usize) -> Self {
        Self {
            item_count,
            active_index,
            orientation: config.orientation,
            loop_focus: config.loop_focus,
            direction: config.direction,
        }
    }

    /// Sets the arrow-key axis.
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Sets wrap-around behavior.
    pub fn looping(mut self, loop_focus: bool) -> Self {
        self.loop_focus = loop_focus;
        self
    }

    /// Sets inline direction.
    pub fn direction(mut self, direction: TextDirection) -> Self {
        self.direction = direction;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// What a claimed key asks for.
pub enum NavigationIntent {
    /// Move one item forward.
    Advance,
    /// Move one item backward.
    Retreat,
    /// Jump to the first item.
    First,
    /// Jump to the last item.
    Last,
    /// Activate the current item.
    Select,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Result of resolving one key against a [`NavigationState`].
pub struct NavigationOutcome {
    /// Claimed intent, `None` for ignored keys.
    pub intent: Option<NavigationIntent>,
    /// New active index, present only when it differs from the current one.
    pub next_index: Option<usize>,
    /// Item to activate.
    pub selected: Option<usize>,
    /// Whether the default browser action must be suppressed.
    pub disposition: KeyDisposition,
}

/// Maps a key onto an intent for the given axis, `None` when the key is not claimed.
pub fn intent_for(
    key: &KeyStroke,
    orientation: Orientation,
    direction: TextDirection,
) -> Option<NavigationIntent> {
    if key.has_command_modifier() {
        return None;
    }
    let horizontal = matches!(orientation, Orientation::Horizontal | Orientation::Both);
    let vertical = matches!(orientation, Orientation::Vertical | Orientation::Both);
    let (forward, backward) = match direction {
        TextDirection::Ltr => ("ArrowRight", "ArrowLeft"),
        TextDirection::Rtl => ("ArrowLeft", "ArrowRight"),
    };

    match key.key.as_str() {
        "ArrowDown" if vertical => Some(NavigationIntent::Advance),
        "ArrowUp" if vertical => Some(NavigationIntent::Retreat),
        k if horizontal && k == forward => Some(NavigationIntent::Advance),
        k if horizontal && k == backward => Some(NavigationIntent::Retreat),
        "Home" => Some(NavigationIntent::First),
        "End" => Some(NavigationIntent::Last),
        _ if key.is_activation() => Some(NavigationIntent::Select),
        _ => None,
    }
}

/// Resolves a key with every item enabled.
pub fn resolve_key(key: &KeyStroke, state: &NavigationState) -> NavigationOutcome {
    resolve_key_skipping(key, state, |_| false)
}

/// Resolves a key, skipping items for which `is_disabled` returns `true`.
///
/// An out-of-range `active_index` (the collection shrank) is clamped before moving.
pub fn resolve_key_skipping(
    key: &KeyStroke,
    state: &NavigationState,
    is_disabled: impl Fn(usize) -> bool,
) -> NavigationOutcome {
    if state.item_count == 0 {
        return NavigationOutcome::IGNORED;
    }
    let Some(intent) = intent_for(key, state.orientation, state.direction) else {
        return NavigationOutcome::IGNORED;
    };

    let last = state.item_count - 1;
    let current = state.active_index.min(last);
    let (target, selected) = match intent {
        NavigationIntent::Select => (current, (!is_disabled(current)).then_some(current)),
        NavigationIntent::First => (
            (0..=last).find(|i| !is_disabled(*i)).unwrap_or(current),
            None,
        ),
        NavigationIntent::Last => (
            (0..=last).rev().find(|i| !is_disabled(*i)).unwrap_or(current),
            None,
        ),
        NavigationIntent::Advance => (step(state, current, 1, &is_disabled), None),
        NavigationIntent::Retreat => (step(state, current, -1, &is_disabled), None),
    };

    NavigationOutcome {
        intent: Some(intent),
        next_index: (target != state.active_index).then_some(target),
        selected,
        disposition: KeyDisposition::Handled,
    }
}

fn step(
    state: &NavigationState,
    current: usize,
    delta: isize,
    is_disabled: &impl Fn(usize) -> bool,
) -> usize {
    let count = state.item_count as isize;
    let mut candidate = current as isize;
    for _ in 1..count {
        candidate += delta;
        if state.loop_focus {
            candidate = candidate.rem_euclid(count);
        } else if !(0..count).contains(&candidate) {
            return current;
        }
        if !is_disabled(candidate as usize) {
            return candidate as usize;
        }
    }
    current
}

impl NavigationOutcome {
    const IGNORED: Self = Self {
        intent: None,
        next_index: None,
        selected: None,
        disposition: KeyDisposition::Ignored,
    };

    /// Drives the caller's callbacks from this outcome.
    ///
    /// `on_active_index_change` fires at most once, only when the index actually moves.
    /// Selection keys call `on_select` and are claimed only when a handler is supplied.
    pub fn dispatch(
        self,
        on_active_index_change: impl FnOnce(usize),
        on_select: Option<&mut dyn FnMut(usize)>,
    ) -> KeyDisposition {
        if self.intent == Some(NavigationIntent::Select) {
            let Some(on_select) = on_select else {
                return KeyDisposition::Ignored;
            };
            if let Some(index) = self.selected {
                on_select(index);
            }
            return self.disposition;
        }
        if let Some(next) = self.next_index {
            on_active_index_change(next);
        }
        self.disposition
    }
}

/// Applies a key to roving state and drives the caller's callbacks.
///
/// Enter/Space call `on_select` with the active index. With zero items nothing fires and
/// nothing is claimed. See [`NavigationOutcome::dispatch`] for the callback guarantees.
pub fn handle_key_down(
    key: &KeyStroke,
    state: &NavigationState,
    on_active_index_change: impl FnOnce(usize),
    on_select: Option<&mut dyn FnMut(usize)>,
) -> KeyDisposition {
    resolve_key(key, state).dispatch(on_active_index_change, on_select)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;

    use super::*;

    fn vertical(item_count: usize, active_index: usize, loop_focus: bool) -> NavigationState {
        NavigationState::new(item_count, active_index)
            .orientation(Orientation::Vertical)
            .looping(loop_focus)
    }

    fn press(key: &str, state: &NavigationState) -> (Vec<usize>, Vec<usize>, KeyDisposition) {
        let changes = RefCell::new(Vec::new());
        let mut selections = Vec::new();
        let mut on_select = |index: usize| selections.push(index);
        let disposition = handle_key_down(
            &KeyStroke::new(key),
            state,
            |next| changes.borrow_mut().push(next),
            Some(&mut on_select),
        );
        (changes.into_inner(), selections, disposition)
    }

    #[test]
    fn loop_wraps_past_last_item() {
        let (changes, _, disposition) = press("ArrowDown", &vertical(5, 4, true));
        assert_eq!(changes, vec![0]);
        assert_eq!(disposition, KeyDisposition::Handled);

        let (changes, _, _) = press("ArrowUp", &vertical(5, 0, true));
        assert_eq!(changes, vec![4]);
    }

    #[test]
    fn clamp_at_boundary_does_not_fire() {
        let (changes, _, disposition) = press("ArrowDown", &vertical(5, 4, false));
        assert!(changes.is_empty());
        assert_eq!(disposition, KeyDisposition::Handled);

        let (changes, _, _) = press("ArrowUp", &vertical(5, 0, false));
        assert!(changes.is_empty());
    }

    #[test]
    fn home_and_end_jump_to_edges() {
        let state = vertical(5, 2, false);
        assert_eq!(press("End", &state).0, vec![4]);
        assert_eq!(press("Home", &state).0, vec![0]);
        assert!(press("Home", &vertical(5, 0, false)).0.is_empty());
        assert!(press("End", &vertical(5, 4, true)).0.is_empty());
    }

    #[test]
    fn enter_and_space_select_without_moving() {
        let state = vertical(3, 1, true);
        for key in ["Enter", " ", "Spacebar"] {
            let (changes, selections, disposition) = press(key, &state);
            assert!(changes.is_empty(), "{key}");
            assert_eq!(selections, vec![1], "{key}");
            assert_eq!(disposition, KeyDisposition::Handled);
        }
    }

    #[test]
    fn enter_without_select_handler_is_not_claimed() {
        let disposition = handle_key_down(
            &KeyStroke::new("Enter"),
            &vertical(3, 1, true),
            |_| panic!("index must not change"),
            None,
        );
        assert_eq!(disposition, KeyDisposition::Ignored);
    }

    #[test]
    fn zero_items_is_a_noop_for_every_key() {
        for key in ["ArrowDown", "ArrowUp", "Home", "End", "Enter", " ", "x"] {
            let (changes, selections, disposition) = press(key, &vertical(0, 0, true));
            assert!(changes.is_empty() && selections.is_empty(), "{key}");
            assert_eq!(disposition, KeyDisposition::Ignored);
        }
    }

    #[test]
    fn orientation_limits_claimed_arrows() {
        let horizontal = NavigationState::new(3, 1).orientation(Orientation::Horizontal);
        assert_eq!(press("ArrowRight", &horizontal).0, vec![2]);
        assert_eq!(press("ArrowLeft", &horizontal).0, vec![0]);
        let (changes, _, disposition) = press("ArrowDown", &horizontal);
        assert!(changes.is_empty());
        assert_eq!(disposition, KeyDisposition::Ignored);

        let both = NavigationState::new(3, 1).orientation(Orientation::Both);
        assert_eq!(press("ArrowDown", &both).0, vec![2]);
        assert_eq!(press("ArrowRight", &both).0, vec![2]);
        assert_eq!(press("ArrowUp", &both).0, vec![0]);
        assert_eq!(press("ArrowLeft", &both).0, vec![0]);
    }

    #[test]
    fn rtl_mirrors_horizontal_arrows() {
        let state = NavigationState::new(3, 1)
            .orientation(Orientation::Horizontal)
            .direction(TextDirection::Rtl);
        assert_eq!(press("ArrowLeft", &state).0, vec![2]);
        assert_eq!(press("ArrowRight", &state).0, vec![0]);
    }

    #[test]
    fn unrecognized_and_chorded_keys_are_ignored() {
        let state = vertical(3, 1, true);
        assert_eq!(press("PageDown", &state).2, KeyDisposition::Ignored);
        let outcome = resolve_key(&KeyStroke::new("ArrowDown").with_ctrl(), &state);
        assert_eq!(outcome.disposition, KeyDisposition::Ignored);
        assert_eq!(outcome.next_index, None);
    }

    #[test]
    fn disabled_items_are_skipped() {
        let disabled = |index: usize| index == 1 || index == 2;
        let state = vertical(5, 0, false);
        let outcome = resolve_key_skipping(&KeyStroke::new("ArrowDown"), &state, disabled);
        assert_eq!(outcome.next_index, Some(3));

        let state = vertical(4, 3, true);
        let outcome = resolve_key_skipping(&KeyStroke::new("ArrowDown"), &state, |i| i == 0);
        assert_eq!(outcome.next_index, Some(1));

        let outcome = resolve_key_skipping(&KeyStroke::new("Home"), &state, |i| i == 0);
        assert_eq!(outcome.next_index, Some(1));
    }

    #[test]
    fn clamped_movement_stops_before_trailing_disabled_items() {
        let state = vertical(4, 1, false);
        let outcome = resolve_key_skipping(&KeyStroke::new("ArrowDown"), &state, |i| i >= 2);
        assert_eq!(outcome.next_index, None);
        assert_eq!(outcome.disposition, KeyDisposition::Handled);
    }

    #[test]
    fn all_disabled_does_not_move_or_select() {
        let state = vertical(3, 1, true);
        for key in ["ArrowDown", "Home", "End", "Enter"] {
            let outcome = resolve_key_skipping(&KeyStroke::new(key), &state, |_| true);
            assert_eq!(outcome.next_index, None, "{key}");
            assert_eq!(outcome.selected, None, "{key}");
        }
    }

    #[test]
    fn stale_index_is_clamped_into_range() {
        let outcome = resolve_key(&KeyStroke::new("ArrowUp"), &vertical(3, 7, false));
        assert_eq!(outcome.next_index, Some(1));

        let outcome = resolve_key(&KeyStroke::new("End"), &vertical(3, 7, false));
        assert_eq!(outcome.next_index, Some(2));
    }

    #[test]
    fn dispatch_skips_disabled_items_through_callbacks() {
        let moved = RefCell::new(Vec::new());
        let state = vertical(4, 0, true);
        let disposition = resolve_key_skipping(&KeyStroke::new("ArrowDown"), &state, |i| i == 1)
            .dispatch(|next| moved.borrow_mut().push(next), None);
        assert_eq!(disposition, KeyDisposition::Handled);
        assert_eq!(moved.into_inner(), vec![2]);
    }
}
