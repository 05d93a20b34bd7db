use leptos::{html::Div, *};
use system_ui_headless::{resolve_key_skipping, NavigationConfig, NavigationState};

use crate::{
    dom::{focus_roving_item, key_stroke},
    hooks::ControllableSignal,
};

/// Inputs for [`use_roving_index`].
#[derive(Clone, Copy)]
pub struct RovingOptions {
    /// Group container; its `[data-ui-roving-item]` children receive focus as the index moves.
    pub container: NodeRef<Div>,
    /// Number of items, re-read on every key press.
    pub item_count: Signal<usize>,
    /// Indices arrow keys skip over.
    pub disabled: Signal<Vec<usize>>,
    /// Axis, wrap, and direction.
    pub config: NavigationConfig,
}

/// Builds a keydown handler that moves `active_index` and focus through a roving group.
///
/// Claimed keys are prevented; unclaimed keys keep their browser default. `on_select`
/// receives the active index on Enter/Space.
pub fn use_roving_index(
    options: RovingOptions,
    active_index: ControllableSignal<usize>,
    on_select: Option<Callback<usize>>,
) -> Callback<web_sys::KeyboardEvent> {
    Callback::new(move |ev: web_sys::KeyboardEvent| {
        let state = NavigationState::from_config(
            options.config,
            options.item_count.get_untracked(),
            active_index.get_untracked(),
        );
        let outcome = options.disabled.with_untracked(|disabled| {
            resolve_key_skipping(&key_stroke(&ev), &state, |index| disabled.contains(&index))
        });

        let mut select = |index: usize| {
            if let Some(on_select) = on_select.as_ref() {
                on_select.call(index);
            }
        };
        let select: Option<&mut dyn FnMut(usize)> = if on_select.is_some() {
            Some(&mut select)
        } else {
            None
        };
        let disposition = outcome.dispatch(
            |next| {
                active_index.set(next);
                if let Some(container) = options.container.get_untracked() {
                    focus_roving_item(&container, next);
                }
            },
            select,
        );
        if disposition.is_handled() {
            ev.prevent_default();
        }
    })
}
