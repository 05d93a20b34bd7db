use leptos::{html::Div, *};
use system_ui_headless::{FocusTrap, FocusTrapConfig};
use wasm_bindgen::{closure::Closure, JsCast};

use crate::dom::{key_stroke, with_focus_stack, WebFocusHost};

const WATCHED_ATTRIBUTES: &[&str] = &["disabled", "hidden", "inert", "tabindex", "href", "style"];

type MutationCallback = Closure<dyn FnMut(js_sys::Array, web_sys::MutationObserver)>;

/// Handle returned by [`use_focus_trap`].
#[derive(Clone, Copy)]
pub struct FocusTrapController {
    trap: StoredValue<FocusTrap>,
    container: StoredValue<Option<web_sys::HtmlElement>>,
}

impl FocusTrapController {
    /// Returns whether the trap currently owns a focus session.
    pub fn is_active(&self) -> bool {
        self.trap.with_value(FocusTrap::is_active)
    }

    /// Re-applies `active` against the last mounted container.
    pub fn attach(&self, active: bool) {
        let Some(container) = self.container.get_value() else {
            return;
        };
        let result = with_focus_stack(|stack| {
            let mut host = WebFocusHost;
            let mut trap = self.trap.get_value();
            let result = trap.attach(stack, &mut host, &container, active);
            self.trap.set_value(trap);
            result
        });
        match result {
            Some(Err(err)) => leptos::logging::warn!("focus trap attach failed: {err}"),
            None => leptos::logging::warn!("focus trap attach skipped: focus stack busy"),
            Some(Ok(())) => {}
        }
    }

    /// Re-seats focus after the container's content changed while active.
    pub fn refresh(&self) {
        if self.is_active() {
            self.attach(true);
        }
    }

    fn handle_keydown(&self, ev: &web_sys::KeyboardEvent) {
        if ev.default_prevented() {
            return;
        }
        let Some(session) = self.trap.with_value(FocusTrap::session) else {
            return;
        };
        let key = key_stroke(ev);
        let handled = with_focus_stack(|stack| {
            stack.is_intercepting(session)
                && stack.handle_key_down(&mut WebFocusHost, &key).is_handled()
        });
        if handled == Some(true) {
            ev.prevent_default();
        }
    }

    fn handle_focusin(&self, ev: &web_sys::FocusEvent) {
        let Some(session) = self.trap.with_value(FocusTrap::session) else {
            return;
        };
        let Some(target) = ev
            .target()
            .and_then(|target| target.dyn_into::<web_sys::HtmlElement>().ok())
        else {
            return;
        };
        let _ = with_focus_stack(|stack| {
            stack.is_intercepting(session) && stack.handle_focus_in(&mut WebFocusHost, &target)
        });
    }

    fn detach(&self) {
        let detached = with_focus_stack(|stack| {
            self.trap.update_value(|trap| trap.detach(stack, &mut WebFocusHost));
        });
        if detached.is_none() {
            leptos::logging::warn!("focus trap detach skipped: focus stack busy");
        }
    }
}

/// Contains keyboard focus inside `container` while `active` is true.
///
/// Activation is deferred one animation frame so the container's content has rendered.
/// Only the innermost active trap on the page intercepts Tab and stray focus; nested traps
/// must close in reverse opening order.
pub fn use_focus_trap(
    container: NodeRef<Div>,
    active: Signal<bool>,
    config: FocusTrapConfig,
) -> FocusTrapController {
    let controller = FocusTrapController {
        trap: store_value(FocusTrap::new(config)),
        container: store_value(None),
    };
    let observer = store_value(None::<(web_sys::MutationObserver, MutationCallback)>);

    create_effect(move |_| {
        let is_active = active.get();
        if let Some(element) = container.get() {
            let element: &web_sys::HtmlElement = &element;
            controller.container.set_value(Some(element.clone()));
            if observer.with_value(Option::is_none) {
                observer.set_value(observe_mutations(element, controller));
            }
        }
        request_animation_frame(move || {
            if active.get_untracked() == is_active {
                controller.attach(is_active);
            }
        });
    });

    let keydown_listener = window_event_listener(ev::keydown, move |ev| {
        controller.handle_keydown(&ev);
    });
    let focusin_listener = window_event_listener(ev::focusin, move |ev| {
        controller.handle_focusin(&ev);
    });

    on_cleanup(move || {
        keydown_listener.remove();
        focusin_listener.remove();
        if let Some((observer, _callback)) = observer.try_update_value(Option::take).flatten() {
            observer.disconnect();
        }
        controller.detach();
    });

    controller
}

fn observe_mutations(
    element: &web_sys::HtmlElement,
    controller: FocusTrapController,
) -> Option<(web_sys::MutationObserver, MutationCallback)> {
    let callback: MutationCallback = Closure::new(
        move |_records: js_sys::Array, _observer: web_sys::MutationObserver| controller.refresh(),
    );
    let observer = match web_sys::MutationObserver::new(callback.as_ref().unchecked_ref()) {
        Ok(observer) => observer,
        Err(err) => {
            leptos::logging::warn!("focus trap mutation observer unavailable: {err:?}");
            return None;
        }
    };

    let filter: js_sys::Array = WATCHED_ATTRIBUTES
        .iter()
        .map(|name| wasm_bindgen::JsValue::from_str(name))
        .collect();
    let init = web_sys::MutationObserverInit::new();
    init.set_child_list(true);
    init.set_subtree(true);
    init.set_attributes(true);
    init.set_attribute_filter(&filter);
    if let Err(err) = observer.observe_with_options(element, &init) {
        leptos::logging::warn!("focus trap mutation observer rejected: {err:?}");
        return None;
    }
    Some((observer, callback))
}
