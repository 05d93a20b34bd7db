//! Browser DOM focus host and the page-wide focus owner stack.

use std::cell::RefCell;

use system_ui_headless::{ElementTraits, FocusHost, FocusTrapStack, KeyStroke};
use wasm_bindgen::JsCast;

thread_local! {
    static FOCUS_STACK: RefCell<FocusTrapStack<web_sys::HtmlElement>> =
        RefCell::new(FocusTrapStack::new());
}

/// Runs `f` against the page-wide focus owner stack.
///
/// Returns `None` when called re-entrantly: `focus()` dispatches `focusin` synchronously,
/// and the listener it reaches must not touch the stack the caller is already mutating.
pub(crate) fn with_focus_stack<R>(
    f: impl FnOnce(&mut FocusTrapStack<web_sys::HtmlElement>) -> R,
) -> Option<R> {
    FOCUS_STACK.with(|stack| stack.try_borrow_mut().ok().map(|mut stack| f(&mut stack)))
}

/// Normalizes a browser keydown event.
pub(crate) fn key_stroke(ev: &web_sys::KeyboardEvent) -> KeyStroke {
    KeyStroke {
        key: ev.key(),
        shift: ev.shift_key(),
        ctrl: ev.ctrl_key(),
        alt: ev.alt_key(),
        meta: ev.meta_key(),
    }
}

/// Focuses the `index`-th `[data-ui-roving-item]` element inside `container`.
pub(crate) fn focus_roving_item(container: &web_sys::HtmlElement, index: usize) -> bool {
    let Ok(items) = container.query_selector_all("[data-ui-roving-item]") else {
        return false;
    };
    let Some(item) = u32::try_from(index).ok().and_then(|index| items.item(index)) else {
        return false;
    };
    let Ok(item) = item.dyn_into::<web_sys::HtmlElement>() else {
        return false;
    };
    let _ = item.focus();
    true
}

#[derive(Debug, Default, Clone, Copy)]
/// [`FocusHost`] over the live browser document.
pub struct WebFocusHost;

impl WebFocusHost {
    fn computed_style(node: &web_sys::HtmlElement) -> Option<web_sys::CssStyleDeclaration> {
        web_sys::window()?.get_computed_style(node).ok().flatten()
    }
}

impl FocusHost for WebFocusHost {
    type Node = web_sys::HtmlElement;

    fn active_element(&self) -> Option<web_sys::HtmlElement> {
        let document = web_sys::window().and_then(|window| window.document())?;
        let active = document.active_element()?;
        let is_body = document.body().is_some_and(|body| {
            let body: &web_sys::Element = &body;
            *body == active
        });
        if is_body {
            return None;
        }
        active.dyn_into::<web_sys::HtmlElement>().ok()
    }

    fn focus(&mut self, node: &web_sys::HtmlElement) {
        let _ = node.focus();
    }

    fn is_connected(&self, node: &web_sys::HtmlElement) -> bool {
        node.is_connected()
    }

    fn contains(&self, container: &web_sys::HtmlElement, node: &web_sys::HtmlElement) -> bool {
        let node: &web_sys::Node = node;
        container.contains(Some(node))
    }

    fn parent(&self, node: &web_sys::HtmlElement) -> Option<web_sys::HtmlElement> {
        node.parent_element()?.dyn_into::<web_sys::HtmlElement>().ok()
    }

    fn descendants(&self, container: &web_sys::HtmlElement) -> Vec<web_sys::HtmlElement> {
        let Ok(nodes) = container.query_selector_all("*") else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
            .collect()
    }

    fn describe(&self, node: &web_sys::HtmlElement) -> ElementTraits {
        let tag = node.tag_name().to_ascii_lowercase();
        let style = Self::computed_style(node);
        let style_value = |property: &str| {
            style
                .as_ref()
                .and_then(|style| style.get_property_value(property).ok())
                .unwrap_or_default()
        };
        let input_type = (tag == "input").then(|| {
            node.get_attribute("type")
                .unwrap_or_else(|| "text".to_string())
                .to_ascii_lowercase()
        });

        ElementTraits {
            disabled: node.has_attribute("disabled"),
            hidden: node.hidden(),
            display_none: style_value("display") == "none",
            visibility_hidden: matches!(style_value("visibility").as_str(), "hidden" | "collapse"),
            inert: node.has_attribute("inert"),
            has_href: node.has_attribute("href"),
            has_controls: node.has_attribute("controls"),
            content_editable: node.is_content_editable(),
            tabindex: node
                .get_attribute("tabindex")
                .and_then(|value| value.trim().parse().ok()),
            input_type,
            tag,
        }
    }

    fn make_programmatically_focusable(&mut self, node: &web_sys::HtmlElement) {
        if !node.has_attribute("tabindex") {
            let _ = node.set_attribute("tabindex", "-1");
        }
    }
}
