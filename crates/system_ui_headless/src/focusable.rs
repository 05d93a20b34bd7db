//! Focusable and tabbable element rules.

use serde::{Deserialize, Serialize};

use crate::FocusHost;

const DISABLEABLE_TAGS: &[&str] = &[
    "button", "input", "select", "textarea", "optgroup", "option", "fieldset",
];

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
/// Focus-relevant facts about one element.
///
/// Hosts fill this from attributes and computed style; the rules below never touch the DOM.
pub struct ElementTraits {
    /// Lowercase tag name.
    pub tag: String,
    /// `disabled` attribute present.
    pub disabled: bool,
    /// `hidden` attribute present.
    pub hidden: bool,
    /// Computed `display: none`.
    pub display_none: bool,
    /// Computed `visibility: hidden` (or `collapse`).
    pub visibility_hidden: bool,
    /// `inert` attribute present.
    pub inert: bool,
    /// `href` attribute present.
    pub has_href: bool,
    /// `controls` attribute present (media elements).
    pub has_controls: bool,
    /// Element is `contenteditable`.
    pub content_editable: bool,
    /// Parsed explicit `tabindex` attribute.
    pub tabindex: Option<i32>,
    /// Lowercase `type` attribute for inputs.
    pub input_type: Option<String>,
}

impl ElementTraits {
    /// Traits for a plain element with no focus-related attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Sets an explicit tab index.
    pub fn with_tabindex(mut self, tabindex: i32) -> Self {
        self.tabindex = Some(tabindex);
        self
    }

    /// Marks the element disabled.
    pub fn with_disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Marks the element with the `hidden` attribute.
    pub fn with_hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Marks the element as having an `href`.
    pub fn with_href(mut self) -> Self {
        self.has_href = true;
        self
    }

    /// Sets the input `type`.
    pub fn with_input_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = Some(input_type.into().to_ascii_lowercase());
        self
    }

    /// Returns whether the element is not rendered or not interactive.
    pub fn is_concealed(&self) -> bool {
        self.hidden || self.display_none || self.visibility_hidden || self.inert
    }

    /// Returns whether the element hides its whole subtree.
    ///
    /// `visibility` is inherited through computed style, so descendants report it themselves.
    pub fn conceals_descendants(&self) -> bool {
        self.hidden || self.display_none || self.inert
    }

    /// Returns whether the `disabled` attribute applies to this tag.
    pub fn is_disabled(&self) -> bool {
        self.disabled && DISABLEABLE_TAGS.contains(&self.tag.as_str())
    }

    /// Returns whether the element receives focus without a tab index.
    pub fn is_natively_focusable(&self) -> bool {
        match self.tag.as_str() {
            "a" | "area" => self.has_href,
            "input" => self.input_type.as_deref() != Some("hidden"),
            "button" | "select" | "textarea" | "iframe" | "summary" => true,
            "audio" | "video" => self.has_controls,
            _ => self.content_editable,
        }
    }

    /// Returns whether script can focus the element (`tabindex="-1"` included).
    pub fn is_focusable(&self) -> bool {
        !self.is_disabled()
            && !self.is_concealed()
            && (self.tabindex.is_some() || self.is_natively_focusable())
    }

    /// The element's sequential focus order, `None` when Tab skips it.
    pub fn effective_tab_index(&self) -> Option<i32> {
        if !self.is_focusable() {
            return None;
        }
        match self.tabindex {
            Some(index) if index < 0 => None,
            Some(index) => Some(index),
            None => Some(0),
        }
    }

    /// Returns whether Tab reaches the element.
    pub fn is_tabbable(&self) -> bool {
        self.effective_tab_index().is_some()
    }
}

/// Tabbable descendants of `container` in document order.
///
/// Recomputed on every call: conditionally rendered content changes the set between
/// activations and key presses.
pub fn tabbable_elements<H: FocusHost>(host: &H, container: &H::Node) -> Vec<H::Node> {
    host.descendants(container)
        .into_iter()
        .filter(|node| {
            host.describe(node).is_tabbable() && !has_concealing_ancestor(host, container, node)
        })
        .collect()
}

fn has_concealing_ancestor<H: FocusHost>(host: &H, container: &H::Node, node: &H::Node) -> bool {
    let mut cursor = host.parent(node);
    while let Some(ancestor) = cursor {
        if ancestor == *container {
            return false;
        }
        if host.describe(&ancestor).conceals_descendants() {
            return true;
        }
        cursor = host.parent(&ancestor);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_controls_are_tabbable() {
        for tag in ["button", "select", "textarea", "summary", "iframe"] {
            assert!(ElementTraits::new(tag).is_tabbable(), "{tag}");
        }
        assert!(ElementTraits::new("input").is_tabbable());
        assert!(ElementTraits::new("a").with_href().is_tabbable());
    }

    #[test]
    fn anchors_without_href_and_hidden_inputs_are_skipped() {
        assert!(!ElementTraits::new("a").is_tabbable());
        assert!(!ElementTraits::new("input").with_input_type("HIDDEN").is_tabbable());
        assert!(!ElementTraits::new("div").is_tabbable());
    }

    #[test]
    fn tabindex_overrides_native_order() {
        assert!(ElementTraits::new("div").with_tabindex(0).is_tabbable());
        assert_eq!(ElementTraits::new("div").with_tabindex(3).effective_tab_index(), Some(3));
        let opted_out = ElementTraits::new("button").with_tabindex(-1);
        assert!(!opted_out.is_tabbable());
        assert!(opted_out.is_focusable());
    }

    #[test]
    fn disabled_applies_only_to_form_controls() {
        assert!(!ElementTraits::new("button").with_disabled().is_focusable());
        assert!(ElementTraits::new("div").with_tabindex(0).with_disabled().is_tabbable());
    }

    #[test]
    fn concealed_elements_are_not_focusable() {
        assert!(!ElementTraits::new("button").with_hidden().is_focusable());
        let invisible = ElementTraits {
            visibility_hidden: true,
            ..ElementTraits::new("input")
        };
        assert!(!invisible.is_focusable());
        assert!(!invisible.conceals_descendants());
    }
}
