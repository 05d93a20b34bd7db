//! Document access required by the focus trap.

use std::fmt::Debug;

use crate::ElementTraits;

/// The slice of a document the focus trap reads and writes.
///
/// Implemented over `web-sys` by the Leptos bindings and by [`crate::MemoryDocument`].
/// All methods are infallible; hosts swallow platform focus errors.
pub trait FocusHost {
    /// Element handle.
    type Node: Clone + Eq + Debug;

    /// The element that currently has focus, if any besides the document body.
    fn active_element(&self) -> Option<Self::Node>;

    /// Moves focus to `node`. Non-focusable targets leave focus unchanged.
    fn focus(&mut self, node: &Self::Node);

    /// Returns whether `node` is still attached to the document.
    fn is_connected(&self, node: &Self::Node) -> bool;

    /// Returns whether `node` is `container` or one of its descendants.
    fn contains(&self, container: &Self::Node, node: &Self::Node) -> bool;

    /// Parent element, `None` at the document root or for detached roots.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Descendants of `container` in document order, excluding `container` itself.
    fn descendants(&self, container: &Self::Node) -> Vec<Self::Node>;

    /// Focus-relevant facts about `node`.
    fn describe(&self, node: &Self::Node) -> ElementTraits;

    /// Gives `node` a `tabindex="-1"` when it has no explicit tab index.
    fn make_programmatically_focusable(&mut self, node: &Self::Node);
}
