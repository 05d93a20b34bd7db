//! Modal focus containment.
//!
//! A [`FocusTrapStack`] is the single writer of document focus for overlay widgets. Sessions
//! are pushed on activation and popped on deactivation in strict last-in/first-out order;
//! only the innermost session intercepts Tab and stray focus. Each overlay holds a
//! [`FocusTrap`] handle and calls [`FocusTrap::attach`] whenever its `active` flag or its
//! focusable content changes.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{tabbable_elements, FocusHost, FocusTrapError, KeyDisposition, KeyStroke};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
/// Identifier of one activation of a focus trap, ordered by activation time.
pub struct TrapId(u64);

impl fmt::Display for TrapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Where focus goes when a trap activates.
pub enum InitialFocus {
    /// First tabbable descendant, or the container when there is none.
    #[default]
    FirstFocusable,
    /// The container itself (dialogs with long descriptive content).
    Container,
    /// Leave focus where it is; the widget focuses something itself.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Per-trap behavior switches.
pub struct FocusTrapConfig {
    /// Initial focus placement on activation.
    pub initial_focus: InitialFocus,
    /// Restore the previously focused element on deactivation.
    pub restore_focus: bool,
    /// Pull focus back when it lands outside the container by pointer or script.
    pub contain_pointer_focus: bool,
}

impl Default for FocusTrapConfig {
    fn default() -> Self {
        Self {
            initial_focus: InitialFocus::FirstFocusable,
            restore_focus: true,
            contain_pointer_focus: true,
        }
    }
}

#[derive(Debug, Clone)]
struct TrapSession<N> {
    id: TrapId,
    container: N,
    previously_focused: Option<N>,
    config: FocusTrapConfig,
}

#[derive(Debug, Clone)]
/// Focus owner stack: active trap sessions in activation order.
pub struct FocusTrapStack<N> {
    sessions: Vec<TrapSession<N>>,
    next_id: u64,
}

impl<N> Default for FocusTrapStack<N> {
    fn default() -> Self {
        Self {
            sessions: Vec::new(),
            next_id: 1,
        }
    }
}

impl<N: Clone + Eq + fmt::Debug> FocusTrapStack<N> {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active sessions.
    pub fn depth(&self) -> usize {
        self.sessions.len()
    }

    /// Returns whether no trap is active.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Innermost active session.
    pub fn top(&self) -> Option<TrapId> {
        self.sessions.last().map(|session| session.id)
    }

    /// Active sessions from outermost to innermost.
    pub fn session_ids(&self) -> Vec<TrapId> {
        self.sessions.iter().map(|session| session.id).collect()
    }

    /// Returns whether `id` is on the stack.
    pub fn contains(&self, id: TrapId) -> bool {
        self.position(id).is_some()
    }

    /// Returns whether `id` is the session currently intercepting Tab.
    pub fn is_intercepting(&self, id: TrapId) -> bool {
        self.top() == Some(id)
    }

    /// Container of an active session.
    pub fn container(&self, id: TrapId) -> Option<&N> {
        self.position(id).map(|index| &self.sessions[index].container)
    }

    /// Element captured when `id` activated.
    pub fn previously_focused(&self, id: TrapId) -> Option<&N> {
        self.position(id)
            .and_then(|index| self.sessions[index].previously_focused.as_ref())
    }

    /// Starts a session: captures the focused element, then places initial focus.
    ///
    /// Any session already on the stack is suspended until this one is deactivated.
    pub fn activate<H>(&mut self, host: &mut H, container: N, config: FocusTrapConfig) -> TrapId
    where
        H: FocusHost<Node = N>,
    {
        let id = TrapId(self.next_id);
        self.next_id += 1;

        let previously_focused = host.active_element();
        place_initial_focus(host, &container, config.initial_focus);
        self.sessions.push(TrapSession {
            id,
            container,
            previously_focused,
            config,
        });
        debug!(trap = %id, depth = self.sessions.len(), "focus trap activated");
        id
    }

    /// Ends the innermost session and restores focus to its captured element.
    ///
    /// Restoration is skipped when the element has been detached; focus is then left
    /// wherever it is rather than forced onto the body. Deactivating any other session is
    /// rejected and leaves focus and the stack unchanged.
    pub fn deactivate<H>(&mut self, host: &mut H, id: TrapId) -> Result<(), FocusTrapError>
    where
        H: FocusHost<Node = N>,
    {
        let Some(top) = self.top() else {
            return Err(self.reject(FocusTrapError::UnknownSession(id)));
        };
        if top != id {
            let error = if self.contains(id) {
                FocusTrapError::OutOfOrder { id, top }
            } else {
                FocusTrapError::UnknownSession(id)
            };
            return Err(self.reject(error));
        }

        let Some(session) = self.sessions.pop() else {
            return Err(FocusTrapError::UnknownSession(id));
        };
        restore_focus(host, &session);
        debug!(trap = %id, depth = self.sessions.len(), "focus trap deactivated");
        Ok(())
    }

    /// Drops a session without touching focus, wherever it sits in the stack.
    ///
    /// Used when the owning widget is destroyed; the innermost session still restores.
    pub fn discard<H>(&mut self, host: &mut H, id: TrapId)
    where
        H: FocusHost<Node = N>,
    {
        if self.is_intercepting(id) {
            let _ = self.deactivate(host, id);
            return;
        }
        if let Some(index) = self.position(id) {
            self.sessions.remove(index);
            debug!(trap = %id, "suspended focus trap discarded");
        }
    }

    /// Re-seats focus after the container's content changed.
    ///
    /// Does not re-capture the previously focused element. Only moves focus when the
    /// innermost session has lost it (e.g. the focused node was unmounted).
    pub fn refresh<H>(&self, host: &mut H, id: TrapId)
    where
        H: FocusHost<Node = N>,
    {
        let Some(session) = self.sessions.last().filter(|session| session.id == id) else {
            return;
        };
        let focus_inside = host
            .active_element()
            .is_some_and(|active| host.contains(&session.container, &active));
        if !focus_inside {
            seat_focus(host, &session.container);
        }
    }

    /// Keeps Tab and Shift+Tab cycling inside the innermost container.
    pub fn handle_key_down<H>(&self, host: &mut H, key: &KeyStroke) -> KeyDisposition
    where
        H: FocusHost<Node = N>,
    {
        if !key.is_tab() {
            return KeyDisposition::Ignored;
        }
        let Some(session) = self.sessions.last() else {
            return KeyDisposition::Ignored;
        };

        let tabbable = tabbable_elements(host, &session.container);
        let (Some(first), Some(last)) = (tabbable.first(), tabbable.last()) else {
            focus_container(host, &session.container);
            return KeyDisposition::Handled;
        };

        let active = host.active_element();
        let position = active
            .as_ref()
            .and_then(|active| tabbable.iter().position(|node| node == active));
        let target = match position {
            Some(0) if key.shift => last,
            Some(index) if !key.shift && index + 1 == tabbable.len() => first,
            Some(_) => return KeyDisposition::Ignored,
            None => {
                // Untabbable node inside the container (tabindex="-1", clicked text): the
                // browser moves to the adjacent member unless none lies in that direction.
                let inside = active.filter(|active| {
                    *active != session.container && host.contains(&session.container, active)
                });
                if let Some(active) = inside {
                    if has_member_beyond(host, &session.container, &tabbable, &active, key.shift) {
                        return KeyDisposition::Ignored;
                    }
                }
                if key.shift {
                    last
                } else {
                    first
                }
            }
        };
        host.focus(target);
        KeyDisposition::Handled
    }

    /// Pulls focus back inside the innermost container when it lands outside.
    ///
    /// Returns whether focus was redirected.
    pub fn handle_focus_in<H>(&self, host: &mut H, target: &N) -> bool
    where
        H: FocusHost<Node = N>,
    {
        let Some(session) = self.sessions.last() else {
            return false;
        };
        if !session.config.contain_pointer_focus || host.contains(&session.container, target) {
            return false;
        }
        seat_focus(host, &session.container);
        true
    }

    fn position(&self, id: TrapId) -> Option<usize> {
        self.sessions.iter().position(|session| session.id == id)
    }

    fn reject(&self, error: FocusTrapError) -> FocusTrapError {
        warn!(%error, depth = self.sessions.len(), "focus trap deactivation rejected");
        error
    }
}

/// Returns whether a tabbable member follows `node` in document order (precedes it when
/// `backwards`).
fn has_member_beyond<H: FocusHost>(
    host: &H,
    container: &H::Node,
    tabbable: &[H::Node],
    node: &H::Node,
    backwards: bool,
) -> bool {
    let descendants = host.descendants(container);
    let Some(index) = descendants.iter().position(|candidate| candidate == node) else {
        return false;
    };
    let beyond = if backwards {
        &descendants[..index]
    } else {
        &descendants[index + 1..]
    };
    beyond.iter().any(|candidate| tabbable.contains(candidate))
}

fn place_initial_focus<H: FocusHost>(host: &mut H, container: &H::Node, initial: InitialFocus) {
    match initial {
        InitialFocus::FirstFocusable => seat_focus(host, container),
        InitialFocus::Container => focus_container(host, container),
        InitialFocus::None => {}
    }
}

fn seat_focus<H: FocusHost>(host: &mut H, container: &H::Node) {
    match tabbable_elements(host, container).first() {
        Some(first) => host.focus(first),
        None => focus_container(host, container),
    }
}

fn focus_container<H: FocusHost>(host: &mut H, container: &H::Node) {
    host.make_programmatically_focusable(container);
    host.focus(container);
}

fn restore_focus<H: FocusHost>(host: &mut H, session: &TrapSession<H::Node>) {
    if !session.config.restore_focus {
        return;
    }
    match session.previously_focused.as_ref() {
        Some(previous) if host.is_connected(previous) => host.focus(previous),
        Some(_) => debug!(trap = %session.id, "restore target detached; focus left in place"),
        None => {}
    }
}

#[derive(Debug, Clone, Default)]
/// Per-widget focus trap handle.
///
/// Maps the widget's boolean `active` prop onto stack sessions: false→true activates,
/// true→false deactivates, and repeated `true` only refreshes.
pub struct FocusTrap {
    session: Option<TrapId>,
    config: FocusTrapConfig,
}

impl FocusTrap {
    /// Creates an inactive handle.
    pub fn new(config: FocusTrapConfig) -> Self {
        Self {
            session: None,
            config,
        }
    }

    /// Returns whether this handle owns a session.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Current session, if active.
    pub fn session(&self) -> Option<TrapId> {
        self.session
    }

    /// Applies the widget's `active` flag.
    ///
    /// On rejection (nested trap still active) the handle stays active so the caller can
    /// deactivate again once the nested trap is gone.
    pub fn attach<H: FocusHost>(
        &mut self,
        stack: &mut FocusTrapStack<H::Node>,
        host: &mut H,
        container: &H::Node,
        active: bool,
    ) -> Result<(), FocusTrapError> {
        match (self.session, active) {
            (None, true) => {
                self.session = Some(stack.activate(host, container.clone(), self.config));
            }
            (Some(id), true) => stack.refresh(host, id),
            (Some(id), false) => {
                stack.deactivate(host, id)?;
                self.session = None;
            }
            (None, false) => {}
        }
        Ok(())
    }

    /// Releases the session when the widget is destroyed.
    pub fn detach<H: FocusHost>(&mut self, stack: &mut FocusTrapStack<H::Node>, host: &mut H) {
        if let Some(id) = self.session.take() {
            stack.discard(host, id);
        }
    }
}
