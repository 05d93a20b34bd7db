//! Error types for the behavior layer.

use thiserror::Error;

use crate::focus_trap::TrapId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Focus-owner stack misuse reported by [`crate::FocusTrapStack`].
///
/// Neither variant changes focus or the stack; both are caller contract violations.
pub enum FocusTrapError {
    /// The session is not on the stack (never activated, or already deactivated).
    #[error("focus trap {0} is not active")]
    UnknownSession(TrapId),
    /// A session was deactivated while a session activated after it is still active.
    #[error("focus trap {id} deactivated while nested trap {top} is still active")]
    OutOfOrder {
        /// Session the caller tried to deactivate.
        id: TrapId,
        /// Innermost active session.
        top: TrapId,
    },
}

#[derive(Debug, Error)]
/// Behavior configuration load failure.
pub enum ConfigError {
    /// The payload was not valid configuration JSON.
    #[error("invalid behavior config: {0}")]
    Json(#[from] serde_json::Error),
}
