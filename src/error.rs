//! Error types for the channel and binding surface.
//!
//! The core is deliberately non-throwing: registry lookups, raises and
//! unregistrations are total functions with documented no-op cases. The one
//! enum here covers the defensive guards on caller-contract violations that
//! would otherwise be silent double registrations.

use thiserror::Error;

/// # Caller-contract violations detected defensively.
///
/// These are never produced by normal operation, only by call patterns the
/// contract forbids (re-registering a live listener, re-activating a live
/// binding). State is left untouched when they are returned.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ChannelError {
    /// The listener is already present in the resolved target's
    /// registration set.
    #[error("listener '{listener}' is already registered on channel '{channel}'")]
    AlreadyRegistered {
        /// Diagnostic name of the resolved channel target.
        channel: String,
        /// Diagnostic name of the rejected listener.
        listener: String,
    },

    /// The binding is already registered with its channel.
    #[error("binding on channel '{channel}' is already active")]
    BindingActive {
        /// Diagnostic name of the bound channel.
        channel: String,
    },
}

impl ChannelError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventry::ChannelError;
    ///
    /// let err = ChannelError::BindingActive { channel: "alarm".into() };
    /// assert_eq!(err.as_label(), "binding_already_active");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ChannelError::AlreadyRegistered { .. } => "listener_already_registered",
            ChannelError::BindingActive { .. } => "binding_already_active",
        }
    }
}
