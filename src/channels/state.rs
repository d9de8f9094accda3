//! # Channel state: one dispatch target.
//!
//! [`ChannelState`] is the instanced unit of a channel: a diagnostic name
//! plus an ordered listener set. The template state belongs to the channel
//! itself; per-key states are derived from it through the
//! [`Template`](crate::instancing::Template) contract with an empty set.
//!
//! ## Rules
//! - Dispatch order is registration order.
//! - Dispatch runs over a snapshot taken at the start of the raise, with the
//!   set lock released, so listeners may mutate the set re-entrantly; their
//!   changes become visible on the next raise.
//! - Listener identity is `Arc` data-pointer equality.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::channels::Listen;
use crate::error::ChannelError;
use crate::instancing::Template;

/// Listener set and identity of one dispatch target (template or per-key
/// instance) of a [`Channel`](crate::channels::Channel).
pub struct ChannelState<P: 'static> {
    name: String,
    listeners: RwLock<Vec<Arc<dyn Listen<P>>>>,
}

impl<P: 'static> ChannelState<P> {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Appends `listener` to the registration set.
    ///
    /// Rejects a listener that is already present, leaving the set unchanged.
    pub(crate) fn register(&self, listener: Arc<dyn Listen<P>>) -> Result<(), ChannelError> {
        let mut set = self.listeners.write();
        let incoming = data_ptr(&listener);
        if set.iter().any(|existing| data_ptr(existing) == incoming) {
            return Err(ChannelError::AlreadyRegistered {
                channel: self.name.clone(),
                listener: listener.name().to_string(),
            });
        }
        set.push(listener);
        tracing::debug!(channel = %self.name, count = set.len(), "listener registered");
        Ok(())
    }

    /// Removes the listener whose data pointer is `target`. No-op if absent.
    pub(crate) fn unregister(&self, target: *const ()) {
        let mut set = self.listeners.write();
        let before = set.len();
        set.retain(|existing| data_ptr(existing) != target);
        if set.len() != before {
            tracing::debug!(channel = %self.name, count = set.len(), "listener unregistered");
        }
    }

    /// Invokes every registered listener with `payload`, in registration
    /// order, over a snapshot of the set.
    pub(crate) fn raise(&self, payload: &P) {
        let snapshot: Vec<Arc<dyn Listen<P>>> = self.listeners.read().clone();
        for listener in snapshot {
            listener.on_raised(payload);
        }
    }
}

impl<P: 'static> Template for ChannelState<P> {
    fn name(&self) -> &str {
        &self.name
    }

    /// A per-key channel instance starts with an empty listener set; the
    /// registration set is runtime state, not configuration.
    fn instantiate(&self, name: String) -> Self {
        Self::new(name)
    }
}

#[inline]
fn data_ptr<P>(listener: &Arc<dyn Listen<P>>) -> *const () {
    Arc::as_ptr(listener) as *const ()
}
