//! # Parameterless channel variant.
//!
//! [`Signal`] is a [`Channel<()>`] behind a thin newtype: same registration
//! set, same instancing, same dispatch guarantees, but `raise` takes no
//! payload. The protocol is implemented once on the generic channel; this
//! wrapper only removes the unit-payload noise from call sites.

use std::sync::Arc;

use crate::channels::{Channel, ChannelState, Listen};
use crate::error::ChannelError;
use crate::instancing::{InstanceKey, InstanceRegistry};

/// Payload-free event channel.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use eventry::{Listen, Signal};
///
/// struct Bell(AtomicU32);
///
/// impl Listen<()> for Bell {
///     fn on_raised(&self, _: &()) {
///         self.0.fetch_add(1, Ordering::Relaxed);
///     }
/// }
///
/// let door = Signal::new("door");
/// let bell = Arc::new(Bell(AtomicU32::new(0)));
/// door.register_listener(Arc::clone(&bell), None).unwrap();
///
/// door.raise(None);
/// door.raise(None);
/// assert_eq!(bell.0.load(Ordering::Relaxed), 2);
/// ```
#[derive(Clone)]
pub struct Signal {
    inner: Channel<()>,
}

impl Signal {
    /// Creates a non-instanced signal.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Channel::new(name),
        }
    }

    /// Creates a signal that fans out per key.
    pub fn new_instanced(name: impl Into<String>) -> Self {
        Self {
            inner: Channel::builder(name).instanced(true).build(),
        }
    }

    /// The signal's diagnostic name.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Does this signal fan out per key?
    #[inline]
    pub fn instanced(&self) -> bool {
        self.inner.instanced()
    }

    /// The underlying typed channel, e.g. for binding through
    /// [`Binding::builder`](crate::bindings::Binding::builder).
    pub fn channel(&self) -> &Channel<()> {
        &self.inner
    }

    /// See [`Channel::register_listener`].
    pub fn register_listener<L: Listen<()>>(
        &self,
        listener: Arc<L>,
        key: Option<InstanceKey>,
    ) -> Result<(), ChannelError> {
        self.inner.register_listener(listener, key)
    }

    /// See [`Channel::unregister_listener`].
    pub fn unregister_listener<L: Listen<()>>(&self, listener: &Arc<L>, key: Option<InstanceKey>) {
        self.inner.unregister_listener(listener, key);
    }

    /// Invokes every listener on the resolved target, in registration order.
    pub fn raise(&self, key: Option<InstanceKey>) {
        self.inner.raise((), key);
    }

    /// See [`Channel::listener_count`].
    pub fn listener_count(&self, key: Option<InstanceKey>) -> usize {
        self.inner.listener_count(key)
    }

    /// See [`Channel::registry`].
    pub fn registry(&self) -> &InstanceRegistry<ChannelState<()>> {
        self.inner.registry()
    }
}
