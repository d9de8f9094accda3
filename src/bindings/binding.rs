//! # Listener bindings: the subscriber lifecycle contract.
//!
//! A [`Binding`] ties a [`ResponseSet`] to one channel (and optionally one
//! instance key) and owns the registration lifecycle on behalf of a host
//! component. The hosting environment drives it through two hook pairs:
//!
//! - **Activation-scoped** (default): the host calls
//!   [`activate`](Binding::activate) when the component becomes active and
//!   [`deactivate`](Binding::deactivate) symmetrically. The pair is
//!   repeatable.
//! - **Existence-scoped** (`persistent`): registration happens when the
//!   binding is built and ends when it is dropped; activation hooks become
//!   no-ops, so the component keeps receiving events while inactive.
//!
//! Dropping a binding always unregisters it if it is still registered.
//! Whatever path a teardown takes, the channel's registration set ends up
//! exactly as if the binding had never existed.
//!
//! ## Example
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use eventry::{Binding, BoolChannel, InstanceKey};
//!
//! let alarm = BoolChannel::builder("alarm").instanced(true).build();
//! let room = InstanceKey::mint();
//!
//! let lit = Arc::new(AtomicBool::new(false));
//! let lamp = Arc::clone(&lit);
//! let binding = Binding::builder(&alarm)
//!     .key(room)
//!     .on(move |armed: &bool| lamp.store(*armed, Ordering::Relaxed))
//!     .build();
//!
//! binding.activate().unwrap();
//! alarm.raise(true, Some(room));
//! assert!(lit.load(Ordering::Relaxed));
//!
//! binding.deactivate();
//! alarm.raise(false, Some(room));
//! assert!(lit.load(Ordering::Relaxed), "deactivated binding no longer listens");
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::bindings::ResponseSet;
use crate::channels::Channel;
use crate::error::ChannelError;
use crate::instancing::InstanceKey;

/// Registration lifecycle of one subscriber against one channel.
///
/// Host-owned; the object registered with the channel is the binding's
/// internal [`ResponseSet`].
pub struct Binding<P: 'static> {
    channel: Channel<P>,
    key: Option<InstanceKey>,
    persistent: bool,
    responses: Arc<ResponseSet<P>>,
    registered: AtomicBool,
}

impl<P: 'static> Binding<P> {
    /// Starts building a binding against `channel`.
    pub fn builder(channel: &Channel<P>) -> BindingBuilder<P> {
        BindingBuilder {
            channel: channel.clone(),
            key: None,
            persistent: false,
            responses: ResponseSet::new(),
        }
    }

    /// The instance key this binding resolves through, if any.
    pub fn key(&self) -> Option<InstanceKey> {
        self.key
    }

    /// Is this binding existence-scoped?
    pub fn persistent(&self) -> bool {
        self.persistent
    }

    /// Is the binding currently registered with its channel?
    pub fn is_active(&self) -> bool {
        self.registered.load(Ordering::Acquire)
    }

    /// The binding's response actions; more can be added at runtime.
    pub fn responses(&self) -> &Arc<ResponseSet<P>> {
        &self.responses
    }

    /// Activation hook. Registers with the channel unless the binding is
    /// persistent (those registered at construction and ignore this hook).
    ///
    /// Activating an already-active binding is rejected without touching
    /// the channel.
    pub fn activate(&self) -> Result<(), ChannelError> {
        if self.persistent {
            return Ok(());
        }
        self.register()
    }

    /// Deactivation hook. Unregisters unless the binding is persistent.
    /// No-op when the binding is not currently registered.
    pub fn deactivate(&self) {
        if self.persistent {
            return;
        }
        self.unregister();
    }

    fn register(&self) -> Result<(), ChannelError> {
        if self.registered.swap(true, Ordering::AcqRel) {
            return Err(ChannelError::BindingActive {
                channel: self.channel.name().to_string(),
            });
        }
        match self
            .channel
            .register_listener(Arc::clone(&self.responses), self.key)
        {
            Ok(()) => Ok(()),
            Err(err) => {
                self.registered.store(false, Ordering::Release);
                Err(err)
            }
        }
    }

    fn unregister(&self) {
        if self.registered.swap(false, Ordering::AcqRel) {
            self.channel.unregister_listener(&self.responses, self.key);
        }
    }
}

impl<P: 'static> Drop for Binding<P> {
    /// Destroy hook: the registration never outlives the binding, on any
    /// exit path.
    fn drop(&mut self) {
        self.unregister();
    }
}

/// Builder assembling a [`Binding`]'s creation-time configuration.
pub struct BindingBuilder<P: 'static> {
    channel: Channel<P>,
    key: Option<InstanceKey>,
    persistent: bool,
    responses: ResponseSet<P>,
}

impl<P: 'static> BindingBuilder<P> {
    /// Resolves the binding through `key` on an instanced channel.
    pub fn key(mut self, key: InstanceKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Scopes the registration to the binding's existence instead of its
    /// activation state.
    pub fn persistent(mut self, persistent: bool) -> Self {
        self.persistent = persistent;
        self
    }

    /// Appends a response action; repeatable, actions run in this order.
    pub fn on(self, action: impl Fn(&P) + Send + Sync + 'static) -> Self {
        self.responses.add(action);
        self
    }

    /// Builds the binding. A persistent binding registers immediately.
    pub fn build(self) -> Binding<P> {
        let binding = Binding {
            channel: self.channel,
            key: self.key,
            persistent: self.persistent,
            responses: Arc::new(self.responses),
            registered: AtomicBool::new(false),
        };
        if binding.persistent {
            let _ = binding.register();
        }
        binding
    }
}

impl BindingBuilder<()> {
    /// Payload-free convenience for [`Signal`](crate::channels::Signal)
    /// bindings.
    pub fn on_trigger(self, action: impl Fn() + Send + Sync + 'static) -> Self {
        self.on(move |_: &()| action())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicU32;
    use std::sync::Mutex;

    use crate::channels::Signal;

    use super::*;

    fn counting_binding(channel: &Channel<i64>, count: &Arc<AtomicU32>) -> BindingBuilder<i64> {
        let count = Arc::clone(count);
        Binding::builder(channel).on(move |_: &i64| {
            count.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_activate_deactivate_cycle_is_repeatable() {
        let channel: Channel<i64> = Channel::new("cycle");
        let count = Arc::new(AtomicU32::new(0));
        let binding = counting_binding(&channel, &count).build();

        for round in 1..=3u32 {
            assert!(!binding.is_active());
            binding.activate().unwrap();
            assert_eq!(channel.listener_count(None), 1);

            channel.raise(1, None);
            assert_eq!(count.load(Ordering::SeqCst), round);

            binding.deactivate();
            assert_eq!(channel.listener_count(None), 0);

            channel.raise(1, None);
            assert_eq!(count.load(Ordering::SeqCst), round);
        }
    }

    #[test]
    fn test_deactivate_when_inactive_is_noop() {
        let channel: Channel<i64> = Channel::new("idle");
        let count = Arc::new(AtomicU32::new(0));
        let binding = counting_binding(&channel, &count).build();

        binding.deactivate();
        assert_eq!(channel.listener_count(None), 0);
    }

    #[test]
    fn test_double_activation_rejected() {
        let channel: Channel<i64> = Channel::new("double");
        let count = Arc::new(AtomicU32::new(0));
        let binding = counting_binding(&channel, &count).build();

        binding.activate().unwrap();
        let err = binding.activate().unwrap_err();

        assert_eq!(err.as_label(), "binding_already_active");
        assert_eq!(channel.listener_count(None), 1);
        channel.raise(1, None);
        assert_eq!(count.load(Ordering::SeqCst), 1, "still registered once");
    }

    #[test]
    fn test_persistent_binding_registers_on_build_and_ignores_hooks() {
        let channel: Channel<i64> = Channel::new("persistent");
        let count = Arc::new(AtomicU32::new(0));
        let binding = counting_binding(&channel, &count).persistent(true).build();

        assert!(binding.is_active());
        assert_eq!(channel.listener_count(None), 1);

        binding.activate().unwrap();
        binding.deactivate();
        assert_eq!(channel.listener_count(None), 1, "hooks are no-ops");

        channel.raise(1, None);
        assert_eq!(count.load(Ordering::SeqCst), 1);

        drop(binding);
        assert_eq!(channel.listener_count(None), 0);
    }

    #[test]
    fn test_drop_unregisters_active_binding() {
        let channel: Channel<i64> = Channel::new("teardown");
        let count = Arc::new(AtomicU32::new(0));
        let binding = counting_binding(&channel, &count).build();

        binding.activate().unwrap();
        assert_eq!(channel.listener_count(None), 1);

        drop(binding);
        assert_eq!(channel.listener_count(None), 0);
    }

    #[test]
    fn test_keyed_binding_targets_its_instance() {
        let channel: Channel<i64> = Channel::builder("keyed").instanced(true).build();
        let key = InstanceKey::mint();
        let count = Arc::new(AtomicU32::new(0));
        let binding = counting_binding(&channel, &count).key(key).build();

        binding.activate().unwrap();
        channel.raise(1, Some(key));
        channel.raise(1, Some(InstanceKey::mint()));
        channel.raise(1, None);

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_responses_run_in_insertion_order() {
        let channel: Channel<i64> = Channel::new("ordered-responses");
        let trace = Arc::new(Mutex::new(Vec::new()));

        let first = Arc::clone(&trace);
        let second = Arc::clone(&trace);
        let binding = Binding::builder(&channel)
            .on(move |payload: &i64| first.lock().unwrap().push(("flag", *payload)))
            .on(move |payload: &i64| second.lock().unwrap().push(("log", *payload)))
            .build();
        binding.activate().unwrap();

        channel.raise(5, None);

        let got = trace.lock().unwrap().clone();
        assert_eq!(got, vec![("flag", 5), ("log", 5)]);
    }

    #[test]
    fn test_signal_binding_with_trigger_sugar() {
        let signal = Signal::new("tick");
        let count = Arc::new(AtomicU32::new(0));
        let ticks = Arc::clone(&count);
        let binding = Binding::builder(signal.channel())
            .on_trigger(move || {
                ticks.fetch_add(1, Ordering::SeqCst);
            })
            .build();
        binding.activate().unwrap();

        signal.raise(None);
        signal.raise(None);

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
