//! # Typed event channel.
//!
//! A [`Channel<P>`] carries payloads of one fixed type `P` from raisers to
//! listeners that never reference each other directly. The channel is a
//! cheap cloneable handle over shared state; clones raise and register
//! against the same underlying channel.
//!
//! A channel built with `.instanced(true)` mirrors the template/instance
//! model of [`InstanceRegistry`](crate::instancing::InstanceRegistry): every
//! keyed operation resolves to that key's private listener set, so one
//! channel object behaves as N independent per-key channels. Non-instanced
//! channels ignore keys and always resolve to the single global set.
//!
//! ## Rules
//! - `raise` is synchronous, on the calling thread, in registration order,
//!   over a snapshot of the listener set.
//! - Raising with zero listeners (including raising a key that never
//!   registered anything) is a well-defined no-op and materializes nothing.
//! - Registration resolves through the creating path (the per-key set comes
//!   into existence on first registration); raise and unregister resolve
//!   through the non-creating path.
//!
//! ## Example
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use eventry::{Channel, InstanceKey, Listen};
//!
//! struct Counter(AtomicU32);
//!
//! impl Listen<f32> for Counter {
//!     fn on_raised(&self, _damage: &f32) {
//!         self.0.fetch_add(1, Ordering::Relaxed);
//!     }
//! }
//!
//! let on_hit: Channel<f32> = Channel::builder("on-hit").instanced(true).build();
//! let player = InstanceKey::mint();
//!
//! let hits = Arc::new(Counter(AtomicU32::new(0)));
//! on_hit.register_listener(Arc::clone(&hits), Some(player)).unwrap();
//!
//! on_hit.raise(12.5, Some(player));
//! on_hit.raise(3.0, Some(InstanceKey::mint())); // different key, not delivered
//! assert_eq!(hits.0.load(Ordering::Relaxed), 1);
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use crate::channels::{ChannelState, Listen};
use crate::error::ChannelError;
use crate::instancing::{InstanceKey, InstanceRegistry, Template};

/// Typed event channel; a cloneable handle over one shared listener registry.
pub struct Channel<P: 'static> {
    registry: Arc<InstanceRegistry<ChannelState<P>>>,
}

impl<P: 'static> Clone for Channel<P> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<P: 'static> Channel<P> {
    /// Creates a non-instanced channel. Shorthand for
    /// `Channel::builder(name).build()`.
    pub fn new(name: impl Into<String>) -> Self {
        Self::builder(name).build()
    }

    /// Starts building a channel with the given diagnostic name.
    pub fn builder(name: impl Into<String>) -> ChannelBuilder<P> {
        ChannelBuilder {
            name: name.into(),
            instanced: false,
            _payload: PhantomData,
        }
    }

    /// The channel's diagnostic name.
    pub fn name(&self) -> &str {
        self.registry.template().name()
    }

    /// Does this channel fan out per key?
    #[inline]
    pub fn instanced(&self) -> bool {
        self.registry.instanced()
    }

    /// The underlying instance registry, for inspection and teardown:
    /// instance counts, key enumeration, change watchers, [`clear`].
    ///
    /// [`clear`]: InstanceRegistry::clear
    pub fn registry(&self) -> &InstanceRegistry<ChannelState<P>> {
        &self.registry
    }

    /// Adds `listener` to the resolved target's registration set.
    ///
    /// For an instanced channel with `Some(key)`, the per-key set is created
    /// on first registration. Re-registering a listener that is already in
    /// the resolved set is rejected and leaves the set unchanged.
    pub fn register_listener<L: Listen<P>>(
        &self,
        listener: Arc<L>,
        key: Option<InstanceKey>,
    ) -> Result<(), ChannelError> {
        let target = self.registry.instance(key);
        let listener: Arc<dyn Listen<P>> = listener;
        target.register(listener)
    }

    /// Removes `listener` from the resolved target's set.
    ///
    /// No-op when the listener is not registered there, or when the key's
    /// set was never materialized.
    pub fn unregister_listener<L: Listen<P>>(&self, listener: &Arc<L>, key: Option<InstanceKey>) {
        if let Some(target) = self.registry.lookup(key) {
            target.unregister(Arc::as_ptr(listener) as *const ());
        }
    }

    /// Invokes every listener currently registered on the resolved target,
    /// synchronously and in registration order, passing `payload`.
    ///
    /// Listeners may register or unregister during dispatch; such changes
    /// apply to subsequent raises. Raising into a key with no materialized
    /// set does nothing.
    pub fn raise(&self, payload: P, key: Option<InstanceKey>) {
        if let Some(target) = self.registry.lookup(key) {
            target.raise(&payload);
        }
    }

    /// Number of listeners on the resolved target; 0 for an unmaterialized
    /// key.
    pub fn listener_count(&self, key: Option<InstanceKey>) -> usize {
        self.registry
            .lookup(key)
            .map_or(0, |target| target.listener_count())
    }
}

/// Builder fixing a channel's creation-time configuration.
pub struct ChannelBuilder<P: 'static> {
    name: String,
    instanced: bool,
    _payload: PhantomData<fn(P)>,
}

impl<P: 'static> ChannelBuilder<P> {
    /// Enables or disables per-key instancing. Fixed once built.
    pub fn instanced(mut self, instanced: bool) -> Self {
        self.instanced = instanced;
        self
    }

    /// Builds the channel.
    pub fn build(self) -> Channel<P> {
        let template = Arc::new(ChannelState::new(self.name));
        Channel {
            registry: Arc::new(InstanceRegistry::new(template, self.instanced)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use super::*;

    /// Appends a tag to a shared trace together with the payload it saw.
    struct Tracer {
        tag: &'static str,
        trace: Arc<Mutex<Vec<(String, i64)>>>,
    }

    impl Tracer {
        fn arc(tag: &'static str, trace: &Arc<Mutex<Vec<(String, i64)>>>) -> Arc<Self> {
            Arc::new(Self {
                tag,
                trace: Arc::clone(trace),
            })
        }
    }

    impl Listen<i64> for Tracer {
        fn on_raised(&self, payload: &i64) {
            self.trace.lock().unwrap().push((self.tag.to_string(), *payload));
        }
    }

    #[test]
    fn test_dispatch_in_registration_order() {
        let channel: Channel<i64> = Channel::new("ordered");
        let trace = Arc::new(Mutex::new(Vec::new()));

        let a = Tracer::arc("a", &trace);
        let b = Tracer::arc("b", &trace);
        let c = Tracer::arc("c", &trace);
        channel.register_listener(a, None).unwrap();
        channel.register_listener(b, None).unwrap();
        channel.register_listener(c, None).unwrap();

        channel.raise(7, None);

        let got = trace.lock().unwrap().clone();
        assert_eq!(
            got,
            vec![
                ("a".to_string(), 7),
                ("b".to_string(), 7),
                ("c".to_string(), 7)
            ]
        );
    }

    #[test]
    fn test_register_unregister_symmetry() {
        let channel: Channel<i64> = Channel::new("symmetry");
        let trace = Arc::new(Mutex::new(Vec::new()));
        let stay = Tracer::arc("stay", &trace);
        let visitor = Tracer::arc("visitor", &trace);

        channel.register_listener(Arc::clone(&stay), None).unwrap();
        assert_eq!(channel.listener_count(None), 1);

        channel.register_listener(Arc::clone(&visitor), None).unwrap();
        channel.unregister_listener(&visitor, None);
        assert_eq!(channel.listener_count(None), 1);

        channel.raise(1, None);
        let got = trace.lock().unwrap().clone();
        assert_eq!(got, vec![("stay".to_string(), 1)]);
    }

    #[test]
    fn test_unregister_absent_listener_is_noop() {
        let channel: Channel<i64> = Channel::new("noop");
        let trace = Arc::new(Mutex::new(Vec::new()));
        let never = Tracer::arc("never", &trace);

        channel.unregister_listener(&never, None);
        assert_eq!(channel.listener_count(None), 0);
    }

    #[test]
    fn test_raise_without_listeners_is_noop_and_creates_nothing() {
        let channel: Channel<i64> = Channel::builder("quiet").instanced(true).build();
        let key = InstanceKey::mint();

        channel.raise(1, Some(key));
        channel.raise(2, None);

        assert_eq!(channel.registry().instance_count(), 0);
    }

    #[test]
    fn test_instanced_keys_are_independent() {
        let channel: Channel<i64> = Channel::builder("per-key").instanced(true).build();
        let trace = Arc::new(Mutex::new(Vec::new()));
        let key_a = InstanceKey::mint();
        let key_b = InstanceKey::mint();

        let on_a = Tracer::arc("a", &trace);
        let on_b = Tracer::arc("b", &trace);
        channel.register_listener(on_a, Some(key_a)).unwrap();
        channel.register_listener(on_b, Some(key_b)).unwrap();
        assert_eq!(channel.registry().instance_count(), 2);

        channel.raise(5, Some(key_a));

        let got = trace.lock().unwrap().clone();
        assert_eq!(got, vec![("a".to_string(), 5)]);
    }

    #[test]
    fn test_keyed_ops_on_non_instanced_channel_hit_the_global_set() {
        let channel: Channel<i64> = Channel::new("global");
        let trace = Arc::new(Mutex::new(Vec::new()));
        let listener = Tracer::arc("global", &trace);

        channel
            .register_listener(listener, Some(InstanceKey::mint()))
            .unwrap();
        channel.raise(3, Some(InstanceKey::mint()));

        assert_eq!(channel.registry().instance_count(), 0);
        assert_eq!(trace.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_unregister_under_wrong_key_leaves_registration_alone() {
        let channel: Channel<i64> = Channel::builder("wrong-key").instanced(true).build();
        let trace = Arc::new(Mutex::new(Vec::new()));
        let key = InstanceKey::mint();
        let listener = Tracer::arc("keyed", &trace);

        channel
            .register_listener(Arc::clone(&listener), Some(key))
            .unwrap();
        channel.unregister_listener(&listener, Some(InstanceKey::mint()));
        channel.unregister_listener(&listener, None);

        assert_eq!(channel.listener_count(Some(key)), 1);
        channel.raise(4, Some(key));
        assert_eq!(trace.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let channel: Channel<i64> = Channel::new("dup");
        let trace = Arc::new(Mutex::new(Vec::new()));
        let listener = Tracer::arc("dup", &trace);

        channel.register_listener(Arc::clone(&listener), None).unwrap();
        let err = channel
            .register_listener(Arc::clone(&listener), None)
            .unwrap_err();

        assert_eq!(err.as_label(), "listener_already_registered");
        assert_eq!(channel.listener_count(None), 1);
    }

    /// Registers another listener from inside a raise.
    struct Recruiter {
        channel: Channel<i64>,
        recruit: Arc<Tracer>,
        done: AtomicBool,
    }

    impl Listen<i64> for Recruiter {
        fn on_raised(&self, _payload: &i64) {
            if !self.done.swap(true, Ordering::SeqCst) {
                self.channel
                    .register_listener(Arc::clone(&self.recruit), None)
                    .unwrap();
            }
        }
    }

    #[test]
    fn test_mutation_during_raise_applies_to_next_raise() {
        let channel: Channel<i64> = Channel::new("reentrant");
        let trace = Arc::new(Mutex::new(Vec::new()));
        let recruit = Tracer::arc("recruit", &trace);

        let recruiter = Arc::new(Recruiter {
            channel: channel.clone(),
            recruit,
            done: AtomicBool::new(false),
        });
        channel.register_listener(recruiter, None).unwrap();

        channel.raise(1, None);
        assert!(
            trace.lock().unwrap().is_empty(),
            "snapshot dispatch: the recruit must not see the raise that registered it"
        );

        channel.raise(2, None);
        let got = trace.lock().unwrap().clone();
        assert_eq!(got, vec![("recruit".to_string(), 2)]);
    }

    struct FlagSetter {
        flag: Arc<AtomicBool>,
        order: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Listen<bool> for FlagSetter {
        fn on_raised(&self, value: &bool) {
            self.flag.store(*value, Ordering::SeqCst);
            self.order.lock().unwrap().push("flag");
        }
    }

    struct Logger {
        log: Arc<Mutex<Vec<bool>>>,
        order: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Listen<bool> for Logger {
        fn on_raised(&self, value: &bool) {
            self.log.lock().unwrap().push(*value);
            self.order.lock().unwrap().push("log");
        }
    }

    #[test]
    fn test_bool_channel_flag_then_log() {
        let channel: Channel<bool> = Channel::new("armed");
        let flag = Arc::new(AtomicBool::new(false));
        let log = Arc::new(Mutex::new(Vec::new()));
        let order = Arc::new(Mutex::new(Vec::new()));

        let setter = Arc::new(FlagSetter {
            flag: Arc::clone(&flag),
            order: Arc::clone(&order),
        });
        let logger = Arc::new(Logger {
            log: Arc::clone(&log),
            order: Arc::clone(&order),
        });
        channel.register_listener(setter, None).unwrap();
        channel.register_listener(logger, None).unwrap();

        channel.raise(true, None);

        assert!(flag.load(Ordering::SeqCst));
        assert_eq!(*log.lock().unwrap(), vec![true]);
        assert_eq!(*order.lock().unwrap(), vec!["flag", "log"]);
    }

    #[test]
    fn test_clear_detaches_per_key_listeners() {
        let channel: Channel<i64> = Channel::builder("cleared").instanced(true).build();
        let trace = Arc::new(Mutex::new(Vec::new()));
        let key = InstanceKey::mint();
        let listener = Tracer::arc("gone", &trace);
        channel.register_listener(listener, Some(key)).unwrap();

        channel.registry().clear();
        channel.raise(9, Some(key));

        assert!(trace.lock().unwrap().is_empty());
        assert_eq!(channel.listener_count(Some(key)), 0);
    }
}
