//! # Response sets: ordered multicast of caller-supplied actions.
//!
//! A [`ResponseSet`] is the dispatch glue between a channel and the code
//! that actually reacts: zero or more opaque response actions, invoked in
//! insertion order with the raised payload. It implements
//! [`Listen`], so a whole set registers on a channel as one subscriber.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::channels::Listen;

type ResponseFn<P> = Arc<dyn Fn(&P) + Send + Sync>;

/// Ordered collection of response actions sharing one channel registration.
///
/// Actions can be added at any time, including from inside a raise; like
/// listener registration, such additions apply to subsequent raises.
pub struct ResponseSet<P: 'static> {
    actions: RwLock<Vec<ResponseFn<P>>>,
}

impl<P: 'static> ResponseSet<P> {
    pub fn new() -> Self {
        Self {
            actions: RwLock::new(Vec::new()),
        }
    }

    /// Appends a response action. Actions run in insertion order.
    pub fn add(&self, action: impl Fn(&P) + Send + Sync + 'static) {
        self.actions.write().push(Arc::new(action));
    }

    /// Number of response actions.
    pub fn len(&self) -> usize {
        self.actions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.read().is_empty()
    }
}

impl<P: 'static> Default for ResponseSet<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: 'static> Listen<P> for ResponseSet<P> {
    fn on_raised(&self, payload: &P) {
        let snapshot: Vec<ResponseFn<P>> = self.actions.read().clone();
        for action in snapshot {
            action(payload);
        }
    }

    fn name(&self) -> &str {
        "response-set"
    }
}
