//! # Instance registry: lazy per-key copies of a template object.
//!
//! [`InstanceRegistry`] owns the mapping from an [`InstanceKey`] to a
//! lazily-created copy of a template. A registry built with
//! `instanced = false` never fans out: every lookup yields the template
//! itself. Built with `instanced = true`, each distinct key materializes
//! exactly one copy on first access and reuses it afterwards.
//!
//! ## Rules
//! - A `None` key always resolves to the template (with a warning when the
//!   registry is instanced, since the caller probably forgot the key).
//! - Change watchers fire after the map gains an entry and on [`clear`],
//!   never on cache hits.
//! - [`clear`] is the only eviction mechanism; the registry holds bare key
//!   ids and never keeps the key's owner alive.
//! - No method returns an error and none panics.
//!
//! ## Locking
//! The instance map and the watcher list sit behind their own
//! `parking_lot::RwLock`s. Watchers are invoked after the map lock is
//! released, over a snapshot, so a watcher may call back into the registry.
//!
//! ## Example
//! ```
//! use std::sync::Arc;
//! use eventry::{InstanceKey, InstanceRegistry, Template};
//!
//! struct Cfg {
//!     name: String,
//!     limit: u32,
//! }
//!
//! impl Template for Cfg {
//!     fn name(&self) -> &str { &self.name }
//!     fn instantiate(&self, name: String) -> Self {
//!         Cfg { name, limit: self.limit }
//!     }
//! }
//!
//! let template = Arc::new(Cfg { name: "cfg".into(), limit: 8 });
//! let registry = InstanceRegistry::new(template, true);
//!
//! let key = InstanceKey::mint();
//! let copy = registry.instance(Some(key));
//! assert_eq!(copy.limit, 8);
//! assert_eq!(copy.name(), format!("cfg_{}", key.id()));
//! assert_eq!(registry.instance_count(), 1);
//! ```

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::instancing::{InstanceKey, Template};

/// Handle identifying one change watcher, returned by
/// [`InstanceRegistry::watch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchId(u64);

type WatchFn<T> = Arc<dyn Fn(&Arc<T>) + Send + Sync>;

struct Watcher<T> {
    id: WatchId,
    notify: WatchFn<T>,
}

/// Registry of lazily-created per-key copies of a template object.
///
/// The `instanced` flag is fixed at construction. When it is `false` the
/// instance map stays empty forever and every lookup returns the template.
pub struct InstanceRegistry<T: Template> {
    template: Arc<T>,
    instanced: bool,
    instances: RwLock<HashMap<InstanceKey, Arc<T>>>,
    watchers: RwLock<Vec<Watcher<T>>>,
    next_watch: AtomicU64,
}

impl<T: Template> InstanceRegistry<T> {
    /// Creates a registry around `template`.
    pub fn new(template: Arc<T>, instanced: bool) -> Self {
        Self {
            template,
            instanced,
            instances: RwLock::new(HashMap::new()),
            watchers: RwLock::new(Vec::new()),
            next_watch: AtomicU64::new(0),
        }
    }

    /// Is instancing enabled for this registry?
    #[inline]
    pub fn instanced(&self) -> bool {
        self.instanced
    }

    /// Number of currently materialized per-key instances.
    ///
    /// Always 0 when not instanced.
    pub fn instance_count(&self) -> usize {
        self.instances.read().len()
    }

    /// The template object itself.
    #[inline]
    pub fn template(&self) -> &Arc<T> {
        &self.template
    }

    /// Resolves `key` to its instance, creating it on first access.
    ///
    /// Returns the template when the registry is not instanced or when `key`
    /// is `None`. A `None` key on an instanced registry additionally logs a
    /// warning: the call still works, but the caller most likely meant to
    /// supply a key.
    ///
    /// Creation is memoized: the same key always yields the same instance
    /// until [`clear`](Self::clear). Each creation fires the change watchers
    /// exactly once; cache hits fire nothing.
    pub fn instance(&self, key: Option<InstanceKey>) -> Arc<T> {
        if !self.instanced {
            return Arc::clone(&self.template);
        }
        let Some(key) = key else {
            tracing::warn!(
                template = self.template.name(),
                "accessing the template of an instanced registry; was an instance key forgotten?"
            );
            return Arc::clone(&self.template);
        };

        if let Some(found) = self.instances.read().get(&key) {
            return Arc::clone(found);
        }

        // Miss: derive outside the map lock, then re-check under the write
        // lock in case another thread won the race.
        let name = format!("{}_{}", self.template.name(), key.id());
        let created = Arc::new(self.template.instantiate(name));

        let (instance, inserted) = {
            let mut map = self.instances.write();
            match map.entry(key) {
                Entry::Occupied(occupied) => (Arc::clone(occupied.get()), false),
                Entry::Vacant(vacant) => {
                    vacant.insert(Arc::clone(&created));
                    (created, true)
                }
            }
        };

        if inserted {
            tracing::debug!(
                template = self.template.name(),
                %key,
                count = self.instance_count(),
                "instance created"
            );
            self.notify_changed();
        }
        instance
    }

    /// Resolves `key` without creating anything.
    ///
    /// The non-instanced and `None`-key cases resolve to the template, same
    /// as [`instance`](Self::instance); a keyed miss yields `None` instead
    /// of materializing an instance. Raise and unregister paths go through
    /// here so that they stay free of side effects.
    pub fn lookup(&self, key: Option<InstanceKey>) -> Option<Arc<T>> {
        if !self.instanced {
            return Some(Arc::clone(&self.template));
        }
        match key {
            None => Some(Arc::clone(&self.template)),
            Some(key) => self.instances.read().get(&key).map(Arc::clone),
        }
    }

    /// Discards every per-key instance and fires the change watchers once.
    ///
    /// The template itself is untouched. Keys resolved after a clear get
    /// fresh instances.
    pub fn clear(&self) {
        let dropped = {
            let mut map = self.instances.write();
            let dropped = map.len();
            map.clear();
            dropped
        };
        tracing::debug!(template = self.template.name(), dropped, "instances cleared");
        self.notify_changed();
    }

    /// Snapshot of the currently materialized instances.
    ///
    /// Recomputed on every call; independent of later mutation.
    pub fn instances(&self) -> Vec<Arc<T>> {
        self.instances.read().values().map(Arc::clone).collect()
    }

    /// Snapshot of the currently known keys, for diagnostic enumeration.
    pub fn keys(&self) -> Vec<InstanceKey> {
        self.instances.read().keys().copied().collect()
    }

    /// Registers a change watcher.
    ///
    /// Watchers form a secondary listener set, independent of the instance
    /// map: they survive [`clear`](Self::clear) and fire in registration
    /// order with the template whenever the map gains entries or is cleared.
    pub fn watch(&self, notify: impl Fn(&Arc<T>) + Send + Sync + 'static) -> WatchId {
        let id = WatchId(self.next_watch.fetch_add(1, Ordering::Relaxed));
        self.watchers.write().push(Watcher {
            id,
            notify: Arc::new(notify),
        });
        id
    }

    /// Removes a change watcher. Returns `false` if it was already gone.
    pub fn unwatch(&self, id: WatchId) -> bool {
        let mut watchers = self.watchers.write();
        let before = watchers.len();
        watchers.retain(|w| w.id != id);
        watchers.len() != before
    }

    fn notify_changed(&self) {
        let snapshot: Vec<WatchFn<T>> = self
            .watchers
            .read()
            .iter()
            .map(|w| Arc::clone(&w.notify))
            .collect();
        for notify in snapshot {
            notify(&self.template);
        }
    }
}
