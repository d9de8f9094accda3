//! # eventry
//!
//! **Eventry** is a small library of instanced, typed event channels for
//! component-based applications.
//!
//! It provides two coupled mechanisms: a template/instance registry that
//! lets one shared configuration object fan out transparently into
//! independent per-key runtime copies, and a typed event channel that lets
//! independently-constructed components subscribe to and raise
//! strongly-typed notifications without holding references to each other.
//!
//! ## Architecture
//! ```text
//!   producer ──── raise(payload, key) ───────────┐
//!                                                 ▼
//!   ┌──────────────────────────────────────────────────────────┐
//!   │  Channel<P>                                               │
//!   │  └─ InstanceRegistry<ChannelState<P>>                     │
//!   │       ├─ template state        (key = None / global)      │
//!   │       ├─ instance state key A  (lazy, created on first    │
//!   │       ├─ instance state key B   registration)             │
//!   │       └─ change watchers                                  │
//!   └───────────────────────┬──────────────────────────────────┘
//!                           │ snapshot, registration order
//!              ┌────────────┼────────────┐
//!              ▼            ▼            ▼
//!         listener 1   listener 2   ResponseSet ◄── Binding
//!        (Listen<P>)  (Listen<P>)   (response        (lifecycle
//!                                     actions)        hooks)
//! ```
//!
//! Raising is a direct, synchronous call chain on the raising thread; there
//! is no internal scheduler, no background thread and no async machinery.
//! Every channel and registry guards its own state, so handles can be moved
//! and cloned across threads freely.
//!
//! ## Features
//! | Area            | Description                                              | Key types                                |
//! |-----------------|----------------------------------------------------------|------------------------------------------|
//! | **Instancing**  | Lazy per-key copies of a template object.                | [`InstanceRegistry`], [`Template`], [`InstanceKey`] |
//! | **Channels**    | Generic typed events, global or per-key.                 | [`Channel`], [`Signal`], [`Listen`]       |
//! | **Bindings**    | Registration lifecycles driven by host activation hooks. | [`Binding`], [`ResponseSet`]              |
//! | **Payloads**    | Ready-made instantiations.                               | [`BoolChannel`], [`FloatChannel`], [`Vec2Channel`], [`ObjectChannel`] |
//! | **Errors**      | Defensive guards for caller-contract violations.         | [`ChannelError`]                          |
//!
//! ## Example
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use eventry::{Binding, FloatChannel, InstanceKey};
//!
//! // One channel asset, instanced: each enemy gets its own copy.
//! let on_damaged = FloatChannel::builder("on-damaged").instanced(true).build();
//!
//! let enemy = InstanceKey::mint();
//! let hits = Arc::new(AtomicU32::new(0));
//!
//! let counter = Arc::clone(&hits);
//! let health_bar = Binding::builder(&on_damaged)
//!     .key(enemy)
//!     .on(move |amount: &f32| {
//!         assert!(*amount > 0.0);
//!         counter.fetch_add(1, Ordering::Relaxed);
//!     })
//!     .build();
//! health_bar.activate().unwrap();
//!
//! on_damaged.raise(12.5, Some(enemy));
//! on_damaged.raise(3.0, Some(InstanceKey::mint())); // someone else's hit
//! assert_eq!(hits.load(Ordering::Relaxed), 1);
//!
//! // Teardown boundary (scene end): drop bindings, clear instances.
//! drop(health_bar);
//! on_damaged.registry().clear();
//! assert_eq!(on_damaged.registry().instance_count(), 0);
//! ```

mod bindings;
mod channels;
mod error;
mod instancing;

// ---- Public re-exports ----

pub use bindings::{Binding, BindingBuilder, ResponseSet};
pub use channels::{
    BoolChannel, Channel, ChannelBuilder, ChannelState, FloatChannel, IntChannel, Listen,
    ObjectChannel, ObjectRef, Signal, Vec2, Vec2Channel,
};
pub use error::ChannelError;
pub use instancing::{InstanceKey, InstanceRegistry, Template, WatchId};
