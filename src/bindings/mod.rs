//! Subscriber lifecycle: bindings and their response actions.
//!
//! ## Contents
//! - [`ResponseSet`] ordered multicast of caller-supplied response actions
//! - [`Binding`] / [`BindingBuilder`] the registration lifecycle a host
//!   component drives through activation hooks (or scopes to its existence
//!   with `persistent`)
//!
//! ## Lifecycle
//! ```text
//! non-persistent:  Unregistered ─ activate() ─► Registered ─ deactivate() ─► Unregistered
//!                        ▲                                                        │
//!                        └────────────────────── (repeatable) ────────────────────┘
//!
//! persistent:      build() ─► Registered ─ drop ─► Unregistered   (exactly once)
//! ```
//!
//! Dropping a binding unregisters it if needed, so every exit path leaves
//! the channel as if the binding had never registered.

mod binding;
mod response;

pub use binding::{Binding, BindingBuilder};
pub use response::ResponseSet;
