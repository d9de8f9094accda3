//! Typed event channels: the generic protocol and its concrete payloads.
//!
//! ## Contents
//! - [`Listen`] the subscriber contract
//! - [`Channel`] / [`ChannelBuilder`] the generic parametrized event
//! - [`ChannelState`] one dispatch target (template or per-key instance)
//! - [`Signal`] the parameterless variant
//! - payload instantiations: [`BoolChannel`], [`FloatChannel`],
//!   [`IntChannel`], [`Vec2Channel`], [`ObjectChannel`]
//!
//! ## Event flow
//! ```text
//! raiser ── raise(payload, key) ──► Channel<P>
//!                                      │ resolve target (template / per-key)
//!                                      ▼
//!                                 ChannelState<P>
//!                                      │ snapshot of listener set
//!                                      ├──► listener 1 .on_raised(&payload)
//!                                      ├──► listener 2 .on_raised(&payload)
//!                                      └──► listener N .on_raised(&payload)
//! ```
//!
//! Dispatch is synchronous and in registration order; see
//! [`Channel::raise`] for the re-entrancy rules.

mod channel;
mod listen;
mod params;
mod signal;
mod state;

pub use channel::{Channel, ChannelBuilder};
pub use listen::Listen;
pub use params::{BoolChannel, FloatChannel, IntChannel, ObjectChannel, ObjectRef, Vec2, Vec2Channel};
pub use signal::Signal;
pub use state::ChannelState;
