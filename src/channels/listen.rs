//! # Core listener trait
//!
//! `Listen<P>` is the extension point for receiving raises of a
//! [`Channel<P>`](crate::channels::Channel). Implementations are invoked
//! synchronously, on the raising thread, in registration order.
//!
//! ## Contract
//! - [`on_raised`](Listen::on_raised) runs to completion before the next
//!   listener is invoked; a slow listener blocks the raiser.
//! - Registering or unregistering from inside `on_raised` is allowed; the
//!   change takes effect for subsequent raises, not the current one.
//! - A panic propagates to the raiser (listeners are not isolated from each
//!   other within one raise).

/// Contract for channel listeners.
///
/// Registered as `Arc<dyn Listen<P>>`; the `Arc`'s pointer identity is the
/// subscriber identity used by unregistration.
pub trait Listen<P>: Send + Sync + 'static {
    /// Handles one raise of the bound channel.
    fn on_raised(&self, payload: &P);

    /// Human-readable name (for logs/diagnostics).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
