//! # Instance keys: non-owning identity tokens.
//!
//! An [`InstanceKey`] selects one per-key instance inside an
//! [`InstanceRegistry`](crate::instancing::InstanceRegistry). The component
//! that wants its own copy of a template mints a key once (usually at
//! construction) and passes it to every keyed call it makes.
//!
//! Keys are plain `u64` ids behind a newtype. The registry stores the id and
//! nothing else, so holding instances never extends the lifetime of the
//! component that minted the key.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide counter backing [`InstanceKey::mint`].
static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

/// Identity token selecting a per-key instance.
///
/// `Copy`, cheap to pass around, unique per [`mint`](InstanceKey::mint) call
/// for the lifetime of the process.
///
/// # Example
/// ```
/// use eventry::InstanceKey;
///
/// let a = InstanceKey::mint();
/// let b = InstanceKey::mint();
/// assert_ne!(a, b);
/// assert_eq!(a, a);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceKey(u64);

impl InstanceKey {
    /// Mints a fresh, process-unique key.
    pub fn mint() -> Self {
        Self(NEXT_KEY.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id, used to derive instance names for diagnostics.
    #[inline]
    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minted_keys_are_unique() {
        let keys: Vec<InstanceKey> = (0..64).map(|_| InstanceKey::mint()).collect();
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_display_includes_id() {
        let key = InstanceKey::mint();
        assert_eq!(format!("{key}"), format!("key-{}", key.id()));
    }
}
