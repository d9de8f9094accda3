//! # Template contract for instanced objects.
//!
//! A template is the canonical, non-keyed configuration object. Anything
//! stored in an [`InstanceRegistry`](crate::instancing::InstanceRegistry)
//! implements [`Template`]: a stable diagnostic name plus the construction
//! path used to derive per-key copies.

/// # Contract between a template object and its registry.
///
/// The registry calls [`instantiate`](Template::instantiate) exactly once per
/// distinct key, passing the derived name (`"<template>_<key id>"`). The name
/// is diagnostic-only; no behavior may depend on it.
///
/// `instantiate` must be a shallow derivation: copy configuration, reset
/// runtime state. It must not call back into the registry that invoked it.
///
/// # Example
/// ```
/// use eventry::Template;
///
/// struct AudioCue {
///     name: String,
///     volume: f32,
/// }
///
/// impl Template for AudioCue {
///     fn name(&self) -> &str {
///         &self.name
///     }
///
///     fn instantiate(&self, name: String) -> Self {
///         AudioCue { name, volume: self.volume }
///     }
/// }
/// ```
pub trait Template: Send + Sync + 'static {
    /// Returns the stable, human-readable identity of this object.
    fn name(&self) -> &str;

    /// Creates a fresh copy of this template for a new key.
    ///
    /// The returned object carries `name` as its identity and starts from
    /// the template's configuration with any runtime state reset.
    fn instantiate(&self, name: String) -> Self
    where
        Self: Sized;
}
