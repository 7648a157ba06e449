//! Code scopes - where entry types are resolved from
//!
//! `NativeScope` opens shared libraries shipped in bundles, `RegistryScope`
//! serves mods compiled into the host.

pub mod native;
pub mod registry;

pub use native::NativeScope;
pub use registry::{FnHook, RegistryScope};
