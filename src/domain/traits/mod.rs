//! Domain traits - Abstractions for infrastructure implementations

pub mod host;
pub mod scope;

pub use host::HostApplication;
pub use scope::{CodeScope, EntryType, Mountable};
