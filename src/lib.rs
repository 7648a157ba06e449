//! Startup bootstrap that loads code mods before the host application.
//!
//! Bundles (`*.jar` zip archives) in the mods directory are filtered against
//! the disabled list, added to a code scope, resolved from their
//! `META-INF/MANIFEST.MF`, and mounted. A broken mod is logged and skipped;
//! the host always starts once the base config has been read.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod plugin_api;

pub use application::errors::BootstrapError;
pub use application::services::{launch, launch_with, Bootstrap, BootstrapReport};
pub use domain::entities::{DisabledSet, MountOutcome};
pub use domain::traits::{CodeScope, EntryType, HostApplication, Mountable};
pub use infrastructure::config::Config;
