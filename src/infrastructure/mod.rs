//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Logging: Log rotation and the diagnostic sink
//! - Archive: Reading bundle archives
//! - Scope: Code scopes entry types are resolved from
//! - Host: Handoff to the host application

pub mod archive;
pub mod config;
pub mod host;
pub mod logging;
pub mod scope;
