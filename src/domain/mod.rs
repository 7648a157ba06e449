//! Domain layer - Core startup model with no external dependencies
//!
//! This layer contains:
//! - Entities: Bundles, manifests, loaded mods and mount outcomes
//! - Traits: Abstractions for infrastructure (CodeScope, HostApplication)

pub mod entities;
pub mod traits;
