//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Services: Scanner, manifest parser, resolver, mount invoker and the
//!   bootstrap that sequences them
//! - Errors: Domain-specific errors

pub mod errors;
pub mod services;
