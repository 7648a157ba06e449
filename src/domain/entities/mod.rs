//! Domain entities - Core startup objects with no external dependencies

pub mod bundle;
pub mod loaded_mod;
pub mod manifest;

pub use bundle::{BundleCandidate, DisabledSet, BUNDLE_EXTENSION};
pub use loaded_mod::{LoadedMod, ModTable, MountOutcome};
pub use manifest::ManifestRecord;
