//! Application services - Mod pipeline stages and their orchestration

pub mod bootstrap;
pub mod launcher;
pub mod manifest_parser;
pub mod mount_invoker;
pub mod resolver;
pub mod scanner;

pub use bootstrap::{inventory, Bootstrap, BootstrapReport, BundleInfo, BundleIssue, Stage};
pub use launcher::{launch, launch_with};
pub use resolver::EntryResolver;
