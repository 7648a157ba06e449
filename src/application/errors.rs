//! Application layer errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors that end startup. Mod problems never become one of these.
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Host error: {0}")]
    Host(#[from] HostError),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to write config '{path}': {reason}")]
    Write { path: PathBuf, reason: String },
}

/// Log file setup errors
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Failed to rotate log '{path}': {source}")]
    Rotate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open log '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid log filter '{0}'")]
    Filter(String),
}

/// Bundle archive errors
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Entry '{0}' has an unsafe path")]
    UnsafePath(String),
}

/// Code scope extension errors
#[derive(Error, Debug)]
pub enum ScopeError {
    #[error("Bundle not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to unpack bundle: {0}")]
    Archive(#[from] ArchiveError),

    #[error("Failed to open library '{path}': {source}")]
    Library {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },
}

/// Entry point resolution errors
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Entry type '{0}' not found in code scope")]
    NotFound(String),
}

/// Manifest parsing errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ManifestError {
    #[error("Manifest does not declare 'Main-Class'")]
    MissingEntryPoint,
}

/// Mount hook errors
#[derive(Error, Debug)]
pub enum MountError {
    #[error("mount hook panicked: {0}")]
    Panicked(String),

    #[error("{0}")]
    Failed(String),
}

/// Host handoff errors
#[derive(Error, Debug)]
pub enum HostError {
    #[error("Failed to start host '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Host '{0}' was terminated by a signal")]
    Terminated(String),
}
