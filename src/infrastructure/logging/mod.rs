//! Diagnostic log sink
//!
//! The previous run's log is kept as `old-<file>`; the current run writes a
//! fresh file plus a compact copy on stderr. The sink is handed back as a
//! [`Dispatch`] so callers decide where it is active.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Local;
use tracing::{Dispatch, Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

use crate::application::errors::LoggingError;
use crate::infrastructure::config::LoggingConfig;

/// Log file line layout: `2024/05/01/13:45:10 target[LEVEL]\tmessage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFileFormat;

impl<S, N> FormatEvent<S, N> for LogFileFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        write!(
            writer,
            "{} {}[{}]\t",
            Local::now().format("%Y/%m/%d/%H:%M:%S"),
            meta.target(),
            meta.level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Path the previous run's log is moved to
pub fn rotated_path(log_file: &Path) -> PathBuf {
    let name = log_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    log_file.with_file_name(format!("old-{}", name))
}

/// Move `<file>` to `old-<file>`, discarding the older one
pub fn rotate(log_file: &Path) -> Result<(), LoggingError> {
    let old = rotated_path(log_file);
    if old.exists() {
        fs::remove_file(&old).map_err(|source| LoggingError::Rotate { path: old.clone(), source })?;
    }
    if log_file.exists() {
        fs::rename(log_file, &old).map_err(|source| LoggingError::Rotate {
            path: log_file.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

fn filter(level: &str) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level).map_err(|_| LoggingError::Filter(level.to_string())),
    }
}

/// Rotate the old log and build the process-wide sink
pub fn init(config: &LoggingConfig) -> Result<Dispatch, LoggingError> {
    if let Some(parent) = config.file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| LoggingError::Open {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    rotate(&config.file)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)
        .map_err(|source| LoggingError::Open {
            path: config.file.clone(),
            source,
        })?;

    let subscriber = tracing_subscriber::registry()
        .with(filter(&config.level)?)
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(LogFileFormat)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        );

    Ok(Dispatch::new(subscriber))
}
