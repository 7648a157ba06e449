//! Host application handoff

use std::process::Command;

use crate::application::errors::HostError;
use crate::domain::traits::HostApplication;
use crate::infrastructure::config::HostConfig;

/// Runs the configured host program as a child process.
///
/// Mods are mounted into the bootstrap process, not into the child, so a
/// native mod cannot reach into this host's memory. Use it for hosts that
/// only need what mods leave behind on disk; hosts that mods must patch in
/// memory embed the bootstrap and call `launch_with` with their own
/// [`HostApplication`].
#[derive(Debug, Clone)]
pub struct CommandHost {
    program: String,
    args: Vec<String>,
}

impl CommandHost {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// The command line the host will be started with
    pub fn command_line(&self, args: &[String]) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .chain(args.iter().cloned())
            .collect()
    }
}

impl HostApplication for CommandHost {
    fn launch(&self, args: &[String]) -> Result<i32, HostError> {
        tracing::info!("Starting host '{}'", self.program);
        let mut line = self.command_line(args).into_iter();
        let status = Command::new(line.next().unwrap_or_default())
            .args(line)
            .status()
            .map_err(|source| HostError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        status
            .code()
            .ok_or_else(|| HostError::Terminated(self.program.clone()))
    }
}

/// Used when no host program is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHost;

impl HostApplication for NoHost {
    fn launch(&self, args: &[String]) -> Result<i32, HostError> {
        tracing::info!("No host configured, {} argument(s) not forwarded", args.len());
        Ok(0)
    }
}

/// Build the host described by the config
pub fn from_config(config: &HostConfig) -> Box<dyn HostApplication> {
    match &config.program {
        Some(program) => Box::new(CommandHost::new(program.clone()).with_args(config.args.clone())),
        None => Box::new(NoHost),
    }
}
