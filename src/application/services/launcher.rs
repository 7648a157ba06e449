//! Process startup: config, logging, mods, then the host

use std::path::Path;

use tracing::Dispatch;

use crate::application::errors::BootstrapError;
use crate::application::services::Bootstrap;
use crate::domain::traits::{CodeScope, HostApplication};
use crate::infrastructure::config::Config;
use crate::infrastructure::scope::NativeScope;
use crate::infrastructure::{host, logging};

/// Load the base config and resolve its paths against `work_dir`.
/// Failing here is the only fatal startup error.
pub fn load_config(config_path: &Path, work_dir: &Path) -> Result<Config, BootstrapError> {
    let config = Config::load(work_dir.join(config_path))?;
    Ok(config.rooted_at(work_dir))
}

/// Log sink for the run. Falls back to stderr when the log file is unusable.
pub fn log_sink(config: &Config) -> Dispatch {
    match logging::init(&config.logging) {
        Ok(dispatch) => dispatch,
        Err(e) => {
            let dispatch = Dispatch::new(
                tracing_subscriber::fmt()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .finish(),
            );
            tracing::dispatcher::with_default(&dispatch, || {
                tracing::warn!("Logging to stderr only: {}", e);
            });
            dispatch
        }
    }
}

/// Run the mod pipeline with `scope`, then hand `args` to `host`.
///
/// The host runs however many mods failed; the scope lives until it exits.
pub fn launch_with<S: CodeScope>(
    config: &Config,
    scope: S,
    host: &dyn HostApplication,
    args: &[String],
) -> Result<i32, BootstrapError> {
    let mut bootstrap = Bootstrap::new(scope, &config.modloader.directory, config.disabled_mods())
        .with_sorted_bundles(config.modloader.sort_bundles);
    let report = bootstrap.run();
    tracing::debug!("Bootstrap report: {:?}", report);

    let code = host.launch(args)?;
    drop(bootstrap);
    Ok(code)
}

/// Full startup from a config file in `work_dir`, loading native mods
pub fn launch(config_path: &Path, work_dir: &Path, args: &[String]) -> Result<i32, BootstrapError> {
    let config = load_config(config_path, work_dir)?;
    let dispatch = log_sink(&config);

    tracing::dispatcher::with_default(&dispatch, || {
        tracing::info!("Starting bootstrap in '{}'", work_dir.display());
        let scope = NativeScope::new(&config.modloader.staging_dir);
        let host = host::from_config(&config.host);
        launch_with(&config, scope, host.as_ref(), args)
    })
}
