use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use mod_bootstrap::application::services::{inventory, launcher};
use mod_bootstrap::infrastructure::config::{Config, DEFAULT_CONFIG_FILE};

#[derive(Parser)]
#[command(name = "mod-bootstrap")]
#[command(about = "Loads code mods, then starts the host application", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path, relative to the working directory
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Working directory the mods directory and log live in
    #[arg(short = 'C', long, default_value = ".")]
    dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and mount mods, then start the host
    Run {
        /// Arguments passed through to the host unchanged
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Show the bundles that would be loaded, without loading them
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Generate default config
    InitConfig,
    /// Show version
    Version,
}

fn main() {
    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Run { args } => run(&cli.config, &cli.dir, &args),
        Commands::List { json } => list(&cli.config, &cli.dir, json),
        Commands::InitConfig => init_config(&cli.dir.join(&cli.config)),
        Commands::Version => {
            println!("mod-bootstrap v{}", env!("CARGO_PKG_VERSION"));
            0
        }
    };
    std::process::exit(code);
}

fn run(config: &Path, dir: &Path, args: &[String]) -> i32 {
    match launcher::launch(config, dir, args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("mod-bootstrap: {}", e);
            1
        }
    }
}

fn list(config: &Path, dir: &Path, json: bool) -> i32 {
    // Logging for diagnostics only; the log file belongs to `run`
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let config = match launcher::load_config(config, dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("mod-bootstrap: {}", e);
            return 1;
        }
    };

    let bundles = inventory(
        &config.modloader.directory,
        &config.disabled_mods(),
        config.modloader.sort_bundles,
    );

    if json {
        match serde_json::to_string_pretty(&bundles) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("mod-bootstrap: {}", e);
                return 1;
            }
        }
        return 0;
    }

    if bundles.is_empty() {
        println!("No mods in {}", config.modloader.directory.display());
        return 0;
    }
    for bundle in &bundles {
        let status = if bundle.disabled {
            "disabled".to_string()
        } else if let Some(problem) = &bundle.problem {
            format!("rejected: {}", problem)
        } else {
            "ok".to_string()
        };
        match &bundle.manifest {
            Some(m) => println!(
                "{}  {} ({})  [{}]",
                bundle.file_name, m.display_name, m.entry_point_id, status
            ),
            None => println!("{}  [{}]", bundle.file_name, status),
        }
    }
    0
}

fn init_config(path: &Path) -> i32 {
    if path.exists() {
        eprintln!("{} already exists", path.display());
        return 1;
    }
    match Config::default().save(path) {
        Ok(()) => {
            println!("Created {}", path.display());
            0
        }
        Err(e) => {
            eprintln!("mod-bootstrap: {}", e);
            1
        }
    }
}
