//! This module handles the initial setup of the application.
use super::args::AppArgs;
use anyhow::{Context, Result};
use streamlog::config::BackendConfig;
use streamlog::logging::registry;
use tracing_subscriber::EnvFilter;

/// Everything the demo needs once setup has finished.
pub struct PreparedApp {
    /// The configuration the backend was installed with.
    pub config: BackendConfig,
}

/// Prepares the application for running.
///
/// This function performs the following steps:
/// 1. Configures diagnostics on stderr.
/// 2. Loads the backend configuration and applies command-line overrides.
/// 3. Installs the console and file loggers into the global registry.
/// 4. Prints a start banner.
///
/// # Errors
///
/// This function will return an error if the config file cannot be loaded or
/// the log file cannot be opened.
pub fn prepare(args: AppArgs) -> Result<PreparedApp> {
    configure_logging();

    let config = load_config(&args)?;
    config
        .install(registry::global())
        .context("failed to install logging backend")?;

    print_start_banner(&config);

    Ok(PreparedApp { config })
}

/// Configures `tracing` diagnostics, honouring `RUST_LOG`.
fn configure_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Reads the config file, if any, then layers the command-line flags on top.
fn load_config(args: &AppArgs) -> Result<BackendConfig> {
    let mut config = match &args.config {
        Some(path) => BackendConfig::from_json_file(path)?,
        None => BackendConfig::default(),
    };

    if let Some(logfile) = &args.logfile {
        config.logfile = logfile.clone();
    }
    if let Some(app_name) = &args.app_name {
        config.app_name = Some(app_name.clone());
    }
    if let Some(level) = args.level {
        config.screen_level = level;
        config.file_level = level;
    }
    config.truncate |= args.truncate;

    Ok(config)
}

/// Prints a banner with startup information.
fn print_start_banner(config: &BackendConfig) {
    println!("Starting streamlog demo");
    println!("Log file: {}", config.logfile.display());
    println!(
        "Levels: screen={} file={}",
        config.screen_level, config.file_level
    );
    println!();
}
