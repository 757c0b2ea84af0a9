use streamlog::logging::Level;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "streamlog")]
#[command(about = "Redirects output streams into a console and a log file")]
pub struct AppArgs {
    #[arg(long, help = "JSON config file for the logging backend")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Log file path (overrides the config file)")]
    pub logfile: Option<PathBuf>,

    #[arg(long = "app-name", help = "Name printed on every log line")]
    pub app_name: Option<String>,

    #[arg(long, help = "Minimum level for both loggers: trace, debug, info, warn, error")]
    pub level: Option<Level>,

    #[arg(long, help = "Truncate the log file instead of appending")]
    pub truncate: bool,
}

impl AppArgs {
    pub fn from_cli() -> Self {
        <Self as Parser>::parse()
    }
}
