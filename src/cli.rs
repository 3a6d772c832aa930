use clap::Parser;
use std::path::PathBuf;

/// Student Command Center: task splitting, todos, ideas, notes and expenses
/// in one local web app.
#[derive(Debug, Parser)]
#[command(name = "command-center", version, about)]
pub struct Cli {
    /// Config file (TOML). Defaults to the user config directory.
    #[arg(long, env = "COMMAND_CENTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long)]
    pub bind: Option<String>,

    /// Port to listen on
    #[arg(long)]
    pub port: Option<u16>,

    /// Log at debug level regardless of config
    #[arg(long)]
    pub debug: bool,
}
