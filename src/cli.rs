use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (default: `$XDG_CONFIG_HOME/steiner/config.kdl`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Path to the session store (default: under the user data directory).
    #[arg(long)]
    pub session: Option<PathBuf>,
    #[command(subcommand)]
    pub subcommand: Option<Sub>,
}

#[derive(Subcommand)]
pub enum Sub {
    /// Validate the config file.
    Validate,
}
