use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

mod cli;
mod compiler;
mod layout;
mod session;
mod shell;
#[cfg(test)]
mod tests;
mod utils;

use crate::cli::{Cli, Sub};
use crate::session::FileStore;
use crate::shell::{repl, Shell};

fn main() -> ExitCode {
    let directives = std::env::var("RUST_LOG").unwrap_or_default();
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives);
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(env_filter)
        .init();

    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(default_config_path);

    if let Some(Sub::Validate) = cli.subcommand {
        let Some(path) = config_path else {
            eprintln!("No config file path available.");
            return ExitCode::FAILURE;
        };
        match steiner_config::Config::load(&path) {
            Ok(_) => {
                println!("Config is valid.");
                return ExitCode::SUCCESS;
            }
            Err(err) => {
                eprintln!("{err:?}");
                return ExitCode::FAILURE;
            }
        }
    }

    let config = match config_path {
        Some(path) if path.exists() => match steiner_config::Config::load(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Error loading config:");
                eprintln!("{err:?}");
                return ExitCode::FAILURE;
            }
        },
        _ => {
            debug!("no config file found, using the defaults");
            steiner_config::Config::default()
        }
    };

    match run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, config: steiner_config::Config) -> anyhow::Result<()> {
    let store_path = cli
        .session
        .or_else(FileStore::default_path)
        .context("could not determine a session store path")?;

    let mut shell = Shell::new(config, FileStore::load(store_path));
    shell.restore_session();

    repl::run(&mut shell)?;

    if let Err(err) = shell.save_session() {
        warn!("error saving session: {err:#}");
    }

    Ok(())
}

fn default_config_path() -> Option<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "steiner")?;
    Some(dirs.config_dir().join("config.kdl"))
}
