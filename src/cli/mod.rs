//! CLI command implementations

use anyhow::Result;
use clap::{ArgMatches, Command};

pub mod commands;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Create the CLI application
    pub fn app() -> Command {
        Command::new("ifacegen")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Generate Go interface declarations from struct method sets")
            .subcommand(commands::init::command())
            .subcommand(commands::generate::command())
    }

    /// Run the CLI application
    pub async fn run(matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("init", sub_matches)) => commands::init::run(sub_matches).await,
            Some(("generate", sub_matches)) => commands::generate::run(sub_matches).await,
            _ => {
                // No subcommand provided, show help
                let _ = Self::app().print_help();
                Ok(())
            }
        }
    }
}

/// Common CLI utilities
pub mod utils {
    use std::path::PathBuf;

    use anyhow::Result;

    /// Load configuration from `--config`, a default config file, or fall
    /// back to built-in defaults when no file exists.
    pub fn load_config(matches: &clap::ArgMatches) -> Result<crate::Config> {
        if let Some(config_path) = matches.get_one::<String>("config") {
            return crate::Config::from_file(&PathBuf::from(config_path));
        }

        let default_paths = [
            PathBuf::from(".ifacegen.yaml"),
            PathBuf::from(".ifacegen.yml"),
            PathBuf::from("ifacegen.yaml"),
        ];

        for path in &default_paths {
            if path.exists() {
                return crate::Config::from_file(path);
            }
        }

        Ok(crate::Config::default())
    }
}
