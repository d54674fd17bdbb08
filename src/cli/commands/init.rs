//! Init command implementation

use crate::Config;
use anyhow::Result;
use clap::{ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

pub fn command() -> Command {
    Command::new("init")
        .about("Initialize a new configuration file")
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file path")
                .value_name("FILE")
                .default_value(".ifacegen.yaml"),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let output_path = PathBuf::from(matches.get_one::<String>("output").unwrap());

    info!("Initializing configuration file: {:?}", output_path);

    Config::default().save_to_file(&output_path)?;

    println!("Configuration file created: {}", output_path.display());
    println!("Add sources and generation settings to get started.");

    Ok(())
}
