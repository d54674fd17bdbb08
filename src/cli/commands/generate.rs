//! Generate command implementation

use crate::cli::utils;
use crate::{InterfaceGenerator, MergeOptions};
use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

pub fn command() -> Command {
    Command::new("generate")
        .about("Generate interface declarations from Go source files")
        .arg(
            clap::Arg::new("paths")
                .help("Go files or directories to scan")
                .value_name("PATH")
                .num_args(0..),
        )
        .arg(
            clap::Arg::new("config")
                .short('c')
                .long("config")
                .help("Configuration file path")
                .value_name("FILE"),
        )
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file (stdout when omitted)")
                .value_name("FILE"),
        )
        .arg(
            clap::Arg::new("comment")
                .long("comment")
                .help("Comment placed at the top of the generated file")
                .value_name("TEXT"),
        )
        .arg(
            clap::Arg::new("suffix")
                .long("suffix")
                .help("Suffix appended to each type name to form the interface name")
                .value_name("NAME"),
        )
        .arg(
            clap::Arg::new("iface-comment")
                .long("iface-comment")
                .help("Comment prefixed onto every generated interface's documentation")
                .value_name("TEXT"),
        )
        .arg(
            clap::Arg::new("package")
                .long("package")
                .help("Package name override (accepted but ignored; recomputed from input)")
                .value_name("NAME"),
        )
        .arg(
            clap::Arg::new("copy-docs")
                .long("copy-docs")
                .help("Copy original type documentation into the generated docs")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let mut config = utils::load_config(matches)?;

    if let Some(comment) = matches.get_one::<String>("comment") {
        config.generate.comment = comment.clone();
    }
    if let Some(suffix) = matches.get_one::<String>("suffix") {
        config.generate.interface_suffix = suffix.clone();
    }
    if let Some(iface_comment) = matches.get_one::<String>("iface-comment") {
        config.generate.interface_comment = iface_comment.clone();
    }
    if matches.get_flag("copy-docs") {
        config.generate.copy_docs = true;
    }
    if let Some(output) = matches.get_one::<String>("output") {
        config.output = Some(PathBuf::from(output));
    }
    config.validate()?;

    let inputs: Vec<PathBuf> = match matches.get_many::<String>("paths") {
        Some(paths) => paths.map(PathBuf::from).collect(),
        None => config.sources.clone(),
    };
    if inputs.is_empty() {
        return Err(anyhow!(
            "no input files; pass paths on the command line or list sources in the configuration"
        ));
    }

    let options = MergeOptions {
        comment: config.generate.comment.clone(),
        package: matches.get_one::<String>("package").cloned(),
        suffix: config.generate.interface_suffix.clone(),
        iface_comment: config.generate.interface_comment.clone(),
        copy_type_docs: config.generate.copy_docs,
    };

    let generator = InterfaceGenerator::new(options);
    let output = generator.generate(&inputs).await?;

    if output.is_empty() {
        info!("no exported methods found");
        println!("No exported methods found; nothing generated.");
        return Ok(());
    }

    match &config.output {
        Some(path) => {
            tokio::fs::write(path, &output).await?;
            println!("Generated interfaces written to {}", path.display());
        }
        None => print!("{}", String::from_utf8_lossy(&output)),
    }

    Ok(())
}
