use clap::{
    crate_authors, crate_description, crate_name, crate_version, value_parser, Arg, ArgAction,
    Command,
};
use colored::Colorize;
use patchgen::{api::Outcome, Config};
use std::path::PathBuf;

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("directory")
                .help("Folder to scan for assets; prompts for one when omitted")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Manifest file to write (default: P000.json or the config's output_file)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("TOML file overriding the virtual root, extensions, devOnly or output file")
                .value_parser(value_parser!(PathBuf)),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => Config::from_file(path).map_err(patchgen::PatchgenError::from)?,
        None => Config::default(),
    };

    let output = matches
        .get_one::<PathBuf>("output")
        .cloned()
        .unwrap_or_else(|| config.output_file.clone());

    let input = matches.get_one::<PathBuf>("directory").cloned();

    match patchgen::run(input, &config, &output)? {
        Outcome::Written { path, entries } => {
            println!("{} {}", "create".green(), path.display());
            println!("Manifest created with {} conflict paths.", entries);
        }
        Outcome::NoInputSelected => {
            println!("No folder selected. Exiting.");
        }
    }

    Ok(())
}
