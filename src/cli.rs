use clap::{App, Arg, ArgMatches};
use regex::Regex;
use std::path::PathBuf;

use crate::batch::{BatchOptions, BatchReport, OnError};
use crate::config::{default_config_path, Config};
use crate::error::ConfigError;
use crate::metadata::NameMatch;
use crate::workshop::ModLayout;

pub fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("modpak")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Copies workshop mods into the game's mods folder, named after the mod")
        .arg(
            Arg::with_name("game")
                .short("g")
                .long("game")
                .value_name("DIRECTORY")
                .help("Game installation directory inside a Steam library")
                .conflicts_with_all(&["workshop", "mods"])
                .takes_value(true),
        )
        .arg(
            Arg::with_name("workshop")
                .short("w")
                .long("workshop")
                .value_name("DIRECTORY")
                .help("Workshop content directory to read packages from")
                .requires("mods")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("mods")
                .short("m")
                .long("mods")
                .value_name("DIRECTORY")
                .help("Mods directory to copy packages into")
                .requires("workshop")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .help("Config file used when no directories are given [default: config.json next to the executable]")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("query")
                .short("q")
                .long("query")
                .value_name("REGEX")
                .help("Only handle mods whose name matches")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("list")
                .short("l")
                .long("list")
                .help("Print the name of every mod and exit")
                .conflicts_with_all(&["strict", "dry-run"]),
        )
        .arg(
            Arg::with_name("dry-run")
                .short("n")
                .long("dry-run")
                .help("Show where mods would be copied without copying"),
        )
        .arg(
            Arg::with_name("strict")
                .long("strict")
                .help("Stop at the first mod that fails"),
        )
        .arg(
            Arg::with_name("first-name")
                .long("first-name")
                .help("Use the first name field of the metadata instead of the last"),
        )
        .arg(
            Arg::with_name("v")
                .short("v")
                .multiple(true)
                .help("Sets the level of verbosity"),
        )
}

/// `-w`/`-m` win over `-g`, which wins over the config file.
pub fn resolve_layout(matches: &ArgMatches) -> Result<ModLayout, ConfigError> {
    if let (Some(workshop), Some(mods)) = (matches.value_of("workshop"), matches.value_of("mods")) {
        return Ok(ModLayout::new(workshop, mods));
    }
    if let Some(game) = matches.value_of("game") {
        return Ok(ModLayout::from_game_dir(game));
    }

    let config_path = match matches.value_of("config") {
        Some(path) => PathBuf::from(path),
        None => default_config_path()?,
    };
    let config = Config::load(&config_path)?;
    Ok(ModLayout::from_game_dir(&config.game_dir))
}

pub fn name_match(matches: &ArgMatches) -> NameMatch {
    if matches.is_present("first-name") {
        NameMatch::First
    } else {
        NameMatch::Last
    }
}

pub fn batch_options(matches: &ArgMatches, filter: Option<Regex>) -> BatchOptions {
    BatchOptions {
        on_error: if matches.is_present("strict") {
            OnError::Abort
        } else {
            OnError::Skip
        },
        dry_run: matches.is_present("dry-run"),
        name_match: name_match(matches),
        filter,
    }
}

pub fn exit_code(report: &BatchReport) -> i32 {
    if report.failed() > 0 {
        1
    } else {
        0
    }
}
