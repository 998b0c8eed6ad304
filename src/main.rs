#[macro_use]
extern crate log;
extern crate simplelog;
use regex::Regex;
use simplelog::{ColorChoice, CombinedLogger, LevelFilter, TermLogger, TerminalMode};
use std::process;

use modpak::batch::{is_included, Outcome};
use modpak::{cli, enumerate_workshop_mods, install_mods, list_mod_names, ConfigError};

fn main() {
    let matches = cli::app().get_matches();

    let level = match matches.occurrences_of("v") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(e) = CombinedLogger::init(vec![TermLogger::new(
        level,
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]) {
        eprintln!("Failed to set up logging: {}", e);
    }

    let layout = match cli::resolve_layout(&matches) {
        Ok(layout) => layout,
        Err(ConfigError::Created(path)) => {
            error!(
                "Created an empty config at '{}'. Set 'game_dir' in it and run again.",
                path.display()
            );
            process::exit(1);
        }
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    let filter = match matches.value_of("query").map(Regex::new).transpose() {
        Ok(filter) => filter,
        Err(e) => {
            error!("Invalid query. {}", e);
            process::exit(1);
        }
    };

    let paths = match enumerate_workshop_mods(&layout.workshop_dir) {
        Ok(paths) => paths,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    let name_match = cli::name_match(&matches);

    if matches.is_present("list") {
        let mut failed = false;
        for (path, name) in list_mod_names(&paths, name_match) {
            match name {
                Ok(name) if is_included(&name, &filter) => {
                    println!("{}: {}", path.display(), name)
                }
                Ok(_) => {}
                Err(e) => {
                    error!("'{}': {}", path.display(), e);
                    failed = true;
                }
            }
        }
        process::exit(if failed { 1 } else { 0 });
    }

    let options = cli::batch_options(&matches, filter);

    let report = match install_mods(&paths, &layout.mods_dir, &options) {
        Ok(report) => report,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    for outcome in &report.outcomes {
        if let Outcome::Copied(plan) | Outcome::Planned(plan) = outcome {
            println!("{} -> {}", plan.source.display(), plan.destination.display());
        }
    }
    info!(
        "{} copied, {} skipped, {} failed",
        report.copied(),
        report.skipped(),
        report.failed()
    );
    process::exit(cli::exit_code(&report));
}
