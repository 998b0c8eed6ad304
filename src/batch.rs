use rayon::prelude::*;
use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::copy::copy_mod;
use crate::error::{ExtractError, ModError};
use crate::metadata::NameMatch;
use crate::package::read_mod_name;
use crate::sanitize::{destination_file_name, sanitize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnError {
    #[default]
    Skip,
    Abort,
}

#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub on_error: OnError,
    pub dry_run: bool,
    pub name_match: NameMatch,
    pub filter: Option<Regex>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModPlan {
    pub source: PathBuf,
    pub raw_name: String,
    pub sanitized_name: String,
    pub destination: PathBuf,
}

#[derive(Debug)]
pub enum Outcome {
    Copied(ModPlan),
    Planned(ModPlan),
    /// Name did not match the filter.
    Skipped(ModPlan),
    Failed(ModError),
}

/// Packages whose destinations differ at most in letter case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    /// As named by the first source.
    pub destination: PathBuf,
    /// In copy order, the last one ends up at the destination.
    pub sources: Vec<PathBuf>,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<Outcome>,
    pub collisions: Vec<Collision>,
}

impl BatchReport {
    pub fn copied(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Copied(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped(_)))
    }

    pub fn failures(&self) -> impl Iterator<Item = &ModError> {
        self.outcomes.iter().filter_map(|o| match o {
            Outcome::Failed(e) => Some(e),
            _ => None,
        })
    }

    fn count(&self, f: impl Fn(&Outcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| f(o)).count()
    }
}

pub fn list_mod_names(
    paths: &[PathBuf],
    policy: NameMatch,
) -> Vec<(PathBuf, Result<String, ExtractError>)> {
    paths
        .par_iter()
        .map(|path| (path.clone(), read_mod_name(path, policy)))
        .collect()
}

pub fn plan_mods(
    paths: &[PathBuf],
    mods_dir: &Path,
    policy: NameMatch,
) -> Vec<Result<ModPlan, ModError>> {
    list_mod_names(paths, policy)
        .into_iter()
        .map(|(source, name)| match name {
            Ok(raw_name) => {
                let sanitized_name = sanitize(&raw_name);
                let destination = mods_dir.join(destination_file_name(&sanitized_name));
                Ok(ModPlan {
                    source,
                    raw_name,
                    sanitized_name,
                    destination,
                })
            }
            Err(source_err) => Err(ModError::Extract {
                path: source,
                source: source_err,
            }),
        })
        .collect()
}

/// Copies every package in `paths` into `mods_dir` under its sanitized name.
///
/// Names are read in parallel, copies happen one at a time in the order of
/// `paths`, so when two packages share a destination the later one wins.
pub fn install_mods(
    paths: &[PathBuf],
    mods_dir: &Path,
    options: &BatchOptions,
) -> Result<BatchReport, ModError> {
    let mut report = BatchReport::default();
    // keyed case-insensitively, `Mod.pak` and `mod.pak` are one file on Windows
    let mut destinations: HashMap<String, Collision> = HashMap::new();

    for planned in plan_mods(paths, mods_dir, options.name_match) {
        let plan = match planned {
            Ok(plan) => plan,
            Err(e) => {
                fail(&mut report, e, options.on_error)?;
                continue;
            }
        };

        if !is_included(&plan.raw_name, &options.filter) {
            debug!("'{}' does not match the query", plan.raw_name);
            report.outcomes.push(Outcome::Skipped(plan));
            continue;
        }

        if plan.sanitized_name.is_empty() {
            warn!(
                "'{}' has no usable name, it is copied as '{}'",
                plan.source.display(),
                plan.destination.display()
            );
        }
        destinations
            .entry(plan.sanitized_name.to_lowercase())
            .or_insert_with(|| Collision {
                destination: plan.destination.clone(),
                sources: Vec::new(),
            })
            .sources
            .push(plan.source.clone());

        if options.dry_run {
            debug!("{} -> {}", plan.source.display(), plan.destination.display());
            report.outcomes.push(Outcome::Planned(plan));
            continue;
        }

        match copy_mod(&plan.source, mods_dir, &plan.sanitized_name) {
            Ok(_) => {
                debug!("{} -> {}", plan.source.display(), plan.destination.display());
                report.outcomes.push(Outcome::Copied(plan));
            }
            Err(source) => {
                let e = ModError::Copy {
                    path: plan.source,
                    source,
                };
                fail(&mut report, e, options.on_error)?;
            }
        }
    }

    report.collisions = collisions(destinations);
    for collision in &report.collisions {
        warn!(
            "{} packages share '{}', kept '{}'",
            collision.sources.len(),
            collision.destination.display(),
            collision
                .sources
                .last()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        );
    }
    Ok(report)
}

fn fail(report: &mut BatchReport, e: ModError, on_error: OnError) -> Result<(), ModError> {
    match on_error {
        OnError::Abort => Err(e),
        OnError::Skip => {
            error!("{}", e);
            report.outcomes.push(Outcome::Failed(e));
            Ok(())
        }
    }
}

pub fn is_included(name: &str, filter: &Option<Regex>) -> bool {
    filter.as_ref().map(|re| re.is_match(name)).unwrap_or(true)
}

fn collisions(destinations: HashMap<String, Collision>) -> Vec<Collision> {
    let mut collisions: Vec<Collision> = destinations
        .into_values()
        .filter(|collision| collision.sources.len() > 1)
        .collect();
    collisions.sort_by(|a, b| a.destination.cmp(&b.destination));
    collisions
}
