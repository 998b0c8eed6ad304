#[macro_use] extern crate log;

pub mod batch;
pub mod cli;
pub mod config;
pub mod copy;
pub mod error;
pub mod metadata;
pub mod package;
pub mod sanitize;
pub mod util;
pub mod workshop;

pub use crate::batch::{install_mods, list_mod_names, plan_mods, BatchOptions, BatchReport, OnError};
pub use crate::config::Config;
pub use crate::copy::copy_mod;
pub use crate::error::{ConfigError, CopyError, ExtractError, ModError, WorkshopError};
pub use crate::metadata::{extract_name, extract_name_with, NameMatch};
pub use crate::package::{Package, PackageRead};
pub use crate::sanitize::sanitize;
pub use crate::workshop::{enumerate_workshop_mods, ModLayout};
