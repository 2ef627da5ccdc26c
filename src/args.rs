//! Command line arguments.

use crate::config::{CACHE_ENV, DEFAULT_CACHE};
use clap::{ArgAction, Parser};

/// Generate an RPKI origin validation route-map from a validator export.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, disable_version_flag = true)]
pub struct Args {
    /// Location of the RPKI cache in JSON format, a URL or a local file
    #[arg(short = 'c', long = "cache", env = CACHE_ENV, default_value = DEFAULT_CACHE)]
    pub cache: String,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version, value_parser = clap::value_parser!(bool))]
    version: (),
}
