//! Generate router configuration implementing RPKI origin validation from a
//! validator's JSON export.
//!
//! The pipeline is linear: read the export ([`source`]), load and
//! de-duplicate VRPs and aggregate the space they cover ([`processing`]),
//! then write the community lists, prefix-lists and route-map ([`output`]).

pub mod args;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;
pub mod source;

use std::error::Error;

pub use args::Args;
pub use error::VrpError;
pub use processing::{build_rpki_ov, load_vrp_list, RpkiOv};
pub use source::{read_validator_export, CacheSource, ValidatorExport};

/// Load the VRPs of an export and build the route-map data from them.
pub fn rpki_ov_from_export(export: &ValidatorExport) -> RpkiOv {
    let loaded = load_vrp_list(export);
    if !loaded.rejected.is_empty() {
        log::warn!(
            "Skipped {} malformed ROA records",
            loaded.rejected.len()
        );
    }
    build_rpki_ov(loaded.vrps)
}

/// Read the configured cache and print the configuration to stdout.
pub async fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let source = CacheSource::new(&args.cache);
    let export = read_validator_export(&source).await?;
    let rpki_ov = rpki_ov_from_export(&export);
    output::print_route_map(&rpki_ov)?;
    Ok(())
}
