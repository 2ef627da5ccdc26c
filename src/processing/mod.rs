//! VRP processing logic.
//!
//! This module contains the business logic between the export and the output:
//! - [`loader`] - Loading and de-duplication of VRP records
//! - [`aggregate`] - Minimal covering set of IPv4 prefixes
//! - [`rpki_ov`] - Grouping by origin and covered-space assembly

mod aggregate;
mod loader;
mod rpki_ov;

// Re-export public functions
pub use aggregate::aggregate;
pub use loader::{load_vrp_list, parse_asn, parse_roa, LoadedVrps, RejectedRoa};
pub use rpki_ov::{build_rpki_ov, RpkiOv};
