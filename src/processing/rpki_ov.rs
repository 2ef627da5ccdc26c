//! Assembly of the data the route-map is generated from.

use super::aggregate;
use crate::models::{Ipv4Net, OriginList, Vrp};
use std::collections::HashSet;

/// Everything the configuration output is rendered from.
#[derive(Debug)]
pub struct RpkiOv {
    /// De-duplicated VRPs.
    pub vrps: Vec<Vrp>,
    /// Match clauses grouped by origin, in first-seen order.
    pub origins: OriginList,
    /// Aggregated address space covered by any VRP, AS0 included.
    pub covered_space: Vec<Ipv4Net>,
}

/// Group VRPs by origin and aggregate the space they cover.
pub fn build_rpki_ov(vrps: Vec<Vrp>) -> RpkiOv {
    let origins: OriginList = vrps.iter().collect();
    let covered: HashSet<Ipv4Net> = vrps.iter().map(|vrp| vrp.prefix).collect();
    let covered_space = aggregate(covered);

    log::info!(
        "Built route-map data: {} VRPs, {} origins ({} routable), {} covered-space blocks",
        vrps.len(),
        origins.len(),
        origins.routable().count(),
        covered_space.len()
    );

    RpkiOv {
        vrps,
        origins,
        covered_space,
    }
}
