//! Grouping of VRPs by origin ASN.

use super::{Vrp, AS0};
use std::collections::HashMap;
use std::fmt;

/// Prefix-list clauses an origin AS is authorized for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub asn: u32,
    /// Match clauses in the order their VRPs were first seen.
    pub clauses: Vec<String>,
}

impl Origin {
    /// Create a new origin from its first VRP.
    pub fn new(vrp: &Vrp) -> Origin {
        Origin {
            asn: vrp.origin,
            clauses: vec![vrp.match_clause()],
        }
    }

    /// Add the clause for another VRP of this origin, ignoring repeats.
    pub fn add_vrp(&mut self, vrp: &Vrp) {
        let clause = vrp.match_clause();
        if !self.clauses.contains(&clause) {
            self.clauses.push(clause);
        }
    }
}

/// Origins keyed by ASN, iterated in insertion order.
///
/// Route-map sequence numbers are derived from this order, so it has to be
/// the same for the same input on every run.
#[derive(Debug, Default)]
pub struct OriginList {
    origins: Vec<Origin>,
    index: HashMap<u32, usize>,
}

impl OriginList {
    /// Create a new empty OriginList.
    pub fn new() -> OriginList {
        OriginList::default()
    }

    /// Record a VRP under its origin, creating the origin on first sight.
    pub fn add_vrp(&mut self, vrp: &Vrp) {
        match self.index.get(&vrp.origin) {
            Some(&i) => self.origins[i].add_vrp(vrp),
            None => {
                self.index.insert(vrp.origin, self.origins.len());
                self.origins.push(Origin::new(vrp));
            }
        }
    }

    pub fn get(&self, asn: u32) -> Option<&Origin> {
        self.index.get(&asn).map(|&i| &self.origins[i])
    }

    /// All origins, AS0 included.
    pub fn iter(&self) -> impl Iterator<Item = &Origin> {
        self.origins.iter()
    }

    /// Origins that get a prefix-list and route-map entry, i.e. all but AS0.
    pub fn routable(&self) -> impl Iterator<Item = &Origin> {
        self.origins.iter().filter(|o| o.asn != AS0)
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }
}

impl<'a> FromIterator<&'a Vrp> for OriginList {
    fn from_iter<I: IntoIterator<Item = &'a Vrp>>(iter: I) -> Self {
        let mut origins = OriginList::new();
        for vrp in iter {
            origins.add_vrp(vrp);
        }
        origins
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AS{} [{}]", self.asn, self.clauses.join(", "))
    }
}

impl fmt::Display for OriginList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "OriginList ({} origins):", self.origins.len())?;
        for origin in &self.origins {
            writeln!(f, "  - {origin}")?;
        }
        Ok(())
    }
}
