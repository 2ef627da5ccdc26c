//! Validated ROA Payload model.

use super::Ipv4Net;
use std::fmt;

/// Origin value marking address space that no AS may originate.
pub const AS0: u32 = 0;

/// A validated ROA payload: `origin` may announce `prefix` and any more
/// specific prefix of it up to `max_length`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vrp {
    /// Announced prefix, normalized to its network address.
    pub prefix: Ipv4Net,
    /// Longest prefix length the origin may announce within `prefix`.
    pub max_length: u8,
    /// Authorized origin ASN.
    pub origin: u32,
}

impl Vrp {
    pub fn prefix_len(&self) -> u8 {
        self.prefix.mask()
    }

    /// Prefix-list match clause: the bare prefix for an exact match,
    /// `<prefix> le <max_length>` otherwise.
    pub fn match_clause(&self) -> String {
        if self.prefix_len() == self.max_length {
            self.prefix.to_string()
        } else {
            format!("{} le {}", self.prefix, self.max_length)
        }
    }

    pub fn is_as0(&self) -> bool {
        self.origin == AS0
    }
}

impl fmt::Display for Vrp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} => AS{}", self.prefix, self.max_length, self.origin)
    }
}
