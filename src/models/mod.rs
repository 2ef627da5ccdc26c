//! Domain models for RPKI origin validation.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Ipv4Net`] - IPv4 prefix with CIDR arithmetic
//! - [`Vrp`] - Validated ROA payload
//! - [`Origin`] and [`OriginList`] - VRPs grouped by origin ASN

mod ipv4;
mod origin;
mod vrp;

// Re-export public types
pub use ipv4::{block_size, cut_addr, get_cidr_mask, ip_after_subnet, Ipv4Net, MAX_LENGTH};
pub use origin::{Origin, OriginList};
pub use vrp::{Vrp, AS0};
