//! VRP loading and de-duplication.
//!
//! Turns the raw ROA records of a validator export into typed [`Vrp`]s.

use crate::error::VrpError;
use crate::models::{Ipv4Net, Vrp, MAX_LENGTH};
use crate::source::ValidatorExport;
use colored::Colorize;
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use std::net::Ipv6Addr;

lazy_static! {
    static ref ASN_RE: Regex = Regex::new(r"^(?:AS)?(\d+)$").expect("Invalid Regex?");
}

/// A ROA record that could not be loaded.
#[derive(Debug, Clone)]
pub struct RejectedRoa {
    pub record: Value,
    pub error: VrpError,
}

/// Result of loading an export.
#[derive(Debug, Default)]
pub struct LoadedVrps {
    /// De-duplicated VRPs, in order of first appearance in the export.
    pub vrps: Vec<Vrp>,
    /// Records dropped because they were malformed.
    pub rejected: Vec<RejectedRoa>,
    /// Number of IPv6 records skipped.
    pub skipped_ipv6: usize,
}

/// Load the VRP list from a validator export.
///
/// IPv6 records are skipped silently. Malformed records are logged together
/// with the offending record and skipped, the rest of the export still loads.
/// Records that are equal by value collapse into one.
pub fn load_vrp_list(export: &ValidatorExport) -> LoadedVrps {
    let mut loaded = LoadedVrps::default();
    let mut parsed = Vec::with_capacity(export.roas.len());

    for record in &export.roas {
        match parse_roa(record) {
            Ok(Some(vrp)) => parsed.push(vrp),
            Ok(None) => loaded.skipped_ipv6 += 1,
            Err(error) => {
                log::error!(
                    "{} {}\n{}",
                    "ERROR:".on_red(),
                    error,
                    serde_json::to_string_pretty(record).unwrap_or_else(|_| record.to_string())
                );
                loaded.rejected.push(RejectedRoa {
                    record: record.clone(),
                    error,
                });
            }
        }
    }

    let parsed_count = parsed.len();
    loaded.vrps = parsed.into_iter().unique().collect();
    log::info!(
        "Loaded {} VRPs ({} duplicates, {} rejected, {} IPv6 skipped)",
        loaded.vrps.len(),
        parsed_count - loaded.vrps.len(),
        loaded.rejected.len(),
        loaded.skipped_ipv6
    );
    loaded
}

/// Parse a single ROA record. `Ok(None)` means the record is IPv6.
pub fn parse_roa(record: &Value) -> Result<Option<Vrp>, VrpError> {
    if !record.is_object() {
        return Err(VrpError::MalformedPrefix(format!("not a ROA object: {record}")));
    }
    let prefix = match parse_prefix(record.get("prefix"))? {
        Some(prefix) => prefix,
        None => return Ok(None),
    };
    let origin = parse_asn(record.get("asn"))?;
    let max_length = parse_max_length(record.get("maxLength"), prefix.mask())?;

    Ok(Some(Vrp {
        prefix,
        max_length,
        origin,
    }))
}

/// Parse an IPv4 prefix, `Ok(None)` for an IPv6 one.
fn parse_prefix(value: Option<&Value>) -> Result<Option<Ipv4Net>, VrpError> {
    let prefix = value
        .and_then(Value::as_str)
        .ok_or_else(|| VrpError::MalformedPrefix(format!("expected a string, got {value:?}")))?;
    let addr = prefix.trim().split('/').next().unwrap_or_default();
    if addr.parse::<Ipv6Addr>().is_ok() {
        return Ok(None);
    }
    prefix
        .parse::<Ipv4Net>()
        .map(Some)
        .map_err(|e| VrpError::MalformedPrefix(format!("{prefix}: {e}")))
}

/// Parse an origin ASN written as `AS<digits>`, plain digits or a JSON number.
pub fn parse_asn(value: Option<&Value>) -> Result<u32, VrpError> {
    let asn = match value {
        Some(Value::String(s)) => ASN_RE
            .captures(s.trim())
            .and_then(|c| c[1].parse::<u64>().ok())
            .ok_or_else(|| VrpError::MalformedAsn(s.to_string()))?,
        Some(Value::Number(n)) => n
            .as_u64()
            .ok_or_else(|| VrpError::MalformedAsn(n.to_string()))?,
        other => return Err(VrpError::MalformedAsn(format!("{other:?}"))),
    };
    u32::try_from(asn).map_err(|_| VrpError::MalformedAsn(format!("{asn} is out of range")))
}

/// Parse `maxLength`, given as a number or a numeric string, and check it
/// lies between the prefix length and 32.
fn parse_max_length(value: Option<&Value>, prefix_len: u8) -> Result<u8, VrpError> {
    let max_length = match value {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
    .ok_or_else(|| VrpError::MalformedMaxLength(format!("{value:?}")))?;

    match u8::try_from(max_length) {
        Ok(len) if (prefix_len..=MAX_LENGTH).contains(&len) => Ok(len),
        _ => Err(VrpError::MalformedMaxLength(format!(
            "{max_length} is outside /{prefix_len}../{MAX_LENGTH}"
        ))),
    }
}
