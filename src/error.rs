//! Per-record errors raised while loading VRPs.

use thiserror::Error;

/// Reason a single ROA record was rejected. Rejected records are reported
/// and skipped, loading continues with the next record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VrpError {
    #[error("ASN malformed: {0}")]
    MalformedAsn(String),

    #[error("prefix malformed: {0}")]
    MalformedPrefix(String),

    #[error("maxLength malformed: {0}")]
    MalformedMaxLength(String),
}
