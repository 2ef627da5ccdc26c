//! Fixed settings shared by the CLI and the output.

/// Validator export used when no cache location is given.
pub const DEFAULT_CACHE: &str = "https://rpki.gin.ntt.net/api/export.json";

/// Environment variable overriding [`DEFAULT_CACHE`].
pub const CACHE_ENV: &str = "RPKI_OV_CACHE";

/// Environment variable naming the log4rs configuration file.
pub const LOG_CONFIG_ENV: &str = "RPKI_OV_LOG_CONFIG";

/// log4rs configuration file used when [`LOG_CONFIG_ENV`] is not set.
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

/// Global administrator part of the RPKI state communities.
pub const COMMUNITY_ASN: u32 = 65000;
pub const COMMUNITY_NOT_FOUND: u32 = 0;
pub const COMMUNITY_VALID: u32 = 1;
pub const COMMUNITY_INVALID: u32 = 2;

pub const ROUTE_MAP: &str = "rpki-ov";
pub const COVERED_SPACE_PREFIX_LIST: &str = "rpki-covered-space-v4";
pub const ORIGIN_PREFIX_LIST: &str = "rpki-origin-AS";
