// Common constants used throughout the codebase

/// Project name
pub const PROJECT_NAME: &str = "snapwiz";

/// Project organization (reverse domain notation)
pub const PROJECT_QUALIFIER: &str = "com";
pub const PROJECT_ORG: &str = "snapwiz";

/// Upper bound for each install invocation; a fallback dependency repair
/// gets a budget of its own
pub const INSTALL_TIMEOUT_SECS: u64 = 300;

/// Upper bound for a single uninstall invocation
pub const UNINSTALL_TIMEOUT_SECS: u64 = 120;

/// Upper bound for read-only queries (metadata, installed listings)
pub const QUERY_TIMEOUT_SECS: u64 = 10;

/// Wall-clock format used for history timestamps (second precision)
pub const HISTORY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date-only format accepted by history date filters
pub const HISTORY_DATE_FORMAT: &str = "%Y-%m-%d";
