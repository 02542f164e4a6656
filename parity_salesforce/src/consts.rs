pub const AUTH_HEADER: &str = "Authorization";
pub const ACCEPT_HEADER: &str = "Accept";
pub const USER_AGENT_HEADER: &str = "User-Agent";
pub const USER_AGENT: &str = "parity";

/// REST API version used when the connector config doesn't name one.
pub const DEFAULT_API_VERSION: &str = "58.0";

/// Prefix of every boolean permission column on `PermissionSet`.
pub const FLAG_COLUMN_PREFIX: &str = "Permissions";
