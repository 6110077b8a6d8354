//! Central project identity contract.
//!
//! This module is the single source of truth for runtime identity values.

pub const DISPLAY_NAME: &str = "SnapWiz";
pub const BINARY_NAME: &str = "snapwiz";
pub const STABLE_PROJECT_ID: &str = "snapwiz";
pub const CONFIG_DIR_NAME: &str = "snapwiz";
pub const ENV_PREFIX: &str = "SNAPWIZ";
pub const HISTORY_FILE_BASENAME: &str = "history.json";
pub const SETTINGS_FILE_BASENAME: &str = "settings.json";

pub fn env_key(suffix: &str) -> String {
    format!("{}_{}", ENV_PREFIX, suffix)
}

pub fn cli_with(args: &str) -> String {
    format!("{} {}", BINARY_NAME, args)
}
