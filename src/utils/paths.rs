use crate::constants::{PROJECT_NAME, PROJECT_ORG, PROJECT_QUALIFIER};
use crate::error::{Result, SnapwizError};
use crate::project_identity;
use directories::ProjectDirs;
use std::path::PathBuf;

/// Config directory, `SNAPWIZ_CONFIG_DIR` wins over the platform default.
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(project_identity::env_key("CONFIG_DIR"))
        && !dir.trim().is_empty()
    {
        return Ok(PathBuf::from(dir));
    }

    let proj = ProjectDirs::from(PROJECT_QUALIFIER, PROJECT_ORG, PROJECT_NAME).ok_or_else(|| {
        SnapwizError::ConfigError("Could not determine config directory".to_string())
    })?;
    Ok(proj.config_dir().to_path_buf())
}

pub fn history_file() -> Result<PathBuf> {
    Ok(config_dir()?.join(project_identity::HISTORY_FILE_BASENAME))
}

pub fn settings_file() -> Result<PathBuf> {
    Ok(config_dir()?.join(project_identity::SETTINGS_FILE_BASENAME))
}

#[cfg(test)]
mod tests;
