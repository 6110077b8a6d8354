//! Settings Command
//!
//! Manage snapwiz preferences.

use crate::config::settings::Settings;
use crate::error::{Result, SnapwizError};
use crate::ui as output;

/// Settings command
#[derive(Debug)]
pub enum SettingsCommand {
    /// Set a setting value
    Set { key: String, value: String },
    /// Get a setting value
    Get { key: String },
    /// Show all settings
    Show,
    /// Reset setting to default
    Reset { key: String },
}

/// Run the settings command
pub fn run(command: SettingsCommand) -> Result<()> {
    let mut settings = Settings::load()?;
    apply(&mut settings, command)
}

fn apply(settings: &mut Settings, command: SettingsCommand) -> Result<()> {
    match command {
        SettingsCommand::Set { key, value } => {
            settings.set(&key, &value)?;
            let stored = settings.get(&key).unwrap_or(value);
            output::success(&format!("Set {} = {}", key, stored));
        }
        SettingsCommand::Get { key } => match settings.get(&key) {
            Some(value) => println!("{} = {}", key, value),
            None => {
                return Err(SnapwizError::Other(format!(
                    "Setting '{}' not found",
                    key
                )));
            }
        },
        SettingsCommand::Show => show_all_settings(settings),
        SettingsCommand::Reset { key } => {
            settings.reset(&key)?;
            output::success(&format!("Reset {} to default", key));
        }
    }

    Ok(())
}

/// Show all settings
fn show_all_settings(settings: &Settings) {
    output::header("Current Settings");

    for (key, value) in settings.all() {
        println!("  {}: {}", key, value);
    }

    println!();
    output::info("Valid values:");
    println!("  theme:            Light, Dark");
    println!("  verify_integrity: true, false");
    println!("  verify_signature: true, false");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn set_then_get_round_trips_through_the_file() {
        let dir = tempdir().expect("tempdir");
        let file = dir.path().join("settings.json");
        let mut settings = Settings::load_from(&file);

        apply(
            &mut settings,
            SettingsCommand::Set {
                key: "verify_signature".to_string(),
                value: "on".to_string(),
            },
        )
        .expect("set");

        let reloaded = Settings::load_from(&file);
        assert_eq!(reloaded.get("verify_signature").as_deref(), Some("true"));
    }

    #[test]
    fn unknown_key_is_an_error() {
        let dir = tempdir().expect("tempdir");
        let mut settings = Settings::load_from(dir.path().join("settings.json"));
        let result = apply(
            &mut settings,
            SettingsCommand::Get {
                key: "color".to_string(),
            },
        );
        assert!(result.is_err());
    }
}
