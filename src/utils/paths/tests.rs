use super::*;
use crate::project_identity::{HISTORY_FILE_BASENAME, SETTINGS_FILE_BASENAME};

#[test]
fn history_file_uses_expected_filename() {
    let path = history_file().expect("history_file should resolve");
    assert_eq!(
        path.file_name().and_then(|f| f.to_str()),
        Some(HISTORY_FILE_BASENAME)
    );
}

#[test]
fn settings_file_shares_history_directory() {
    let history = history_file().expect("history_file should resolve");
    let settings = settings_file().expect("settings_file should resolve");
    assert_eq!(history.parent(), settings.parent());
    assert_eq!(
        settings.file_name().and_then(|f| f.to_str()),
        Some(SETTINGS_FILE_BASENAME)
    );
}
