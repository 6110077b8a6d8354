pub mod batch;
pub mod completions;
pub mod detect;
pub mod history;
pub mod info;
pub mod install;
pub mod installed;
pub mod settings;
pub mod uninstall;
