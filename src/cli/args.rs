use crate::core::types::PackageFormat;
use crate::history::{ExportFormat, StatusFilter};
use crate::verify::ChecksumAlgorithm;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "snapwiz",
    about = "Install .deb, .rpm, .snap and .flatpak packages with verification and history",
    long_about = "Installs local package files through the system package manager, \
                  optionally verifying integrity, checksums and signatures first, \
                  and keeps a searchable history of every attempt.",
    version,
    next_line_help = false,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Parser, Debug)]
pub struct GlobalFlags {
    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Quiet mode
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(short = 'y', long = "yes", global = true)]
    pub yes: bool,
}

/// Verification switches shared by `install` and `batch`
#[derive(Args, Debug, Clone, Default)]
pub struct VerifyFlags {
    /// Skip the structural integrity check
    #[arg(long, conflicts_with = "integrity")]
    pub no_integrity: bool,

    /// Force the integrity check even if disabled in settings
    #[arg(long)]
    pub integrity: bool,

    /// Require a detached .asc/.sig signature and verify it with gpg
    #[arg(long)]
    pub signature: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install a single package file
    Install {
        /// Package file (.deb, .rpm, .snap, .flatpak)
        file: PathBuf,

        #[command(flatten)]
        verify: VerifyFlags,

        /// Expected checksum (hex)
        #[arg(long, value_name = "HEX")]
        checksum: Option<String>,

        /// Checksum algorithm
        #[arg(long, value_name = "ALGO", default_value = "sha256")]
        algorithm: ChecksumAlgorithm,
    },

    /// Install several package files one after another
    Batch {
        /// Package files, installed in the given order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        verify: VerifyFlags,

        /// Stop at the first failed package instead of asking
        #[arg(long)]
        abort_on_failure: bool,
    },

    /// Remove installed packages by name
    Uninstall {
        /// Package names
        #[arg(required = true)]
        names: Vec<String>,

        /// Package type
        #[arg(long = "type", value_name = "TYPE")]
        format: PackageFormat,
    },

    /// Show package file details
    Info {
        /// Package file
        file: PathBuf,
    },

    /// List installed deb/rpm packages
    Installed {
        /// Only this package type
        #[arg(long = "type", value_name = "TYPE")]
        format: Option<PackageFormat>,

        /// Case-insensitive name filter
        #[arg(long, value_name = "TEXT")]
        search: Option<String>,
    },

    /// Show the detected system package manager and privileges
    Detect,

    /// Browse and manage installation history
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },

    /// View or change settings
    Settings {
        #[command(subcommand)]
        command: SettingsAction,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    /// List entries, newest last
    List {
        /// success or failed
        #[arg(long, value_name = "STATUS")]
        status: Option<StatusFilter>,

        /// Package type, matched on the file name
        #[arg(long = "type", value_name = "TYPE")]
        format: Option<PackageFormat>,

        /// First day to include (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        from: Option<String>,

        /// Last day to include (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        to: Option<String>,

        /// Case-insensitive name or path filter
        #[arg(long, value_name = "TEXT")]
        search: Option<String>,

        /// Show only the most recent N entries
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
    },

    /// Success/failure counts
    Stats,

    /// Write history to a file
    Export {
        path: PathBuf,

        /// csv or json (default: from the file extension)
        #[arg(long, value_name = "FORMAT")]
        format: Option<ExportFormat>,
    },

    /// Load history from a JSON file
    Import {
        path: PathBuf,

        /// Replace the current history instead of appending
        #[arg(long)]
        replace: bool,
    },

    /// Delete all history
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Show all settings
    Show,
    /// Get a setting value
    Get { key: String },
    /// Set a setting value
    Set { key: String, value: String },
    /// Reset a setting to its default
    Reset { key: String },
}

#[cfg(test)]
mod tests;
