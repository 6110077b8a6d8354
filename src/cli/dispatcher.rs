//! Command dispatcher
//!
//! Routes CLI commands to their appropriate handlers.

use crate::batch::CancelHandle;
use crate::cli::args::{Cli, Command, HistoryCommand, SettingsAction, VerifyFlags};
use crate::commands;
use crate::commands::history::{HistoryAction, ListOptions};
use crate::commands::settings::SettingsCommand;
use crate::error::Result;
use crate::history::HistoryStore;
use crate::project_identity;
use crate::traits::AppContext;
use crate::ui as output;

/// Dispatch the parsed CLI command to the appropriate handler
pub fn dispatch(args: &Cli, cancel: CancelHandle) -> Result<()> {
    match &args.command {
        Some(Command::Install {
            file,
            verify,
            checksum,
            algorithm,
        }) => commands::install::run(
            &AppContext::system()?,
            commands::install::InstallOptions {
                file: file.clone(),
                integrity: integrity_override(verify),
                signature: verify.signature,
                checksum: checksum.clone(),
                algorithm: *algorithm,
            },
        ),

        Some(Command::Batch {
            files,
            verify,
            abort_on_failure,
        }) => commands::batch::run(
            &AppContext::system()?,
            cancel,
            commands::batch::BatchOptions {
                files: files.clone(),
                integrity: integrity_override(verify),
                signature: verify.signature,
                abort_on_failure: *abort_on_failure,
                yes: args.global.yes,
            },
        ),

        Some(Command::Uninstall { names, format }) => commands::uninstall::run(
            &AppContext::system()?,
            commands::uninstall::UninstallOptions {
                names: names.clone(),
                format: *format,
                yes: args.global.yes,
            },
        ),

        Some(Command::Info { file }) => commands::info::run(
            &AppContext::system()?,
            commands::info::InfoOptions { file: file.clone() },
        ),

        Some(Command::Installed { format, search }) => commands::installed::run(
            &AppContext::system()?,
            commands::installed::InstalledOptions {
                format: *format,
                search: search.clone(),
            },
        ),

        Some(Command::Detect) => commands::detect::run(&AppContext::system()?),

        Some(Command::History { command }) => {
            let store = HistoryStore::open_default()?;
            commands::history::run(&store, history_action(command, args.global.yes))
        }

        Some(Command::Settings { command }) => {
            commands::settings::run(settings_command(command))
        }

        Some(Command::Completions { shell }) => commands::completions::run(*shell),

        None => {
            output::info("No command provided.");
            output::info("Quick start:");
            output::indent(&project_identity::cli_with("install ./package.deb"), 2);
            output::indent(
                &project_identity::cli_with("batch ./a.deb ./b.rpm --abort-on-failure"),
                2,
            );
            output::indent(&project_identity::cli_with("history list --status failed"), 2);
            output::info(&format!(
                "Run '{}' for all commands",
                project_identity::cli_with("--help")
            ));
            Ok(())
        }
    }
}

/// `Some` only when a flag overrides the `verify_integrity` setting
fn integrity_override(flags: &VerifyFlags) -> Option<bool> {
    if flags.integrity {
        Some(true)
    } else if flags.no_integrity {
        Some(false)
    } else {
        None
    }
}

fn history_action(command: &HistoryCommand, yes: bool) -> HistoryAction {
    match command {
        HistoryCommand::List {
            status,
            format,
            from,
            to,
            search,
            limit,
        } => HistoryAction::List(ListOptions {
            status: *status,
            format: *format,
            from: from.clone(),
            to: to.clone(),
            search: search.clone(),
            limit: *limit,
        }),
        HistoryCommand::Stats => HistoryAction::Stats,
        HistoryCommand::Export { path, format } => HistoryAction::Export {
            path: path.clone(),
            format: *format,
        },
        HistoryCommand::Import { path, replace } => HistoryAction::Import {
            path: path.clone(),
            replace: *replace,
        },
        HistoryCommand::Clear => HistoryAction::Clear { yes },
    }
}

fn settings_command(action: &SettingsAction) -> SettingsCommand {
    match action {
        SettingsAction::Show => SettingsCommand::Show,
        SettingsAction::Get { key } => SettingsCommand::Get { key: key.clone() },
        SettingsAction::Set { key, value } => SettingsCommand::Set {
            key: key.clone(),
            value: value.clone(),
        },
        SettingsAction::Reset { key } => SettingsCommand::Reset { key: key.clone() },
    }
}
