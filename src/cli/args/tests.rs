use super::*;
use crate::project_identity;
use clap::{CommandFactory, Parser};

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once(project_identity::BINARY_NAME).chain(args.iter().copied()))
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn install_parses_checksum_options() {
    let cli = parse(&[
        "install",
        "pkg.deb",
        "--checksum",
        "ABCDEF",
        "--algorithm",
        "md5",
        "--signature",
    ])
    .expect("install should parse");

    match cli.command {
        Some(Command::Install {
            file,
            verify,
            checksum,
            algorithm,
        }) => {
            assert_eq!(file, PathBuf::from("pkg.deb"));
            assert!(verify.signature);
            assert_eq!(checksum.as_deref(), Some("ABCDEF"));
            assert_eq!(algorithm, ChecksumAlgorithm::Md5);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn install_defaults_to_sha256() {
    let cli = parse(&["install", "pkg.rpm"]).expect("install should parse");
    assert!(matches!(
        cli.command,
        Some(Command::Install {
            algorithm: ChecksumAlgorithm::Sha256,
            ..
        })
    ));
}

#[test]
fn integrity_flags_conflict() {
    assert!(parse(&["install", "a.deb", "--integrity", "--no-integrity"]).is_err());
}

#[test]
fn batch_requires_files() {
    assert!(parse(&["batch"]).is_err());
    let cli = parse(&["-y", "batch", "a.deb", "b.rpm", "--abort-on-failure"])
        .expect("batch should parse");
    assert!(cli.global.yes);
    match cli.command {
        Some(Command::Batch {
            files,
            abort_on_failure,
            ..
        }) => {
            assert_eq!(files.len(), 2);
            assert!(abort_on_failure);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn uninstall_requires_type() {
    assert!(parse(&["uninstall", "vim"]).is_err());
    assert!(parse(&["uninstall", "vim", "--type", "zip"]).is_err());
    let cli = parse(&["uninstall", "vim", "nano", "--type", "deb"]).expect("uninstall");
    assert!(matches!(
        cli.command,
        Some(Command::Uninstall {
            format: PackageFormat::Deb,
            ..
        })
    ));
}

#[test]
fn history_list_filters_parse() {
    let cli = parse(&[
        "history", "list", "--status", "failed", "--type", "rpm", "--from", "2024-01-01",
        "--limit", "5",
    ])
    .expect("history list should parse");

    match cli.command {
        Some(Command::History {
            command:
                HistoryCommand::List {
                    status,
                    format,
                    from,
                    limit,
                    ..
                },
        }) => {
            assert_eq!(status, Some(StatusFilter::Failed));
            assert_eq!(format, Some(PackageFormat::Rpm));
            assert_eq!(from.as_deref(), Some("2024-01-01"));
            assert_eq!(limit, Some(5));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn history_status_is_validated() {
    assert!(parse(&["history", "list", "--status", "pending"]).is_err());
}

#[test]
fn global_flags_work_after_subcommand() {
    let cli = parse(&["detect", "-v", "-q"]).expect("detect should parse");
    assert!(cli.global.verbose);
    assert!(cli.global.quiet);
}
