pub mod batch;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod core;
pub mod error;
pub mod exec;
pub mod history;
pub mod install;
pub mod packages;
pub mod project_identity;
pub mod traits;
pub mod ui;
pub mod uninstall;
pub mod utils;
pub mod verify;

use batch::CancelHandle;
use clap::Parser;
use std::process::exit;

/// Run snapwiz CLI entrypoint.
pub fn run_cli() {
    // 0. Initialize color settings (must be first)
    ui::init_colors();

    // 1. Signal handling: the first Ctrl-C stops a batch after the current
    //    package, a second one exits immediately
    let cancel = CancelHandle::new();
    let handler_cancel = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        eprintln!();
        if handler_cancel.is_cancelled() {
            exit(130);
        }
        handler_cancel.cancel();
        ui::warning("Cancelling after the current package. Press Ctrl-C again to exit now.");
    }) {
        ui::warning(&format!("Could not install Ctrl-C handler: {}", e));
    }

    // 2. Parse & Run
    let args = cli::args::Cli::parse();
    ui::configure(args.global.verbose, args.global.quiet);

    if let Err(e) = cli::dispatcher::dispatch(&args, cancel) {
        ui::error(&format!("{}", e));
        exit(1);
    }
}
