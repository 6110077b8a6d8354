use colored::Colorize;
use std::io::{self, IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};

pub mod progress;

static QUIET: AtomicBool = AtomicBool::new(false);
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Apply output switches once at startup.
pub fn configure(verbose: bool, quiet: bool) {
    VERBOSE.store(verbose && !quiet, Ordering::Relaxed);
    QUIET.store(quiet, Ordering::Relaxed);
    init_colors();
}

/// Disable color when `NO_COLOR` is set or stdout is not a terminal.
pub fn init_colors() {
    if std::env::var_os("NO_COLOR").is_some() || !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

pub fn header(title: &str) {
    if is_quiet() {
        return;
    }
    println!("\n{}", title.bold().underline());
}

pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

pub fn info(msg: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", "ℹ".blue().bold(), msg);
}

/// Diagnostic detail, printed only with `-v`.
pub fn verbose(msg: &str) {
    if !is_verbose() {
        return;
    }
    eprintln!("{} {}", "·".bright_black(), msg.bright_black());
}

pub fn warning(msg: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

pub fn separator() {
    if is_quiet() {
        return;
    }
    println!("{}", "─".repeat(60).bright_black());
}

pub fn keyval(key: &str, val: &str) {
    println!("{}: {}", key.bold(), val);
}

pub fn indent(msg: &str, level: usize) {
    let spaces = " ".repeat(level * 2);
    println!("{}{}", spaces, msg);
}

/// Whether a prompt can be answered by a human.
pub fn is_interactive() -> bool {
    io::stdin().is_terminal()
}

pub fn prompt_yes_no(question: &str) -> bool {
    print!("{} {} [Y/n] ", "?".yellow().bold(), question);

    if let Err(e) = io::stdout().flush() {
        eprintln!("\nWarning: Failed to flush terminal: {}", e);
        return true;
    }

    let mut input = String::new();

    match io::stdin().read_line(&mut input) {
        Ok(_) => {
            let input = input.trim().to_lowercase();

            if input.is_empty() {
                return true;
            }

            input == "y" || input == "yes"
        }
        Err(e) => {
            eprintln!("\nWarning: Failed to read input: {}", e);
            true
        }
    }
}
