//! History Command
//!
//! List, filter, summarize, export, import and clear the install history.

use crate::core::types::PackageFormat;
use crate::error::{Result, SnapwizError};
use crate::history::{
    ExportFormat, HistoryEntry, HistoryFilter, HistoryStore, StatusFilter, parse_date,
};
use crate::ui as output;
use colored::Colorize;
use std::path::PathBuf;

pub enum HistoryAction {
    List(ListOptions),
    Stats,
    Export {
        path: PathBuf,
        format: Option<ExportFormat>,
    },
    Import {
        path: PathBuf,
        replace: bool,
    },
    Clear {
        yes: bool,
    },
}

#[derive(Default)]
pub struct ListOptions {
    pub status: Option<StatusFilter>,
    pub format: Option<PackageFormat>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub search: Option<String>,
    pub limit: Option<usize>,
}

pub fn run(store: &HistoryStore, action: HistoryAction) -> Result<()> {
    match action {
        HistoryAction::List(options) => list(store, options),
        HistoryAction::Stats => {
            show_stats(store);
            Ok(())
        }
        HistoryAction::Export { path, format } => {
            let format = format.unwrap_or_else(|| ExportFormat::from_path(&path));
            let count = store.try_export(&path, format)?;
            output::success(&format!(
                "Exported {} entries to {} ({})",
                count,
                path.display(),
                format
            ));
            Ok(())
        }
        HistoryAction::Import { path, replace } => {
            let count = store.try_import(&path, !replace)?;
            let verb = if replace { "Replaced history with" } else { "Imported" };
            output::success(&format!("{} {} entries", verb, count));
            Ok(())
        }
        HistoryAction::Clear { yes } => {
            if !yes {
                if !output::is_interactive() {
                    return Err(SnapwizError::Other(
                        "Refusing to clear history without confirmation; pass --yes".to_string(),
                    ));
                }
                if !output::prompt_yes_no("Delete all installation history?") {
                    output::info("History left unchanged");
                    return Ok(());
                }
            }
            store.try_clear()?;
            output::success("History cleared");
            Ok(())
        }
    }
}

fn build_filter(options: &ListOptions) -> Result<HistoryFilter> {
    let date_from = options.from.as_deref().map(parse_date).transpose()?;
    let date_to = options.to.as_deref().map(parse_date).transpose()?;
    Ok(HistoryFilter {
        status: options.status,
        package_type: options.format,
        date_from,
        date_to,
    })
}

fn list(store: &HistoryStore, options: ListOptions) -> Result<()> {
    let entries = select(store, &options)?;
    if entries.is_empty() {
        output::info("No history entries found");
        return Ok(());
    }

    output::header(&format!("Installation history ({})", entries.len()));
    for entry in &entries {
        print_entry(entry);
    }
    Ok(())
}

/// Entries matching every criterion, keeping the newest `limit`.
fn select(store: &HistoryStore, options: &ListOptions) -> Result<Vec<HistoryEntry>> {
    let filter = build_filter(options)?;
    let search = options.search.as_deref().filter(|query| !query.is_empty());
    let mut entries: Vec<HistoryEntry> = match search {
        Some(query) => store
            .search(query)
            .into_iter()
            .filter(|entry| filter.matches(entry))
            .collect(),
        None => store.filter(&filter),
    };

    if let Some(limit) = options.limit
        && entries.len() > limit
    {
        entries.drain(..entries.len() - limit);
    }
    Ok(entries)
}

fn print_entry(entry: &HistoryEntry) {
    let mark = if entry.success {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    let when = entry
        .recorded_at()
        .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| entry.timestamp.clone());

    println!("{} {} {}", when.dimmed(), mark, entry.package_name);
    if output::is_verbose() {
        output::indent(&entry.package, 2);
        for line in entry.message.lines().filter(|l| !l.trim().is_empty()) {
            output::indent(line, 2);
        }
    } else if !entry.success
        && let Some(first) = entry.message.lines().find(|l| !l.trim().is_empty())
    {
        output::indent(first, 2);
    }
}

fn show_stats(store: &HistoryStore) {
    let stats = store.stats();
    output::header("History statistics");
    output::keyval("Total", &stats.total.to_string());
    output::keyval("Successful", &stats.successful.to_string());
    output::keyval("Failed", &stats.failed.to_string());
    output::keyval("Success rate", &format!("{:.1}%", stats.success_rate));
}
