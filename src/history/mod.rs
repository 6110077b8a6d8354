//! Installation history
//!
//! A JSON array of [`HistoryEntry`] values kept in the config directory.
//! Entries are appended once per finished install or uninstall and never
//! edited; only `clear` and a replacing `import` remove them.

mod persist;
mod store;
mod types;

pub use store::HistoryStore;
pub use types::{
    ExportFormat, HistoryEntry, HistoryExport, HistoryFilter, HistoryStats, StatusFilter,
    parse_date,
};
