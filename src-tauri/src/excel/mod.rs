//! Workbook access: reading sheets as tables, exporting tables, and
//! watching the workbook for content changes.

pub mod types;
pub mod reader;
pub mod writer;
pub mod watcher;

pub use types::*;
pub use reader::{read_table, get_sheets, compute_checksum};
pub use writer::{write_table, write_tables};
pub use watcher::{WorkbookWatcher, create_event_channel};
