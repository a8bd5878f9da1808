//! Spreadsheet persistence — the store trait plus its Google Sheets and
//! in-memory implementations.

pub mod google;
pub mod memory;
pub mod traits;

pub use google::{GoogleSheetsStore, SheetsConfig};
pub use memory::MemorySheet;
pub use traits::{Row, SheetStore};
