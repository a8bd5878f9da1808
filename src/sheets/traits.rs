//! Spreadsheet store abstraction.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::StoreError;

/// One spreadsheet row; cells keep their JSON type (strings and numbers).
pub type Row = Vec<serde_json::Value>;

/// External spreadsheet-like store: a response log plus an aggregates table.
///
/// Implementations must tolerate concurrent appends. Writes to the
/// aggregates table are last-writer-wins.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Append rows to the end of the response log in one batch.
    async fn append_rows(&self, rows: Vec<Row>) -> Result<(), StoreError>;

    /// Read the response log as records keyed by its header row. Rows
    /// shorter than the header are padded with empty strings; cells beyond
    /// the header are ignored.
    async fn read_all_records(&self) -> Result<Vec<BTreeMap<String, String>>, StoreError>;

    /// Overwrite a cell range on the aggregates table, e.g. `"A2:D2"`.
    async fn write_range(&self, range: &str, values: Vec<Row>) -> Result<(), StoreError>;
}

/// Render one cell the way the spreadsheet shows it.
pub(crate) fn cell_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Turn raw rows (header row first) into header-keyed records.
pub(crate) fn rows_to_records(rows: &[Row]) -> Vec<BTreeMap<String, String>> {
    let Some((header, data)) = rows.split_first() else {
        return Vec::new();
    };
    let headers: Vec<String> = header.iter().map(cell_text).collect();

    data.iter()
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    (name.clone(), row.get(i).map(cell_text).unwrap_or_default())
                })
                .collect()
        })
        .collect()
}
