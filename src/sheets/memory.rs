//! In-memory sheet store for tests and sheetless development runs.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::traits::{Row, SheetStore, rows_to_records};
use crate::error::StoreError;

/// Volatile [`SheetStore`] holding everything in process memory.
pub struct MemorySheet {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    /// Response log, header row first.
    log: Vec<Row>,
    /// Aggregates table writes, keyed by range.
    ranges: HashMap<String, Vec<Row>>,
}

impl MemorySheet {
    /// Create a store whose response log starts with the given header row.
    pub fn new(headers: Vec<String>) -> Self {
        let header_row = headers.into_iter().map(serde_json::Value::from).collect();
        Self {
            inner: RwLock::new(Inner {
                log: vec![header_row],
                ranges: HashMap::new(),
            }),
        }
    }

    /// Appended data rows, header excluded.
    pub async fn rows(&self) -> Vec<Row> {
        self.inner.read().await.log[1..].to_vec()
    }

    /// Last write to a range on the aggregates table.
    pub async fn range(&self, range: &str) -> Option<Vec<Row>> {
        self.inner.read().await.ranges.get(range).cloned()
    }
}

#[async_trait]
impl SheetStore for MemorySheet {
    async fn append_rows(&self, rows: Vec<Row>) -> Result<(), StoreError> {
        self.inner.write().await.log.extend(rows);
        Ok(())
    }

    async fn read_all_records(&self) -> Result<Vec<BTreeMap<String, String>>, StoreError> {
        Ok(rows_to_records(&self.inner.read().await.log))
    }

    async fn write_range(&self, range: &str, values: Vec<Row>) -> Result<(), StoreError> {
        self.inner
            .write()
            .await
            .ranges
            .insert(range.to_string(), values);
        Ok(())
    }
}
