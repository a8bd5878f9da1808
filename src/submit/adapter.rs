//! Submission adapter — batch-appends response rows, then refreshes the
//! aggregates table from the full log.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info};

use crate::error::StoreError;
use crate::session::Session;
use crate::sheets::SheetStore;

use super::rows::build_rows;

/// Range on the aggregates sheet holding the four respondent counters.
const AGGREGATES_RANGE: &str = "A2:D2";

/// Unique-respondent counters derived from the response log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RespondentCounts {
    pub total: u64,
    pub private: u64,
    pub commercial: u64,
    pub none: u64,
}

/// Writes finished sessions to the response log. Submissions are
/// at-most-once: there is no retry queue, and a session submitted twice
/// appends its rows twice.
pub struct SubmissionAdapter {
    store: Arc<dyn SheetStore>,
}

impl SubmissionAdapter {
    pub fn new(store: Arc<dyn SheetStore>) -> Self {
        Self { store }
    }

    /// Append every row of the session in one batch, then recompute the
    /// aggregates. A failed recompute is logged and does not undo the
    /// append.
    pub async fn submit(&self, session: &Session) -> Result<(), StoreError> {
        let rows = build_rows(session);
        let row_count = rows.len();
        self.store.append_rows(rows).await?;
        info!(
            respondent_id = %session.respondent_id,
            rows = row_count,
            "Response rows appended"
        );

        if let Err(e) = self.recompute_aggregates().await {
            error!("Aggregates recompute failed: {e}");
        }
        Ok(())
    }

    /// Re-derive the counters from the full response log and write them in
    /// one range update.
    pub async fn recompute_aggregates(&self) -> Result<RespondentCounts, StoreError> {
        let records = self.store.read_all_records().await?;
        let counts = count_respondents(&records);
        self.store
            .write_range(
                AGGREGATES_RANGE,
                vec![vec![
                    Value::from(counts.total),
                    Value::from(counts.private),
                    Value::from(counts.commercial),
                    Value::from(counts.none),
                ]],
            )
            .await?;
        info!(
            total = counts.total,
            private = counts.private,
            commercial = counts.commercial,
            none = counts.none,
            "Aggregates updated"
        );
        Ok(counts)
    }
}

/// Bucket unique respondents by ownership type. The first row of a
/// respondent wins; rows without a respondent id are skipped.
fn count_respondents(records: &[BTreeMap<String, String>]) -> RespondentCounts {
    let mut ownership_by_respondent: HashMap<&str, &str> = HashMap::new();
    for record in records {
        let Some(id) = record.get("Respondent_id").filter(|id| !id.is_empty()) else {
            continue;
        };
        let kind = record.get("Ownership_Type").map_or("", String::as_str);
        ownership_by_respondent.entry(id.as_str()).or_insert(kind);
    }

    let total = ownership_by_respondent.len() as u64;
    let private = ownership_by_respondent
        .values()
        .filter(|v| v.contains("Private"))
        .count() as u64;
    let commercial = ownership_by_respondent
        .values()
        .filter(|v| v.contains("Commercial"))
        .count() as u64;

    RespondentCounts {
        total,
        private,
        commercial,
        none: total.saturating_sub(private).saturating_sub(commercial),
    }
}
