//! Google Sheets backend — talks to the Sheets REST v4 values API.
//!
//! The response log and the aggregates table live on two worksheets of a
//! single spreadsheet. Appends go to the log sheet, range writes to the
//! aggregates sheet.

use std::collections::BTreeMap;

use async_trait::async_trait;
use secrecy::ExposeSecret;

use super::traits::{Row, SheetStore, rows_to_records};
use crate::error::StoreError;

// ── Configuration ───────────────────────────────────────────────────

/// Google Sheets configuration, built from environment variables.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    pub token: secrecy::SecretString,
    pub log_sheet: String,
    pub aggregates_sheet: String,
}

impl SheetsConfig {
    /// Build config from environment variables.
    /// Returns `None` if `SURVEY_SHEETS_SPREADSHEET_ID` or
    /// `SURVEY_SHEETS_TOKEN` is not set (backend disabled).
    pub fn from_env() -> Option<Self> {
        let spreadsheet_id = std::env::var("SURVEY_SHEETS_SPREADSHEET_ID").ok()?;
        let token = std::env::var("SURVEY_SHEETS_TOKEN").ok()?;

        let log_sheet = std::env::var("SURVEY_SHEETS_LOG_SHEET")
            .unwrap_or_else(|_| "Final_Responses".to_string());

        let aggregates_sheet = std::env::var("SURVEY_SHEETS_AGGREGATES_SHEET")
            .unwrap_or_else(|_| "Respondents_Data".to_string());

        Some(Self {
            spreadsheet_id,
            token: secrecy::SecretString::from(token),
            log_sheet,
            aggregates_sheet,
        })
    }
}

// ── Store ───────────────────────────────────────────────────────────

/// [`SheetStore`] backed by the Google Sheets REST API.
pub struct GoogleSheetsStore {
    config: SheetsConfig,
    client: reqwest::Client,
}

impl GoogleSheetsStore {
    pub fn new(config: SheetsConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn values_url(&self, range: &str, suffix: &str) -> String {
        format!(
            "https://sheets.googleapis.com/v4/spreadsheets/{}/values/{range}{suffix}",
            self.config.spreadsheet_id
        )
    }

    /// Turn a non-2xx response into a [`StoreError::Api`].
    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(StoreError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

#[derive(serde::Deserialize)]
struct ValuesResponse {
    /// Absent entirely when the requested range is empty.
    #[serde(default)]
    values: Vec<Row>,
}

#[async_trait]
impl SheetStore for GoogleSheetsStore {
    async fn append_rows(&self, rows: Vec<Row>) -> Result<(), StoreError> {
        let url = self.values_url(
            &self.config.log_sheet,
            ":append?valueInputOption=USER_ENTERED",
        );
        let resp = self
            .client
            .post(url)
            .bearer_auth(self.config.token.expose_secret())
            .json(&serde_json::json!({ "values": rows }))
            .send()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;

        Self::check_status(resp).await?;
        Ok(())
    }

    async fn read_all_records(&self) -> Result<Vec<BTreeMap<String, String>>, StoreError> {
        let url = self.values_url(&self.config.log_sheet, "");
        let resp = self
            .client
            .get(url)
            .bearer_auth(self.config.token.expose_secret())
            .send()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;

        let body: ValuesResponse = Self::check_status(resp)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;

        Ok(rows_to_records(&body.values))
    }

    async fn write_range(&self, range: &str, values: Vec<Row>) -> Result<(), StoreError> {
        let url = self.values_url(
            &format!("{}!{range}", self.config.aggregates_sheet),
            "?valueInputOption=RAW",
        );
        let resp = self
            .client
            .put(url)
            .bearer_auth(self.config.token.expose_secret())
            .json(&serde_json::json!({ "values": values }))
            .send()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;

        Self::check_status(resp).await?;
        Ok(())
    }
}
