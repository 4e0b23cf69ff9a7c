use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CodeError, CodeRecord, CodeStore, Column};

const API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Spreadsheet-backed code store talking to the values API with a
/// pre-issued bearer token.
pub struct SheetsStore {
    http: Client,
    sheet_id: String,
    tab: String,
    token: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// Error envelope the API wraps failures in.
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Pull the human-readable message out of an error body, falling back to
/// the raw text when it is not the usual JSON envelope.
fn error_message(body: String) -> String {
    match serde_json::from_str::<ApiErrorEnvelope>(&body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => body,
    }
}

impl SheetsStore {
    pub fn new(sheet_id: impl Into<String>, tab: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            sheet_id: sheet_id.into(),
            tab: tab.into(),
            token: token.into(),
        }
    }

    /// Build a store from `GOOGLE_SHEET_ID` and `GOOGLE_SHEETS_TOKEN`.
    pub fn from_env(tab: impl Into<String>) -> Result<Self, CodeError> {
        let sheet_id = std::env::var("GOOGLE_SHEET_ID")
            .map_err(|_| CodeError::MissingConfig("GOOGLE_SHEET_ID"))?;
        let token = std::env::var("GOOGLE_SHEETS_TOKEN")
            .map_err(|_| CodeError::MissingConfig("GOOGLE_SHEETS_TOKEN"))?;
        Ok(Self::new(sheet_id, tab, token))
    }

    fn check_status(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, CodeError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CodeError::ServerError {
                status: status.as_u16(),
                body: error_message(body),
            });
        }
        Ok(response)
    }

    /// A1 range covering one full row, e.g. `Codes!A3:H3`.
    fn row_range(&self, row: usize) -> String {
        let last = Column::UsedDate.letter();
        format!("{}!A{row}:{last}{row}", self.tab)
    }
}

impl CodeStore for SheetsStore {
    fn list(&self) -> Result<Vec<CodeRecord>, CodeError> {
        let url = format!("{API_BASE}/{}/values/{}", self.sheet_id, self.tab);
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .send()?;
        let range: ValueRange = Self::check_status(response)?.json()?;
        debug!(rows = range.values.len(), "sheet rows fetched");

        range
            .values
            .iter()
            .map(|row| CodeRecord::from_row(row))
            .collect()
    }

    fn append(&mut self, record: &CodeRecord) -> Result<(), CodeError> {
        let url = format!(
            "{API_BASE}/{}/values/{}:append?valueInputOption=USER_ENTERED",
            self.sheet_id, self.tab
        );
        let body = ValueRange {
            values: vec![record.to_row()],
        };
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()?;
        Self::check_status(response)?;
        Ok(())
    }

    fn update(&mut self, row: usize, record: &CodeRecord) -> Result<(), CodeError> {
        // The sheet is 1-based and every row of the tab is data.
        let range = self.row_range(row + 1);
        let url = format!(
            "{API_BASE}/{}/values/{}?valueInputOption=USER_ENTERED",
            self.sheet_id, range
        );
        debug!(%range, code = %record.code, "updating sheet row");
        let body = ValueRange {
            values: vec![record.to_row()],
        };
        let response = self
            .http
            .put(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()?;
        Self::check_status(response)?;
        Ok(())
    }
}
