//! Discount-code ledger backed by a spreadsheet tab: one row per code,
//! issued with an 8-character id and redeemed at most once.

mod ledger;
mod record;
mod sheets;
mod store;


pub use ledger::CodeLedger;
pub use record::{message_template, CodeRecord, Column, Wrap};
pub use sheets::SheetsStore;
pub use store::{CodeStore, MemoryStore};

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodeError {
    #[error("code {0} doesn't exist")]
    NotFound(String),

    #[error("code {code} was already used on {used_on}")]
    AlreadyUsed {
        code: String,
        used_on: DateTime<Utc>,
    },

    #[error("code {code} was not issued to {name} but to {issued_to}")]
    WrongName {
        code: String,
        name: String,
        issued_to: String,
    },

    #[error("code {code} does not cover wrap(s) {}", .uncovered.join(", "))]
    OutOfScope {
        code: String,
        uncovered: Vec<String>,
        covered: Vec<String>,
    },

    #[error("unknown wrap name: {0}")]
    UnknownWrap(String),

    #[error("malformed spreadsheet row: {0}")]
    MalformedRow(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("spreadsheet API returned status {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),
}
