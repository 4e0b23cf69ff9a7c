use chrono::Utc;
use tracing::debug;

use super::{CodeError, CodeRecord, CodeStore, Wrap};

/// Issue and redeem discount codes against a backing store.
pub struct CodeLedger<S: CodeStore> {
    store: S,
}

impl<S: CodeStore> CodeLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Issue a new code to `name`. The generated code is re-drawn until it
    /// collides with nothing already in the ledger.
    pub fn issue(
        &mut self,
        name: &str,
        scope: Vec<Wrap>,
        percentage: u32,
    ) -> Result<CodeRecord, CodeError> {
        let existing: Vec<String> = self
            .store
            .list()?
            .into_iter()
            .map(|record| record.code)
            .collect();
        debug!(count = existing.len(), "existing codes loaded");

        let mut record = CodeRecord::new(name, scope, percentage);
        while existing.contains(&record.code) {
            debug!(code = %record.code, "code collision, drawing again");
            record = CodeRecord::new(name, record.scope, percentage);
        }

        self.store.append(&record)?;
        Ok(record)
    }

    /// Look a code up case-insensitively; returns its row and record.
    pub fn find(&self, code: &str) -> Result<(usize, CodeRecord), CodeError> {
        let wanted = code.trim().to_lowercase();
        self.store
            .list()?
            .into_iter()
            .enumerate()
            .find(|(_, record)| record.code == wanted)
            .ok_or_else(|| CodeError::NotFound(code.to_string()))
    }

    /// Validate a code without redeeming it: it must exist, be unused,
    /// match `name` when one is given, and cover every wrap in `wraps`.
    pub fn check(
        &self,
        code: &str,
        name: Option<&str>,
        wraps: &[Wrap],
    ) -> Result<(usize, CodeRecord), CodeError> {
        let (row, record) = self.find(code)?;

        if let Some(used_on) = record.used_on() {
            return Err(CodeError::AlreadyUsed {
                code: record.code,
                used_on,
            });
        }

        if let Some(name) = name {
            if !name.is_empty() && name != record.name {
                return Err(CodeError::WrongName {
                    code: record.code,
                    name: name.to_string(),
                    issued_to: record.name,
                });
            }
        }

        // An empty scope covers everything.
        if !wraps.is_empty() && !record.scope.is_empty() {
            let uncovered: Vec<String> = wraps
                .iter()
                .filter(|wrap| !record.scope.contains(wrap))
                .map(|wrap| wrap.name().to_string())
                .collect();
            if !uncovered.is_empty() {
                return Err(CodeError::OutOfScope {
                    code: record.code,
                    uncovered,
                    covered: record.scope.iter().map(|w| w.name().to_string()).collect(),
                });
            }
        }

        Ok((row, record))
    }

    /// Redeem a code: all the [`check`](Self::check) validations, then a use
    /// timestamp is stamped onto the row.
    pub fn redeem(
        &mut self,
        code: &str,
        name: Option<&str>,
        wraps: &[Wrap],
    ) -> Result<CodeRecord, CodeError> {
        let (row, mut record) = self.check(code, name, wraps)?;
        record.used_at = Some(Utc::now().timestamp());
        self.store.update(row, &record)?;
        Ok(record)
    }
}
