use super::{CodeError, CodeRecord};

/// Row-oriented storage for the code ledger. Row indices are zero-based
/// positions in the listing order.
pub trait CodeStore {
    fn list(&self) -> Result<Vec<CodeRecord>, CodeError>;

    fn append(&mut self, record: &CodeRecord) -> Result<(), CodeError>;

    fn update(&mut self, row: usize, record: &CodeRecord) -> Result<(), CodeError>;
}

/// In-memory store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Vec<CodeRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(rows: Vec<CodeRecord>) -> Self {
        Self { rows }
    }
}

impl CodeStore for MemoryStore {
    fn list(&self) -> Result<Vec<CodeRecord>, CodeError> {
        Ok(self.rows.clone())
    }

    fn append(&mut self, record: &CodeRecord) -> Result<(), CodeError> {
        self.rows.push(record.clone());
        Ok(())
    }

    fn update(&mut self, row: usize, record: &CodeRecord) -> Result<(), CodeError> {
        match self.rows.get_mut(row) {
            Some(slot) => {
                *slot = record.clone();
                Ok(())
            }
            None => Err(CodeError::MalformedRow(format!(
                "row {row} out of range for update"
            ))),
        }
    }
}
