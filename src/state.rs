use crate::models::SalesRecord;
use chrono::NaiveDate;
use std::sync::Arc;

/// Dataset plus cutoff, built once at startup and shared immutably with
/// every handler. Recomputation happens per request; nothing here changes.
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<Vec<SalesRecord>>,
    pub cutoff: NaiveDate,
}

impl AppState {
    pub fn new(records: Vec<SalesRecord>, cutoff: NaiveDate) -> Self {
        Self {
            records: Arc::new(records),
            cutoff,
        }
    }
}
