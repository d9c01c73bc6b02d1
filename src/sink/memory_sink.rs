//! In-memory sink with callbacks and filtering
//!
//! This module provides thread-safe record storage with support for callbacks,
//! filtering by kind and custom predicates. It is the sink to hand a tracer when
//! the application wants to inspect what was traced, and the one the tests use.

use super::trace_record::{RecordKind, TraceRecord};
use super::TraceSink;
use crate::error::Result;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Type alias for record callback functions
pub type RecordCallback = Arc<dyn Fn(&TraceRecord) + Send + Sync>;

/// Store for capturing and querying trace records
///
/// Clones share the same storage, so a test can keep one handle and give
/// another to a tracer.
#[derive(Clone)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<TraceRecord>>>,
    on_store_callback: Option<RecordCallback>,
}

impl MemorySink {
    /// Create a new memory sink
    ///
    /// # Arguments
    ///
    /// * `on_store_callback` - Optional callback function called whenever a record is stored
    pub fn new(on_store_callback: Option<RecordCallback>) -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            on_store_callback,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<TraceRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a record
    ///
    /// If a callback is configured, it is called with the record before it is stored.
    pub fn store(&self, record: TraceRecord) {
        if let Some(callback) = &self.on_store_callback {
            callback(&record);
        }

        self.lock().push(record);
    }

    /// Copy of every stored record, in emission order
    pub fn records(&self) -> Vec<TraceRecord> {
        self.lock().clone()
    }

    /// Rendered text of every stored record, in emission order
    pub fn texts(&self) -> Vec<String> {
        self.lock().iter().map(|r| r.text.clone()).collect()
    }

    /// Count records matching filters
    ///
    /// # Arguments
    ///
    /// * `kind` - Only count records of this kind
    /// * `filter_func` - Custom filter function to apply to records
    pub fn count_records(
        &self,
        kind: Option<RecordKind>,
        filter_func: Option<&dyn Fn(&TraceRecord) -> bool>,
    ) -> usize {
        self.lock().iter().filter(|r| matches_filters(r, kind, filter_func)).count()
    }

    /// Get summaries of records matching filters
    ///
    /// Returns printable summaries instead of cloning records
    pub fn get_record_summaries(
        &self,
        kind: Option<RecordKind>,
        filter_func: Option<&dyn Fn(&TraceRecord) -> bool>,
    ) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|r| matches_filters(r, kind, filter_func))
            .map(TraceRecord::printable_summary)
            .collect()
    }

    /// Get the last N record summaries, optionally filtered
    ///
    /// # Arguments
    ///
    /// * `n` - Number of records to return
    /// * `filter_func` - Optional custom filter function
    pub fn get_last_n_summaries(
        &self,
        n: usize,
        filter_func: Option<&dyn Fn(&TraceRecord) -> bool>,
    ) -> Vec<String> {
        let records = self.lock();

        let filtered: Vec<_> = records.iter().filter(|r| matches_filters(r, None, filter_func)).collect();
        let start_idx = filtered.len().saturating_sub(n);

        filtered[start_idx..].iter().map(|r| r.printable_summary()).collect()
    }

    /// Serialize every stored record as a JSON array
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&*self.lock())?)
    }

    /// Clear all records from the sink
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Get the total number of records in the sink
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if the sink is empty
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

fn matches_filters(
    record: &TraceRecord,
    kind: Option<RecordKind>,
    filter_func: Option<&dyn Fn(&TraceRecord) -> bool>,
) -> bool {
    if let Some(kind) = kind {
        if record.kind != kind {
            return false;
        }
    }
    filter_func.map_or(true, |filter| filter(record))
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new(None)
    }
}

impl TraceSink for MemorySink {
    fn emit(&self, record: &TraceRecord) {
        self.store(record.clone());
    }
}
