//! In-memory implementation of the TableStore trait.

use async_trait::async_trait;
use formbridge_core::{CoreError, StoreRequest, TableStore};
use parking_lot::RwLock;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct FakeTable {
    columns: Vec<Value>,
    rows: Vec<Map<String, Value>>,
}

/// Table store holding tables in memory and answering `evaluate` like the
/// remote service does.
#[derive(Clone)]
pub struct FakeTableStore {
    key: String,
    tables: Arc<RwLock<HashMap<String, FakeTable>>>,
    requests: Arc<RwLock<Vec<StoreRequest>>>,
    unavailable: Arc<AtomicBool>,
    reject_writes: Arc<AtomicBool>,
}

impl fmt::Debug for FakeTableStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeTableStore")
            .field("key", &self.key)
            .field("table_count", &self.tables.read().len())
            .field("request_count", &self.requests.read().len())
            .finish()
    }
}

impl FakeTableStore {
    /// Creates an empty store that accepts requests carrying `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            tables: Arc::new(RwLock::new(HashMap::new())),
            requests: Arc::new(RwLock::new(Vec::new())),
            unavailable: Arc::new(AtomicBool::new(false)),
            reject_writes: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Adds a table with `(name, dataType)` columns.
    pub fn with_table(self, table: &str, columns: &[(&str, &str)]) -> Self {
        let columns = columns
            .iter()
            .map(|(name, data_type)| json!({"name": name, "dataType": data_type}))
            .collect();
        self.tables.write().insert(
            table.to_string(),
            FakeTable {
                columns,
                rows: Vec::new(),
            },
        );
        self
    }

    /// Makes every request fail as if the service were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Makes row creation fail while schema reads keep working.
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    /// Rows written to `table` so far.
    pub fn rows(&self, table: &str) -> Vec<Map<String, Value>> {
        self.tables
            .read()
            .get(table)
            .map(|t| t.rows.clone())
            .unwrap_or_default()
    }

    /// Every request received, in order.
    pub fn requests(&self) -> Vec<StoreRequest> {
        self.requests.read().clone()
    }
}

#[async_trait]
impl TableStore for FakeTableStore {
    async fn evaluate(&self, request: &StoreRequest) -> Result<Value, CoreError> {
        self.requests.write().push(request.clone());

        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CoreError::StoreUnavailable("service unavailable".to_string()));
        }

        match request {
            StoreRequest::ReadTableSchema { key, table } => {
                if *key != self.key {
                    return Err(CoreError::StoreUnavailable("invalid key".to_string()));
                }
                let tables = self.tables.read();
                let found = tables
                    .get(table)
                    .ok_or_else(|| CoreError::StoreUnavailable(format!("no such table: {}", table)))?;
                Ok(json!({"columns": found.columns, "rows": []}))
            }
            StoreRequest::CreateEntry { key, table, entry } => {
                if *key != self.key {
                    return Err(CoreError::StoreUnavailable("invalid key".to_string()));
                }
                if self.reject_writes.load(Ordering::SeqCst) {
                    return Err(CoreError::StoreUnavailable(format!("write to {} rejected", table)));
                }
                let mut tables = self.tables.write();
                let found = tables
                    .get_mut(table)
                    .ok_or_else(|| CoreError::StoreUnavailable(format!("no such table: {}", table)))?;
                found.rows.push(entry.clone());
                Ok(json!({"success": true, "id": found.rows.len()}))
            }
        }
    }
}
