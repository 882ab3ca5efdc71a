//! Requests understood by the external table store

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::schema::ColumnDescriptor;

/// A request to the table store's single `evaluate` entry point
#[derive(Debug, Clone, PartialEq)]
pub enum StoreRequest {
    /// Read a table's column schema without rows
    ReadTableSchema {
        /// Store key
        key: String,
        /// Table name
        table: String,
    },
    /// Append one row
    CreateEntry {
        /// Store key
        key: String,
        /// Table name
        table: String,
        /// Column to value
        entry: Map<String, Value>,
    },
}

impl StoreRequest {
    /// Build a schema read request
    pub fn read_table_schema(key: impl Into<String>, table: impl Into<String>) -> Self {
        StoreRequest::ReadTableSchema {
            key: key.into(),
            table: table.into(),
        }
    }

    /// Build an entry creation request
    pub fn create_entry(
        key: impl Into<String>,
        table: impl Into<String>,
        entry: Map<String, Value>,
    ) -> Self {
        StoreRequest::CreateEntry {
            key: key.into(),
            table: table.into(),
            entry,
        }
    }

    /// Short name used in logs
    pub fn action(&self) -> &'static str {
        match self {
            StoreRequest::ReadTableSchema { .. } => "read",
            StoreRequest::CreateEntry { .. } => "create",
        }
    }

    /// Table the request targets
    pub fn table(&self) -> &str {
        match self {
            StoreRequest::ReadTableSchema { table, .. } | StoreRequest::CreateEntry { table, .. } => table,
        }
    }

    /// The request object as the store expects it on the wire
    pub fn to_json(&self) -> Value {
        match self {
            StoreRequest::ReadTableSchema { key, table } => json!({
                "key": key,
                "action": "read",
                "type": "table",
                "table": table,
                "columnInfo": true,
                "page": 1,
                "limit": 0,
            }),
            StoreRequest::CreateEntry { key, table, entry } => json!({
                "key": key,
                "action": "create",
                "type": "entry",
                "table": table,
                "entry": entry,
            }),
        }
    }
}

/// Reply to a schema read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Columns in table order
    pub columns: Vec<ColumnDescriptor>,
}
