// rulekeeper-core/src/domain/catalog.rs

use serde::{Deserialize, Serialize};

use crate::domain::nullable::null_as_default;

/// Answer of `GET /api/v1/database/connect`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub database_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tables: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub column_name: String,
    pub data_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_nullable: bool,
    #[serde(default)]
    pub column_default: Option<String>,
    #[serde(default)]
    pub character_maximum_length: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub column_name: String,
    pub references_table: String,
    pub references_column: String,
}

/// Backend-owned description of one table. Primary keys and foreign keys
/// are expected to name columns of `columns`; nothing here checks it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    pub table_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub columns: Vec<Column>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub primary_keys: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub foreign_keys: Vec<ForeignKey>,
}

impl TableSchema {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.column_name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.column_name.as_str()).collect()
    }

    pub fn is_primary_key(&self, name: &str) -> bool {
        self.primary_keys.iter().any(|pk| pk == name)
    }

    pub fn foreign_key(&self, name: &str) -> Option<&ForeignKey> {
        self.foreign_keys.iter().find(|fk| fk.column_name == name)
    }
}

/// Drops the backend's bookkeeping tables from a listing, keeping order.
pub fn visible_tables<S: AsRef<str>>(tables: &[String], internal: &[S]) -> Vec<String> {
    tables
        .iter()
        .filter(|t| !internal.iter().any(|i| i.as_ref() == t.as_str()))
        .cloned()
        .collect()
}
