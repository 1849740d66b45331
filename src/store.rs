//! Student record store
//!
//! The classifier treats the store as an external collaborator: fetch
//! the full collection, then issue targeted risk-field updates. The
//! default implementation is an embedded redb database; an in-memory
//! store backs tests and dry runs.
//!
//! A store value is a scoped session: open it for a unit of work and
//! let Drop release it on every exit path. At most one writer is
//! assumed; the store does not defend against concurrent mutation of
//! the same record.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::Path;

use redb::{Database, ReadableTable, TableDefinition};
use thiserror::Error;
use tracing::debug;

use crate::models::{RiskUpdate, StudentRecord};

const STUDENTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("students");

/// Errors from the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to prepare store directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to open student store: {0}")]
    Open(#[source] redb::Error),

    #[error("failed to read student records: {0}")]
    Read(#[source] redb::Error),

    #[error("failed to write student record {id}: {source}")]
    Write {
        id: String,
        #[source]
        source: redb::Error,
    },

    #[error("no student record with id {0}")]
    NotFound(String),

    #[error("corrupt student record {id}: {source}")]
    Corrupt {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Interface the batch scorer consumes.
///
/// `fetch_all` returns records in stable key order; batch processing
/// follows that order exactly.
pub trait StudentStore {
    fn fetch_all(&self) -> Result<Vec<StudentRecord>, StoreError>;

    /// Write the two risk output fields of one record.
    fn update_risk(&self, id: &str, update: RiskUpdate) -> Result<(), StoreError>;
}

/// redb-backed student store. Records are JSON rows keyed by id.
pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Create or open the store file at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::create(path).map_err(|e| StoreError::Open(e.into()))?;

        // Create the table up front so an empty store reads as empty
        // instead of erroring on a missing table.
        let txn = db.begin_write().map_err(|e| StoreError::Open(e.into()))?;
        txn.open_table(STUDENTS_TABLE)
            .map_err(|e| StoreError::Open(e.into()))?;
        txn.commit().map_err(|e| StoreError::Open(e.into()))?;

        debug!(path = %path.display(), "opened student store");
        Ok(Self { db })
    }

    /// Insert or replace a full record. Store-owner operation, not part
    /// of the scoring interface.
    pub fn insert(&self, record: &StudentRecord) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(record).map_err(|e| StoreError::Corrupt {
            id: record.id.clone(),
            source: e,
        })?;

        let txn = self.db.begin_write().map_err(|e| StoreError::Write {
            id: record.id.clone(),
            source: e.into(),
        })?;
        {
            let mut table = txn
                .open_table(STUDENTS_TABLE)
                .map_err(|e| StoreError::Write {
                    id: record.id.clone(),
                    source: e.into(),
                })?;
            table
                .insert(record.id.as_str(), bytes.as_slice())
                .map_err(|e| StoreError::Write {
                    id: record.id.clone(),
                    source: e.into(),
                })?;
        }
        txn.commit().map_err(|e| StoreError::Write {
            id: record.id.clone(),
            source: e.into(),
        })?;
        Ok(())
    }
}

impl StudentStore for RedbStore {
    fn fetch_all(&self) -> Result<Vec<StudentRecord>, StoreError> {
        let txn = self.db.begin_read().map_err(|e| StoreError::Read(e.into()))?;
        let table = txn
            .open_table(STUDENTS_TABLE)
            .map_err(|e| StoreError::Read(e.into()))?;

        let mut records = Vec::new();
        for row in table.iter().map_err(|e| StoreError::Read(e.into()))? {
            let (key, value) = row.map_err(|e| StoreError::Read(e.into()))?;
            let record =
                serde_json::from_slice(value.value()).map_err(|e| StoreError::Corrupt {
                    id: key.value().to_string(),
                    source: e,
                })?;
            records.push(record);
        }
        Ok(records)
    }

    fn update_risk(&self, id: &str, update: RiskUpdate) -> Result<(), StoreError> {
        let txn = self.db.begin_write().map_err(|e| StoreError::Write {
            id: id.to_string(),
            source: e.into(),
        })?;
        {
            let mut table = txn
                .open_table(STUDENTS_TABLE)
                .map_err(|e| StoreError::Write {
                    id: id.to_string(),
                    source: e.into(),
                })?;

            let mut record: StudentRecord = match table.get(id).map_err(|e| StoreError::Write {
                id: id.to_string(),
                source: e.into(),
            })? {
                Some(guard) => {
                    serde_json::from_slice(guard.value()).map_err(|e| StoreError::Corrupt {
                        id: id.to_string(),
                        source: e,
                    })?
                }
                None => return Err(StoreError::NotFound(id.to_string())),
            };

            record.risk_tier = Some(update.risk_tier);
            record.risk_probability = Some(update.probability);

            let bytes = serde_json::to_vec(&record).map_err(|e| StoreError::Corrupt {
                id: id.to_string(),
                source: e,
            })?;
            table
                .insert(id, bytes.as_slice())
                .map_err(|e| StoreError::Write {
                    id: id.to_string(),
                    source: e.into(),
                })?;
        }
        txn.commit().map_err(|e| StoreError::Write {
            id: id.to_string(),
            source: e.into(),
        })
    }
}

/// In-memory store for tests and dry runs. Same key-ordered iteration
/// as the redb store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<BTreeMap<String, StudentRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = StudentRecord>) -> Self {
        Self {
            records: RefCell::new(
                records
                    .into_iter()
                    .map(|r| (r.id.clone(), r))
                    .collect(),
            ),
        }
    }

    pub fn get(&self, id: &str) -> Option<StudentRecord> {
        self.records.borrow().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl StudentStore for MemoryStore {
    fn fetch_all(&self) -> Result<Vec<StudentRecord>, StoreError> {
        Ok(self.records.borrow().values().cloned().collect())
    }

    fn update_risk(&self, id: &str, update: RiskUpdate) -> Result<(), StoreError> {
        let mut records = self.records.borrow_mut();
        let record = records
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        record.risk_tier = Some(update.risk_tier);
        record.risk_probability = Some(update.probability);
        Ok(())
    }
}
