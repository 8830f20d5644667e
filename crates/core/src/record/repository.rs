//! Persistence seams for records and general taxes.
//!
//! The traits are implemented by storage crates; the in-memory versions back
//! the CLI and the tests.

use std::future::Future;
use std::marker::PhantomData;

use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use tally_shared::types::{GeneralTaxId, WorkspaceId};

use super::error::RecordError;
use super::types::FinancialRecord;
use crate::workspace::GeneralTax;

/// Repository trait for record persistence.
pub trait RecordRepository<T: FinancialRecord>: Send + Sync {
    /// Inserts or updates a record.
    ///
    /// Inserts assign the key, version 0 and the recorded time. Updates must
    /// carry the stored version and bump it by one.
    fn save(&self, record: T) -> impl Future<Output = Result<T, RecordError>> + Send;

    /// Finds a record by key within a workspace.
    fn find_by_id(
        &self,
        workspace_id: WorkspaceId,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<T>, RecordError>> + Send;
}

/// Repository trait for general tax lookup.
pub trait GeneralTaxRepository: Send + Sync {
    /// Finds a general tax by id within a workspace.
    fn find_by_id(
        &self,
        workspace_id: WorkspaceId,
        id: GeneralTaxId,
    ) -> impl Future<Output = Result<Option<GeneralTax>, RecordError>> + Send;
}

/// In-memory record repository with optimistic locking.
#[derive(Debug)]
pub struct InMemoryRecordRepository<T> {
    records: DashMap<Uuid, T>,
    _record: PhantomData<fn() -> T>,
}

impl<T: FinancialRecord> InMemoryRecordRepository<T> {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            _record: PhantomData,
        }
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn save_now(&self, record: T) -> Result<T, RecordError> {
        let now = Utc::now();

        let Some(id) = record.key() else {
            let id = Uuid::now_v7();
            let saved = record.stamped(id, 0, now);
            self.records.insert(id, saved.clone());
            return Ok(saved);
        };

        // The shard stays write-locked between the version check and the write.
        let mut stored = self
            .records
            .get_mut(&id)
            .filter(|stored| stored.workspace_id() == record.workspace_id())
            .ok_or(RecordError::NotFound { kind: T::KIND, id })?;

        if stored.version() != record.version() {
            return Err(RecordError::ConcurrentModification {
                kind: T::KIND,
                id,
                expected: stored.version(),
                actual: record.version(),
            });
        }

        let time_recorded = stored.time_recorded().unwrap_or(now);
        let saved = record.stamped(id, stored.version() + 1, time_recorded);
        *stored = saved.clone();
        Ok(saved)
    }
}

impl<T: FinancialRecord> Default for InMemoryRecordRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FinancialRecord> RecordRepository<T> for InMemoryRecordRepository<T> {
    fn save(&self, record: T) -> impl Future<Output = Result<T, RecordError>> + Send {
        let result = self.save_now(record);
        async move { result }
    }

    fn find_by_id(
        &self,
        workspace_id: WorkspaceId,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<T>, RecordError>> + Send {
        let found = self
            .records
            .get(&id)
            .filter(|record| record.workspace_id() == workspace_id)
            .map(|record| record.value().clone());
        async move { Ok(found) }
    }
}

/// In-memory general tax repository.
#[derive(Debug, Default)]
pub struct InMemoryGeneralTaxRepository {
    taxes: DashMap<GeneralTaxId, GeneralTax>,
}

impl InMemoryGeneralTaxRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces a tax.
    pub fn insert(&self, tax: GeneralTax) {
        self.taxes.insert(tax.id, tax);
    }
}

impl GeneralTaxRepository for InMemoryGeneralTaxRepository {
    fn find_by_id(
        &self,
        workspace_id: WorkspaceId,
        id: GeneralTaxId,
    ) -> impl Future<Output = Result<Option<GeneralTax>, RecordError>> + Send {
        let found = self
            .taxes
            .get(&id)
            .filter(|tax| tax.workspace_id == workspace_id)
            .map(|tax| tax.value().clone());
        async move { Ok(found) }
    }
}
