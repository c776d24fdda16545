//! Generic CRUD manager over one table of the store engine.

use crate::identity::RecordId;
use crate::model::record::{merge_shallow, Payload, Record};
use crate::store::StoreEngine;
use crate::table::{TableEntity, TableError, TableResult};
use std::marker::PhantomData;

/// Type-safe façade over the table `E::TABLE`.
///
/// Borrows the shared engine: the engine outlives every manager. All calls
/// are synchronous on one thread, so a mutation for an id has returned
/// before the next mutation for that id is accepted; that is the per-id
/// ordering guarantee callers rely on.
pub struct TableManager<'eng, E: TableEntity> {
    engine: &'eng StoreEngine,
    _entity: PhantomData<E>,
}

impl<'eng, E: TableEntity> TableManager<'eng, E> {
    pub fn new(engine: &'eng StoreEngine) -> Self {
        Self {
            engine,
            _entity: PhantomData,
        }
    }

    pub fn table(&self) -> &'static str {
        E::TABLE
    }

    /// Mints an id, validates the payload through the entity conversion,
    /// persists, and returns the typed entity.
    ///
    /// Validation runs before the write, so a rejected payload leaves the
    /// table untouched.
    pub fn create(&self, payload: Payload) -> TableResult<E> {
        let record = Record::new(RecordId::generate(), E::TABLE, payload);
        let entity = E::from_record(&record)?;
        self.engine.put(&record)?;
        Ok(entity)
    }

    /// Reads one entity; absent ids are a semantic `NotFound`.
    pub fn read(&self, id: &RecordId) -> TableResult<E> {
        match self.engine.get(E::TABLE, id)? {
            Some(record) => Ok(E::from_record(&record)?),
            None => Err(TableError::NotFound(id.clone())),
        }
    }

    /// Shallow-merges `partial` into the stored payload and persists.
    ///
    /// Supplied keys replace, omitted keys are retained. Fails with
    /// `NotFound` when `id` does not exist; a merge that fails validation
    /// leaves the stored record unchanged.
    pub fn update(&self, id: &RecordId, partial: &Payload) -> TableResult<E> {
        let existing = self
            .engine
            .get(E::TABLE, id)?
            .ok_or_else(|| TableError::NotFound(id.clone()))?;

        let merged = Record::new(
            id.clone(),
            E::TABLE,
            merge_shallow(&existing.payload, partial),
        );
        let entity = E::from_record(&merged)?;
        self.engine.put(&merged)?;
        Ok(entity)
    }

    /// Removes one record; deleting an absent id is a no-op.
    pub fn remove(&self, id: &RecordId) -> TableResult<()> {
        self.engine.delete(E::TABLE, id)?;
        Ok(())
    }

    /// Snapshot of every entity in the table, recency-ordered.
    pub fn all(&self) -> TableResult<Vec<E>> {
        let records = self.engine.list(E::TABLE)?;
        records
            .iter()
            .map(|record| E::from_record(record).map_err(TableError::from))
            .collect()
    }

    /// Upserts a record whose id was minted elsewhere (read-through cache
    /// fill, remote overwrite). Validates like `create`.
    pub fn seed(&self, id: &RecordId, payload: Payload) -> TableResult<E> {
        let record = Record::new(id.clone(), E::TABLE, payload);
        let entity = E::from_record(&record)?;
        self.engine.put(&record)?;
        Ok(entity)
    }
}
