//! SQLite-backed record engine.
//!
//! All logical tables share one physical `records` table partitioned by
//! `table_name`; operations never cross the partition they were given.

use crate::identity::RecordId;
use crate::model::record::{Payload, Record};
use crate::store::{StoreError, StoreResult};
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

/// Durable record storage shared by every table manager in the process.
///
/// The engine owns the connection; managers borrow the engine, so its
/// lifetime exceeds any one manager.
pub struct StoreEngine {
    conn: Connection,
}

impl StoreEngine {
    /// Wraps an already-bootstrapped connection (see [`crate::db`]).
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Reads one record; `Ok(None)` when absent.
    ///
    /// A row whose payload no longer decodes as a JSON object is reported
    /// as [`StoreError::Corrupt`].
    pub fn get(&self, table: &'static str, id: &RecordId) -> StoreResult<Option<Record>> {
        let row: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM records WHERE table_name = ?1 AND id = ?2;",
                params![table, id.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        match row {
            Some(raw) => {
                let payload = decode_payload(table, id, &raw)?;
                Ok(Some(Record::new(id.clone(), table, payload)))
            }
            None => Ok(None),
        }
    }

    /// Upserts one record by `(table, id)`. Idempotent.
    pub fn put(&self, record: &Record) -> StoreResult<()> {
        let raw = serde_json::to_string(&Value::Object(record.payload.clone()))
            .map_err(|err| StoreError::Fault(format!("payload serialization failed: {err}")))?;

        self.conn.execute(
            "INSERT INTO records (table_name, id, payload) VALUES (?1, ?2, ?3)
             ON CONFLICT (table_name, id) DO UPDATE SET
                payload = excluded.payload,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![record.table, record.id.as_str(), raw],
        )?;

        debug!(
            "event=store_put module=store status=ok table={} id={}",
            record.table, record.id
        );
        Ok(())
    }

    /// Removes one record; a missing record is not an error.
    pub fn delete(&self, table: &'static str, id: &RecordId) -> StoreResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM records WHERE table_name = ?1 AND id = ?2;",
            params![table, id.as_str()],
        )?;
        debug!(
            "event=store_delete module=store status=ok table={table} id={id} existed={}",
            changed > 0
        );
        Ok(())
    }

    /// Returns a snapshot of a table's records in recency order.
    ///
    /// Rows whose payload no longer decodes are skipped with a warning,
    /// so one corrupt row degrades to a shorter listing instead of an
    /// unusable table.
    pub fn list(&self, table: &'static str) -> StoreResult<Vec<Record>> {
        self.list_filtered(table, |_| true)
    }

    /// [`Self::list`] restricted to records matching `predicate`.
    pub fn list_filtered(
        &self,
        table: &'static str,
        predicate: impl Fn(&Record) -> bool,
    ) -> StoreResult<Vec<Record>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, payload FROM records
             WHERE table_name = ?1
             ORDER BY updated_at DESC, id ASC;",
        )?;

        let mut rows = stmt.query(params![table])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let id = RecordId::from(row.get::<_, String>(0)?);
            let raw: String = row.get(1)?;
            match decode_payload(table, &id, &raw) {
                Ok(payload) => {
                    let record = Record::new(id, table, payload);
                    if predicate(&record) {
                        records.push(record);
                    }
                }
                Err(err) => {
                    warn!(
                        "event=store_list module=store status=skipped_corrupt_row table={table} id={id} error={err}"
                    );
                }
            }
        }

        Ok(records)
    }
}

fn decode_payload(table: &str, id: &RecordId, raw: &str) -> StoreResult<Payload> {
    let value: Value = serde_json::from_str(raw).map_err(|err| {
        StoreError::Corrupt(format!("record {table}/{id} payload is not JSON: {err}"))
    })?;
    match value {
        Value::Object(payload) => Ok(payload),
        other => Err(StoreError::Corrupt(format!(
            "record {table}/{id} payload is not an object: {other}"
        ))),
    }
}
