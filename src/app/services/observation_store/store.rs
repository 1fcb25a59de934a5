//! SQLite gateway implementation
//!
//! Schema is migrated on open using the `user_version` pragma. All writes
//! that must be atomic go through the transaction helper.

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::app::models::{CellValue, Indicator, Observation, PregenPart};
use crate::constants;
use crate::{Error, Result};

const SCHEMA_VERSION: i64 = 1;

const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS indicators (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    file_name TEXT
);

CREATE TABLE IF NOT EXISTS pregen_parts (
    id INTEGER PRIMARY KEY,
    indicator_id INTEGER NOT NULL REFERENCES indicators(id) ON DELETE CASCADE,
    time_type TEXT NOT NULL,
    time_value TEXT NOT NULL,
    key_type TEXT NOT NULL,
    column_name TEXT NOT NULL,
    file_name TEXT NOT NULL,
    position INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS observations (
    id INTEGER PRIMARY KEY,
    indicator_id INTEGER NOT NULL REFERENCES indicators(id) ON DELETE CASCADE,
    time_type TEXT NOT NULL,
    time_key TEXT NOT NULL,
    key_unit_type TEXT NOT NULL,
    key_value TEXT NOT NULL,
    data_type TEXT NOT NULL CHECK (data_type IN ('numeric', 'string')),
    numeric_value REAL,
    string_value TEXT,
    CHECK ((numeric_value IS NULL) <> (string_value IS NULL))
);

CREATE INDEX IF NOT EXISTS idx_observations_indicator
    ON observations(indicator_id);

CREATE INDEX IF NOT EXISTS idx_pregen_parts_indicator
    ON pregen_parts(indicator_id);
";

/// Input record for part replacement; ids and positions are store-assigned
#[derive(Debug, Clone, PartialEq)]
pub struct NewPart {
    pub time_type: String,
    pub time_value: String,
    pub key_type: String,
    pub column_name: String,
    pub file_name: String,
}

/// Embedded SQLite store for indicators, parts and observations
#[derive(Clone)]
pub struct SqliteObservationStore {
    conn: Arc<Mutex<Connection>>,
}

impl std::fmt::Debug for SqliteObservationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteObservationStore")
            .finish_non_exhaustive()
    }
}

impl SqliteObservationStore {
    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| Error::storage("SQLite connection mutex poisoned", None))?;
        f(&conn)
    }

    pub(crate) fn with_tx<T>(
        &self,
        f: impl FnOnce(&rusqlite::Transaction<'_>) -> Result<T>,
    ) -> Result<T> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|_| Error::storage("SQLite connection mutex poisoned", None))?;
        let tx = conn.transaction()?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }

    /// Open (or create) the store at the given path and migrate its schema
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.migrate()?;
        debug!("Opened observation store at {}", path.display());
        Ok(store)
    }

    /// In-memory store for tests and dry inspection
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<()> {
        self.with_conn(|conn| {
            let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
            if version < SCHEMA_VERSION {
                conn.execute_batch(SCHEMA)?;
                conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
                debug!("Migrated store schema {} -> {}", version, SCHEMA_VERSION);
            }
            Ok(())
        })
    }

    // =========================================================================
    // Indicator metadata
    // =========================================================================

    /// Insert or update an indicator by name, returning its id
    pub fn upsert_indicator(&self, name: &str, file_name: Option<&str>) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                r"
                INSERT INTO indicators(name, file_name)
                VALUES (?1, ?2)
                ON CONFLICT(name) DO UPDATE SET
                  file_name = excluded.file_name
                ",
                params![name, file_name],
            )?;
            let id = conn.query_row(
                "SELECT id FROM indicators WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )?;
            Ok(id)
        })
    }

    /// Look up an indicator by its unique name
    pub fn find_indicator(&self, name: &str) -> Result<Indicator> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, name, file_name FROM indicators WHERE name = ?1",
                params![name],
                |row| {
                    Ok(Indicator {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        file_name: row.get(2)?,
                    })
                },
            )
            .optional()?
            .ok_or_else(|| Error::indicator_not_found(name))
        })
    }

    /// List all indicators ordered by name
    pub fn list_indicators(&self) -> Result<Vec<Indicator>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, name, file_name FROM indicators ORDER BY name ASC")?;
            let rows = stmt.query_map([], |row| {
                Ok(Indicator {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    file_name: row.get(2)?,
                })
            })?;

            let mut out = Vec::new();
            for row in rows {
                out.push(row?);
            }
            Ok(out)
        })
    }

    // =========================================================================
    // Pregen parts
    // =========================================================================

    /// Replace an indicator's parts wholesale, positions from slice order
    pub fn replace_parts(&self, indicator_id: i64, parts: &[NewPart]) -> Result<usize> {
        self.with_tx(|tx| {
            tx.execute(
                "DELETE FROM pregen_parts WHERE indicator_id = ?1",
                params![indicator_id],
            )?;

            let mut stmt = tx.prepare(
                r"
                INSERT INTO pregen_parts
                    (indicator_id, time_type, time_value, key_type, column_name, file_name, position)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                ",
            )?;
            for (position, part) in parts.iter().enumerate() {
                stmt.execute(params![
                    indicator_id,
                    part.time_type,
                    part.time_value,
                    part.key_type,
                    part.column_name,
                    part.file_name,
                    position as i64,
                ])?;
            }
            Ok(parts.len())
        })
    }

    /// Parts for an indicator, ordered by position
    pub fn parts_for(&self, indicator_id: i64) -> Result<Vec<PregenPart>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                r"
                SELECT id, indicator_id, time_type, time_value, key_type,
                       column_name, file_name, position
                FROM pregen_parts
                WHERE indicator_id = ?1
                ORDER BY position ASC
                ",
            )?;
            let rows = stmt.query_map(params![indicator_id], |row| {
                Ok(PregenPart {
                    id: row.get(0)?,
                    indicator_id: row.get(1)?,
                    time_type: row.get(2)?,
                    time_value: row.get(3)?,
                    key_type: row.get(4)?,
                    column_name: row.get(5)?,
                    file_name: row.get(6)?,
                    position: row.get(7)?,
                })
            })?;

            let mut out = Vec::new();
            for row in rows {
                out.push(row?);
            }
            Ok(out)
        })
    }

    // =========================================================================
    // Observations
    // =========================================================================

    /// Replace an indicator's observations in one transaction
    ///
    /// Deletes every stored observation for the indicator, then inserts the
    /// new sequence. Either both steps commit or neither does, so a failed
    /// insert leaves the prior data visible.
    pub fn replace_observations(
        &self,
        indicator_id: i64,
        observations: &[Observation],
    ) -> Result<usize> {
        self.with_tx(|tx| {
            tx.execute(
                "DELETE FROM observations WHERE indicator_id = ?1",
                params![indicator_id],
            )?;

            let mut stmt = tx.prepare(
                r"
                INSERT INTO observations
                    (indicator_id, time_type, time_key, key_unit_type, key_value,
                     data_type, numeric_value, string_value)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                ",
            )?;
            for obs in observations {
                let (numeric_value, string_value) = match &obs.value {
                    CellValue::Numeric(v) => (Some(*v), None),
                    CellValue::Text(s) => (None, Some(s.as_str())),
                };
                stmt.execute(params![
                    indicator_id,
                    obs.time_type,
                    obs.time_key,
                    obs.key_unit_type,
                    obs.key_value,
                    obs.value.data_type(),
                    numeric_value,
                    string_value,
                ])?;
            }
            Ok(observations.len())
        })
    }

    /// Number of stored observations for an indicator
    pub fn count_observations(&self, indicator_id: i64) -> Result<usize> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM observations WHERE indicator_id = ?1",
                params![indicator_id],
                |row| row.get(0),
            )?;
            Ok(count as usize)
        })
    }

    /// Stored observations for an indicator, in insertion order
    pub fn observations_for(&self, indicator_id: i64) -> Result<Vec<Observation>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                r"
                SELECT indicator_id, time_type, time_key, key_unit_type, key_value,
                       data_type, numeric_value, string_value
                FROM observations
                WHERE indicator_id = ?1
                ORDER BY id ASC
                ",
            )?;
            let rows = stmt.query_map(params![indicator_id], |row| {
                let data_type: String = row.get(5)?;
                let value = if data_type == constants::DATA_TYPE_NUMERIC {
                    CellValue::Numeric(row.get(6)?)
                } else {
                    CellValue::Text(row.get(7)?)
                };
                Ok(Observation {
                    indicator_id: row.get(0)?,
                    time_type: row.get(1)?,
                    time_key: row.get(2)?,
                    key_unit_type: row.get(3)?,
                    key_value: row.get(4)?,
                    value,
                })
            })?;

            let mut out = Vec::new();
            for row in rows {
                out.push(row?);
            }
            Ok(out)
        })
    }
}
