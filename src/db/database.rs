//! The shared database handle.
//!
//! One `Database` is constructed at startup and passed (cloned, it is a
//! cheap `Arc` handle) to every consumer — there is no global singleton.
//! The first caller to touch it opens the file, runs migrations and seeds
//! fixtures; concurrent early callers await that same in-flight
//! initialization instead of starting a second one.

use std::path::PathBuf;
use std::sync::Arc;

use rusqlite::types::Value;
use rusqlite::Connection;
use tokio::sync::{Mutex, OnceCell};

use super::{seed, sqlite, DatabaseError};

enum Location {
    Disk(PathBuf),
    Memory,
}

/// Handle to the single on-device database.
///
/// All access is awaitable but executes against the engine sequentially:
/// one connection, guarded by an async mutex, held for process lifetime.
#[derive(Clone)]
pub struct Database {
    inner: Arc<Inner>,
}

struct Inner {
    location: Location,
    // Single-flight initialization: the cell's initializer runs at most
    // once; every concurrent caller awaits the same future.
    conn: OnceCell<Mutex<Connection>>,
}

impl Database {
    /// Handle for the database file at `path`. Nothing is opened until the
    /// first access.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(Inner {
                location: Location::Disk(path.into()),
                conn: OnceCell::new(),
            }),
        }
    }

    /// Handle for a private in-memory database (for testing).
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(Inner {
                location: Location::Memory,
                conn: OnceCell::new(),
            }),
        }
    }

    /// Open, migrate and seed the database if that has not happened yet.
    ///
    /// Idempotent: later calls are free no-ops, concurrent calls share one
    /// in-flight initialization. Open and migration failures propagate;
    /// a seeding failure is logged and the store stays usable.
    pub async fn ensure_initialized(&self) -> Result<(), DatabaseError> {
        self.connection().await.map(|_| ())
    }

    async fn connection(&self) -> Result<&Mutex<Connection>, DatabaseError> {
        self.inner
            .conn
            .get_or_try_init(|| async {
                let conn = match &self.inner.location {
                    Location::Disk(path) => {
                        if let Some(parent) = path.parent() {
                            let _ = std::fs::create_dir_all(parent);
                        }
                        sqlite::open_database(path)?
                    }
                    Location::Memory => sqlite::open_memory_database()?,
                };

                if let Err(e) = seed::seed_reference_data(&conn) {
                    tracing::warn!("Seeding failed, continuing without fixtures: {e}");
                }

                tracing::info!("Database ready");
                Ok(Mutex::new(conn))
            })
            .await
    }

    /// Run a read statement with positional parameters and collect its rows.
    pub async fn query(&self, sql: &str, params: Vec<Value>) -> Result<Vec<SqlRow>, DatabaseError> {
        let conn = self.connection().await?;
        let conn = conn.lock().await;
        match query_sync(&conn, sql, &params) {
            Ok(rows) => Ok(rows),
            Err(e) => {
                tracing::error!(sql, "Query failed: {e}");
                Err(e)
            }
        }
    }

    /// Run a write statement (insert/update/delete) with positional parameters.
    pub async fn run(&self, sql: &str, params: Vec<Value>) -> Result<(), DatabaseError> {
        let conn = self.connection().await?;
        let conn = conn.lock().await;
        match conn.execute(sql, rusqlite::params_from_iter(params.iter())) {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::error!(sql, "Write failed: {e}");
                Err(e.into())
            }
        }
    }

    /// Typed access path: run a closure against the live connection.
    ///
    /// This is how the repository layer is reached through the handle —
    /// `db.with_conn(|conn| repository::list_patients(conn)).await`.
    pub async fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, DatabaseError>,
    ) -> Result<T, DatabaseError> {
        let conn = self.connection().await?;
        let conn = conn.lock().await;
        f(&conn)
    }
}

fn query_sync(conn: &Connection, sql: &str, params: &[Value]) -> Result<Vec<SqlRow>, DatabaseError> {
    let mut stmt = conn.prepare(sql)?;
    let columns: Arc<Vec<String>> =
        Arc::new(stmt.column_names().iter().map(|c| c.to_string()).collect());

    let mut rows = stmt.query(rusqlite::params_from_iter(params.iter()))?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(columns.len());
        for i in 0..columns.len() {
            values.push(row.get::<_, Value>(i)?);
        }
        out.push(SqlRow {
            columns: Arc::clone(&columns),
            values,
        });
    }
    Ok(out)
}

/// One result row, addressable by column name.
#[derive(Debug, Clone)]
pub struct SqlRow {
    columns: Arc<Vec<String>>,
    values: Vec<Value>,
}

impl SqlRow {
    pub fn get(&self, column: &str) -> Option<&Value> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.values.get(idx)
    }

    pub fn get_i64(&self, column: &str) -> Option<i64> {
        match self.get(column)? {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn get_str(&self, column: &str) -> Option<&str> {
        match self.get(column)? {
            Value::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository;
    use crate::models::{AttachmentTarget, NewAttachment, NewHealthDatum, NewPatient};

    #[tokio::test]
    async fn concurrent_initialization_runs_once() {
        let db = Database::in_memory();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let db = db.clone();
            handles.push(tokio::spawn(async move { db.ensure_initialized().await }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        // A second creation/seeding pass would have doubled the fixtures.
        let rows = db
            .query("SELECT COUNT(*) AS c FROM patients", vec![])
            .await
            .unwrap();
        assert_eq!(rows[0].get_i64("c"), Some(3));

        let rows = db
            .query("SELECT MAX(version) AS v FROM schema_version", vec![])
            .await
            .unwrap();
        assert_eq!(rows[0].get_i64("v"), Some(1));
    }

    #[tokio::test]
    async fn repeated_initialization_is_a_no_op() {
        let db = Database::in_memory();
        db.ensure_initialized().await.unwrap();
        db.ensure_initialized().await.unwrap();

        let rows = db
            .query("SELECT COUNT(*) AS c FROM types_donnees", vec![])
            .await
            .unwrap();
        assert_eq!(rows[0].get_i64("c"), Some(3));
    }

    #[tokio::test]
    async fn query_substitutes_positional_parameters() {
        let db = Database::in_memory();

        let rows = db
            .query(
                "SELECT * FROM patients WHERE patient_id = ?",
                vec![Value::Integer(3)],
            )
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get_str("nom"), Some("Bernard"));

        // Unmatched id returns an empty list, never the whole table.
        let rows = db
            .query(
                "SELECT * FROM patients WHERE patient_id = ?",
                vec![Value::Integer(999)],
            )
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn run_then_query_round_trip() {
        let db = Database::in_memory();

        db.run(
            "INSERT INTO types_examens (nom_type, description) VALUES (?, ?)",
            vec![Value::from("IRM".to_string()), Value::Null],
        )
        .await
        .unwrap();

        let rows = db
            .query(
                "SELECT nom_type, description FROM types_examens WHERE nom_type = ?",
                vec![Value::from("IRM".to_string())],
            )
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get_str("nom_type"), Some("IRM"));
        assert!(matches!(rows[0].get("description"), Some(Value::Null)));
    }

    #[tokio::test]
    async fn invalid_sql_propagates_after_logging() {
        let db = Database::in_memory();
        let result = db.query("SELECT * FROM no_such_table", vec![]).await;
        assert!(matches!(result, Err(DatabaseError::Sqlite(_))));
    }

    #[tokio::test]
    async fn disk_database_persists_across_handles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hospital.db");

        let db = Database::open(&path);
        db.run(
            "INSERT INTO patients (nom, prenom) VALUES (?, ?)",
            vec![
                Value::from("Moreau".to_string()),
                Value::from("Claire".to_string()),
            ],
        )
        .await
        .unwrap();
        drop(db);

        let db = Database::open(&path);
        let rows = db
            .query(
                "SELECT COUNT(*) AS c FROM patients WHERE nom = ?",
                vec![Value::from("Moreau".to_string())],
            )
            .await
            .unwrap();
        assert_eq!(rows[0].get_i64("c"), Some(1));
    }

    #[tokio::test]
    async fn attachment_scenario_end_to_end() {
        let db = Database::in_memory();

        let (datum_id, patient_id) = db
            .with_conn(|conn| {
                let patient_id = repository::insert_patient(
                    conn,
                    &NewPatient {
                        last_name: "Dupont".into(),
                        first_name: "Marie".into(),
                        ..Default::default()
                    },
                )?;
                let datum_id = repository::insert_health_datum(
                    conn,
                    &NewHealthDatum {
                        patient_id,
                        type_id: 1,
                        value: "B+".into(),
                        recorded_date: None,
                    },
                )?;
                Ok((datum_id, patient_id))
            })
            .await
            .unwrap();
        assert!(patient_id > 3); // fixtures occupy 1..=3

        let target = AttachmentTarget::Datum(datum_id);
        db.with_conn(|conn| {
            repository::insert_attachment(
                conn,
                &NewAttachment {
                    target,
                    file_uri: "file:///storage/photos/analyse.jpg".into(),
                    description: Some("Résultat d'analyse".into()),
                },
            )
        })
        .await
        .unwrap();

        let attachments = db
            .with_conn(|conn| repository::list_attachments_for_target(conn, target))
            .await
            .unwrap();
        assert_eq!(attachments.len(), 1);
        assert_eq!(attachments[0].file_uri, "file:///storage/photos/analyse.jpg");
        assert_eq!(
            attachments[0].description.as_deref(),
            Some("Résultat d'analyse")
        );
        assert_eq!(attachments[0].target, target);
    }
}
