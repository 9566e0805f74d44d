use std::path::Path;

use rusqlite::Connection;
use tracing;

use super::DatabaseError;

/// Open a SQLite connection to the given path and run migrations
pub fn open_database(path: &Path) -> Result<Connection, DatabaseError> {
    let conn = Connection::open(path)?;
    configure_pragmas(&conn)?;
    run_migrations(&conn)?;
    Ok(conn)
}

/// Open an in-memory database (for testing)
pub fn open_memory_database() -> Result<Connection, DatabaseError> {
    let conn = Connection::open_in_memory()?;
    configure_pragmas(&conn)?;
    run_migrations(&conn)?;
    Ok(conn)
}

fn configure_pragmas(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(
        "PRAGMA journal_mode=DELETE;
         PRAGMA foreign_keys=ON;",
    )?;
    Ok(())
}

/// Run all pending migrations.
///
/// Schema evolution is versioned against the `schema_version` table; the
/// old reinstall-and-reseed procedure is gone.
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let current_version = get_current_version(conn);

    let migrations: Vec<(i64, &str)> = vec![(
        1,
        include_str!("../../resources/migrations/001_initial.sql"),
    )];

    for (version, sql) in migrations {
        if version > current_version {
            tracing::info!("Running migration v{version}");
            conn.execute_batch(sql).map_err(|e| DatabaseError::MigrationFailed {
                version,
                reason: e.to_string(),
            })?;
        }
    }

    Ok(())
}

/// Get the current schema version (0 if no schema exists yet)
fn get_current_version(conn: &Connection) -> i64 {
    conn.query_row(
        "SELECT MAX(version) FROM schema_version",
        [],
        |row| row.get::<_, i64>(0),
    )
    .unwrap_or(0)
}

/// Count tables in the database (for verification)
pub fn count_tables(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get::<_, i64>(0),
    )?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_initializes_all_tables() {
        let conn = open_memory_database().unwrap();
        // patients + 3 type tables + 3 fact tables + pieces_jointes + schema_version = 9
        let count = count_tables(&conn).unwrap();
        assert_eq!(count, 9, "Expected 9 tables, got {count}");
    }

    #[test]
    fn schema_version_is_current() {
        let conn = open_memory_database().unwrap();
        let version: i64 = conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, 1);
    }

    #[test]
    fn migration_idempotent() {
        let conn = open_memory_database().unwrap();
        // Run migrations again — should not error
        let result = run_migrations(&conn);
        assert!(result.is_ok());
    }

    #[test]
    fn foreign_keys_enabled() {
        let conn = open_memory_database().unwrap();
        let fk: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }

    #[test]
    fn fact_dates_default_to_today() {
        let conn = open_memory_database().unwrap();
        conn.execute(
            "INSERT INTO patients (nom, prenom) VALUES ('Durand', 'Paul')",
            [],
        )
        .unwrap();
        conn.execute("INSERT INTO types_donnees (nom_type) VALUES ('Poids')", [])
            .unwrap();
        conn.execute(
            "INSERT INTO donnees_sanitaires (patient_id, type_donnee_id, valeur) VALUES (1, 1, '70')",
            [],
        )
        .unwrap();

        let date: String = conn
            .query_row(
                "SELECT date_enregistrement FROM donnees_sanitaires WHERE donnee_id = 1",
                [],
                |row| row.get(0),
            )
            .unwrap();
        let today: String = conn
            .query_row("SELECT date('now')", [], |row| row.get(0))
            .unwrap();
        assert_eq!(date, today);
    }

    #[test]
    fn attachment_target_kind_check_constraint() {
        let conn = open_memory_database().unwrap();

        let ok = conn.execute(
            "INSERT INTO pieces_jointes (cible_type, cible_id, fichier_url)
             VALUES ('donnee', 1, 'file:///tmp/a.jpg')",
            [],
        );
        assert!(ok.is_ok());

        let bad = conn.execute(
            "INSERT INTO pieces_jointes (cible_type, cible_id, fichier_url)
             VALUES ('dossier', 1, 'file:///tmp/b.jpg')",
            [],
        );
        assert!(bad.is_err());
    }

    #[test]
    fn database_opens_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hospital.db");
        let conn = open_database(&path).unwrap();
        assert_eq!(count_tables(&conn).unwrap(), 9);
        drop(conn);

        // Re-open — should be idempotent
        let conn2 = open_database(&path).unwrap();
        assert_eq!(count_tables(&conn2).unwrap(), 9);
    }
}
