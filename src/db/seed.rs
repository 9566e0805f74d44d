//! First-run fixture data.
//!
//! Each seed group is guarded by a row count so reopening an existing
//! database never duplicates fixtures. Groups are inserted independently,
//! not in one transaction — fixtures are illustrative and a partial seed
//! is acceptable.

use rusqlite::Connection;

use super::DatabaseError;

/// Insert reference and example rows into every table that is still empty.
///
/// Callers treat a failure here as non-fatal: initialization continues with
/// whatever fixtures made it in.
pub fn seed_reference_data(conn: &Connection) -> Result<(), DatabaseError> {
    let fresh_install = table_is_empty(conn, "patients")?;
    if fresh_install {
        conn.execute_batch(
            "INSERT INTO patients (nom, prenom, date_naissance, sexe, adresse, telephone) VALUES
               ('Dupont', 'Marie', '1990-06-15', 'F', '12 Rue des Fleurs, Paris', '0600000001'),
               ('Martin', 'Jean', '1985-03-22', 'M', '8 Avenue Victor Hugo, Lyon', '0600000002'),
               ('Bernard', 'Luc', '1978-11-02', 'M', '5 Boulevard Saint-Michel, Paris', '0600000003');",
        )?;
    }

    if table_is_empty(conn, "types_donnees")? {
        conn.execute_batch(
            "INSERT INTO types_donnees (nom_type, description) VALUES
               ('Groupe sanguin', 'ABO et Rhésus'),
               ('Poids', 'Poids en kilogrammes'),
               ('Taille', 'Taille en centimètres');",
        )?;
    }

    if table_is_empty(conn, "types_consultations")? {
        conn.execute_batch(
            "INSERT INTO types_consultations (nom_type, description) VALUES
               ('Généraliste', 'Consultation de médecine générale'),
               ('Cardiologie', 'Consultation de cardiologie');",
        )?;
    }

    if table_is_empty(conn, "types_examens")? {
        conn.execute_batch(
            "INSERT INTO types_examens (nom_type, description) VALUES
               ('Sanguin', 'Bilan sanguin'),
               ('Radiographie', 'Imagerie médicale');",
        )?;
    }

    // Example fact rows reference the fixture patient and type ids above,
    // so they only go in when the patient fixtures themselves were seeded.
    if fresh_install && table_is_empty(conn, "donnees_sanitaires")? {
        conn.execute_batch(
            "INSERT INTO donnees_sanitaires (patient_id, type_donnee_id, valeur) VALUES
               (1, 1, 'A+'),
               (1, 2, '62'),
               (1, 3, '170'),
               (2, 1, 'O-'),
               (2, 2, '80');

             INSERT INTO consultations (patient_id, type_consultation_id, diagnostic, traitement) VALUES
               (1, 1, 'État de santé général satisfaisant', 'Aucun traitement nécessaire'),
               (2, 2, 'Hypertension artérielle légère', 'Ramipril 5mg 1x/jour, suivi dans 3 mois');

             INSERT INTO examens (patient_id, type_examen_id, resultat, notes) VALUES
               (2, 1, 'Cholestérol total 2.1 g/L', 'Suivi conseillé'),
               (1, 2, 'Radio thoracique normale', 'Aucun signe inquiétant');",
        )?;
    }

    Ok(())
}

fn table_is_empty(conn: &Connection, table: &str) -> Result<bool, DatabaseError> {
    // `table` only ever comes from the fixed list above.
    let count: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM {table}"),
        [],
        |row| row.get(0),
    )?;
    Ok(count == 0)
}
