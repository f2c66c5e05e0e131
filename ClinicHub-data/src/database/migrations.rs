use rusqlite::Connection;
use tracing::info;

use super::DatabaseError;

/// Run SQLite migrations
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    info!("Running SQLite migrations");

    create_patients_table(conn)?;
    create_contacts_table(conn)?;
    create_exams_collection(conn)?;

    info!("SQLite migrations completed successfully");
    Ok(())
}

fn create_patients_table(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS pacientes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nombre TEXT NOT NULL,
            dni TEXT NOT NULL,
            fecha_nac TEXT NOT NULL,
            sexo TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| DatabaseError::MigrationError(format!("pacientes: {}", e)))?;

    Ok(())
}

fn create_contacts_table(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS contactos_pacientes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            paciente_id INTEGER NOT NULL REFERENCES pacientes(id),
            telefono TEXT NOT NULL,
            direccion TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| DatabaseError::MigrationError(format!("contactos_pacientes: {}", e)))?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_contactos_paciente ON contactos_pacientes (paciente_id)",
        [],
    )
    .map_err(|e| DatabaseError::MigrationError(format!("Failed to create index: {}", e)))?;

    Ok(())
}

/// Document collection for generated exams, one JSON document per row
fn create_exams_collection(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS examenes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            documento TEXT NOT NULL,
            creado_en TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| DatabaseError::MigrationError(format!("examenes: {}", e)))?;

    Ok(())
}
