use rusqlite::{Connection, OptionalExtension, ffi};

use rsvp_types::models::NewGuest;

use crate::Database;
use crate::error::StoreError;
use crate::models::{GuestFilter, GuestRow, GuestStats};

impl Database {
    /// Insert a guest if no row with the same email exists.
    ///
    /// The UNIQUE index on email is the authoritative guard; the SELECT
    /// before the write only exists so the common duplicate case gets its
    /// answer without attempting an insert. A constraint violation from the
    /// insert itself (concurrent writer won the race) maps to the same
    /// `DuplicateEmail`.
    pub fn insert_guest(&self, guest: &NewGuest) -> Result<GuestRow, StoreError> {
        self.with_conn(|conn| {
            let existing: Option<i64> = conn
                .query_row(
                    "SELECT id FROM invitados WHERE email = ?1",
                    [&guest.email],
                    |row| row.get(0),
                )
                .optional()?;
            if existing.is_some() {
                return Err(StoreError::DuplicateEmail);
            }

            let inserted = conn.execute(
                "INSERT INTO invitados (nombre, apellido, email, telefono, num_asistentes)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    guest.nombre,
                    guest.apellido,
                    guest.email,
                    guest.telefono,
                    guest.num_asistentes
                ],
            );
            match inserted {
                Ok(_) => {}
                Err(e) if is_unique_violation(&e) => return Err(StoreError::DuplicateEmail),
                Err(e) => return Err(e.into()),
            }

            query_guest_by_id(conn, conn.last_insert_rowid())
        })
    }

    /// All guests, newest registration first.
    pub fn list_guests(&self, filter: GuestFilter) -> Result<Vec<GuestRow>, StoreError> {
        self.with_conn(|conn| query_guests(conn, filter))
    }

    pub fn guest_stats(&self) -> Result<GuestStats, StoreError> {
        self.with_conn(query_stats)
    }
}

// Matched on the extended code: a NOT NULL or CHECK violation is an
// infrastructure error, not a duplicate.
fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

fn query_guest_by_id(conn: &Connection, id: i64) -> Result<GuestRow, StoreError> {
    let row = conn.query_row(
        "SELECT id, nombre, apellido, email, telefono, num_asistentes, fecha_registro
         FROM invitados
         WHERE id = ?1",
        [id],
        map_guest_row,
    )?;
    Ok(row)
}

fn query_guests(conn: &Connection, filter: GuestFilter) -> Result<Vec<GuestRow>, StoreError> {
    // fecha_registro has second precision, so id breaks ties within a second.
    let sql = format!(
        "SELECT id, nombre, apellido, email, telefono, num_asistentes, fecha_registro
         FROM invitados{}
         ORDER BY fecha_registro DESC, id DESC",
        match filter {
            GuestFilter::All => "",
            GuestFilter::Attending => " WHERE num_asistentes > 0",
            GuestFilter::Declined => " WHERE num_asistentes = 0",
        }
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], map_guest_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn query_stats(conn: &Connection) -> Result<GuestStats, StoreError> {
    let stats = conn.query_row(
        "SELECT COUNT(*),
                COUNT(*) FILTER (WHERE num_asistentes > 0),
                COUNT(*) FILTER (WHERE num_asistentes = 0),
                COALESCE(SUM(num_asistentes) FILTER (WHERE num_asistentes > 0), 0)
         FROM invitados",
        [],
        |row| {
            Ok(GuestStats {
                total_invitados: row.get(0)?,
                total_asistentes: row.get(1)?,
                total_no_asistentes: row.get(2)?,
                total_personas_asistentes: row.get(3)?,
            })
        },
    )?;
    Ok(stats)
}

fn map_guest_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<GuestRow> {
    Ok(GuestRow {
        id: row.get(0)?,
        nombre: row.get(1)?,
        apellido: row.get(2)?,
        email: row.get(3)?,
        telefono: row.get(4)?,
        num_asistentes: row.get(5)?,
        fecha_registro: row.get(6)?,
    })
}
