//! Database row types — these map directly to `invitados` rows.
//! Distinct from the rsvp-types wire models to keep the DB layer independent.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestRow {
    pub id: i64,
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub telefono: String,
    pub num_asistentes: i64,
    pub fecha_registro: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GuestStats {
    pub total_invitados: i64,
    pub total_asistentes: i64,
    pub total_no_asistentes: i64,
    /// Sum of attendee counts over confirmed rows; declines contribute 0.
    pub total_personas_asistentes: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuestFilter {
    #[default]
    All,
    /// `num_asistentes > 0`
    Attending,
    /// `num_asistentes = 0`
    Declined,
}
