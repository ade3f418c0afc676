/// A validated, normalized submission ready for insertion. Only the
/// validator constructs one, so a `NewGuest` always has trimmed fields and
/// an attendee count inside [0, 10].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGuest {
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub telefono: String,
    pub num_asistentes: i64,
}
