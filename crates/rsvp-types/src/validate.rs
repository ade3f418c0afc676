use std::fmt;

use thiserror::Error;

use crate::api::RsvpRequest;
use crate::models::NewGuest;

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_PHONE_LEN: usize = 10;
pub const MAX_ATTENDEES: i64 = 10;

/// Which page submitted the form. The decline page always sends an
/// attendee count of 0 and skips the range check; the attending page
/// must stay inside [1, MAX_ATTENDEES].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Attending,
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Nombre,
    Apellido,
    Email,
    Telefono,
    NumAsistentes,
}

impl Field {
    /// Wire key, as interpolated into the "campo requerido" message.
    pub fn key(self) -> &'static str {
        match self {
            Field::Nombre => "nombre",
            Field::Apellido => "apellido",
            Field::Email => "email",
            Field::Telefono => "telefono",
            Field::NumAsistentes => "numAsistentes",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// First failing check wins; messages are the user-facing ones the form
/// displays verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("El campo '{0}' es requerido")]
    MissingField(Field),
    #[error("El nombre debe tener al menos 2 caracteres")]
    NombreTooShort,
    #[error("El apellido debe tener al menos 2 caracteres")]
    ApellidoTooShort,
    #[error("Formato de email inválido")]
    InvalidEmailFormat,
    #[error("El teléfono debe tener al menos 10 dígitos")]
    TelefonoTooShort,
    #[error("El número de asistentes debe estar entre 1 y 10")]
    AttendeesOutOfRange,
}

/// Check a submission against the field rules, in order, short-circuiting
/// on the first failure. Pure; string fields are trimmed before any rule
/// applies and the trimmed values are what gets persisted.
pub fn validate(req: &RsvpRequest, flow: Flow) -> Result<NewGuest, ValidationError> {
    let nombre = required(&req.nombre, Field::Nombre)?;
    let apellido = required(&req.apellido, Field::Apellido)?;
    let email = required(&req.email, Field::Email)?;
    let telefono = required(&req.telefono, Field::Telefono)?;
    let num_asistentes = req
        .num_asistentes
        .ok_or(ValidationError::MissingField(Field::NumAsistentes))?;

    if nombre.chars().count() < MIN_NAME_LEN {
        return Err(ValidationError::NombreTooShort);
    }
    if apellido.chars().count() < MIN_NAME_LEN {
        return Err(ValidationError::ApellidoTooShort);
    }
    if !email_shape_ok(&email) {
        return Err(ValidationError::InvalidEmailFormat);
    }
    if telefono.chars().count() < MIN_PHONE_LEN {
        return Err(ValidationError::TelefonoTooShort);
    }

    let num_asistentes = match flow {
        Flow::Declined => 0,
        Flow::Attending => {
            if !(1..=MAX_ATTENDEES).contains(&num_asistentes) {
                return Err(ValidationError::AttendeesOutOfRange);
            }
            num_asistentes
        }
    };

    Ok(NewGuest {
        nombre,
        apellido,
        email,
        telefono,
        num_asistentes,
    })
}

fn required(value: &Option<String>, field: Field) -> Result<String, ValidationError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ValidationError::MissingField(field)),
    }
}

/// Same shape the original checked with `^[^\s@]+@[^\s@]+\.[^\s@]+$`:
/// no whitespace, exactly one `@`, non-empty local part, and a dot in the
/// domain with at least one character on each side.
fn email_shape_ok(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .match_indices('.')
        .any(|(i, _)| i > 0 && i + 1 < domain.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(
        nombre: &str,
        apellido: &str,
        email: &str,
        telefono: &str,
        num_asistentes: i64,
    ) -> RsvpRequest {
        RsvpRequest {
            nombre: Some(nombre.to_string()),
            apellido: Some(apellido.to_string()),
            email: Some(email.to_string()),
            telefono: Some(telefono.to_string()),
            num_asistentes: Some(num_asistentes),
        }
    }

    fn valid_request() -> RsvpRequest {
        request("Ana", "Lopez", "ana@x.com", "5512345678", 3)
    }

    #[test]
    fn accepts_and_normalizes_valid_input() {
        let mut req = valid_request();
        req.nombre = Some("  Ana ".to_string());
        req.telefono = Some(" 5512345678 ".to_string());

        let guest = validate(&req, Flow::Attending).unwrap();
        assert_eq!(
            guest,
            NewGuest {
                nombre: "Ana".to_string(),
                apellido: "Lopez".to_string(),
                email: "ana@x.com".to_string(),
                telefono: "5512345678".to_string(),
                num_asistentes: 3,
            }
        );
    }

    #[test]
    fn missing_fields_are_named() {
        let cases = [
            (RsvpRequest { nombre: None, ..valid_request() }, Field::Nombre),
            (RsvpRequest { apellido: None, ..valid_request() }, Field::Apellido),
            (RsvpRequest { email: None, ..valid_request() }, Field::Email),
            (RsvpRequest { telefono: None, ..valid_request() }, Field::Telefono),
            (RsvpRequest { num_asistentes: None, ..valid_request() }, Field::NumAsistentes),
        ];

        for (req, field) in cases {
            assert_eq!(
                validate(&req, Flow::Attending),
                Err(ValidationError::MissingField(field))
            );
        }
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let req = RsvpRequest {
            apellido: Some("   ".to_string()),
            ..valid_request()
        };
        assert_eq!(
            validate(&req, Flow::Attending),
            Err(ValidationError::MissingField(Field::Apellido))
        );
    }

    #[test]
    fn missing_field_message_names_the_wire_key() {
        let err = ValidationError::MissingField(Field::NumAsistentes);
        assert_eq!(err.to_string(), "El campo 'numAsistentes' es requerido");
    }

    #[test]
    fn names_must_have_two_characters_after_trim() {
        let req = RsvpRequest {
            nombre: Some(" A ".to_string()),
            ..valid_request()
        };
        assert_eq!(
            validate(&req, Flow::Attending),
            Err(ValidationError::NombreTooShort)
        );

        let req = RsvpRequest {
            apellido: Some("L".to_string()),
            ..valid_request()
        };
        assert_eq!(
            validate(&req, Flow::Attending),
            Err(ValidationError::ApellidoTooShort)
        );
    }

    #[test]
    fn email_shape() {
        let good = ["ana@x.com", "a.b@c.d.e", "x@sub.domain.mx"];
        for email in good {
            let req = RsvpRequest { email: Some(email.to_string()), ..valid_request() };
            assert!(validate(&req, Flow::Attending).is_ok(), "{email} should pass");
        }

        let bad = [
            "no-at.com",
            "a@nodot",
            "a@@x.com",
            "two@x@y.com",
            "@x.com",
            "a@.com",
            "a@x.",
            "a b@x.com",
        ];
        for email in bad {
            let req = RsvpRequest { email: Some(email.to_string()), ..valid_request() };
            assert_eq!(
                validate(&req, Flow::Attending),
                Err(ValidationError::InvalidEmailFormat),
                "{email} should fail"
            );
        }
    }

    #[test]
    fn phone_needs_ten_characters_any_kind() {
        let req = RsvpRequest {
            telefono: Some("551234567".to_string()),
            ..valid_request()
        };
        assert_eq!(
            validate(&req, Flow::Attending),
            Err(ValidationError::TelefonoTooShort)
        );

        // No character-class restriction: formatting characters count too.
        let req = RsvpRequest {
            telefono: Some("55-12-34-56".to_string()),
            ..valid_request()
        };
        assert!(validate(&req, Flow::Attending).is_ok());
    }

    #[test]
    fn attendee_count_boundaries() {
        for n in [1, 10] {
            let req = request("Ana", "Lopez", "ana@x.com", "5512345678", n);
            assert_eq!(validate(&req, Flow::Attending).unwrap().num_asistentes, n);
        }
        for n in [-1, 0, 11] {
            let req = request("Ana", "Lopez", "ana@x.com", "5512345678", n);
            assert_eq!(
                validate(&req, Flow::Attending),
                Err(ValidationError::AttendeesOutOfRange),
                "{n} should be out of range"
            );
        }
    }

    #[test]
    fn decline_flow_forces_zero_and_skips_range_check() {
        let req = request("Ana", "Lopez", "ana@x.com", "5512345678", 0);
        assert_eq!(validate(&req, Flow::Declined).unwrap().num_asistentes, 0);

        // Whatever the count says, a decline stores 0.
        let req = request("Ana", "Lopez", "ana@x.com", "5512345678", 7);
        assert_eq!(validate(&req, Flow::Declined).unwrap().num_asistentes, 0);
    }

    #[test]
    fn rejection_is_idempotent() {
        let req = RsvpRequest {
            email: Some("broken".to_string()),
            ..valid_request()
        };
        let first = validate(&req, Flow::Attending);
        let second = validate(&req, Flow::Attending);
        assert_eq!(first, second);
        assert_eq!(first, Err(ValidationError::InvalidEmailFormat));
    }
}
