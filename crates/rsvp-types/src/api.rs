use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// -- Submission --

/// Raw RSVP submission as it arrives over the wire. Every field is optional
/// so the validator can report exactly which one is missing instead of the
/// deserializer rejecting the whole payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RsvpRequest {
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub email: Option<String>,
    pub telefono: Option<String>,
    #[serde(rename = "numAsistentes", default, deserialize_with = "lenient_count")]
    pub num_asistentes: Option<i64>,
}

/// The original forms post the attendee count as either a number or a
/// numeric string, and the PHP backend ran it through `intval`. Accept
/// both; anything non-numeric becomes `None` so the validator reports it
/// as a missing field instead of the deserializer rejecting the payload.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_count))
}

fn coerce_count(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Stored record echoed back on a successful submission, camelCase keys
/// for the keys the form script reads.
#[derive(Debug, Serialize)]
pub struct RsvpData {
    pub id: i64,
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub telefono: String,
    #[serde(rename = "numAsistentes")]
    pub num_asistentes: i64,
    #[serde(rename = "fechaRegistro")]
    pub fecha_registro: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    pub data: RsvpData,
}

// -- Admin list --

/// List entries keep the column names of the `invitados` table, matching
/// what the original admin page received from a bare `SELECT`.
#[derive(Debug, Serialize)]
pub struct GuestEntry {
    pub id: i64,
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub telefono: String,
    pub num_asistentes: i64,
    pub fecha_registro: String,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<GuestEntry>,
}

// -- Stats --

#[derive(Debug, Serialize)]
pub struct StatsData {
    #[serde(rename = "totalInvitados")]
    pub total_invitados: i64,
    #[serde(rename = "totalAsistentes")]
    pub total_asistentes: i64,
    #[serde(rename = "totalNoAsistentes")]
    pub total_no_asistentes: i64,
    #[serde(rename = "totalPersonasAsistentes")]
    pub total_personas_asistentes: i64,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub data: StatsData,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> RsvpRequest {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn attendee_count_accepts_number_or_numeric_string() {
        assert_eq!(parse(r#"{"numAsistentes": 3}"#).num_asistentes, Some(3));
        assert_eq!(parse(r#"{"numAsistentes": "3"}"#).num_asistentes, Some(3));
        assert_eq!(parse(r#"{"numAsistentes": " 10 "}"#).num_asistentes, Some(10));
    }

    #[test]
    fn non_numeric_attendee_count_reads_as_absent() {
        assert_eq!(parse(r#"{"numAsistentes": "muchos"}"#).num_asistentes, None);
        assert_eq!(parse(r#"{"numAsistentes": null}"#).num_asistentes, None);
        assert_eq!(parse(r#"{"numAsistentes": [3]}"#).num_asistentes, None);
        assert_eq!(parse(r#"{}"#).num_asistentes, None);
    }
}
