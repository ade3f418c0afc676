use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use serde::Deserialize;
use tokio::task;
use tracing::{error, info, warn};

use rsvp_db::models::{GuestFilter, GuestRow};
use rsvp_types::api::{
    GuestEntry, ListResponse, RsvpData, RsvpRequest, StatsData, StatsResponse, SubmitResponse,
};
use rsvp_types::validate::{self, Flow};

use crate::AppState;
use crate::error::ApiError;

pub async fn submit_rsvp(
    State(state): State<AppState>,
    payload: Result<Json<RsvpRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>, ApiError> {
    // Undeserializable bodies still get the {success, message} shape; the
    // serde detail is for the logs only.
    let Json(req) = payload.map_err(|e| {
        warn!("rejected RSVP payload: {e}");
        ApiError::MalformedPayload
    })?;

    // The decline page force-sends an attendee count of 0; everything else
    // came from the attending form.
    let flow = if req.num_asistentes == Some(0) {
        Flow::Declined
    } else {
        Flow::Attending
    };
    let guest = validate::validate(&req, flow)?;

    // Run the blocking DB insert off the async runtime
    let row = task::spawn_blocking(move || state.db.insert_guest(&guest))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {e}");
            ApiError::Internal
        })??;

    info!(
        "RSVP registrado: {} {} ({}) - {} asistentes",
        row.nombre, row.apellido, row.email, row.num_asistentes
    );

    Ok(Json(SubmitResponse {
        success: true,
        message: "RSVP registrado exitosamente".to_string(),
        data: RsvpData {
            id: row.id,
            nombre: row.nombre,
            apellido: row.apellido,
            email: row.email,
            telefono: row.telefono,
            num_asistentes: row.num_asistentes,
            fecha_registro: row.fecha_registro,
        },
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub action: Option<String>,
}

pub async fn list_rsvps(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>, ApiError> {
    let filter = filter_for(query.action.as_deref());

    let rows = task::spawn_blocking(move || state.db.list_guests(filter))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {e}");
            ApiError::Internal
        })??;

    let data: Vec<GuestEntry> = rows.into_iter().map(entry_from_row).collect();
    Ok(Json(ListResponse {
        success: true,
        count: data.len(),
        data,
    }))
}

pub async fn get_stats(
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, ApiError> {
    let stats = task::spawn_blocking(move || state.db.guest_stats())
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {e}");
            ApiError::Internal
        })??;

    Ok(Json(StatsResponse {
        success: true,
        data: StatsData {
            total_invitados: stats.total_invitados,
            total_asistentes: stats.total_asistentes,
            total_no_asistentes: stats.total_no_asistentes,
            total_personas_asistentes: stats.total_personas_asistentes,
        },
    }))
}

/// Unknown actions fall through to the unfiltered list, as the original
/// admin endpoint did.
fn filter_for(action: Option<&str>) -> GuestFilter {
    match action {
        Some("asistentes") => GuestFilter::Attending,
        Some("no-asistentes") => GuestFilter::Declined,
        _ => GuestFilter::All,
    }
}

fn entry_from_row(row: GuestRow) -> GuestEntry {
    GuestEntry {
        id: row.id,
        nombre: row.nombre,
        apellido: row.apellido,
        email: row.email,
        telefono: row.telefono,
        num_asistentes: row.num_asistentes,
        fecha_registro: row.fecha_registro,
    }
}
