//! Reservation Handlers

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use serde::{Deserialize, Serialize};
use shared::models::{ReservationListing, ReservationRequest, ReservationStatusUpdate};
use shared::util::now_millis;

use crate::api::extract::FormOrJson;
use crate::api::response::{see_other, view, with_form};
use crate::booking;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppError, AppResult};

const LIST_PATH: &str = "/staff/reservations";

/// Booking form fields carried through the query string and echoed back
/// on a failed submission
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ReserveForm {
    date: String,
    time: String,
    num_guests: String,
}

impl From<&ReservationRequest> for ReserveForm {
    fn from(req: &ReservationRequest) -> Self {
        Self {
            date: req.date.clone(),
            time: req.time.clone(),
            num_guests: req.guests.to_string(),
        }
    }
}

/// GET /reserve
pub async fn reserve_form(Query(form): Query<ReserveForm>) -> ApiResponse<ReserveForm> {
    view("reserve", form)
}

/// POST /reserve
pub async fn reserve(
    State(state): State<ServerState>,
    FormOrJson(req): FormOrJson<ReservationRequest>,
) -> AppResult<Redirect> {
    let id = booking::create_reservation(&state.pool, &req)
        .await
        .map_err(|e| with_form(AppError::from(e), &ReserveForm::from(&req)))?;
    Ok(see_other(&format!("/reservation-confirmed/{id}")))
}

/// GET /reservation-confirmed/{id}
///
/// Unknown ids go back to the home page.
pub async fn confirmed(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let response = match booking::find_confirmation(&state.pool, id).await? {
        Some(confirmation) => view("reservation_confirmed", confirmation).into_response(),
        None => see_other("/").into_response(),
    };
    Ok(response)
}

/// GET /staff/reservations - upcoming reservations, soonest first
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<ApiResponse<Vec<ReservationListing>>> {
    let reservations = booking::list_upcoming(&state.pool, now_millis()).await?;
    Ok(view("manage_reservations", reservations))
}

/// POST /staff/reservations/{id}/status
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    FormOrJson(req): FormOrJson<ReservationStatusUpdate>,
) -> AppResult<Redirect> {
    booking::update_status(&state.pool, id, req.status).await?;
    Ok(see_other(LIST_PATH))
}

/// POST /staff/reservations/{id}/delete
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Redirect> {
    booking::delete_reservation(&state.pool, id).await?;
    Ok(see_other(LIST_PATH))
}
