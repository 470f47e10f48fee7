use axum::{
    extract::{Extension, Json, Query},
    http::HeaderMap,
    response::Json as RespJson,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};

use crate::auth::{bearer_token, verify_token};
use crate::error::{conflict_on, ApiError};
use crate::model::booking::{
    format_slot_time, parse_slot_time, AvailabilityQuery, BookRequest, Booking,
};
use crate::model::place::{
    parse_operating_time, CreatePlaceRequest, DiningPlace, PlaceSummary, SearchQuery,
    SearchResponse,
};
use crate::state::AppState;

pub fn place_router() -> Router {
    Router::new()
        .route("/api/dining-place/create", post(create_place))
        .route("/api/dining-place", get(search_places))
        .route("/api/dining-place/availability", get(get_availability))
        .route("/api/dining-place/book", post(book_slot))
}

// Admin-only: venue creation is gated by the out-of-band API key, not by a
// user token.
async fn create_place(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreatePlaceRequest>,
) -> Result<RespJson<Value>, ApiError> {
    let api_key = headers.get("x-api-key").and_then(|v| v.to_str().ok());
    if api_key != Some(state.config.admin_api_key.as_str()) {
        return Err(ApiError::Forbidden);
    }

    let open_time = parse_operating_time(&payload.operational_hours.open_time)?;
    let close_time = parse_operating_time(&payload.operational_hours.close_time)?;

    let place_id: i64 = sqlx::query_scalar(
        "INSERT INTO dining_places (name, address, phone_no, website, open_time, close_time) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
    )
    .bind(&payload.name)
    .bind(&payload.address)
    .bind(&payload.phone_no)
    .bind(&payload.website)
    .bind(open_time)
    .bind(close_time)
    .fetch_one(&state.pool)
    .await?;

    tracing::info!(place_id, name = %payload.name, "dining place created");

    Ok(RespJson(json!({
        "message": format!("{} added successfully", payload.name),
        "place_id": place_id,
        "status_code": 200,
    })))
}

async fn search_places(
    Extension(state): Extension<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<RespJson<SearchResponse>, ApiError> {
    // Empty or missing filter matches everything.
    let pattern = format!("%{}%", query.name.unwrap_or_default());

    let places: Vec<DiningPlace> = sqlx::query_as(
        "SELECT id, name, address, phone_no, website, open_time, close_time \
         FROM dining_places WHERE name ILIKE $1 ORDER BY id",
    )
    .bind(&pattern)
    .fetch_all(&state.pool)
    .await?;

    let results = places.into_iter().map(PlaceSummary::from).collect();
    Ok(RespJson(SearchResponse { results }))
}

async fn get_availability(
    Extension(state): Extension<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<RespJson<Value>, ApiError> {
    let start_time = parse_slot_time(&query.start_time)?;
    let end_time = parse_slot_time(&query.end_time)?;

    let bookings = bookings_for_place(&state, query.place_id).await?;
    let conflicts: Vec<&Booking> = bookings
        .iter()
        .filter(|b| b.conflicts_with(start_time, end_time))
        .collect();

    // With conflicts, report the latest conflicting end time. That slot is
    // not guaranteed free when bookings are interleaved; it is only an upper
    // bound, kept for wire compatibility.
    match conflicts.iter().map(|b| b.end_time).max() {
        Some(next_free) => Ok(RespJson(json!({
            "status": "Unavailable",
            "next_available_slot": format_slot_time(next_free),
        }))),
        None => Ok(RespJson(json!({
            "status": "Available",
            "next_available_slot": format_slot_time(end_time),
        }))),
    }
}

async fn book_slot(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    Json(payload): Json<BookRequest>,
) -> Result<RespJson<Value>, ApiError> {
    let user_id = verify_token(bearer_token(&headers)?, &state.config.jwt_secret)?;

    let start_time = parse_slot_time(&payload.start_time)?;
    let end_time = parse_slot_time(&payload.end_time)?;

    let bookings = bookings_for_place(&state, payload.place_id).await?;
    if bookings.iter().any(|b| b.conflicts_with(start_time, end_time)) {
        return Err(ApiError::Conflict("Slot already booked".to_string()));
    }

    // The check above can race with a concurrent insert; the exclusion
    // constraint on bookings decides, and its violation is the same 409.
    let booking_id: i64 = sqlx::query_scalar(
        "INSERT INTO bookings (user_id, place_id, start_time, end_time) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(user_id)
    .bind(payload.place_id)
    .bind(start_time)
    .bind(end_time)
    .fetch_one(&state.pool)
    .await
    // 23P01 = exclusion_violation
    .map_err(|e| conflict_on(e, "23P01", "Slot already booked"))?;

    tracing::info!(booking_id, user_id, place_id = payload.place_id, "slot booked");

    Ok(RespJson(json!({
        "status": "Booking successful",
        "booking_id": booking_id,
        "status_code": 200,
    })))
}

async fn bookings_for_place(state: &AppState, place_id: i64) -> Result<Vec<Booking>, ApiError> {
    let bookings = sqlx::query_as(
        "SELECT id, user_id, place_id, start_time, end_time FROM bookings WHERE place_id = $1",
    )
    .bind(place_id)
    .fetch_all(&state.pool)
    .await?;
    Ok(bookings)
}
