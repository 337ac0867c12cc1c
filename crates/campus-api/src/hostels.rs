use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::error;
use uuid::Uuid;

use campus_db::models::{HostelReviewRow, HostelRow};
use campus_types::api::{Claims, CreateReviewRequest, HostelResponse, HostelReviewResponse};

use crate::auth::AppState;
use crate::convert::{decode_string_list, parse_db_time, parse_db_uuid};
use crate::error::ApiError;

pub async fn list_hostels(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.list_hostels())
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal(anyhow::anyhow!("list query aborted"))
        })??;

    let hostels: Vec<HostelResponse> = rows.into_iter().map(hostel_response).collect();
    Ok(Json(hostels))
}

pub async fn list_reviews(
    State(state): State<AppState>,
    Path(hostel_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.db.hostel_exists(&hostel_id.to_string())? {
        return Err(ApiError::NotFound("hostel"));
    }

    Ok(Json(fetch_reviews(&state, hostel_id).await?))
}

pub async fn create_review(
    State(state): State<AppState>,
    Path(hostel_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateReviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !(1..=5).contains(&req.rating) {
        return Err(ApiError::BadRequest(format!(
            "rating must be between 1 and 5, got {}",
            req.rating
        )));
    }
    if !state.db.hostel_exists(&hostel_id.to_string())? {
        return Err(ApiError::NotFound("hostel"));
    }

    let review_id = Uuid::new_v4();
    state.db.insert_hostel_review(
        &review_id.to_string(),
        &hostel_id.to_string(),
        req.rating,
        &req.comment,
        &claims.sub.to_string(),
    )?;

    Ok((
        StatusCode::CREATED,
        Json(fetch_reviews(&state, hostel_id).await?),
    ))
}

/// The dependent read: reviews scoped by hostel, newest first, so a fresh
/// review comes back at the head of the refetched list.
async fn fetch_reviews(
    state: &AppState,
    hostel_id: Uuid,
) -> Result<Vec<HostelReviewResponse>, ApiError> {
    let db = state.clone();
    let hid = hostel_id.to_string();
    let rows = tokio::task::spawn_blocking(move || db.db.list_hostel_reviews(&hid))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal(anyhow::anyhow!("list query aborted"))
        })??;

    Ok(rows.into_iter().map(review_response).collect())
}

fn hostel_response(row: HostelRow) -> HostelResponse {
    HostelResponse {
        id: parse_db_uuid(&row.id, "hostel"),
        name: row.name,
        description: row.description,
        price: row.price,
        distance: row.distance,
        amenities: decode_string_list(&row.amenities, "hostel"),
        images: decode_string_list(&row.images, "hostel"),
        rating: row.rating,
        created_at: parse_db_time(&row.created_at, "hostel"),
    }
}

fn review_response(row: HostelReviewRow) -> HostelReviewResponse {
    HostelReviewResponse {
        id: parse_db_uuid(&row.id, "hostel review"),
        hostel_id: parse_db_uuid(&row.hostel_id, "hostel review"),
        rating: row.rating,
        comment: row.comment,
        user_id: parse_db_uuid(&row.user_id, "hostel review"),
        reviewer_name: row.reviewer_name,
        created_at: parse_db_time(&row.created_at, "hostel review"),
    }
}
