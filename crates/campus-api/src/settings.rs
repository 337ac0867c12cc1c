use axum::{Extension, Json, extract::State, response::IntoResponse};

use campus_types::api::{Claims, ProfileResponse, UpdateProfileRequest};

use crate::auth::AppState;
use crate::convert::profile_response;
use crate::error::ApiError;

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(fetch_profile(&state, &claims)?))
}

/// Update is always scoped by the caller's own id; the response is the
/// refetched profile.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name must not be empty".into()));
    }

    state.db.update_profile(
        &claims.sub.to_string(),
        req.name.trim(),
        req.roll_no.as_deref(),
        req.college.as_deref(),
        req.phone_no.as_deref(),
        req.year.as_deref(),
        req.interests.as_deref(),
    )?;

    Ok(Json(fetch_profile(&state, &claims)?))
}

fn fetch_profile(state: &AppState, claims: &Claims) -> Result<ProfileResponse, ApiError> {
    let row = state
        .db
        .get_profile(&claims.sub.to_string())?
        .ok_or(ApiError::NotFound("profile"))?;

    Ok(profile_response(row))
}
