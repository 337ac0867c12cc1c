use axum::{Json, extract::State, response::IntoResponse};
use tracing::error;

use campus_types::api::ProfileResponse;

use crate::auth::AppState;
use crate::convert::profile_response;
use crate::error::ApiError;

/// GET /admin: the student directory, newest registrations first.
/// `require_admin` has already rejected non-admins; this handler only
/// reads.
pub async fn list_students(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.list_profiles())
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal(anyhow::anyhow!("list query aborted"))
        })??;

    let students: Vec<ProfileResponse> = rows.into_iter().map(profile_response).collect();
    Ok(Json(students))
}
