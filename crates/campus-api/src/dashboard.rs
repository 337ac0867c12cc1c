use axum::{Json, extract::State};
use tracing::error;

use campus_types::api::DashboardStats;

use crate::auth::AppState;
use crate::error::ApiError;

/// GET /: one count per collection, the dashboard's whole read.
pub async fn stats(State(state): State<AppState>) -> Result<Json<DashboardStats>, ApiError> {
    let db = state.clone();
    let counts = tokio::task::spawn_blocking(move || db.db.dashboard_counts())
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal(anyhow::anyhow!("count query aborted"))
        })??;

    Ok(Json(DashboardStats {
        students: counts.students,
        resources: counts.resources,
        marketplace_items: counts.marketplace_items,
        achievements: counts.achievements,
    }))
}
