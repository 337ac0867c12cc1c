use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::error;
use uuid::Uuid;

use campus_db::models::AchievementRow;
use campus_types::api::{AchievementResponse, Claims};

use crate::auth::AppState;
use crate::convert::{parse_db_time, parse_db_uuid};
use crate::error::ApiError;

pub async fn list_achievements(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(fetch_achievements(&state, claims.sub).await?))
}

/// One-way transition to claimed. Only valid on the caller's own
/// achievement, fully progressed and not yet claimed.
pub async fn claim(
    State(state): State<AppState>,
    Path(achievement_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let achievement = state
        .db
        .get_achievement(&achievement_id.to_string())?
        .ok_or(ApiError::NotFound("achievement"))?;

    if achievement.user_id != claims.sub.to_string() {
        return Err(ApiError::Forbidden("not your achievement"));
    }
    if achievement.claimed {
        return Err(ApiError::Conflict("achievement already claimed".into()));
    }
    if achievement.progress < 100 {
        return Err(ApiError::BadRequest(format!(
            "achievement is only {}% complete",
            achievement.progress
        )));
    }

    state.db.mark_claimed(&achievement_id.to_string())?;

    Ok(Json(fetch_achievements(&state, claims.sub).await?))
}

/// The page's read query: the caller's achievements, newest first.
async fn fetch_achievements(
    state: &AppState,
    user_id: Uuid,
) -> Result<Vec<AchievementResponse>, ApiError> {
    let db = state.clone();
    let uid = user_id.to_string();
    let rows = tokio::task::spawn_blocking(move || db.db.list_achievements(&uid))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal(anyhow::anyhow!("list query aborted"))
        })??;

    Ok(rows.into_iter().map(achievement_response).collect())
}

fn achievement_response(row: AchievementRow) -> AchievementResponse {
    let claimable = row.progress >= 100 && !row.claimed;

    AchievementResponse {
        id: parse_db_uuid(&row.id, "achievement"),
        title: row.title,
        description: row.description,
        icon: row.icon,
        progress: row.progress,
        claimed: row.claimed,
        claimable,
        created_at: parse_db_time(&row.created_at, "achievement"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(progress: i64, claimed: bool) -> AchievementRow {
        AchievementRow {
            id: Uuid::new_v4().to_string(),
            user_id: Uuid::new_v4().to_string(),
            title: "Welcome Aboard".into(),
            description: "Join the community".into(),
            icon: None,
            progress,
            claimed,
            created_at: "2026-08-06 10:15:00".into(),
        }
    }

    #[test]
    fn claimable_only_when_complete_and_unclaimed() {
        assert!(achievement_response(row(100, false)).claimable);
        assert!(achievement_response(row(130, false)).claimable);
        assert!(!achievement_response(row(99, false)).claimable);
        assert!(!achievement_response(row(100, true)).claimable);
        assert!(!achievement_response(row(0, false)).claimable);
    }
}
