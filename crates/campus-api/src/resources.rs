use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use campus_db::models::ResourceRow;
use campus_types::api::{Claims, CreateResourceRequest, ResourceResponse};
use campus_types::models::ResourceKind;

use crate::auth::AppState;
use crate::convert::{decode_string_list, parse_db_time, parse_db_uuid, split_tags};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ResourceQuery {
    /// Active tab; switching re-runs the read with the new partition.
    #[serde(rename = "type", default)]
    pub kind: ResourceKind,
}

pub async fn list_resources(
    State(state): State<AppState>,
    Query(query): Query<ResourceQuery>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(fetch_resources(&state, query.kind).await?))
}

pub async fn create_resource(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateResourceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let tags = split_tags(&req.tags);
    let tags_json =
        serde_json::to_string(&tags).map_err(|e| anyhow::anyhow!("tag encoding failed: {}", e))?;

    let resource_id = Uuid::new_v4();
    state.db.insert_resource(
        &resource_id.to_string(),
        &req.title,
        &req.description,
        req.kind.as_str(),
        &req.url,
        &tags_json,
        &claims.sub.to_string(),
    )?;

    // Refetch the partition the resource was submitted to
    Ok((
        StatusCode::CREATED,
        Json(fetch_resources(&state, req.kind).await?),
    ))
}

/// The page's read query, filtered by exactly one type. Rows of the other
/// type are never included.
async fn fetch_resources(
    state: &AppState,
    kind: ResourceKind,
) -> Result<Vec<ResourceResponse>, ApiError> {
    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.list_resources(kind.as_str()))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal(anyhow::anyhow!("list query aborted"))
        })??;

    Ok(rows.into_iter().map(resource_response).collect())
}

fn resource_response(row: ResourceRow) -> ResourceResponse {
    let kind = match row.kind.as_str() {
        "text" => ResourceKind::Text,
        _ => ResourceKind::Visual,
    };

    ResourceResponse {
        id: parse_db_uuid(&row.id, "resource"),
        title: row.title,
        description: row.description,
        kind,
        url: row.url,
        thumbnail_url: row.thumbnail_url,
        tags: decode_string_list(&row.tags, "resource"),
        rating: row.rating,
        user_id: parse_db_uuid(&row.user_id, "resource"),
        created_at: parse_db_time(&row.created_at, "resource"),
    }
}
