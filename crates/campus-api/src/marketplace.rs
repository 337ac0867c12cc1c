use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::error;
use uuid::Uuid;

use campus_db::models::MarketplaceItemRow;
use campus_types::api::{Claims, CreateItemRequest, MarketplaceItemResponse};

use crate::auth::AppState;
use crate::convert::{decode_string_list, parse_db_time, parse_db_uuid};
use crate::error::ApiError;

pub async fn list_items(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(fetch_items(&state).await?))
}

pub async fn create_item(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // Price arrives as the raw form string; coerce at the boundary.
    let price: f64 = req
        .price
        .trim()
        .parse()
        .map_err(|e| ApiError::BadRequest(format!("invalid price '{}': {}", req.price, e)))?;

    let item_id = Uuid::new_v4();
    state.db.insert_marketplace_item(
        &item_id.to_string(),
        &req.title,
        &req.description,
        price,
        &req.condition,
        &req.category,
        &claims.sub.to_string(),
    )?;

    Ok((StatusCode::CREATED, Json(fetch_items(&state).await?)))
}

/// The page's read query. Mutations re-run it so the response always
/// reflects the just-completed write.
async fn fetch_items(state: &AppState) -> Result<Vec<MarketplaceItemResponse>, ApiError> {
    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.list_marketplace_items())
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal(anyhow::anyhow!("list query aborted"))
        })??;

    Ok(rows.into_iter().map(item_response).collect())
}

fn item_response(row: MarketplaceItemRow) -> MarketplaceItemResponse {
    MarketplaceItemResponse {
        id: parse_db_uuid(&row.id, "marketplace item"),
        title: row.title,
        description: row.description,
        price: row.price,
        condition: row.condition,
        category: row.category,
        images: decode_string_list(&row.images, "marketplace item"),
        user_id: parse_db_uuid(&row.user_id, "marketplace item"),
        seller_name: row.seller_name,
        created_at: parse_db_time(&row.created_at, "marketplace item"),
    }
}
