use axum::Json;

use campus_types::api::PlaceholderResponse;

/// Placeholder page: no chat transport exists.
pub async fn placeholder() -> Json<PlaceholderResponse> {
    Json(PlaceholderResponse {
        message: "Chat feature coming soon!".to_string(),
    })
}
