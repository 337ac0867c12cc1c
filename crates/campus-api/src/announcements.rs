use axum::Json;

use campus_types::api::AnnouncementResponse;

/// Placeholder page: nothing publishes announcements yet, so the list is
/// always empty and callers render their empty state.
pub async fn list_announcements() -> Json<Vec<AnnouncementResponse>> {
    Json(Vec::new())
}
