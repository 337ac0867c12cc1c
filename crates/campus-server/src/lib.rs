use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use campus_api::auth::{self, AppState};
use campus_api::middleware::{require_admin, require_auth};
use campus_api::{
    achievements, admin, announcements, chat, dashboard, hostels, marketplace, qna, resources,
    settings,
};

/// Assemble the full routing surface: one route per page of the platform,
/// /auth public, everything else behind the auth guard, /admin additionally
/// behind the role guard, and a JSON 404 as the catch-all route.
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .with_state(state.clone());

    // require_admin reads the claims that require_auth injects, so the
    // admin layer sits inside the auth layer.
    let admin_routes = Router::new()
        .route("/admin", get(admin::list_students))
        .layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let protected_routes = Router::new()
        .route("/", get(dashboard::stats))
        .route("/auth/session", get(auth::session))
        .route("/chat", get(chat::placeholder))
        .route(
            "/marketplace",
            get(marketplace::list_items).post(marketplace::create_item),
        )
        .route("/qna", get(qna::list_questions).post(qna::create_question))
        .route(
            "/qna/{question_id}/answers",
            get(qna::list_answers).post(qna::create_answer),
        )
        .route(
            "/resources",
            get(resources::list_resources).post(resources::create_resource),
        )
        .route("/hostels", get(hostels::list_hostels))
        .route(
            "/hostels/{hostel_id}/reviews",
            get(hostels::list_reviews).post(hostels::create_review),
        )
        .route("/achievements", get(achievements::list_achievements))
        .route(
            "/achievements/{achievement_id}/claim",
            post(achievements::claim),
        )
        .route("/announcements", get(announcements::list_announcements))
        .route(
            "/settings",
            get(settings::get_profile).put(settings::update_profile),
        )
        .merge(admin_routes)
        .layer(middleware::from_fn(require_auth))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))
}
