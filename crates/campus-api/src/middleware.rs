use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::Response;
use jsonwebtoken::{DecodingKey, Validation, decode};

use campus_types::api::Claims;
use campus_types::models::AppRole;

use crate::auth::AppState;
use crate::error::ApiError;

/// Extract and validate JWT from Authorization header.
pub async fn require_auth(mut req: Request, next: Next) -> Result<Response, StatusCode> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let secret =
        std::env::var("CAMPUS_JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| StatusCode::UNAUTHORIZED)?;

    req.extensions_mut().insert(token_data.claims);
    Ok(next.run(req).await)
}

/// Role check for /admin. Runs inside `require_auth` and rejects before any
/// handler logic, so a non-admin never triggers a data fetch. A failed role
/// lookup counts as not-admin.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = req
        .extensions()
        .get::<Claims>()
        .cloned()
        .ok_or(ApiError::Unauthorized)?;

    let is_admin = state
        .db
        .user_has_role(&claims.sub.to_string(), AppRole::Admin)
        .unwrap_or(false);

    if !is_admin {
        return Err(ApiError::Forbidden("admin access required"));
    }

    Ok(next.run(req).await)
}
