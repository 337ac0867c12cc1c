use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use campus_db::Database;
use campus_db::models::NewAchievement;
use campus_types::api::{
    Claims, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, SessionResponse,
};
use campus_types::models::AppRole;

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub jwt_secret: String,
}

/// Achievements granted to every new account inside the registration
/// transaction. "Welcome Aboard" starts complete so a fresh account always
/// has something to claim.
const STARTER_ACHIEVEMENTS: &[NewAchievement] = &[
    NewAchievement {
        title: "Welcome Aboard",
        description: "Join the community",
        icon: "🎉",
        progress: 100,
    },
    NewAchievement {
        title: "First Steps",
        description: "Complete your profile",
        icon: "🎯",
        progress: 0,
    },
    NewAchievement {
        title: "Community Helper",
        description: "Post your first answer",
        icon: "🤝",
        progress: 0,
    },
];

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // Validate input
    if req.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name must not be empty".into()));
    }
    if !req.email.contains('@') {
        return Err(ApiError::BadRequest(format!(
            "'{}' is not an email address",
            req.email
        )));
    }
    if req.password.len() < 8 {
        return Err(ApiError::BadRequest(
            "password must be at least 8 characters".into(),
        ));
    }

    // Check if the email is taken
    if state.db.get_user_by_email(&req.email)?.is_some() {
        return Err(ApiError::Conflict(format!(
            "an account for {} already exists",
            req.email
        )));
    }

    // Hash password with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {}", e))?
        .to_string();

    let user_id = Uuid::new_v4();
    let name = req.name.trim();

    state.db.register_user(
        &user_id.to_string(),
        name,
        &req.email,
        &password_hash,
        STARTER_ACHIEVEMENTS,
    )?;

    let token = create_token(&state.jwt_secret, user_id, name)?;

    Ok((StatusCode::CREATED, Json(RegisterResponse { user_id, token })))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .db
        .get_user_by_email(&req.email)?
        .ok_or(ApiError::Unauthorized)?;

    // Verify password
    let parsed_hash = PasswordHash::new(&user.password)
        .map_err(|e| anyhow::anyhow!("stored hash unreadable: {}", e))?;

    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| ApiError::Unauthorized)?;

    let user_id: Uuid = user
        .id
        .parse()
        .map_err(|e| anyhow::anyhow!("corrupt user id '{}': {}", user.id, e))?;

    let name = state
        .db
        .get_profile(&user.id)?
        .map(|p| p.name)
        .unwrap_or_else(|| "unknown".to_string());

    let token = create_token(&state.jwt_secret, user_id, &name)?;

    Ok(Json(LoginResponse {
        user_id,
        name,
        token,
    }))
}

/// The session read: identity plus the admin flag, re-derived from the
/// roles collection on every call. A failed role lookup resolves the flag
/// to false, never an error.
pub async fn session(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = claims.sub.to_string();

    let profile = state
        .db
        .get_profile(&user_id)?
        .ok_or(ApiError::NotFound("profile"))?;

    let is_admin = state
        .db
        .user_has_role(&user_id, AppRole::Admin)
        .unwrap_or(false);

    Ok(Json(SessionResponse {
        user_id: claims.sub,
        name: profile.name,
        email: profile.email,
        is_admin,
    }))
}

fn create_token(secret: &str, user_id: Uuid, name: &str) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user_id,
        name: name.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::days(30)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}
