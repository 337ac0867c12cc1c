use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Profile, ResourceKind};

// -- JWT Claims --

/// JWT claims shared between token issuance (auth handlers) and the auth
/// guard middleware. Canonical definition lives here in campus-types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub name: String,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub name: String,
    pub token: String,
}

/// The resolved session: identity plus the admin flag, re-derived from the
/// roles collection on every call.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub is_admin: bool,
}

// -- Dashboard --

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardStats {
    pub students: i64,
    pub resources: i64,
    pub marketplace_items: i64,
    pub achievements: i64,
}

// -- Marketplace --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateItemRequest {
    pub title: String,
    pub description: String,
    /// Submitted as a raw string and coerced to a number at the boundary.
    pub price: String,
    pub condition: String,
    pub category: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MarketplaceItemResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub condition: Option<String>,
    pub category: Option<String>,
    pub images: Vec<String>,
    pub user_id: Uuid,
    pub seller_name: String,
    pub created_at: DateTime<Utc>,
}

// -- Q&A --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateQuestionRequest {
    pub title: String,
    pub description: String,
    /// One comma-separated string, split and trimmed server-side.
    #[serde(default)]
    pub tags: String,
}

/// Question list entry. The answer count join is an explicit field: one
/// count per question, not an inferred row shape.
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionSummary {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub votes: i64,
    pub user_id: Uuid,
    pub asker_name: String,
    pub answer_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateAnswerRequest {
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub id: Uuid,
    pub question_id: Uuid,
    pub content: String,
    pub votes: i64,
    pub user_id: Uuid,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

// -- Resources --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateResourceRequest {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub url: String,
    #[serde(default)]
    pub tags: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResourceResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub tags: Vec<String>,
    pub rating: f64,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

// -- Hostels --

#[derive(Debug, Serialize, Deserialize)]
pub struct HostelResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<String>,
    pub distance: Option<String>,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateReviewRequest {
    pub rating: i64,
    pub comment: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HostelReviewResponse {
    pub id: Uuid,
    pub hostel_id: Uuid,
    pub rating: i64,
    pub comment: String,
    pub user_id: Uuid,
    pub reviewer_name: String,
    pub created_at: DateTime<Utc>,
}

// -- Achievements --

#[derive(Debug, Serialize, Deserialize)]
pub struct AchievementResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
    pub progress: i64,
    pub claimed: bool,
    /// Derived: `progress >= 100 && !claimed`. The claim operation is only
    /// valid while this is true.
    pub claimable: bool,
    pub created_at: DateTime<Utc>,
}

// -- Announcements (placeholder page, list is always empty) --

#[derive(Debug, Serialize, Deserialize)]
pub struct AnnouncementResponse {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

// -- Placeholders --

#[derive(Debug, Serialize, Deserialize)]
pub struct PlaceholderResponse {
    pub message: String,
}

// -- Settings --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProfileRequest {
    pub name: String,
    #[serde(default)]
    pub roll_no: Option<String>,
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default)]
    pub phone_no: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub interests: Option<String>,
}

/// The settings page's read result is the profile itself.
pub type ProfileResponse = Profile;
