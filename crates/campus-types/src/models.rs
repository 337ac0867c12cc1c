use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role attached to a user account. Every registration gets `User`;
/// `Admin` is granted out-of-band, never through the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppRole {
    Admin,
    User,
}

impl AppRole {
    pub fn as_str(self) -> &'static str {
        match self {
            AppRole::Admin => "admin",
            AppRole::User => "user",
        }
    }
}

/// Partition key for the resources page. Each read returns exactly one
/// partition; the other type's rows are never mixed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    #[default]
    Visual,
    Text,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Visual => "visual",
            ResourceKind::Text => "text",
        }
    }
}

/// A student's profile, one-to-one with their account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub roll_no: Option<String>,
    pub college: Option<String>,
    pub phone_no: Option<String>,
    pub year: Option<String>,
    pub interests: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
