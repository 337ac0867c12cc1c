/// Database row types, mapping directly to SQLite rows.
/// Distinct from campus-types API models to keep the DB layer independent.
/// Timestamps stay as the TEXT SQLite hands back; list columns stay as the
/// JSON-encoded strings they are stored as. The API layer decodes both.

pub struct UserRow {
    pub id: String,
    pub email: String,
    pub password: String,
    pub created_at: String,
}

pub struct ProfileRow {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub roll_no: Option<String>,
    pub college: Option<String>,
    pub phone_no: Option<String>,
    pub year: Option<String>,
    pub interests: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: String,
}

pub struct MarketplaceItemRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub condition: Option<String>,
    pub category: Option<String>,
    pub images: String,
    pub user_id: String,
    pub seller_name: String,
    pub created_at: String,
}

pub struct QuestionRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tags: String,
    pub votes: i64,
    pub user_id: String,
    pub asker_name: String,
    pub answer_count: i64,
    pub created_at: String,
}

pub struct AnswerRow {
    pub id: String,
    pub question_id: String,
    pub content: String,
    pub votes: i64,
    pub user_id: String,
    pub author_name: String,
    pub created_at: String,
}

pub struct ResourceRow {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub kind: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub tags: String,
    pub rating: f64,
    pub user_id: String,
    pub created_at: String,
}

pub struct HostelRow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<String>,
    pub distance: Option<String>,
    pub amenities: String,
    pub images: String,
    pub rating: f64,
    pub created_at: String,
}

pub struct HostelReviewRow {
    pub id: String,
    pub hostel_id: String,
    pub rating: i64,
    pub comment: String,
    pub user_id: String,
    pub reviewer_name: String,
    pub created_at: String,
}

pub struct AchievementRow {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
    pub progress: i64,
    pub claimed: bool,
    pub created_at: String,
}

/// Counts shown on the dashboard, one per collection.
pub struct DashboardCounts {
    pub students: i64,
    pub resources: i64,
    pub marketplace_items: i64,
    pub achievements: i64,
}

/// Seed achievement granted to a new user inside the registration
/// transaction.
pub struct NewAchievement {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub progress: i64,
}
