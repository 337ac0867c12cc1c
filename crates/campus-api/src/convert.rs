use campus_db::models::ProfileRow;
use campus_types::models::Profile;
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;
use uuid::Uuid;

/// SQLite stores timestamps as "YYYY-MM-DD HH:MM:SS" without timezone.
/// Parse as naive UTC when the RFC 3339 path fails.
pub(crate) fn parse_db_time(raw: &str, ctx: &str) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt timestamp '{}' on {}: {}", raw, ctx, e);
            DateTime::default()
        })
}

pub(crate) fn parse_db_uuid(raw: &str, ctx: &str) -> Uuid {
    raw.parse().unwrap_or_else(|e| {
        warn!("Corrupt id '{}' on {}: {}", raw, ctx, e);
        Uuid::default()
    })
}

/// Tag/image/amenity columns are JSON-encoded text. A corrupt column
/// degrades to an empty list rather than failing the whole page.
pub(crate) fn decode_string_list(raw: &str, ctx: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        warn!("Corrupt list column '{}' on {}: {}", raw, ctx, e);
        Vec::new()
    })
}

/// Tag input arrives as one comma-separated string: split and trim, no
/// de-duplication and no empty-tag filtering.
pub(crate) fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',').map(|t| t.trim().to_string()).collect()
}

pub(crate) fn profile_response(row: ProfileRow) -> Profile {
    Profile {
        id: parse_db_uuid(&row.id, "profile"),
        name: row.name,
        email: row.email,
        roll_no: row.roll_no,
        college: row.college,
        phone_no: row.phone_no,
        year: row.year,
        interests: row.interests,
        avatar_url: row.avatar_url,
        created_at: parse_db_time(&row.created_at, "profile"),
    }
}
