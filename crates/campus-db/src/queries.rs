use crate::Database;
use crate::models::{
    AchievementRow, AnswerRow, DashboardCounts, HostelReviewRow, HostelRow, MarketplaceItemRow,
    NewAchievement, ProfileRow, QuestionRow, ResourceRow, UserRow,
};
use anyhow::Result;
use campus_types::models::AppRole;
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

// List queries order by created_at DESC with rowid as a tiebreaker:
// datetime('now') is second-granular, rowid keeps insertion order within
// a second so the newest row is always first.

impl Database {
    // -- Users & registration --

    /// Create the account, its profile, the default role row and the
    /// starter achievements in one transaction. The profile mirrors the
    /// account's email; everything else starts unset.
    pub fn register_user(
        &self,
        id: &str,
        name: &str,
        email: &str,
        password_hash: &str,
        starter: &[NewAchievement],
    ) -> Result<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.unchecked_transaction()?;
            tx.execute(
                "INSERT INTO users (id, email, password) VALUES (?1, ?2, ?3)",
                (id, email, password_hash),
            )?;
            tx.execute(
                "INSERT INTO profiles (id, name, email) VALUES (?1, ?2, ?3)",
                (id, name, email),
            )?;
            tx.execute(
                "INSERT INTO user_roles (id, user_id, role) VALUES (?1, ?2, 'user')",
                (Uuid::new_v4().to_string(), id),
            )?;
            for a in starter {
                tx.execute(
                    "INSERT INTO achievements (id, user_id, title, description, icon, progress)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    rusqlite::params![
                        Uuid::new_v4().to_string(),
                        id,
                        a.title,
                        a.description,
                        a.icon,
                        a.progress
                    ],
                )?;
            }
            tx.commit()?;
            Ok(())
        })
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_email(conn, email))
    }

    pub fn user_has_role(&self, user_id: &str, role: AppRole) -> Result<bool> {
        self.with_conn(|conn| {
            let found: Option<i64> = conn
                .query_row(
                    "SELECT 1 FROM user_roles WHERE user_id = ?1 AND role = ?2",
                    (user_id, role.as_str()),
                    |row| row.get(0),
                )
                .optional()?;
            Ok(found.is_some())
        })
    }

    /// Role grants happen out-of-band, never through a page operation.
    pub fn grant_role(&self, user_id: &str, role: AppRole) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT OR IGNORE INTO user_roles (id, user_id, role) VALUES (?1, ?2, ?3)",
                (Uuid::new_v4().to_string(), user_id, role.as_str()),
            )?;
            Ok(())
        })
    }

    // -- Profiles --

    pub fn get_profile(&self, user_id: &str) -> Result<Option<ProfileRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, email, roll_no, college, phone_no, year, interests, avatar_url, created_at
                 FROM profiles WHERE id = ?1",
            )?;
            let row = stmt.query_row([user_id], map_profile_row).optional()?;
            Ok(row)
        })
    }

    pub fn update_profile(
        &self,
        user_id: &str,
        name: &str,
        roll_no: Option<&str>,
        college: Option<&str>,
        phone_no: Option<&str>,
        year: Option<&str>,
        interests: Option<&str>,
    ) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "UPDATE profiles
                 SET name = ?2, roll_no = ?3, college = ?4, phone_no = ?5, year = ?6,
                     interests = ?7, updated_at = datetime('now')
                 WHERE id = ?1",
                rusqlite::params![user_id, name, roll_no, college, phone_no, year, interests],
            )?;
            Ok(())
        })
    }

    pub fn list_profiles(&self) -> Result<Vec<ProfileRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, email, roll_no, college, phone_no, year, interests, avatar_url, created_at
                 FROM profiles
                 ORDER BY created_at DESC, rowid DESC",
            )?;
            let rows = stmt
                .query_map([], map_profile_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Dashboard --

    pub fn dashboard_counts(&self) -> Result<DashboardCounts> {
        self.with_conn(|conn| {
            let count = |table: &str| -> Result<i64> {
                let n = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                    row.get(0)
                })?;
                Ok(n)
            };
            Ok(DashboardCounts {
                students: count("profiles")?,
                resources: count("resources")?,
                marketplace_items: count("marketplace_items")?,
                achievements: count("achievements")?,
            })
        })
    }

    // -- Marketplace --

    pub fn list_marketplace_items(&self) -> Result<Vec<MarketplaceItemRow>> {
        self.with_conn(query_marketplace_items)
    }

    pub fn insert_marketplace_item(
        &self,
        id: &str,
        title: &str,
        description: &str,
        price: f64,
        condition: &str,
        category: &str,
        user_id: &str,
    ) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO marketplace_items (id, title, description, price, condition, category, user_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![id, title, description, price, condition, category, user_id],
            )?;
            Ok(())
        })
    }

    // -- Questions & answers --

    pub fn list_questions(&self) -> Result<Vec<QuestionRow>> {
        self.with_conn(query_questions)
    }

    pub fn insert_question(
        &self,
        id: &str,
        title: &str,
        description: &str,
        tags_json: &str,
        user_id: &str,
    ) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO questions (id, title, description, tags, user_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![id, title, description, tags_json, user_id],
            )?;
            Ok(())
        })
    }

    pub fn question_exists(&self, id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let found: Option<i64> = conn
                .query_row("SELECT 1 FROM questions WHERE id = ?1", [id], |row| {
                    row.get(0)
                })
                .optional()?;
            Ok(found.is_some())
        })
    }

    pub fn list_answers(&self, question_id: &str) -> Result<Vec<AnswerRow>> {
        self.with_conn(|conn| query_answers(conn, question_id))
    }

    pub fn insert_answer(
        &self,
        id: &str,
        question_id: &str,
        content: &str,
        user_id: &str,
    ) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO answers (id, question_id, content, user_id) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![id, question_id, content, user_id],
            )?;
            Ok(())
        })
    }

    // -- Resources --

    pub fn list_resources(&self, kind: &str) -> Result<Vec<ResourceRow>> {
        self.with_conn(|conn| query_resources(conn, kind))
    }

    pub fn insert_resource(
        &self,
        id: &str,
        title: &str,
        description: &str,
        kind: &str,
        url: &str,
        tags_json: &str,
        user_id: &str,
    ) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO resources (id, title, description, type, url, tags, user_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![id, title, description, kind, url, tags_json, user_id],
            )?;
            Ok(())
        })
    }

    // -- Hostels & reviews --

    pub fn list_hostels(&self) -> Result<Vec<HostelRow>> {
        self.with_conn(query_hostels)
    }

    pub fn hostel_exists(&self, id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let found: Option<i64> = conn
                .query_row("SELECT 1 FROM hostels WHERE id = ?1", [id], |row| row.get(0))
                .optional()?;
            Ok(found.is_some())
        })
    }

    pub fn list_hostel_reviews(&self, hostel_id: &str) -> Result<Vec<HostelReviewRow>> {
        self.with_conn(|conn| query_hostel_reviews(conn, hostel_id))
    }

    pub fn insert_hostel_review(
        &self,
        id: &str,
        hostel_id: &str,
        rating: i64,
        comment: &str,
        user_id: &str,
    ) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO hostel_reviews (id, hostel_id, rating, comment, user_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![id, hostel_id, rating, comment, user_id],
            )?;
            Ok(())
        })
    }

    // -- Achievements --

    pub fn list_achievements(&self, user_id: &str) -> Result<Vec<AchievementRow>> {
        self.with_conn(|conn| query_achievements(conn, user_id))
    }

    pub fn get_achievement(&self, id: &str) -> Result<Option<AchievementRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, title, description, icon, progress, claimed, created_at
                 FROM achievements WHERE id = ?1",
            )?;
            let row = stmt.query_row([id], map_achievement_row).optional()?;
            Ok(row)
        })
    }

    /// One-way: nothing ever writes `claimed` back to 0.
    pub fn mark_claimed(&self, id: &str) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute("UPDATE achievements SET claimed = 1 WHERE id = ?1", [id])?;
            Ok(())
        })
    }
}

fn query_user_by_email(conn: &Connection, email: &str) -> Result<Option<UserRow>> {
    let mut stmt =
        conn.prepare("SELECT id, email, password, created_at FROM users WHERE email = ?1")?;

    let row = stmt
        .query_row([email], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                email: row.get(1)?,
                password: row.get(2)?,
                created_at: row.get(3)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn map_profile_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProfileRow> {
    Ok(ProfileRow {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        roll_no: row.get(3)?,
        college: row.get(4)?,
        phone_no: row.get(5)?,
        year: row.get(6)?,
        interests: row.get(7)?,
        avatar_url: row.get(8)?,
        created_at: row.get(9)?,
    })
}

fn query_marketplace_items(conn: &Connection) -> Result<Vec<MarketplaceItemRow>> {
    // JOIN profiles to fetch the seller name in a single query
    let mut stmt = conn.prepare(
        "SELECT m.id, m.title, m.description, m.price, m.condition, m.category, m.images,
                m.user_id, p.name, m.created_at
         FROM marketplace_items m
         LEFT JOIN profiles p ON m.user_id = p.id
         ORDER BY m.created_at DESC, m.rowid DESC",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(MarketplaceItemRow {
                id: row.get(0)?,
                title: row.get(1)?,
                description: row.get(2)?,
                price: row.get(3)?,
                condition: row.get(4)?,
                category: row.get(5)?,
                images: row.get(6)?,
                user_id: row.get(7)?,
                seller_name: row
                    .get::<_, Option<String>>(8)?
                    .unwrap_or_else(|| "unknown".to_string()),
                created_at: row.get(9)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_questions(conn: &Connection) -> Result<Vec<QuestionRow>> {
    // Answer counts come back as one scalar per question, asker name via JOIN
    let mut stmt = conn.prepare(
        "SELECT q.id, q.title, q.description, q.tags, q.votes, q.user_id, p.name,
                (SELECT COUNT(*) FROM answers a WHERE a.question_id = q.id),
                q.created_at
         FROM questions q
         LEFT JOIN profiles p ON q.user_id = p.id
         ORDER BY q.created_at DESC, q.rowid DESC",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(QuestionRow {
                id: row.get(0)?,
                title: row.get(1)?,
                description: row.get(2)?,
                tags: row.get(3)?,
                votes: row.get(4)?,
                user_id: row.get(5)?,
                asker_name: row
                    .get::<_, Option<String>>(6)?
                    .unwrap_or_else(|| "unknown".to_string()),
                answer_count: row.get(7)?,
                created_at: row.get(8)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_answers(conn: &Connection, question_id: &str) -> Result<Vec<AnswerRow>> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.question_id, a.content, a.votes, a.user_id, p.name, a.created_at
         FROM answers a
         LEFT JOIN profiles p ON a.user_id = p.id
         WHERE a.question_id = ?1
         ORDER BY a.created_at DESC, a.rowid DESC",
    )?;

    let rows = stmt
        .query_map([question_id], |row| {
            Ok(AnswerRow {
                id: row.get(0)?,
                question_id: row.get(1)?,
                content: row.get(2)?,
                votes: row.get(3)?,
                user_id: row.get(4)?,
                author_name: row
                    .get::<_, Option<String>>(5)?
                    .unwrap_or_else(|| "unknown".to_string()),
                created_at: row.get(6)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_resources(conn: &Connection, kind: &str) -> Result<Vec<ResourceRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, description, type, url, thumbnail_url, tags, rating, user_id, created_at
         FROM resources
         WHERE type = ?1
         ORDER BY created_at DESC, rowid DESC",
    )?;

    let rows = stmt
        .query_map([kind], |row| {
            Ok(ResourceRow {
                id: row.get(0)?,
                title: row.get(1)?,
                description: row.get(2)?,
                kind: row.get(3)?,
                url: row.get(4)?,
                thumbnail_url: row.get(5)?,
                tags: row.get(6)?,
                rating: row.get(7)?,
                user_id: row.get(8)?,
                created_at: row.get(9)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_hostels(conn: &Connection) -> Result<Vec<HostelRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, description, price, distance, amenities, images, rating, created_at
         FROM hostels
         ORDER BY rating DESC",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(HostelRow {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
                price: row.get(3)?,
                distance: row.get(4)?,
                amenities: row.get(5)?,
                images: row.get(6)?,
                rating: row.get(7)?,
                created_at: row.get(8)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_hostel_reviews(conn: &Connection, hostel_id: &str) -> Result<Vec<HostelReviewRow>> {
    let mut stmt = conn.prepare(
        "SELECT r.id, r.hostel_id, r.rating, r.comment, r.user_id, p.name, r.created_at
         FROM hostel_reviews r
         LEFT JOIN profiles p ON r.user_id = p.id
         WHERE r.hostel_id = ?1
         ORDER BY r.created_at DESC, r.rowid DESC",
    )?;

    let rows = stmt
        .query_map([hostel_id], |row| {
            Ok(HostelReviewRow {
                id: row.get(0)?,
                hostel_id: row.get(1)?,
                rating: row.get(2)?,
                comment: row.get(3)?,
                user_id: row.get(4)?,
                reviewer_name: row
                    .get::<_, Option<String>>(5)?
                    .unwrap_or_else(|| "unknown".to_string()),
                created_at: row.get(6)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_achievements(conn: &Connection, user_id: &str) -> Result<Vec<AchievementRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, title, description, icon, progress, claimed, created_at
         FROM achievements
         WHERE user_id = ?1
         ORDER BY created_at DESC, rowid DESC",
    )?;

    let rows = stmt
        .query_map([user_id], map_achievement_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn map_achievement_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AchievementRow> {
    Ok(AchievementRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        icon: row.get(4)?,
        progress: row.get(5)?,
        claimed: row.get(6)?,
        created_at: row.get(7)?,
    })
}
