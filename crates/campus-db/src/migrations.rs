use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          TEXT PRIMARY KEY,
            email       TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS profiles (
            id          TEXT PRIMARY KEY REFERENCES users(id),
            name        TEXT NOT NULL,
            email       TEXT,
            roll_no     TEXT,
            college     TEXT,
            phone_no    TEXT,
            year        TEXT,
            interests   TEXT,
            avatar_url  TEXT,
            created_at  TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at  TEXT
        );

        CREATE TABLE IF NOT EXISTS user_roles (
            id          TEXT PRIMARY KEY,
            user_id     TEXT NOT NULL REFERENCES users(id),
            role        TEXT NOT NULL CHECK (role IN ('admin', 'user')),
            UNIQUE(user_id, role)
        );

        CREATE TABLE IF NOT EXISTS marketplace_items (
            id          TEXT PRIMARY KEY,
            title       TEXT NOT NULL,
            description TEXT NOT NULL,
            price       REAL NOT NULL,
            condition   TEXT,
            category    TEXT,
            images      TEXT NOT NULL DEFAULT '[]',
            user_id     TEXT NOT NULL REFERENCES users(id),
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS questions (
            id          TEXT PRIMARY KEY,
            title       TEXT NOT NULL,
            description TEXT NOT NULL,
            tags        TEXT NOT NULL DEFAULT '[]',
            votes       INTEGER NOT NULL DEFAULT 0,
            user_id     TEXT NOT NULL REFERENCES users(id),
            created_at  TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at  TEXT
        );

        CREATE TABLE IF NOT EXISTS answers (
            id          TEXT PRIMARY KEY,
            question_id TEXT NOT NULL REFERENCES questions(id),
            content     TEXT NOT NULL,
            votes       INTEGER NOT NULL DEFAULT 0,
            user_id     TEXT NOT NULL REFERENCES users(id),
            created_at  TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at  TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_answers_question
            ON answers(question_id, created_at);

        CREATE TABLE IF NOT EXISTS resources (
            id            TEXT PRIMARY KEY,
            title         TEXT NOT NULL,
            description   TEXT,
            type          TEXT NOT NULL CHECK (type IN ('visual', 'text')),
            url           TEXT NOT NULL,
            thumbnail_url TEXT,
            tags          TEXT NOT NULL DEFAULT '[]',
            rating        REAL NOT NULL DEFAULT 0,
            user_id       TEXT NOT NULL REFERENCES users(id),
            created_at    TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_resources_type
            ON resources(type, created_at);

        CREATE TABLE IF NOT EXISTS hostels (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            description TEXT,
            price       TEXT,
            distance    TEXT,
            amenities   TEXT NOT NULL DEFAULT '[]',
            images      TEXT NOT NULL DEFAULT '[]',
            rating      REAL NOT NULL DEFAULT 0,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS hostel_reviews (
            id          TEXT PRIMARY KEY,
            hostel_id   TEXT NOT NULL REFERENCES hostels(id),
            rating      INTEGER NOT NULL DEFAULT 5,
            comment     TEXT NOT NULL,
            images      TEXT NOT NULL DEFAULT '[]',
            user_id     TEXT NOT NULL REFERENCES users(id),
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_reviews_hostel
            ON hostel_reviews(hostel_id, created_at);

        CREATE TABLE IF NOT EXISTS achievements (
            id          TEXT PRIMARY KEY,
            user_id     TEXT NOT NULL REFERENCES users(id),
            title       TEXT NOT NULL,
            description TEXT NOT NULL,
            icon        TEXT,
            progress    INTEGER NOT NULL DEFAULT 0,
            claimed     INTEGER NOT NULL DEFAULT 0,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_achievements_user
            ON achievements(user_id, created_at);

        -- Seed the hostel catalogue. No create operation exists for hostels
        -- anywhere in the application.
        INSERT OR IGNORE INTO hostels (id, name, description, price, distance, amenities, rating) VALUES
            ('00000000-0000-0000-0000-000000000001', 'Sunrise Residency',
             'Quiet rooms close to the main gate, mess included.',
             '4500/mo', '0.5 km', '[\"WiFi\",\"Mess\",\"Laundry\"]', 4.2),
            ('00000000-0000-0000-0000-000000000002', 'Lakeview Hostel',
             'Shared doubles overlooking the lake, common study hall.',
             '3800/mo', '1.2 km', '[\"WiFi\",\"Study Hall\",\"Gym\"]', 3.9),
            ('00000000-0000-0000-0000-000000000003', 'Maple House',
             'Newly built block with attached bathrooms.',
             '5200/mo', '2.0 km', '[\"WiFi\",\"Attached Bath\",\"Parking\"]', 4.6);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
