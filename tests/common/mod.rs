#![allow(dead_code)]

use std::env;
use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use users_main_service::database::{pool::run_migrations, Store};
use uuid::Uuid;

/// Store against `DATABASE_URL`, or `None` so the caller can skip.
pub async fn store() -> Option<Store> {
    dotenvy::dotenv().ok();
    let Ok(url) = env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping database test");
        return None;
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("connect to test database");
    run_migrations(&pool).await.expect("migrations");
    Some(Store::new(pool, Duration::from_secs(5)))
}

pub fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

pub async fn seed_user(pool: &PgPool, first_name: &str, last_name: &str) -> String {
    let public_id = unique("user");
    sqlx::query("INSERT INTO users (public_id, first_name, last_name) VALUES ($1, $2, $3)")
        .bind(&public_id)
        .bind(first_name)
        .bind(last_name)
        .execute(pool)
        .await
        .expect("seed user");
    public_id
}

pub async fn seed_candidate(pool: &PgPool, first_name: &str, last_name: &str) -> String {
    let public_id = seed_user(pool, first_name, last_name).await;
    sqlx::query(
        "INSERT INTO candidates (public_id, current_position, education, resume, bio) \
         VALUES ($1, 'Engineer', 'BSc', 'cv.pdf', 'Original bio')",
    )
    .bind(&public_id)
    .execute(pool)
    .await
    .expect("seed candidate");
    public_id
}

pub async fn seed_company(pool: &PgPool, name: &str) -> String {
    sqlx::query_scalar("INSERT INTO companies (name) VALUES ($1) RETURNING public_id")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("seed company")
}

pub async fn seed_recruiter(pool: &PgPool, company_public_id: &str) -> String {
    let public_id = seed_user(pool, "Rita", "Recruiter").await;
    sqlx::query("INSERT INTO recruiters (public_id, company_public_id) VALUES ($1, $2)")
        .bind(&public_id)
        .bind(company_public_id)
        .execute(pool)
        .await
        .expect("seed recruiter");
    public_id
}

/// Returns `(internal id, public id)`.
pub async fn seed_position(pool: &PgPool, recruiter_public_id: &str, name: &str) -> (i64, String) {
    sqlx::query_as(
        "INSERT INTO positions (name, recruiter_public_id) VALUES ($1, $2) RETURNING id, public_id",
    )
    .bind(name)
    .bind(recruiter_public_id)
    .fetch_one(pool)
    .await
    .expect("seed position")
}

pub async fn seed_interview(
    pool: &PgPool,
    candidate_public_id: &str,
    position_id: i64,
    results: Option<&[u8]>,
) -> String {
    let (interview_id, public_id): (i64, String) =
        sqlx::query_as("INSERT INTO interviews (results) VALUES ($1) RETURNING id, public_id")
            .bind(results)
            .fetch_one(pool)
            .await
            .expect("seed interview");

    sqlx::query(
        "INSERT INTO user_interviews (interview_id, candidate_id, position_id) \
         SELECT $1, c.id, $2 FROM candidates c WHERE c.public_id = $3",
    )
    .bind(interview_id)
    .bind(position_id)
    .bind(candidate_public_id)
    .execute(pool)
    .await
    .expect("link interview");

    public_id
}

pub async fn skill_exists(pool: &PgPool, name: &str) -> bool {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM skills WHERE name = $1)")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("skill lookup")
}

pub const RESULT_PAYLOAD: &str = r#"{
    "questions": [
        {"question": "Explain borrowing", "score": 9, "emotion_results": [
            {"emotion": "calm", "exact_time": 0.5, "duration": 4.0}
        ]},
        {"question": "Favourite crate?", "score": 7}
    ],
    "score": 8
}"#;
