use async_trait::async_trait;
use sqlx::FromRow;

use crate::database::Store;
use crate::error::{Error, Result};
use crate::models::company::Company;
use crate::models::interview::InterviewResults;
use crate::models::pagination::{Page, PageArgs};
use crate::models::recruiter::{Position, Recruiter};
use crate::services::result_decoding::{decode_interviews, StoredInterview};
use crate::services::RecruiterAccess;

const RECRUITER_INTERVIEWS_FROM: &str = r#"
    FROM interviews i
    INNER JOIN user_interviews ui ON ui.interview_id = i.id
    INNER JOIN positions p ON p.id = ui.position_id
    WHERE p.recruiter_public_id = $1
"#;

#[derive(Clone)]
pub struct RecruiterService {
    store: Store,
}

#[derive(FromRow)]
struct RecruiterRow {
    public_id: String,
    company_public_id: String,
    first_name: Option<String>,
    last_name: Option<String>,
    photo: Option<String>,
}

impl RecruiterService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RecruiterAccess for RecruiterService {
    async fn get_by_public_id(&self, public_id: &str) -> Result<Recruiter> {
        self.store
            .scoped("get_recruiter", async {
                let row = sqlx::query_as::<_, RecruiterRow>(
                    r#"
                    SELECT r.public_id, r.company_public_id, u.first_name, u.last_name, u.photo
                    FROM recruiters r
                    JOIN users u ON u.public_id = r.public_id
                    WHERE r.public_id = $1
                    "#,
                )
                .bind(public_id)
                .fetch_optional(self.store.pool())
                .await
                .inspect_err(|e| {
                    tracing::error!(public_id, error = %e, "Error retrieving recruiter information")
                })?
                .ok_or_else(|| Error::NotFound(format!("recruiter {} not found", public_id)))?;

                let company = sqlx::query_as::<_, Company>(
                    "SELECT id, public_id, name, logo, description FROM companies WHERE public_id = $1",
                )
                .bind(&row.company_public_id)
                .fetch_one(self.store.pool())
                .await
                .inspect_err(|e| {
                    tracing::error!(public_id, error = %e, "Error retrieving company information")
                })?;

                let positions = sqlx::query_as::<_, Position>(
                    r#"
                    SELECT p.public_id, p.name, p.status
                    FROM positions p
                    WHERE p.recruiter_public_id = $1
                    ORDER BY p.id
                    "#,
                )
                .bind(&row.public_id)
                .fetch_all(self.store.pool())
                .await
                .inspect_err(|e| {
                    tracing::error!(public_id, error = %e, "Error retrieving positions for the recruiter")
                })?;

                Ok(Recruiter {
                    public_id: row.public_id,
                    company_public_id: row.company_public_id,
                    first_name: row.first_name,
                    last_name: row.last_name,
                    photo: row.photo,
                    company,
                    positions,
                })
            })
            .await
    }

    async fn exists(&self, public_id: &str) -> Result<bool> {
        self.store
            .scoped("recruiter_exists", async {
                let exists = sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS(SELECT 1 FROM recruiters WHERE public_id = $1)",
                )
                .bind(public_id)
                .fetch_one(self.store.pool())
                .await
                .inspect_err(|e| {
                    tracing::error!(public_id, error = %e, "Error checking recruiter existence")
                })?;
                Ok(exists)
            })
            .await
    }

    async fn interviews(&self, public_id: &str, page: PageArgs) -> Result<Page<InterviewResults>> {
        self.store
            .scoped("recruiter_interviews", async {
                let rows_query = format!(
                    "SELECT i.public_id, i.results, p.public_id AS position_public_id {} \
                     ORDER BY i.id LIMIT $2 OFFSET $3",
                    RECRUITER_INTERVIEWS_FROM
                );
                let rows = sqlx::query_as::<_, StoredInterview>(&rows_query)
                    .bind(public_id)
                    .bind(page.limit())
                    .bind(page.offset())
                    .fetch_all(self.store.pool())
                    .await
                    .inspect_err(|e| {
                        tracing::error!(public_id, error = %e, "Error retrieving recruiter interviews")
                    })?;

                let count_query = format!("SELECT COUNT(*) {}", RECRUITER_INTERVIEWS_FROM);
                let total = sqlx::query_scalar::<_, i64>(&count_query)
                    .bind(public_id)
                    .fetch_one(self.store.pool())
                    .await
                    .inspect_err(|e| {
                        tracing::error!(public_id, error = %e, "Error counting recruiter interviews")
                    })?;

                Ok(Page::new(decode_interviews(rows)?, total))
            })
            .await
    }
}
