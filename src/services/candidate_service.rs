use async_trait::async_trait;
use sqlx::{PgConnection, Postgres, QueryBuilder};

use crate::database::Store;
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, CandidateUpdate, Interview};
use crate::models::interview::InterviewResults;
use crate::models::pagination::{CandidateFilter, Page, PageArgs};
use crate::services::result_decoding::{decode_interviews, StoredInterview};
use crate::services::CandidateAccess;

const CANDIDATE_COLUMNS: &str = "c.public_id, u.first_name, u.last_name, c.current_position, \
     c.resume, c.bio, c.education, u.photo";

const CANDIDATE_INTERVIEWS_FROM: &str = r#"
    FROM interviews i
    INNER JOIN user_interviews ui ON ui.interview_id = i.id
    INNER JOIN candidates c ON c.id = ui.candidate_id
    INNER JOIN positions p ON p.id = ui.position_id
    WHERE c.public_id = $1
"#;

#[derive(Clone)]
pub struct CandidateService {
    store: Store,
}

#[derive(sqlx::FromRow)]
struct CandidateProfileRow {
    #[sqlx(flatten)]
    candidate: Candidate,
    interview_ids: Vec<String>,
}

impl CandidateService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

/// Shared `FROM .. WHERE .. GROUP BY .. HAVING` for both the page and the count query.
fn push_matching_candidates(qb: &mut QueryBuilder<'_, Postgres>, filter: &CandidateFilter) {
    qb.push(
        " FROM candidates c \
          JOIN users u ON u.public_id = c.public_id \
          LEFT JOIN candidate_skills cs ON cs.candidate_id = c.id \
          LEFT JOIN skills s ON s.id = cs.skill_id",
    );
    if let Some(pattern) = filter.name_pattern() {
        qb.push(" WHERE (u.first_name ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR u.last_name ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }
    qb.push(" GROUP BY c.id, u.id");
    let skills = filter.skills();
    if !skills.is_empty() {
        qb.push(" HAVING COUNT(DISTINCT s.name) FILTER (WHERE s.name = ANY(");
        qb.push_bind(skills.to_vec());
        qb.push(")) = ");
        qb.push_bind(skills.len() as i64);
    }
}

fn page_query(filter: &CandidateFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT {}, COALESCE(array_agg(DISTINCT s.name) FILTER (WHERE s.name IS NOT NULL), \
         '{{}}'::text[]) AS skills",
        CANDIDATE_COLUMNS
    ));
    push_matching_candidates(&mut qb, filter);
    qb.push(" ORDER BY c.public_id LIMIT ");
    qb.push_bind(filter.page.limit());
    qb.push(" OFFSET ");
    qb.push_bind(filter.page.offset());
    qb
}

fn count_query(filter: &CandidateFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM (SELECT c.id");
    push_matching_candidates(&mut qb, filter);
    qb.push(") AS matched");
    qb
}

async fn candidate_internal_id(conn: &mut PgConnection, public_id: &str) -> Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT id FROM candidates WHERE public_id = $1")
        .bind(public_id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| Error::NotFound(format!("candidate {} not found", public_id)))
}

async fn skill_id(conn: &mut PgConnection, name: &str) -> Result<Option<i64>> {
    let id = sqlx::query_scalar::<_, i64>("SELECT id FROM skills WHERE name = $1")
        .bind(name)
        .fetch_optional(conn)
        .await?;
    Ok(id)
}

/// Returns the id of `name`, inserting the skill when it does not exist yet.
async fn ensure_skill(conn: &mut PgConnection, name: &str) -> Result<i64> {
    if let Some(id) = skill_id(&mut *conn, name).await? {
        return Ok(id);
    }
    let inserted = sqlx::query_scalar::<_, i64>(
        "INSERT INTO skills (name) VALUES ($1) ON CONFLICT (name) DO NOTHING RETURNING id",
    )
    .bind(name)
    .fetch_optional(&mut *conn)
    .await?;
    match inserted {
        Some(id) => Ok(id),
        // Lost a race with a concurrent insert; the row is committed by now.
        None => skill_id(conn, name)
            .await?
            .ok_or_else(|| Error::Internal(format!("skill {} vanished after insert", name))),
    }
}

#[async_trait]
impl CandidateAccess for CandidateService {
    async fn search(&self, filter: &CandidateFilter) -> Result<Page<Candidate>> {
        self.store
            .scoped("search_candidates", async {
                let total: (i64,) = count_query(filter)
                    .build_query_as()
                    .fetch_one(self.store.pool())
                    .await
                    .inspect_err(|e| {
                        tracing::error!(error = %e, "Error fetching candidates count")
                    })?;

                let candidates: Vec<Candidate> = page_query(filter)
                    .build_query_as()
                    .fetch_all(self.store.pool())
                    .await
                    .inspect_err(|e| tracing::error!(error = %e, "Error fetching candidates"))?;

                Ok(Page::new(candidates, total.0))
            })
            .await
    }

    async fn get_by_public_id(&self, public_id: &str) -> Result<Candidate> {
        self.store
            .scoped("get_candidate", async {
                let query = format!(
                    r#"
                    SELECT {},
                        COALESCE((
                            SELECT array_agg(DISTINCT s.name)
                            FROM candidate_skills cs
                            INNER JOIN skills s ON s.id = cs.skill_id
                            WHERE cs.candidate_id = c.id
                        ), '{{}}'::text[]) AS skills,
                        COALESCE((
                            SELECT array_agg(DISTINCT i.public_id)
                            FROM user_interviews ui
                            INNER JOIN interviews i ON i.id = ui.interview_id
                            WHERE ui.candidate_id = c.id
                        ), '{{}}'::text[]) AS interview_ids
                    FROM candidates c
                    JOIN users u ON u.public_id = c.public_id
                    WHERE c.public_id = $1
                    "#,
                    CANDIDATE_COLUMNS
                );

                let row = sqlx::query_as::<_, CandidateProfileRow>(&query)
                    .bind(public_id)
                    .fetch_optional(self.store.pool())
                    .await
                    .inspect_err(|e| {
                        tracing::error!(public_id, error = %e, "Error fetching candidate")
                    })?
                    .ok_or_else(|| Error::NotFound(format!("candidate {} not found", public_id)))?;

                let mut candidate = row.candidate;
                candidate.interviews = row
                    .interview_ids
                    .into_iter()
                    .map(Interview::reference)
                    .collect();
                Ok(candidate)
            })
            .await
    }

    async fn update(&self, public_id: &str, update: &CandidateUpdate) -> Result<()> {
        if update.is_empty() {
            if self.exists(public_id).await? {
                return Ok(());
            }
            return Err(Error::NotFound(format!("candidate {} not found", public_id)));
        }

        self.store
            .scoped("update_candidate", async {
                let mut tx = self.store.begin().await?;

                let updated = sqlx::query(
                    r#"
                    UPDATE candidates
                    SET
                        current_position = COALESCE($2, current_position),
                        education = COALESCE($3, education),
                        resume = COALESCE($4, resume),
                        bio = COALESCE($5, bio)
                    WHERE public_id = $1
                    "#,
                )
                .bind(public_id)
                .bind(&update.current_position)
                .bind(&update.education)
                .bind(&update.resume)
                .bind(&update.bio)
                .execute(&mut *tx)
                .await
                .inspect_err(|e| tracing::error!(public_id, error = %e, "Error updating candidate"))?;

                if updated.rows_affected() == 0 {
                    return Err(Error::NotFound(format!("candidate {} not found", public_id)));
                }

                sqlx::query(
                    r#"
                    UPDATE users
                    SET
                        first_name = COALESCE($2, first_name),
                        last_name = COALESCE($3, last_name),
                        photo = COALESCE($4, photo)
                    WHERE public_id = $1
                    "#,
                )
                .bind(public_id)
                .bind(&update.first_name)
                .bind(&update.last_name)
                .bind(&update.photo)
                .execute(&mut *tx)
                .await
                .inspect_err(|e| {
                    tracing::error!(public_id, error = %e, "Error updating candidate's user data")
                })?;

                self.store.commit(tx).await
            })
            .await
    }

    async fn delete(&self, public_id: &str) -> Result<()> {
        self.store
            .scoped("delete_candidate", async {
                let deleted = sqlx::query("DELETE FROM candidates WHERE public_id = $1")
                    .bind(public_id)
                    .execute(self.store.pool())
                    .await
                    .inspect_err(|e| {
                        tracing::error!(public_id, error = %e, "Error deleting candidate")
                    })?;
                if deleted.rows_affected() == 0 {
                    return Err(Error::NotFound(format!("candidate {} not found", public_id)));
                }
                Ok(())
            })
            .await
    }

    async fn add_skills(&self, public_id: &str, skills: &[String]) -> Result<()> {
        self.store
            .scoped("add_skills", async {
                let mut tx = self.store.begin().await?;
                let candidate_id = candidate_internal_id(&mut tx, public_id).await?;

                for name in skills {
                    let skill_id = ensure_skill(&mut tx, name).await.inspect_err(|e| {
                        tracing::error!(public_id, skill = %name, error = %e, "Error resolving skill")
                    })?;

                    sqlx::query(
                        r#"
                        INSERT INTO candidate_skills (candidate_id, skill_id)
                        VALUES ($1, $2)
                        ON CONFLICT DO NOTHING
                        "#,
                    )
                    .bind(candidate_id)
                    .bind(skill_id)
                    .execute(&mut *tx)
                    .await
                    .inspect_err(|e| {
                        tracing::error!(public_id, skill = %name, error = %e, "Error adding skill to candidate")
                    })?;
                }

                self.store.commit(tx).await
            })
            .await
    }

    async fn remove_skills(&self, public_id: &str, skills: &[String]) -> Result<()> {
        self.store
            .scoped("remove_skills", async {
                let mut tx = self.store.begin().await?;
                let candidate_id = candidate_internal_id(&mut tx, public_id).await?;

                for name in skills {
                    let Some(skill_id) = skill_id(&mut tx, name).await? else {
                        tracing::warn!(public_id, skill = %name, "Skill does not exist, skipping");
                        continue;
                    };

                    sqlx::query(
                        "DELETE FROM candidate_skills WHERE candidate_id = $1 AND skill_id = $2",
                    )
                    .bind(candidate_id)
                    .bind(skill_id)
                    .execute(&mut *tx)
                    .await
                    .inspect_err(|e| {
                        tracing::error!(public_id, skill = %name, error = %e, "Error deleting skill from candidate")
                    })?;
                }

                self.store.commit(tx).await
            })
            .await
    }

    async fn exists(&self, public_id: &str) -> Result<bool> {
        self.store
            .scoped("candidate_exists", async {
                let exists = sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS(SELECT 1 FROM candidates WHERE public_id = $1)",
                )
                .bind(public_id)
                .fetch_one(self.store.pool())
                .await
                .inspect_err(|e| {
                    tracing::error!(public_id, error = %e, "Error checking candidate existence")
                })?;
                Ok(exists)
            })
            .await
    }

    async fn interviews(&self, public_id: &str, page: PageArgs) -> Result<Page<InterviewResults>> {
        self.store
            .scoped("candidate_interviews", async {
                let rows_query = format!(
                    "SELECT i.public_id, i.results, p.public_id AS position_public_id {} \
                     ORDER BY i.id LIMIT $2 OFFSET $3",
                    CANDIDATE_INTERVIEWS_FROM
                );
                let rows = sqlx::query_as::<_, StoredInterview>(&rows_query)
                    .bind(public_id)
                    .bind(page.limit())
                    .bind(page.offset())
                    .fetch_all(self.store.pool())
                    .await
                    .inspect_err(|e| {
                        tracing::error!(public_id, error = %e, "Error retrieving candidate interviews")
                    })?;

                let count_query = format!("SELECT COUNT(*) {}", CANDIDATE_INTERVIEWS_FROM);
                let total = sqlx::query_scalar::<_, i64>(&count_query)
                    .bind(public_id)
                    .fetch_one(self.store.pool())
                    .await
                    .inspect_err(|e| {
                        tracing::error!(public_id, error = %e, "Error counting candidate interviews")
                    })?;

                Ok(Page::new(decode_interviews(rows)?, total))
            })
            .await
    }
}
