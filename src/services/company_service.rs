use async_trait::async_trait;

use crate::database::Store;
use crate::error::{Error, Result};
use crate::models::company::{Company, CompanyUpdate, NewCompany};
use crate::models::pagination::{contains_pattern, Page, PageArgs};
use crate::services::CompanyAccess;

const COMPANY_SEARCH_FILTER: &str = "FROM companies WHERE name ILIKE $1";

#[derive(Clone)]
pub struct CompanyService {
    store: Store,
}

impl CompanyService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CompanyAccess for CompanyService {
    async fn create(&self, company: &NewCompany) -> Result<String> {
        self.store
            .scoped("create_company", async {
                let public_id = sqlx::query_scalar::<_, String>(
                    r#"
                    INSERT INTO companies (name, logo, description)
                    VALUES ($1, $2, $3)
                    RETURNING public_id
                    "#,
                )
                .bind(&company.name)
                .bind(&company.logo)
                .bind(&company.description)
                .fetch_one(self.store.pool())
                .await
                .inspect_err(|e| tracing::error!(error = %e, "Error creating company"))?;

                tracing::info!(public_id = %public_id, "Company created");
                Ok(public_id)
            })
            .await
    }

    async fn update(&self, public_id: &str, update: &CompanyUpdate) -> Result<()> {
        self.store
            .scoped("update_company", async {
                let updated = sqlx::query(
                    r#"
                    UPDATE companies
                    SET
                        name = COALESCE($2, name),
                        logo = COALESCE($3, logo),
                        description = COALESCE($4, description)
                    WHERE public_id = $1
                    "#,
                )
                .bind(public_id)
                .bind(&update.name)
                .bind(&update.logo)
                .bind(&update.description)
                .execute(self.store.pool())
                .await
                .inspect_err(|e| tracing::error!(public_id, error = %e, "Error updating company"))?;

                if updated.rows_affected() == 0 {
                    return Err(Error::NotFound(format!("company {} not found", public_id)));
                }
                Ok(())
            })
            .await
    }

    async fn get_by_public_id(&self, public_id: &str) -> Result<Company> {
        self.store
            .scoped("get_company", async {
                sqlx::query_as::<_, Company>(
                    "SELECT id, public_id, name, logo, description FROM companies WHERE public_id = $1",
                )
                .bind(public_id)
                .fetch_optional(self.store.pool())
                .await
                .inspect_err(|e| tracing::error!(public_id, error = %e, "Error retrieving company"))?
                .ok_or_else(|| Error::NotFound(format!("company {} not found", public_id)))
            })
            .await
    }

    async fn search(&self, search: &str, page: PageArgs) -> Result<Page<Company>> {
        self.store
            .scoped("search_companies", async {
                let pattern = contains_pattern(search.trim());

                let items_query = format!(
                    "SELECT id, public_id, name, logo, description {} ORDER BY id LIMIT $2 OFFSET $3",
                    COMPANY_SEARCH_FILTER
                );
                let companies = sqlx::query_as::<_, Company>(&items_query)
                    .bind(&pattern)
                    .bind(page.limit())
                    .bind(page.offset())
                    .fetch_all(self.store.pool())
                    .await
                    .inspect_err(|e| tracing::error!(error = %e, "Error retrieving companies"))?;

                let total_query = format!("SELECT COUNT(*) {}", COMPANY_SEARCH_FILTER);
                let total = sqlx::query_scalar::<_, i64>(&total_query)
                    .bind(&pattern)
                    .fetch_one(self.store.pool())
                    .await
                    .inspect_err(|e| {
                        tracing::error!(error = %e, "Error retrieving total count of companies")
                    })?;

                Ok(Page::new(companies, total))
            })
            .await
    }

    async fn exists(&self, public_id: &str) -> Result<bool> {
        self.store
            .scoped("company_exists", async {
                let exists = sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS(SELECT 1 FROM companies WHERE public_id = $1)",
                )
                .bind(public_id)
                .fetch_one(self.store.pool())
                .await
                .inspect_err(|e| {
                    tracing::error!(public_id, error = %e, "Error checking company existence")
                })?;
                Ok(exists)
            })
            .await
    }
}
