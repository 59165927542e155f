use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::company::{Company, CompanyUpdate, NewCompany};
use crate::models::pagination::Page;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCompanyPayload {
    #[validate(length(min = 1))]
    pub name: String,
    pub logo: Option<String>,
    pub description: Option<String>,
}

impl From<CreateCompanyPayload> for NewCompany {
    fn from(payload: CreateCompanyPayload) -> Self {
        Self {
            name: payload.name,
            logo: payload.logo,
            description: payload.description,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCompanyPayload {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub logo: Option<String>,
    pub description: Option<String>,
}

impl From<UpdateCompanyPayload> for CompanyUpdate {
    fn from(payload: UpdateCompanyPayload) -> Self {
        Self {
            name: payload.name,
            logo: payload.logo,
            description: payload.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateCompanyResponse {
    pub public_id: String,
}

#[derive(Debug, Serialize)]
pub struct CompanyListResponse {
    pub companies: Vec<Company>,
    pub count: i64,
}

impl From<Page<Company>> for CompanyListResponse {
    fn from(page: Page<Company>) -> Self {
        Self {
            companies: page.items,
            count: page.total,
        }
    }
}
