use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::company::Company;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recruiter {
    pub public_id: String,
    pub company_public_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub photo: Option<String>,
    pub company: Company,
    pub positions: Vec<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Position {
    pub public_id: String,
    pub name: String,
    pub status: i32,
}
