use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
    Extension,
};

use crate::{
    error::Result,
    middleware::auth::{Claims, Role},
    AppState,
};

/// Profile of the authenticated caller, shaped by the role in the token.
pub async fn get_account(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Response> {
    let directory = &state.directory;
    match claims.role {
        Role::Candidate => {
            directory.ensure_candidate(&claims.public_id).await?;
            let candidate = directory.candidate(&claims.public_id).await?;
            Ok(Json(candidate).into_response())
        }
        Role::Recruiter => {
            directory.ensure_recruiter(&claims.public_id).await?;
            let recruiter = directory.recruiter(&claims.public_id).await?;
            Ok(Json(recruiter).into_response())
        }
    }
}
