use axum::{
    extract::{Path, RawQuery, State},
    response::{IntoResponse, Json},
    Extension,
};

use crate::{
    dto::common_dto::{InterviewListResponse, ListQuery},
    error::Result,
    middleware::auth::Claims,
    routes::missing_as_not_found,
    AppState,
};

pub async fn get_recruiter(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state
        .directory
        .ensure_recruiter(&id)
        .await
        .map_err(missing_as_not_found)?;
    let recruiter = state.directory.recruiter(&id).await?;
    Ok(Json(recruiter))
}

pub async fn get_recruiter_interviews(
    State(state): State<AppState>,
    Path(id): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse> {
    state
        .directory
        .ensure_recruiter(&id)
        .await
        .map_err(missing_as_not_found)?;
    let page = ListQuery::parse(query.as_deref()).page;
    let interviews = state.directory.recruiter_interviews(&id, page).await?;
    Ok(Json(InterviewListResponse::from(interviews)))
}

pub async fn get_own_interviews(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse> {
    state.directory.ensure_recruiter(&claims.public_id).await?;
    let page = ListQuery::parse(query.as_deref()).page;
    let interviews = state
        .directory
        .recruiter_interviews(&claims.public_id, page)
        .await?;
    Ok(Json(InterviewListResponse::from(interviews)))
}
