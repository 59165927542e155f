use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::{
        candidate_dto::{CandidateListResponse, SkillsPayload, UpdateCandidatePayload},
        common_dto::{InterviewListResponse, ListQuery},
    },
    error::Result,
    middleware::auth::Claims,
    models::candidate::CandidateUpdate,
    routes::missing_as_not_found,
    AppState,
};

pub async fn list_candidates(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse> {
    let filter = ListQuery::parse(query.as_deref()).candidate_filter();
    let page = state.directory.search_candidates(&filter).await?;
    Ok(Json(CandidateListResponse::from(page)))
}

pub async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let candidate = state.directory.candidate(&id).await?;
    Ok(Json(candidate))
}

pub async fn update_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCandidatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    state
        .directory
        .ensure_candidate(&id)
        .await
        .map_err(missing_as_not_found)?;
    apply_update(&state, &id, payload.into()).await
}

pub async fn delete_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state
        .directory
        .ensure_candidate(&id)
        .await
        .map_err(missing_as_not_found)?;
    state.directory.delete_candidate(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_own_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdateCandidatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    state.directory.ensure_candidate(&claims.public_id).await?;
    apply_update(&state, &claims.public_id, payload.into()).await
}

pub async fn delete_own_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    state.directory.ensure_candidate(&claims.public_id).await?;
    state.directory.delete_candidate(&claims.public_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_skills(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<SkillsPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let skills = payload.into_names()?;
    state.directory.ensure_candidate(&claims.public_id).await?;
    state.directory.add_skills(&claims.public_id, &skills).await?;
    Ok(StatusCode::CREATED)
}

pub async fn remove_skills(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<SkillsPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let skills = payload.into_names()?;
    state.directory.ensure_candidate(&claims.public_id).await?;
    state.directory.remove_skills(&claims.public_id, &skills).await?;
    Ok(StatusCode::OK)
}

pub async fn get_candidate_interviews(
    State(state): State<AppState>,
    Path(id): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse> {
    state
        .directory
        .ensure_candidate(&id)
        .await
        .map_err(missing_as_not_found)?;
    let page = ListQuery::parse(query.as_deref()).page;
    let interviews = state.directory.candidate_interviews(&id, page).await?;
    Ok(Json(InterviewListResponse::from(interviews)))
}

pub async fn get_own_interviews(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse> {
    state.directory.ensure_candidate(&claims.public_id).await?;
    let page = ListQuery::parse(query.as_deref()).page;
    let interviews = state
        .directory
        .candidate_interviews(&claims.public_id, page)
        .await?;
    Ok(Json(InterviewListResponse::from(interviews)))
}

async fn apply_update(
    state: &AppState,
    public_id: &str,
    update: CandidateUpdate,
) -> Result<Json<crate::models::candidate::Candidate>> {
    state.directory.update_candidate(public_id, &update).await?;
    let candidate = state.directory.candidate(public_id).await?;
    Ok(Json(candidate))
}
