use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::{
        common_dto::ListQuery,
        company_dto::{
            CompanyListResponse, CreateCompanyPayload, CreateCompanyResponse,
            UpdateCompanyPayload,
        },
    },
    error::Result,
    models::company::{CompanyUpdate, NewCompany},
    routes::missing_as_not_found,
    AppState,
};

pub async fn create_company(
    State(state): State<AppState>,
    Json(payload): Json<CreateCompanyPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let public_id = state
        .directory
        .create_company(&NewCompany::from(payload))
        .await?;
    Ok((StatusCode::CREATED, Json(CreateCompanyResponse { public_id })))
}

pub async fn list_companies(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse> {
    let query = ListQuery::parse(query.as_deref());
    let page = state
        .directory
        .search_companies(&query.search, query.page)
        .await?;
    Ok(Json(CompanyListResponse::from(page)))
}

pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state
        .directory
        .ensure_company(&id)
        .await
        .map_err(missing_as_not_found)?;
    let company = state.directory.company(&id).await?;
    Ok(Json(company))
}

pub async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCompanyPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    state
        .directory
        .ensure_company(&id)
        .await
        .map_err(missing_as_not_found)?;
    state
        .directory
        .update_company(&id, &CompanyUpdate::from(payload))
        .await?;
    let company = state.directory.company(&id).await?;
    Ok(Json(company))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::models::company::Company;
    use crate::models::pagination::{Page, PageArgs};
    use crate::routes::testing::*;
    use crate::services::{MockCandidateAccess, MockCompanyAccess, MockRecruiterAccess};

    fn with_companies(companies: MockCompanyAccess) -> axum::Router {
        app(MockCandidateAccess::new(), MockRecruiterAccess::new(), companies)
    }

    fn acme(public_id: &str) -> Company {
        Company {
            id: 7,
            public_id: public_id.to_string(),
            name: "Acme".into(),
            logo: None,
            description: Some("Rockets".into()),
        }
    }

    #[tokio::test]
    async fn create_returns_public_id() {
        let mut companies = MockCompanyAccess::new();
        companies
            .expect_create()
            .withf(|c| c.name == "Acme" && c.logo.is_none())
            .returning(|_| Ok("co-1".to_string()));

        let response = with_companies(companies)
            .oneshot(request("POST", "/company", Some(json!({"name": "Acme"}))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = read_json(response).await;
        assert_eq!(body, json!({"public_id": "co-1"}));
    }

    #[tokio::test]
    async fn create_rejects_empty_name() {
        let mut companies = MockCompanyAccess::new();
        companies.expect_create().never();

        let response = with_companies(companies)
            .oneshot(request("POST", "/company", Some(json!({"name": ""}))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_passes_search_and_paging() {
        let mut companies = MockCompanyAccess::new();
        companies
            .expect_search()
            .withf(|search, page| search == "ac" && *page == PageArgs::new(1, 20))
            .returning(|_, _| Ok(Page::new(vec![acme("co-1")], 1)));

        let response = with_companies(companies)
            .oneshot(request("GET", "/companies?search=ac&page_size=20", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["companies"][0]["name"], "Acme");
        assert!(body["companies"][0].get("id").is_none());
    }

    #[tokio::test]
    async fn update_unknown_company_is_not_found() {
        let mut companies = MockCompanyAccess::new();
        companies.expect_exists().returning(|_| Ok(false));
        companies.expect_update().never();

        let response = with_companies(companies)
            .oneshot(request(
                "PUT",
                "/company/ghost",
                Some(json!({"description": "x"})),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_returns_current_company() {
        let mut companies = MockCompanyAccess::new();
        companies.expect_exists().returning(|_| Ok(true));
        companies
            .expect_update()
            .withf(|id, update| id == "co-1" && update.name.is_none())
            .times(1)
            .returning(|_, _| Ok(()));
        companies
            .expect_get_by_public_id()
            .returning(|id| Ok(acme(id)));

        let response = with_companies(companies)
            .oneshot(request(
                "PUT",
                "/company/co-1",
                Some(json!({"description": "Rockets"})),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["description"], "Rockets");
    }
}
