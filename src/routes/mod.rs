pub mod account;
pub mod candidate_routes;
pub mod company_routes;
pub mod health;
pub mod recruiter_routes;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};

use crate::error::Error;
use crate::middleware::auth::require_bearer_auth;
use crate::AppState;

pub fn router(state: AppState) -> Router {
    let public_api = Router::new()
        .route("/health", get(health::health))
        .route("/candidates", get(candidate_routes::list_candidates))
        .route(
            "/candidate/:id",
            get(candidate_routes::get_candidate)
                .put(candidate_routes::update_candidate)
                .delete(candidate_routes::delete_candidate),
        )
        .route(
            "/candidate/:id/interviews",
            get(candidate_routes::get_candidate_interviews),
        )
        .route("/recruiter/:id", get(recruiter_routes::get_recruiter))
        .route(
            "/recruiter/:id/interviews",
            get(recruiter_routes::get_recruiter_interviews),
        )
        .route("/company", post(company_routes::create_company))
        .route("/companies", get(company_routes::list_companies))
        .route(
            "/company/:id",
            get(company_routes::get_company).put(company_routes::update_company),
        );

    let protected_api = Router::new()
        .route("/account", get(account::get_account))
        .route(
            "/candidate",
            put(candidate_routes::update_own_profile).delete(candidate_routes::delete_own_profile),
        )
        .route(
            "/candidate/skills",
            post(candidate_routes::add_skills).delete(candidate_routes::remove_skills),
        )
        .route(
            "/candidate/interviews",
            get(candidate_routes::get_own_interviews),
        )
        .route(
            "/recruiter/interviews",
            get(recruiter_routes::get_own_interviews),
        )
        .route_layer(from_fn_with_state(state.clone(), require_bearer_auth));

    public_api.merge(protected_api).with_state(state)
}

/// Lookups by path id report a missing entity as 404 rather than 401.
pub(crate) fn missing_as_not_found(err: Error) -> Error {
    match err {
        Error::PermissionDenied(msg) => Error::NotFound(msg),
        other => other,
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use axum::{
        body::Body,
        http::{header, Request},
        response::Response,
        Router,
    };
    use serde_json::Value;

    use crate::middleware::auth::{testing as auth, Role};
    use crate::services::testing::directory;
    use crate::services::{MockCandidateAccess, MockCompanyAccess, MockRecruiterAccess};
    use crate::AppState;

    pub fn app(
        candidates: MockCandidateAccess,
        recruiters: MockRecruiterAccess,
        companies: MockCompanyAccess,
    ) -> Router {
        let state = AppState::with_directory(
            directory(candidates, recruiters, companies),
            auth::SECRET,
        );
        super::router(state)
    }

    pub fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    pub fn authorized(
        method: &str,
        uri: &str,
        public_id: &str,
        role: Role,
        body: Option<Value>,
    ) -> Request<Body> {
        let mut req = request(method, uri, body);
        let bearer = format!("Bearer {}", auth::token_for(public_id, role));
        req.headers_mut()
            .insert(header::AUTHORIZATION, bearer.parse().unwrap());
        req
    }

    pub async fn read_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}
