use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Candidate,
    Recruiter,
}

/// Resolved caller identity, available to protected handlers as `Extension<Claims>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub public_id: String,
    pub role: Role,
    pub exp: usize,
}

fn unauthorized(code: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": {"code": "PERMISSION_DENIED", "message": code}})),
    )
        .into_response()
}

pub fn verify_token(token: &str, secret: &str) -> Option<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .inspect_err(|e| tracing::debug!(error = %e, "Rejected bearer token"))
    .ok()
    .map(|data| data.claims)
}

pub async fn require_bearer_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return unauthorized("missing_authorization");
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return unauthorized("bad_authorization");
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return unauthorized("unsupported_scheme");
    };
    let Some(claims) = verify_token(token.trim(), &state.jwt_secret) else {
        return unauthorized("invalid_token");
    };

    req.extensions_mut().insert(claims);
    next.run(req).await
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn valid_token_yields_claims() {
        let claims = verify_token(&token_for("cand-1", Role::Candidate), SECRET).unwrap();
        assert_eq!(claims.public_id, "cand-1");
        assert_eq!(claims.role, Role::Candidate);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = token_for("cand-1", Role::Recruiter);
        assert!(verify_token(&token, "another-secret").is_none());
    }

    #[test]
    fn expired_token_is_rejected() {
        let exp = (chrono::Utc::now() - chrono::Duration::hours(2)).timestamp() as usize;
        let token = sign("cand-1", Role::Candidate, exp);
        assert!(verify_token(&token, SECRET).is_none());
    }
}
