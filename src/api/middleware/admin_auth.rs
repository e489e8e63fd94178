//! Admin authentication
//!
//! Admin routes take `Authorization: Bearer <token>` and compare it against
//! the configured admin token. With no token configured every request is
//! refused.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::api::types::ApiError;

/// Extractor that succeeds only for a request carrying the admin token
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Compares every byte so timing does not reveal the matching prefix length
fn tokens_match(provided: &str, expected: &str) -> bool {
    provided.len() == expected.len()
        && provided
            .bytes()
            .zip(expected.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.admin_token.as_deref() else {
            warn!(path = %parts.uri.path(), "Admin request refused: no admin token configured");
            return Err(ApiError::unauthorized("Admin API is disabled"));
        };

        match bearer_token(&parts.headers) {
            Some(provided) if tokens_match(provided, expected) => {
                debug!("Admin access granted");
                Ok(RequireAdmin)
            }
            Some(_) => Err(ApiError::unauthorized("Invalid admin token")),
            None => Err(ApiError::unauthorized(
                "Admin access required. Provide Authorization: Bearer <token>",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::http::{Request, StatusCode};

    use crate::domain::waitlist::{MockRegistrationService, WaitlistEntry};
    use crate::infrastructure::storage::InMemoryStorage;
    use crate::infrastructure::waitlist::{StorageWaitlistRepository, WaitlistService};

    fn state(token: Option<&str>) -> AppState {
        let storage = Arc::new(InMemoryStorage::<WaitlistEntry>::new());
        let service = WaitlistService::new(Arc::new(StorageWaitlistRepository::new(storage)));

        AppState::new(Arc::new(service), Arc::new(MockRegistrationService::new()))
            .with_admin_token(token.map(str::to_string))
    }

    async fn extract(state: &AppState, authorization: Option<&str>) -> Result<RequireAdmin, ApiError> {
        let mut builder = Request::builder().uri("/admin/waitlist");

        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }

        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        RequireAdmin::from_request_parts(&mut parts, state).await
    }

    #[test]
    fn test_tokens_match() {
        assert!(tokens_match("s3cret", "s3cret"));
        assert!(!tokens_match("s3cres", "s3cret"));
        assert!(!tokens_match("s3cret-longer", "s3cret"));
        assert!(!tokens_match("", "s3cret"));
    }

    #[tokio::test]
    async fn test_valid_token() {
        let state = state(Some("s3cret"));
        assert!(extract(&state, Some("Bearer s3cret")).await.is_ok());
    }

    #[tokio::test]
    async fn test_wrong_or_missing_token() {
        let state = state(Some("s3cret"));

        let err = extract(&state, Some("Bearer nope")).await.unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);

        let err = extract(&state, None).await.unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);

        let err = extract(&state, Some("Basic s3cret")).await.unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unset_token_refuses_everything() {
        for token in [None, Some("")] {
            let state = state(token);
            let err = extract(&state, Some("Bearer ")).await.unwrap_err();
            assert_eq!(err.response.error.message, "Admin API is disabled");

            let err = extract(&state, Some("Bearer anything")).await.unwrap_err();
            assert_eq!(err.response.error.message, "Admin API is disabled");
        }
    }
}
