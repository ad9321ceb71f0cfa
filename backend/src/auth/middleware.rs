//! Authentication extractors
//!
//! Uses the pre-computed JWT keys from AppState.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

/// Caller identity extracted from a bearer access token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub owner_key: String,
    pub onboarding_completed: bool,
}

fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let auth_header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Invalid authorization format".to_string()))
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let token = bearer_token(parts)?;

        let claims = app_state
            .jwt()
            .validate_access_token(token)
            .map_err(|e| ApiError::Unauthorized(format!("Invalid token: {}", e)))?;

        if claims.sub.trim().is_empty() {
            return Err(ApiError::Unauthorized("Invalid owner key in token".to_string()));
        }

        Ok(AuthUser {
            owner_key: claims.sub,
            onboarding_completed: claims.onboarding_completed,
        })
    }
}

/// An authenticated caller who has completed onboarding
///
/// The flag comes from the token; handlers still load the profile and
/// treat a missing one as not onboarded.
#[derive(Debug, Clone)]
pub struct OnboardedUser(pub AuthUser);

#[axum::async_trait]
impl<S> FromRequestParts<S> for OnboardedUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.onboarding_completed {
            return Err(ApiError::Forbidden("Onboarding required".to_string()));
        }
        Ok(OnboardedUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[test]
    fn test_bearer_token_parsing() {
        let (parts, _) = Request::builder()
            .header(AUTHORIZATION, "Bearer abc.def.ghi")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(bearer_token(&parts).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_bearer_token_rejects_other_schemes() {
        let (parts, _) = Request::builder()
            .header(AUTHORIZATION, "Basic dXNlcjpwYXNz")
            .body(())
            .unwrap()
            .into_parts();
        assert!(matches!(bearer_token(&parts), Err(ApiError::Unauthorized(_))));

        let (parts, _) = Request::builder().body(()).unwrap().into_parts();
        assert!(matches!(bearer_token(&parts), Err(ApiError::Unauthorized(_))));
    }
}
