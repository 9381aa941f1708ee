use crate::api::AppState;
use crate::domain::auth::SessionClaims;
use crate::error::AppError;
use axum::{
    extract::FromRequestParts,
    http::{HeaderValue, Request, header, request::Parts},
};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// A signed-in user who is allowed into the admin dashboard.
///
/// Rejects with 401 when the session token is missing or invalid and with 403
/// when the login is not on the admin allowlist.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub sub: String,
    pub login: String,
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts.headers.get(header::AUTHORIZATION).ok_or(AppError::AuthError)?;

        let auth_str = auth_header.to_str().map_err(|_| AppError::AuthError)?;
        let token = auth_str.strip_prefix("Bearer ").ok_or(AppError::AuthError)?;

        let claims = SessionClaims::decode(token, &state.config.auth.session_secret)?;

        if !state.admin_policy.allows(&claims.login) {
            tracing::warn!(login = %claims.login, "Signed-in user is not an admin");
            return Err(AppError::Forbidden);
        }

        tracing::Span::current().record("admin", claims.login.as_str());
        Ok(Self { sub: claims.sub, login: claims.login })
    }
}

/// Generates a UUID v4 `x-request-id` for requests that arrive without one.
#[derive(Clone, Copy, Debug, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string()).ok().map(RequestId::new)
    }
}
