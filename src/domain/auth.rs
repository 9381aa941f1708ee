use crate::error::{AppError, Result};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Session issued by the identity provider after a successful sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Provider account id.
    pub sub: String,
    /// Provider login (e.g. the GitHub username).
    pub login: String,
    pub exp: usize,
}

impl SessionClaims {
    #[must_use]
    pub fn new(sub: impl Into<String>, login: impl Into<String>, ttl_secs: u64) -> Self {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or_default();
        let exp = usize::try_from(now.saturating_add(ttl_secs)).unwrap_or(usize::MAX);

        Self { sub: sub.into(), login: login.into(), exp }
    }

    /// Signs the claims with the shared session secret.
    ///
    /// # Errors
    /// Returns `AppError::Internal` if signing fails.
    pub fn encode(&self, secret: &str) -> Result<String> {
        encode(&Header::default(), self, &EncodingKey::from_secret(secret.as_bytes())).map_err(|_| AppError::Internal)
    }

    /// Verifies a session token and returns its claims.
    ///
    /// # Errors
    /// Returns `AppError::AuthError` if the token is malformed, expired or signed with another secret.
    pub fn decode(token: &str, secret: &str) -> Result<Self> {
        let token_data = decode::<Self>(token, &DecodingKey::from_secret(secret.as_bytes()), &Validation::default())
            .map_err(|_| AppError::AuthError)?;

        Ok(token_data.claims)
    }
}

/// Who may use the admin dashboard.
#[derive(Debug, Clone, Default)]
pub struct AdminPolicy {
    logins: Vec<String>,
}

impl AdminPolicy {
    #[must_use]
    pub fn new(logins: &[String]) -> Self {
        let logins = logins.iter().map(|l| l.trim().to_lowercase()).filter(|l| !l.is_empty()).collect();
        Self { logins }
    }

    /// An empty allowlist admits every signed-in login.
    #[must_use]
    pub fn allows(&self, login: &str) -> bool {
        self.logins.is_empty() || self.logins.iter().any(|l| l.eq_ignore_ascii_case(login))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_roundtrip() {
        let claims = SessionClaims::new("1234", "octocat", 3600);

        let token = claims.encode("test_secret").unwrap();
        let decoded = SessionClaims::decode(&token, "test_secret").unwrap();

        assert_eq!(claims, decoded);
    }

    #[test]
    fn test_claims_invalid_secret() {
        let claims = SessionClaims::new("1234", "octocat", 3600);
        let token = claims.encode("secret1").unwrap();

        let result = SessionClaims::decode(&token, "secret2");
        assert!(matches!(result, Err(AppError::AuthError)));
    }

    #[test]
    fn test_claims_expired() {
        let mut claims = SessionClaims::new("1234", "octocat", 0);
        claims.exp = 1;
        let token = claims.encode("test_secret").unwrap();

        assert!(matches!(SessionClaims::decode(&token, "test_secret"), Err(AppError::AuthError)));
    }

    #[test]
    fn test_admin_policy() {
        let open = AdminPolicy::new(&[]);
        assert!(open.allows("anyone"));

        let policy = AdminPolicy::new(&["OctoCat".to_string(), " ".to_string()]);
        assert!(policy.allows("octocat"));
        assert!(!policy.allows("hubot"));
    }
}
