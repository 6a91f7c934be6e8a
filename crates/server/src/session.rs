//! Current-user resolution.
//!
//! Requests carry an `Authorization: Bearer <jwt>` header signed with HS256.
//! Anything that fails to verify (missing header, bad signature, expired
//! token, unknown role) resolves to no caller at all.

use std::str::FromStr;

use axum::http::{HeaderMap, header::AUTHORIZATION};
use chrono::{Duration, Utc};
use classroom_core::domain::{Caller, Role, UserId};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub trait SessionResolver: Send + Sync {
    fn resolve(&self, headers: &HeaderMap) -> Option<Caller>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    role: String,
    iat: i64,
    exp: i64,
}

#[derive(Clone)]
pub struct JwtSessions {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtSessions {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Signs a token for `caller`, valid for the configured lifetime.
    pub fn issue(&self, caller: Caller) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: caller.id.to_string(),
            role: caller.role.as_str().to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    fn verify(&self, token: &str) -> Option<Caller> {
        let claims = decode::<SessionClaims>(
            token,
            &self.decoding,
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|err| debug!(error = %err, "rejected session token"))
        .ok()?
        .claims;

        let id = UserId::from_str(&claims.sub).ok()?;
        let role = Role::from_str(&claims.role).ok()?;
        Some(Caller::new(id, role))
    }
}

impl SessionResolver for JwtSessions {
    fn resolve(&self, headers: &HeaderMap) -> Option<Caller> {
        let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
        let token = value.strip_prefix("Bearer ")?.trim();
        if token.is_empty() {
            return None;
        }

        self.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).expect("valid header"),
        );
        headers
    }

    #[test]
    fn issued_token_resolves_to_caller() {
        let sessions = JwtSessions::new("secret", 1);
        let caller = Caller::new(UserId::new(), Role::Teacher);

        let token = sessions.issue(caller).expect("token should be issued");

        assert_eq!(sessions.resolve(&bearer(&token)), Some(caller));
    }

    #[test]
    fn token_signed_with_other_secret_is_ignored() {
        let caller = Caller::new(UserId::new(), Role::Student);
        let token = JwtSessions::new("other", 1)
            .issue(caller)
            .expect("token should be issued");

        assert_eq!(JwtSessions::new("secret", 1).resolve(&bearer(&token)), None);
    }

    #[test]
    fn expired_token_is_ignored() {
        let sessions = JwtSessions::new("secret", -1);
        let token = sessions
            .issue(Caller::new(UserId::new(), Role::Student))
            .expect("token should be issued");

        assert_eq!(sessions.resolve(&bearer(&token)), None);
    }

    #[test]
    fn missing_or_malformed_header_is_ignored() {
        let sessions = JwtSessions::new("secret", 1);
        let mut basic = HeaderMap::new();
        basic.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));

        assert_eq!(sessions.resolve(&HeaderMap::new()), None);
        assert_eq!(sessions.resolve(&basic), None);
        assert_eq!(sessions.resolve(&bearer("not-a-jwt")), None);
    }
}
