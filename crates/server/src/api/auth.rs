use std::convert::Infallible;
use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};
use classroom_core::domain::{AccessScope, Caller, require_role};

use super::error::ApiError;
use super::state::AppState;
use crate::service::ServiceError;

/// The caller behind a request, if the session resolved to one.
///
/// Extraction never fails; handlers decide with [`CurrentUser::require`] so
/// the role check runs before the body is even parsed.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Option<Caller>);

impl CurrentUser {
    pub fn require(self, scope: AccessScope) -> Result<Caller, ApiError> {
        require_role(self.0.as_ref(), scope)
            .copied()
            .map_err(|err| ServiceError::from(err).into())
    }
}

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(CurrentUser(state.sessions.resolve(&parts.headers)))
    }
}
