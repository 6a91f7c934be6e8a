use std::sync::Arc;

use classroom_core::domain::{
    AccessError, AccessScope, Caller, CourseId, CourseMembership, authorize, require_role,
};
use tracing::debug;

use super::error::ServiceError;
use crate::repository::CourseRepository;

/// Loads a fresh membership snapshot per call and applies the access decision.
#[derive(Clone)]
pub struct AccessResolver {
    courses: Arc<dyn CourseRepository>,
}

impl AccessResolver {
    pub fn new(courses: Arc<dyn CourseRepository>) -> Self {
        Self { courses }
    }

    /// Grants `scope` on a course. Missing courses and courses the caller is
    /// not part of fail identically.
    pub async fn authorize(
        &self,
        caller: &Caller,
        course_id: CourseId,
        scope: AccessScope,
    ) -> Result<CourseMembership, ServiceError> {
        require_role(Some(caller), scope)?;

        let membership = self.courses.membership(course_id).await?;
        match authorize(Some(caller), scope, membership.as_ref()) {
            Ok(granted) => Ok(granted.clone()),
            Err(err) => {
                debug!(course_id = %course_id, user_id = %caller.id, ?scope, "course access denied");
                Err(err.into())
            }
        }
    }

    /// Same decision for an entity reached by its own id (a submission, an
    /// assignment); a refusal there is `Forbidden` since the entity was found.
    pub async fn authorize_entity(
        &self,
        caller: &Caller,
        course_id: CourseId,
        scope: AccessScope,
    ) -> Result<CourseMembership, ServiceError> {
        match self.authorize(caller, course_id, scope).await {
            Err(ServiceError::Access(AccessError::NotFoundOrDenied)) => Err(ServiceError::Forbidden),
            other => other,
        }
    }
}
