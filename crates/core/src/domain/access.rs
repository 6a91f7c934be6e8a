//! Course access decisions.
//!
//! The decision is made against a [`CourseMembership`] snapshot loaded fresh for
//! each request. A missing course and a course the caller does not belong to
//! produce the same [`AccessError::NotFoundOrDenied`].

use std::collections::HashSet;

use thiserror::Error;

use super::{CourseId, Role, UserId};

/// The authenticated principal behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Caller {
    pub id: UserId,
    pub role: Role,
}

impl Caller {
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessScope {
    /// Main teacher or co-teacher.
    Teacher,
    /// Enrolled student.
    Student,
}

impl AccessScope {
    pub fn required_role(self) -> Role {
        match self {
            AccessScope::Teacher => Role::Teacher,
            AccessScope::Student => Role::Student,
        }
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("Unauthorized")]
    Unauthenticated,
    #[error("Unauthorized")]
    WrongRole,
    #[error("Course not found or access denied")]
    NotFoundOrDenied,
}

/// Who teaches and who attends a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseMembership {
    pub course_id: CourseId,
    pub teacher_id: UserId,
    pub co_teacher_ids: HashSet<UserId>,
    pub student_ids: HashSet<UserId>,
}

impl CourseMembership {
    pub fn new(course_id: CourseId, teacher_id: UserId) -> Self {
        Self {
            course_id,
            teacher_id,
            co_teacher_ids: HashSet::new(),
            student_ids: HashSet::new(),
        }
    }

    pub fn with_co_teachers(mut self, ids: impl IntoIterator<Item = UserId>) -> Self {
        self.co_teacher_ids.extend(ids);
        self
    }

    pub fn with_students(mut self, ids: impl IntoIterator<Item = UserId>) -> Self {
        self.student_ids.extend(ids);
        self
    }

    pub fn is_main_teacher(&self, user_id: UserId) -> bool {
        self.teacher_id == user_id
    }

    pub fn is_co_teacher(&self, user_id: UserId) -> bool {
        self.co_teacher_ids.contains(&user_id)
    }

    pub fn is_teaching(&self, user_id: UserId) -> bool {
        self.is_main_teacher(user_id) || self.is_co_teacher(user_id)
    }

    pub fn is_student(&self, user_id: UserId) -> bool {
        self.student_ids.contains(&user_id)
    }

    pub fn grants(&self, caller: &Caller, scope: AccessScope) -> bool {
        if caller.role != scope.required_role() {
            return false;
        }

        match scope {
            AccessScope::Teacher => self.is_teaching(caller.id),
            AccessScope::Student => self.is_student(caller.id),
        }
    }
}

/// Role gate, checked before any course is looked up.
pub fn require_role(caller: Option<&Caller>, scope: AccessScope) -> Result<&Caller, AccessError> {
    let caller = caller.ok_or(AccessError::Unauthenticated)?;

    if caller.role != scope.required_role() {
        return Err(AccessError::WrongRole);
    }

    Ok(caller)
}

/// Full access decision for `caller` on the course described by `membership`.
///
/// `membership` is `None` when the course does not exist.
pub fn authorize<'a>(
    caller: Option<&Caller>,
    scope: AccessScope,
    membership: Option<&'a CourseMembership>,
) -> Result<&'a CourseMembership, AccessError> {
    let caller = require_role(caller, scope)?;

    match membership {
        Some(membership) if membership.grants(caller, scope) => Ok(membership),
        _ => Err(AccessError::NotFoundOrDenied),
    }
}
