//! Rules for changing who belongs to a course.
//!
//! Every check here runs before the single storage write that applies the
//! change, so a rejected operation never mutates anything.

use thiserror::Error;

use super::{CourseMembership, Role, UserId};

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum MembershipError {
    #[error("You are already enrolled in this course")]
    AlreadyEnrolled,
    #[error("This student is already enrolled in this course")]
    StudentAlreadyEnrolled,
    #[error("User with this email is not a teacher")]
    NotATeacher,
    #[error("User with this email is not a student")]
    NotAStudent,
    #[error("This teacher is already the main teacher of the course")]
    AlreadyMainTeacher,
    #[error("This teacher is already a co-teacher of this course")]
    AlreadyCoTeacher,
}

impl MembershipError {
    /// Stable machine-readable name.
    pub fn code(self) -> &'static str {
        match self {
            MembershipError::AlreadyEnrolled | MembershipError::StudentAlreadyEnrolled => {
                "ALREADY_ENROLLED"
            }
            MembershipError::NotATeacher => "NOT_A_TEACHER",
            MembershipError::NotAStudent => "NOT_A_STUDENT",
            MembershipError::AlreadyMainTeacher => "ALREADY_MAIN_TEACHER",
            MembershipError::AlreadyCoTeacher => "ALREADY_CO_TEACHER",
        }
    }
}

/// The account a membership change is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Member {
    pub id: UserId,
    pub role: Role,
}

/// A student joining on their own with a course code.
pub fn check_join(membership: &CourseMembership, student: UserId) -> Result<(), MembershipError> {
    if membership.is_student(student) {
        return Err(MembershipError::AlreadyEnrolled);
    }
    Ok(())
}

/// A teacher adding a student account by email.
pub fn check_enroll(membership: &CourseMembership, student: Member) -> Result<(), MembershipError> {
    if student.role != Role::Student {
        return Err(MembershipError::NotAStudent);
    }
    if membership.is_student(student.id) {
        return Err(MembershipError::StudentAlreadyEnrolled);
    }
    Ok(())
}

pub fn check_invite(membership: &CourseMembership, invitee: Member) -> Result<(), MembershipError> {
    if invitee.role != Role::Teacher {
        return Err(MembershipError::NotATeacher);
    }
    if membership.is_main_teacher(invitee.id) {
        return Err(MembershipError::AlreadyMainTeacher);
    }
    if membership.is_co_teacher(invitee.id) {
        return Err(MembershipError::AlreadyCoTeacher);
    }
    Ok(())
}
