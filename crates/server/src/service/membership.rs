use classroom_core::domain::{
    AccessScope, Caller, CodeError, CodeKind, CourseId, Member, MembershipError, UserId,
    check_enroll, check_format, check_invite, check_join, decode, require_role,
};
use tracing::info;

use super::access::AccessResolver;
use super::error::ServiceError;
use super::input::MemberInput;
use crate::repository::{CourseRecord, Repositories, UserRecord};

/// Join, invite, enroll and remove. Every check runs before the single
/// mutating statement; adds are add-to-set inserts, removal is idempotent.
#[derive(Clone)]
pub struct MembershipService {
    repos: Repositories,
    access: AccessResolver,
}

impl MembershipService {
    pub fn new(repos: Repositories, access: AccessResolver) -> Self {
        Self { repos, access }
    }

    pub async fn join_as_student(
        &self,
        caller: &Caller,
        code: &str,
    ) -> Result<CourseRecord, ServiceError> {
        require_role(Some(caller), AccessScope::Student)?;
        check_format(code, CodeKind::Student)?;

        let courses = self.repos.courses.list_all().await?;
        let course = decode(code, CodeKind::Student, &courses)?.clone();

        let membership = self
            .repos
            .courses
            .membership(course.id)
            .await?
            .ok_or(CodeError::NotFound)?;
        check_join(&membership, caller.id)?;

        // A concurrent join of the same student lands here as a no-op insert.
        if !self.repos.courses.add_student(course.id, caller.id).await? {
            return Err(MembershipError::AlreadyEnrolled.into());
        }

        info!(course_id = %course.id, student_id = %caller.id, "student joined course");
        Ok(course)
    }

    pub async fn invite_co_teacher(
        &self,
        caller: &Caller,
        input: MemberInput,
    ) -> Result<UserRecord, ServiceError> {
        let membership = self
            .access
            .authorize(caller, input.course_id, AccessScope::Teacher)
            .await?;

        let invitee = self
            .repos
            .users
            .find_by_email(input.email.as_str())
            .await?
            .ok_or(ServiceError::NotFound("Teacher with this email not found"))?;

        check_invite(
            &membership,
            Member {
                id: invitee.id,
                role: invitee.role,
            },
        )?;

        if !self
            .repos
            .courses
            .add_co_teacher(input.course_id, invitee.id)
            .await?
        {
            return Err(MembershipError::AlreadyCoTeacher.into());
        }

        info!(
            course_id = %input.course_id,
            co_teacher_id = %invitee.id,
            invited_by = %caller.id,
            "co-teacher added"
        );
        Ok(invitee)
    }

    /// `co_teacher_id` of `None` names nobody; the call still succeeds.
    pub async fn remove_co_teacher(
        &self,
        caller: &Caller,
        course_id: CourseId,
        co_teacher_id: Option<UserId>,
    ) -> Result<(), ServiceError> {
        self.access
            .authorize(caller, course_id, AccessScope::Teacher)
            .await?;

        let Some(co_teacher_id) = co_teacher_id else {
            return Ok(());
        };

        let removed = self
            .repos
            .courses
            .remove_co_teacher(course_id, co_teacher_id)
            .await?;

        info!(
            course_id = %course_id,
            co_teacher_id = %co_teacher_id,
            removed_by = %caller.id,
            removed,
            "co-teacher removal processed"
        );
        Ok(())
    }

    pub async fn enroll_student(
        &self,
        caller: &Caller,
        input: MemberInput,
    ) -> Result<UserRecord, ServiceError> {
        let membership = self
            .access
            .authorize(caller, input.course_id, AccessScope::Teacher)
            .await?;

        let student = self
            .repos
            .users
            .find_by_email(input.email.as_str())
            .await?
            .ok_or(ServiceError::NotFound("Student with this email not found"))?;

        check_enroll(
            &membership,
            Member {
                id: student.id,
                role: student.role,
            },
        )?;

        if !self
            .repos
            .courses
            .add_student(input.course_id, student.id)
            .await?
        {
            return Err(MembershipError::StudentAlreadyEnrolled.into());
        }

        info!(
            course_id = %input.course_id,
            student_id = %student.id,
            enrolled_by = %caller.id,
            "student enrolled by teacher"
        );
        Ok(student)
    }
}
