use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::anyhow;
use classroom_core::domain::{
    AccessScope, AssignmentId, AssignmentStatus, Caller, CourseId, FileCategory, FileStore,
    SubmissionId, UploadedFile, UserId, require_role,
};
use tracing::info;

use super::access::AccessResolver;
use super::error::ServiceError;
use super::input::{ScheduleInput, SubmissionInput};
use crate::repository::{
    AssignmentRecord, FeedbackRecord, NewAssignment, NewResource, NewSchedule, NewSubmission,
    Repositories, ResourceRecord, ScheduleRecord, SubmissionRecord, UserRecord,
};

const ASSIGNMENT_NOT_FOUND: &str = "Assignment not found";
pub const PDF_ONLY: &str = "Only PDF files are allowed";

pub struct AssignmentOverview {
    pub assignment: AssignmentRecord,
    pub submission_count: u64,
}

pub struct SubmissionDetail {
    pub submission: SubmissionRecord,
    pub student: UserRecord,
    pub feedback: Option<FeedbackRecord>,
}

/// One assignment as a single student sees it.
pub struct StudentAssignment {
    pub assignment: AssignmentRecord,
    pub status: AssignmentStatus,
    /// Latest submission, when there is one.
    pub submission: Option<SubmissionRecord>,
    pub feedback: Option<FeedbackRecord>,
}

#[derive(Clone)]
pub struct CourseworkService {
    repos: Repositories,
    access: AccessResolver,
    files: Arc<dyn FileStore>,
}

impl CourseworkService {
    pub fn new(repos: Repositories, access: AccessResolver, files: Arc<dyn FileStore>) -> Self {
        Self {
            repos,
            access,
            files,
        }
    }

    async fn find_assignment(&self, raw_id: &str) -> Result<AssignmentRecord, ServiceError> {
        let Ok(id) = AssignmentId::from_str(raw_id) else {
            return Err(ServiceError::NotFound(ASSIGNMENT_NOT_FOUND));
        };

        self.repos
            .assignments
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(ASSIGNMENT_NOT_FOUND))
    }

    async fn feedback_by_submission(
        &self,
        submission_ids: &[SubmissionId],
    ) -> Result<HashMap<SubmissionId, FeedbackRecord>, ServiceError> {
        Ok(self
            .repos
            .feedback
            .list_for_submissions(submission_ids)
            .await?
            .into_iter()
            .map(|feedback| (feedback.submission_id, feedback))
            .collect())
    }

    pub async fn create_assignment(
        &self,
        caller: &Caller,
        new_assignment: NewAssignment,
    ) -> Result<AssignmentRecord, ServiceError> {
        self.access
            .authorize(caller, new_assignment.course_id, AccessScope::Teacher)
            .await?;

        let assignment = self.repos.assignments.create(new_assignment).await?;
        info!(
            assignment_id = %assignment.id,
            course_id = %assignment.course_id,
            "assignment created"
        );
        Ok(assignment)
    }

    pub async fn teacher_assignments(
        &self,
        caller: &Caller,
        course_id: CourseId,
    ) -> Result<Vec<AssignmentOverview>, ServiceError> {
        self.access
            .authorize(caller, course_id, AccessScope::Teacher)
            .await?;

        let assignments = self.repos.assignments.list_by_course(course_id).await?;
        let ids: Vec<AssignmentId> = assignments.iter().map(|a| a.id).collect();
        let counts = self.repos.assignments.count_submissions(&ids).await?;

        Ok(assignments
            .into_iter()
            .map(|assignment| AssignmentOverview {
                submission_count: counts.get(&assignment.id).copied().unwrap_or(0),
                assignment,
            })
            .collect())
    }

    pub async fn assignment_submissions(
        &self,
        caller: &Caller,
        assignment_id: &str,
    ) -> Result<Vec<SubmissionDetail>, ServiceError> {
        require_role(Some(caller), AccessScope::Teacher)?;
        let assignment = self.find_assignment(assignment_id).await?;
        self.access
            .authorize_entity(caller, assignment.course_id, AccessScope::Teacher)
            .await?;

        let submissions = self.repos.submissions.list_by_assignment(assignment.id).await?;

        let mut student_ids: Vec<UserId> = submissions.iter().map(|s| s.student_id).collect();
        student_ids.sort();
        student_ids.dedup();
        let students: HashMap<UserId, UserRecord> = self
            .repos
            .users
            .find_many(&student_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        let submission_ids: Vec<SubmissionId> = submissions.iter().map(|s| s.id).collect();
        let mut feedback_by_id = self.feedback_by_submission(&submission_ids).await?;

        submissions
            .into_iter()
            .map(|submission| -> Result<SubmissionDetail, ServiceError> {
                let student = students.get(&submission.student_id).cloned().ok_or_else(|| {
                    anyhow!(
                        "student '{}' of submission '{}' does not exist",
                        submission.student_id,
                        submission.id
                    )
                })?;
                Ok(SubmissionDetail {
                    feedback: feedback_by_id.remove(&submission.id),
                    submission,
                    student,
                })
            })
            .collect()
    }

    pub async fn student_assignments(
        &self,
        caller: &Caller,
        course_id: CourseId,
    ) -> Result<Vec<StudentAssignment>, ServiceError> {
        self.access
            .authorize(caller, course_id, AccessScope::Student)
            .await?;

        let assignments = self.repos.assignments.list_by_course(course_id).await?;

        // Newest first, so the first one seen per assignment is the latest.
        let mut latest: HashMap<AssignmentId, SubmissionRecord> = HashMap::new();
        for submission in self
            .repos
            .submissions
            .list_by_course_and_student(course_id, caller.id)
            .await?
        {
            latest.entry(submission.assignment_id).or_insert(submission);
        }

        let submission_ids: Vec<SubmissionId> = latest.values().map(|s| s.id).collect();
        let mut feedback_by_id = self.feedback_by_submission(&submission_ids).await?;

        Ok(assignments
            .into_iter()
            .map(|assignment| {
                let submission = latest.remove(&assignment.id);
                let feedback = submission.as_ref().and_then(|s| feedback_by_id.remove(&s.id));
                StudentAssignment {
                    status: AssignmentStatus::from_progress(submission.is_some(), feedback.is_some()),
                    assignment,
                    submission,
                    feedback,
                }
            })
            .collect())
    }

    pub async fn submit_assignment(
        &self,
        caller: &Caller,
        assignment_id: &str,
        input: SubmissionInput,
    ) -> Result<SubmissionDetail, ServiceError> {
        require_role(Some(caller), AccessScope::Student)?;
        let assignment = self.find_assignment(assignment_id).await?;
        self.access
            .authorize_entity(caller, assignment.course_id, AccessScope::Student)
            .await?;

        let student = self
            .repos
            .users
            .find_by_id(caller.id)
            .await?
            .ok_or_else(|| anyhow!("submitting student '{}' does not exist", caller.id))?;

        let submission = self
            .repos
            .submissions
            .create(NewSubmission {
                assignment_id: assignment.id,
                student_id: caller.id,
                summary: input.summary,
                file_url: input.file_url,
            })
            .await?;

        info!(
            submission_id = %submission.id,
            assignment_id = %assignment.id,
            student_id = %caller.id,
            "assignment submitted"
        );
        Ok(SubmissionDetail {
            submission,
            student,
            feedback: None,
        })
    }

    /// Stores an assignment attachment and returns its key.
    pub async fn upload_assignment_file(
        &self,
        caller: &Caller,
        file: UploadedFile,
    ) -> Result<String, ServiceError> {
        require_role(Some(caller), AccessScope::Teacher)?;
        if !file.is_pdf() {
            return Err(ServiceError::BadRequest(PDF_ONLY));
        }

        Ok(self.files.upload(file, FileCategory::Assignment).await?)
    }

    pub async fn create_schedule(
        &self,
        caller: &Caller,
        input: ScheduleInput,
    ) -> Result<ScheduleRecord, ServiceError> {
        self.access
            .authorize(caller, input.course_id, AccessScope::Teacher)
            .await?;

        let schedule = self
            .repos
            .schedules
            .create(NewSchedule {
                course_id: input.course_id,
                teacher_id: caller.id,
                subject: input.subject,
                topic: input.topic,
                time: input.time,
                meeting_link: input.meeting_link,
            })
            .await?;

        info!(schedule_id = %schedule.id, course_id = %schedule.course_id, "class scheduled");
        Ok(schedule)
    }

    pub async fn schedules(
        &self,
        caller: &Caller,
        course_id: CourseId,
        scope: AccessScope,
    ) -> Result<Vec<ScheduleRecord>, ServiceError> {
        self.access.authorize(caller, course_id, scope).await?;

        Ok(self.repos.schedules.list_by_course(course_id).await?)
    }

    pub async fn create_resource(
        &self,
        caller: &Caller,
        new_resource: NewResource,
    ) -> Result<ResourceRecord, ServiceError> {
        self.access
            .authorize(caller, new_resource.course_id, AccessScope::Teacher)
            .await?;

        let resource = self.repos.resources.create(new_resource).await?;
        info!(resource_id = %resource.id, course_id = %resource.course_id, "resource published");
        Ok(resource)
    }

    pub async fn resources(
        &self,
        caller: &Caller,
        course_id: CourseId,
        scope: AccessScope,
    ) -> Result<Vec<ResourceRecord>, ServiceError> {
        self.access.authorize(caller, course_id, scope).await?;

        Ok(self.repos.resources.list_by_course(course_id).await?)
    }
}
