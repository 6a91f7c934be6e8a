use std::collections::HashMap;
use std::str::FromStr;

use anyhow::anyhow;
use classroom_core::domain::{
    AccessScope, AssignmentWork, Caller, CodeKind, CourseCode, CourseId, FeedbackMark, Gradebook,
    RankedPerformer, StudentPerformance, StudentSummary, SubmissionId, SubmissionWork,
    average_for, compute_roster, rank, require_role,
};
use tracing::info;

use super::access::AccessResolver;
use super::error::ServiceError;
use super::input::FeedbackInput;
use crate::repository::{CourseRecord, FeedbackRecord, FeedbackUpsert, Repositories, UserRecord};

pub struct TeacherPeople {
    pub course: CourseRecord,
    pub roster: Vec<StudentPerformance>,
    pub main_teacher: UserRecord,
    pub co_teachers: Vec<UserRecord>,
    pub is_main_teacher: bool,
    pub teacher_code: CourseCode,
    pub student_code: CourseCode,
}

pub struct StudentPeople {
    pub course_id: CourseId,
    pub roster: Vec<StudentPerformance>,
    pub top_performers: Vec<RankedPerformer>,
    pub current_average: u8,
}

#[derive(Clone)]
pub struct GradingService {
    repos: Repositories,
    access: AccessResolver,
}

impl GradingService {
    pub fn new(repos: Repositories, access: AccessResolver) -> Self {
        Self { repos, access }
    }

    /// Loads everything the aggregator needs for one course.
    pub async fn gradebook(&self, course_id: CourseId) -> Result<Gradebook, ServiceError> {
        let students = self
            .repos
            .courses
            .students(course_id)
            .await?
            .into_iter()
            .map(|user| StudentSummary {
                id: user.id,
                name: user.name,
                email: user.email,
            })
            .collect();

        let assignments = self.repos.assignments.list_by_course(course_id).await?;
        let submissions = self.repos.submissions.list_by_course(course_id).await?;

        let submission_ids: Vec<SubmissionId> = submissions.iter().map(|s| s.id).collect();
        let marks: HashMap<SubmissionId, FeedbackMark> = self
            .repos
            .feedback
            .list_for_submissions(&submission_ids)
            .await?
            .into_iter()
            .map(|feedback| (feedback.submission_id, FeedbackMark { grade: feedback.grade }))
            .collect();

        let mut work: HashMap<_, Vec<SubmissionWork>> = HashMap::new();
        for submission in submissions {
            work.entry(submission.assignment_id)
                .or_default()
                .push(SubmissionWork::new(
                    submission.student_id,
                    marks.get(&submission.id).copied(),
                ));
        }

        let assignments = assignments
            .into_iter()
            .map(|assignment| AssignmentWork {
                submissions: work.remove(&assignment.id).unwrap_or_default(),
            })
            .collect();

        Ok(Gradebook {
            students,
            assignments,
        })
    }

    pub async fn teacher_people(
        &self,
        caller: &Caller,
        course_id: CourseId,
    ) -> Result<TeacherPeople, ServiceError> {
        let membership = self
            .access
            .authorize(caller, course_id, AccessScope::Teacher)
            .await?;

        let course = self
            .repos
            .courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| anyhow!("course '{course_id}' vanished after access check"))?;
        let main_teacher = self
            .repos
            .users
            .find_by_id(membership.teacher_id)
            .await?
            .ok_or_else(|| anyhow!("main teacher of course '{course_id}' does not exist"))?;
        let co_teachers = self.repos.courses.co_teachers(course_id).await?;

        let roster = compute_roster(&self.gradebook(course_id).await?);

        Ok(TeacherPeople {
            teacher_code: CourseCode::for_course(CodeKind::Teacher, &course),
            student_code: CourseCode::for_course(CodeKind::Student, &course),
            is_main_teacher: membership.is_main_teacher(caller.id),
            course,
            roster,
            main_teacher,
            co_teachers,
        })
    }

    pub async fn student_people(
        &self,
        caller: &Caller,
        course_id: CourseId,
    ) -> Result<StudentPeople, ServiceError> {
        self.access
            .authorize(caller, course_id, AccessScope::Student)
            .await?;

        let roster = compute_roster(&self.gradebook(course_id).await?);

        Ok(StudentPeople {
            course_id,
            top_performers: rank(&roster),
            current_average: average_for(&roster, caller.id),
            roster,
        })
    }

    /// Creates or replaces the feedback of a submission. The teacher must
    /// teach the course the submission belongs to.
    pub async fn submit_feedback(
        &self,
        caller: &Caller,
        submission_id: &str,
        input: FeedbackInput,
    ) -> Result<FeedbackRecord, ServiceError> {
        require_role(Some(caller), AccessScope::Teacher)?;

        const MISSING: ServiceError = ServiceError::NotFound("Submission not found");
        let Ok(submission_id) = SubmissionId::from_str(submission_id) else {
            return Err(MISSING);
        };
        let submission = self
            .repos
            .submissions
            .find_by_id(submission_id)
            .await?
            .ok_or(MISSING)?;
        let assignment = self
            .repos
            .assignments
            .find_by_id(submission.assignment_id)
            .await?
            .ok_or(MISSING)?;

        self.access
            .authorize_entity(caller, assignment.course_id, AccessScope::Teacher)
            .await?;

        let feedback = self
            .repos
            .feedback
            .upsert(FeedbackUpsert {
                submission_id,
                teacher_id: caller.id,
                comment: input.comment,
                grade: input.grade,
            })
            .await?;

        info!(
            submission_id = %submission_id,
            teacher_id = %caller.id,
            grade = ?feedback.grade.map(|grade| grade.value()),
            "feedback saved"
        );
        Ok(feedback)
    }
}
