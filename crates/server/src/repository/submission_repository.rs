use crate::entity::{assignment, submission};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use classroom_core::domain::{AssignmentId, CourseId, SubmissionId, UserId};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    pub id: SubmissionId,
    pub assignment_id: AssignmentId,
    pub student_id: UserId,
    pub summary: Option<String>,
    pub file_url: Option<String>,
    pub submitted_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub assignment_id: AssignmentId,
    pub student_id: UserId,
    pub summary: Option<String>,
    pub file_url: Option<String>,
}

#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn create(&self, new_submission: NewSubmission) -> Result<SubmissionRecord>;
    async fn find_by_id(&self, submission_id: SubmissionId) -> Result<Option<SubmissionRecord>>;
    /// Submissions for one assignment, newest first.
    async fn list_by_assignment(&self, assignment_id: AssignmentId)
    -> Result<Vec<SubmissionRecord>>;
    /// Every submission to any assignment of the course, newest first.
    async fn list_by_course(&self, course_id: CourseId) -> Result<Vec<SubmissionRecord>>;
    /// One student's submissions in a course, newest first.
    async fn list_by_course_and_student(
        &self,
        course_id: CourseId,
        student_id: UserId,
    ) -> Result<Vec<SubmissionRecord>>;
}

#[derive(Clone)]
pub struct SeaOrmSubmissionRepository {
    db: DatabaseConnection,
}

impl SeaOrmSubmissionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_model(model: submission::Model) -> Result<SubmissionRecord> {
        let id = SubmissionId::from_str(&model.id)
            .map_err(|e| anyhow!("invalid submission.id '{}' from database: {e}", model.id))?;
        let assignment_id = AssignmentId::from_str(&model.assignment_id).map_err(|e| {
            anyhow!(
                "invalid submission.assignment_id '{}' from database: {e}",
                model.assignment_id
            )
        })?;
        let student_id = UserId::from_str(&model.student_id).map_err(|e| {
            anyhow!(
                "invalid submission.student_id '{}' from database: {e}",
                model.student_id
            )
        })?;

        Ok(SubmissionRecord {
            id,
            assignment_id,
            student_id,
            summary: model.summary,
            file_url: model.file_url,
            submitted_at: model.submitted_at,
        })
    }

    fn course_submissions(course_id: CourseId) -> sea_orm::Select<submission::Entity> {
        submission::Entity::find()
            .join(JoinType::InnerJoin, submission::Relation::Assignment.def())
            .filter(assignment::Column::CourseId.eq(course_id.to_string()))
            .order_by_desc(submission::Column::SubmittedAt)
            .order_by_desc(submission::Column::Id)
    }
}

#[async_trait]
impl SubmissionRepository for SeaOrmSubmissionRepository {
    async fn create(&self, new_submission: NewSubmission) -> Result<SubmissionRecord> {
        let id = SubmissionId::new();

        let active_model = submission::ActiveModel {
            id: Set(id.to_string()),
            assignment_id: Set(new_submission.assignment_id.to_string()),
            student_id: Set(new_submission.student_id.to_string()),
            summary: Set(new_submission.summary),
            file_url: Set(new_submission.file_url),
            submitted_at: Set(Utc::now().naive_utc()),
        };

        let model = active_model.insert(&self.db).await?;
        Self::map_model(model)
    }

    async fn find_by_id(&self, submission_id: SubmissionId) -> Result<Option<SubmissionRecord>> {
        let model = submission::Entity::find_by_id(submission_id.to_string())
            .one(&self.db)
            .await?;

        model.map(Self::map_model).transpose()
    }

    async fn list_by_assignment(
        &self,
        assignment_id: AssignmentId,
    ) -> Result<Vec<SubmissionRecord>> {
        let models = submission::Entity::find()
            .filter(submission::Column::AssignmentId.eq(assignment_id.to_string()))
            .order_by_desc(submission::Column::SubmittedAt)
            .order_by_desc(submission::Column::Id)
            .all(&self.db)
            .await?;

        models.into_iter().map(Self::map_model).collect()
    }

    async fn list_by_course(&self, course_id: CourseId) -> Result<Vec<SubmissionRecord>> {
        let models = Self::course_submissions(course_id).all(&self.db).await?;

        models.into_iter().map(Self::map_model).collect()
    }

    async fn list_by_course_and_student(
        &self,
        course_id: CourseId,
        student_id: UserId,
    ) -> Result<Vec<SubmissionRecord>> {
        let models = Self::course_submissions(course_id)
            .filter(submission::Column::StudentId.eq(student_id.to_string()))
            .all(&self.db)
            .await?;

        models.into_iter().map(Self::map_model).collect()
    }
}
