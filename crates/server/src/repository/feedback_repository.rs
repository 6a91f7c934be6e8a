use crate::entity::feedback;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use classroom_core::domain::{FeedbackId, Grade, RequiredText, SubmissionId, UserId};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    sea_query::OnConflict,
};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackRecord {
    pub id: FeedbackId,
    pub submission_id: SubmissionId,
    pub teacher_id: UserId,
    pub comment: String,
    pub grade: Option<Grade>,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct FeedbackUpsert {
    pub submission_id: SubmissionId,
    pub teacher_id: UserId,
    pub comment: RequiredText,
    pub grade: Option<Grade>,
}

#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Creates the feedback of a submission or overwrites the existing one.
    async fn upsert(&self, upsert: FeedbackUpsert) -> Result<FeedbackRecord>;
    async fn find_by_submission(&self, submission_id: SubmissionId)
    -> Result<Option<FeedbackRecord>>;
    async fn list_for_submissions(
        &self,
        submission_ids: &[SubmissionId],
    ) -> Result<Vec<FeedbackRecord>>;
}

#[derive(Clone)]
pub struct SeaOrmFeedbackRepository {
    db: DatabaseConnection,
}

impl SeaOrmFeedbackRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_grade(value: Option<i16>) -> Result<Option<Grade>> {
        value
            .map(|raw| {
                let raw = u16::try_from(raw).map_err(|_| {
                    anyhow!("invalid feedback.grade from database: {raw} (must be non-negative)")
                })?;
                Ok(Grade::new(raw)?)
            })
            .transpose()
    }

    fn map_model(model: feedback::Model) -> Result<FeedbackRecord> {
        let id = FeedbackId::from_str(&model.id)
            .map_err(|e| anyhow!("invalid feedback.id '{}' from database: {e}", model.id))?;
        let submission_id = SubmissionId::from_str(&model.submission_id).map_err(|e| {
            anyhow!(
                "invalid feedback.submission_id '{}' from database: {e}",
                model.submission_id
            )
        })?;
        let teacher_id = UserId::from_str(&model.teacher_id).map_err(|e| {
            anyhow!(
                "invalid feedback.teacher_id '{}' from database: {e}",
                model.teacher_id
            )
        })?;

        Ok(FeedbackRecord {
            id,
            submission_id,
            teacher_id,
            comment: model.comment,
            grade: Self::map_grade(model.grade)?,
            updated_at: model.updated_at,
        })
    }
}

#[async_trait]
impl FeedbackRepository for SeaOrmFeedbackRepository {
    async fn upsert(&self, upsert: FeedbackUpsert) -> Result<FeedbackRecord> {
        let now = Utc::now().naive_utc();
        let submission_id = upsert.submission_id;

        let active_model = feedback::ActiveModel {
            id: Set(FeedbackId::new().to_string()),
            submission_id: Set(submission_id.to_string()),
            teacher_id: Set(upsert.teacher_id.to_string()),
            comment: Set(upsert.comment.into_inner()),
            grade: Set(upsert.grade.map(|grade| i16::from(grade.value()))),
            created_at: Set(now),
            updated_at: Set(now),
        };

        // Single statement so concurrent graders never produce a second row.
        feedback::Entity::insert(active_model)
            .on_conflict(
                OnConflict::column(feedback::Column::SubmissionId)
                    .update_columns([
                        feedback::Column::TeacherId,
                        feedback::Column::Comment,
                        feedback::Column::Grade,
                        feedback::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        self.find_by_submission(submission_id)
            .await?
            .ok_or_else(|| anyhow!("feedback for submission '{submission_id}' vanished after upsert"))
    }

    async fn find_by_submission(
        &self,
        submission_id: SubmissionId,
    ) -> Result<Option<FeedbackRecord>> {
        let model = feedback::Entity::find()
            .filter(feedback::Column::SubmissionId.eq(submission_id.to_string()))
            .one(&self.db)
            .await?;

        model.map(Self::map_model).transpose()
    }

    async fn list_for_submissions(
        &self,
        submission_ids: &[SubmissionId],
    ) -> Result<Vec<FeedbackRecord>> {
        if submission_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = feedback::Entity::find()
            .filter(
                feedback::Column::SubmissionId
                    .is_in(submission_ids.iter().map(ToString::to_string)),
            )
            .all(&self.db)
            .await?;

        models.into_iter().map(Self::map_model).collect()
    }
}
