use crate::entity::{assignment, submission};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use classroom_core::domain::{AssignmentId, CourseId, RequiredText};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use std::collections::HashMap;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentRecord {
    pub id: AssignmentId,
    pub course_id: CourseId,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDateTime,
    pub attachment: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub course_id: CourseId,
    pub title: RequiredText,
    pub description: RequiredText,
    pub due_date: NaiveDateTime,
    pub attachment: Option<String>,
}

#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    async fn create(&self, new_assignment: NewAssignment) -> Result<AssignmentRecord>;
    async fn find_by_id(&self, assignment_id: AssignmentId) -> Result<Option<AssignmentRecord>>;
    /// Assignments of a course, earliest due date first.
    async fn list_by_course(&self, course_id: CourseId) -> Result<Vec<AssignmentRecord>>;
    /// Submission count per assignment. Assignments without submissions are absent.
    async fn count_submissions(
        &self,
        assignment_ids: &[AssignmentId],
    ) -> Result<HashMap<AssignmentId, u64>>;
}

#[derive(Clone)]
pub struct SeaOrmAssignmentRepository {
    db: DatabaseConnection,
}

impl SeaOrmAssignmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn parse_id(raw: &str) -> Result<AssignmentId> {
        AssignmentId::from_str(raw)
            .map_err(|e| anyhow!("invalid assignment.id '{raw}' from database: {e}"))
    }

    fn map_model(model: assignment::Model) -> Result<AssignmentRecord> {
        let id = Self::parse_id(&model.id)?;
        let course_id = CourseId::from_str(&model.course_id).map_err(|e| {
            anyhow!(
                "invalid assignment.course_id '{}' from database: {e}",
                model.course_id
            )
        })?;

        Ok(AssignmentRecord {
            id,
            course_id,
            title: model.title,
            description: model.description,
            due_date: model.due_date,
            attachment: model.attachment,
            created_at: model.created_at,
        })
    }
}

#[async_trait]
impl AssignmentRepository for SeaOrmAssignmentRepository {
    async fn create(&self, new_assignment: NewAssignment) -> Result<AssignmentRecord> {
        let id = AssignmentId::new();
        let now = Utc::now().naive_utc();

        let active_model = assignment::ActiveModel {
            id: Set(id.to_string()),
            course_id: Set(new_assignment.course_id.to_string()),
            title: Set(new_assignment.title.into_inner()),
            description: Set(new_assignment.description.into_inner()),
            due_date: Set(new_assignment.due_date),
            attachment: Set(new_assignment.attachment),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Self::map_model(model)
    }

    async fn find_by_id(&self, assignment_id: AssignmentId) -> Result<Option<AssignmentRecord>> {
        let model = assignment::Entity::find_by_id(assignment_id.to_string())
            .one(&self.db)
            .await?;

        model.map(Self::map_model).transpose()
    }

    async fn list_by_course(&self, course_id: CourseId) -> Result<Vec<AssignmentRecord>> {
        let models = assignment::Entity::find()
            .filter(assignment::Column::CourseId.eq(course_id.to_string()))
            .order_by_asc(assignment::Column::DueDate)
            .order_by_asc(assignment::Column::Id)
            .all(&self.db)
            .await?;

        models.into_iter().map(Self::map_model).collect()
    }

    async fn count_submissions(
        &self,
        assignment_ids: &[AssignmentId],
    ) -> Result<HashMap<AssignmentId, u64>> {
        if assignment_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(String, i64)> = submission::Entity::find()
            .select_only()
            .column(submission::Column::AssignmentId)
            .column_as(submission::Column::Id.count(), "submission_count")
            .filter(
                submission::Column::AssignmentId
                    .is_in(assignment_ids.iter().map(ToString::to_string)),
            )
            .group_by(submission::Column::AssignmentId)
            .into_tuple()
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|(raw_id, count)| {
                let count = u64::try_from(count)
                    .map_err(|_| anyhow!("negative submission count for assignment '{raw_id}'"))?;
                Ok((Self::parse_id(&raw_id)?, count))
            })
            .collect()
    }
}
