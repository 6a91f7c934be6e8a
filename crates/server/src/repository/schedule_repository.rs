use crate::entity::schedule;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use classroom_core::domain::{CourseId, HttpUrl, RequiredText, ScheduleId, UserId};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRecord {
    pub id: ScheduleId,
    pub course_id: CourseId,
    pub teacher_id: UserId,
    pub subject: String,
    pub topic: String,
    pub time: NaiveDateTime,
    pub meeting_link: String,
}

#[derive(Debug, Clone)]
pub struct NewSchedule {
    pub course_id: CourseId,
    pub teacher_id: UserId,
    pub subject: RequiredText,
    pub topic: RequiredText,
    pub time: NaiveDateTime,
    pub meeting_link: HttpUrl,
}

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn create(&self, new_schedule: NewSchedule) -> Result<ScheduleRecord>;
    /// Sessions of a course in chronological order.
    async fn list_by_course(&self, course_id: CourseId) -> Result<Vec<ScheduleRecord>>;
}

#[derive(Clone)]
pub struct SeaOrmScheduleRepository {
    db: DatabaseConnection,
}

impl SeaOrmScheduleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_model(model: schedule::Model) -> Result<ScheduleRecord> {
        let id = ScheduleId::from_str(&model.id)
            .map_err(|e| anyhow!("invalid schedule.id '{}' from database: {e}", model.id))?;
        let course_id = CourseId::from_str(&model.course_id).map_err(|e| {
            anyhow!(
                "invalid schedule.course_id '{}' from database: {e}",
                model.course_id
            )
        })?;
        let teacher_id = UserId::from_str(&model.teacher_id).map_err(|e| {
            anyhow!(
                "invalid schedule.teacher_id '{}' from database: {e}",
                model.teacher_id
            )
        })?;

        Ok(ScheduleRecord {
            id,
            course_id,
            teacher_id,
            subject: model.subject,
            topic: model.topic,
            time: model.time,
            meeting_link: model.meeting_link,
        })
    }
}

#[async_trait]
impl ScheduleRepository for SeaOrmScheduleRepository {
    async fn create(&self, new_schedule: NewSchedule) -> Result<ScheduleRecord> {
        let now = Utc::now().naive_utc();

        let active_model = schedule::ActiveModel {
            id: Set(ScheduleId::new().to_string()),
            course_id: Set(new_schedule.course_id.to_string()),
            teacher_id: Set(new_schedule.teacher_id.to_string()),
            subject: Set(new_schedule.subject.into_inner()),
            topic: Set(new_schedule.topic.into_inner()),
            time: Set(new_schedule.time),
            meeting_link: Set(new_schedule.meeting_link.into_inner()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Self::map_model(model)
    }

    async fn list_by_course(&self, course_id: CourseId) -> Result<Vec<ScheduleRecord>> {
        let models = schedule::Entity::find()
            .filter(schedule::Column::CourseId.eq(course_id.to_string()))
            .order_by_asc(schedule::Column::Time)
            .order_by_asc(schedule::Column::Id)
            .all(&self.db)
            .await?;

        models.into_iter().map(Self::map_model).collect()
    }
}
