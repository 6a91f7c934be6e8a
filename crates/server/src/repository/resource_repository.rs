use crate::entity::resource;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use classroom_core::domain::{CourseId, RequiredText, ResourceId, ResourceType};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub id: ResourceId,
    pub course_id: CourseId,
    pub title: String,
    pub resource_type: ResourceType,
    pub attachment: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewResource {
    pub course_id: CourseId,
    pub title: RequiredText,
    pub resource_type: ResourceType,
    pub attachment: RequiredText,
}

#[async_trait]
pub trait ResourceRepository: Send + Sync {
    async fn create(&self, new_resource: NewResource) -> Result<ResourceRecord>;
    /// Resources of a course, newest first.
    async fn list_by_course(&self, course_id: CourseId) -> Result<Vec<ResourceRecord>>;
}

#[derive(Clone)]
pub struct SeaOrmResourceRepository {
    db: DatabaseConnection,
}

impl SeaOrmResourceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_resource_type(code: i16) -> Result<ResourceType> {
        match code {
            0 => Ok(ResourceType::PdfDocument),
            1 => Ok(ResourceType::VideoClass),
            2 => Ok(ResourceType::Image),
            _ => Err(anyhow!("invalid resource.resource_type code from database: {code}")),
        }
    }

    fn map_resource_type_code(resource_type: ResourceType) -> i16 {
        match resource_type {
            ResourceType::PdfDocument => 0,
            ResourceType::VideoClass => 1,
            ResourceType::Image => 2,
        }
    }

    fn map_model(model: resource::Model) -> Result<ResourceRecord> {
        let id = ResourceId::from_str(&model.id)
            .map_err(|e| anyhow!("invalid resource.id '{}' from database: {e}", model.id))?;
        let course_id = CourseId::from_str(&model.course_id).map_err(|e| {
            anyhow!(
                "invalid resource.course_id '{}' from database: {e}",
                model.course_id
            )
        })?;

        Ok(ResourceRecord {
            id,
            course_id,
            title: model.title,
            resource_type: Self::map_resource_type(model.resource_type)?,
            attachment: model.attachment,
            created_at: model.created_at,
        })
    }
}

#[async_trait]
impl ResourceRepository for SeaOrmResourceRepository {
    async fn create(&self, new_resource: NewResource) -> Result<ResourceRecord> {
        let now = Utc::now().naive_utc();

        let active_model = resource::ActiveModel {
            id: Set(ResourceId::new().to_string()),
            course_id: Set(new_resource.course_id.to_string()),
            title: Set(new_resource.title.into_inner()),
            resource_type: Set(Self::map_resource_type_code(new_resource.resource_type)),
            attachment: Set(new_resource.attachment.into_inner()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Self::map_model(model)
    }

    async fn list_by_course(&self, course_id: CourseId) -> Result<Vec<ResourceRecord>> {
        let models = resource::Entity::find()
            .filter(resource::Column::CourseId.eq(course_id.to_string()))
            .order_by_desc(resource::Column::CreatedAt)
            .order_by_asc(resource::Column::Id)
            .all(&self.db)
            .await?;

        models.into_iter().map(Self::map_model).collect()
    }
}
