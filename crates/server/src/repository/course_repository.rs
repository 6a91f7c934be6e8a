use crate::entity::{course, course_co_teacher, course_student, user};
use crate::repository::user_repository::{SeaOrmUserRepository, UserRecord};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use classroom_core::domain::{
    CodedCourse, CourseDescription, CourseId, CourseMembership, CourseName, HttpUrl, UserId,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    sea_query::OnConflict,
};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRecord {
    pub id: CourseId,
    pub name: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub teacher_id: UserId,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl CodedCourse for CourseRecord {
    fn course_id(&self) -> CourseId {
        self.id
    }

    fn course_name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub name: CourseName,
    pub description: Option<CourseDescription>,
    pub thumbnail: Option<HttpUrl>,
    pub teacher_id: UserId,
}

#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn create(&self, new_course: NewCourse) -> Result<CourseRecord>;
    async fn find_by_id(&self, course_id: CourseId) -> Result<Option<CourseRecord>>;
    /// Every course, oldest first. Code decoding scans this list.
    async fn list_all(&self) -> Result<Vec<CourseRecord>>;
    /// Courses where the user is the main teacher or a co-teacher, newest first.
    async fn list_taught_by(&self, teacher_id: UserId) -> Result<Vec<CourseRecord>>;
    /// Courses the student is enrolled in, newest first.
    async fn list_enrolled(&self, student_id: UserId) -> Result<Vec<CourseRecord>>;
    /// `None` when the course does not exist.
    async fn membership(&self, course_id: CourseId) -> Result<Option<CourseMembership>>;
    /// Enrolled students ordered by name.
    async fn students(&self, course_id: CourseId) -> Result<Vec<UserRecord>>;
    /// The first `limit` students to join.
    async fn earliest_students(&self, course_id: CourseId, limit: u64) -> Result<Vec<UserRecord>>;
    async fn count_students(&self, course_id: CourseId) -> Result<u64>;
    /// Co-teachers ordered by name.
    async fn co_teachers(&self, course_id: CourseId) -> Result<Vec<UserRecord>>;
    /// Returns `false` when the student was already enrolled.
    async fn add_student(&self, course_id: CourseId, student_id: UserId) -> Result<bool>;
    /// Returns `false` when the teacher was already a co-teacher.
    async fn add_co_teacher(&self, course_id: CourseId, teacher_id: UserId) -> Result<bool>;
    /// Number of rows removed; zero when the teacher was not a co-teacher.
    async fn remove_co_teacher(&self, course_id: CourseId, teacher_id: UserId) -> Result<u64>;
}

#[derive(Clone)]
pub struct SeaOrmCourseRepository {
    db: DatabaseConnection,
}

impl SeaOrmCourseRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_model(model: course::Model) -> Result<CourseRecord> {
        let id = CourseId::from_str(&model.id)
            .map_err(|e| anyhow!("invalid course.id '{}' from database: {e}", model.id))?;
        let teacher_id = UserId::from_str(&model.teacher_id).map_err(|e| {
            anyhow!(
                "invalid course.teacher_id '{}' from database: {e}",
                model.teacher_id
            )
        })?;

        Ok(CourseRecord {
            id,
            name: model.name,
            description: model.description,
            thumbnail: model.thumbnail,
            teacher_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    fn parse_user_id(raw: &str, column: &str) -> Result<UserId> {
        UserId::from_str(raw).map_err(|e| anyhow!("invalid {column} '{raw}' from database: {e}"))
    }

    fn map_users(models: Vec<user::Model>) -> Result<Vec<UserRecord>> {
        models
            .into_iter()
            .map(SeaOrmUserRepository::map_model)
            .collect()
    }

    /// `ON CONFLICT DO NOTHING` reports a skipped row either as zero affected
    /// rows or as `RecordNotInserted`, depending on the backend.
    fn inserted(result: std::result::Result<u64, DbErr>) -> Result<bool> {
        match result {
            Ok(rows) => Ok(rows > 0),
            Err(DbErr::RecordNotInserted) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl CourseRepository for SeaOrmCourseRepository {
    async fn create(&self, new_course: NewCourse) -> Result<CourseRecord> {
        let id = CourseId::new();
        let now = Utc::now().naive_utc();

        let active_model = course::ActiveModel {
            id: Set(id.to_string()),
            name: Set(new_course.name.into_inner()),
            description: Set(new_course.description.map(CourseDescription::into_inner)),
            thumbnail: Set(new_course.thumbnail.map(HttpUrl::into_inner)),
            teacher_id: Set(new_course.teacher_id.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Self::map_model(model)
    }

    async fn find_by_id(&self, course_id: CourseId) -> Result<Option<CourseRecord>> {
        let model = course::Entity::find_by_id(course_id.to_string())
            .one(&self.db)
            .await?;

        model.map(Self::map_model).transpose()
    }

    async fn list_all(&self) -> Result<Vec<CourseRecord>> {
        let models = course::Entity::find()
            .order_by_asc(course::Column::CreatedAt)
            .order_by_asc(course::Column::Id)
            .all(&self.db)
            .await?;

        models.into_iter().map(Self::map_model).collect()
    }

    async fn list_taught_by(&self, teacher_id: UserId) -> Result<Vec<CourseRecord>> {
        let teacher_id = teacher_id.to_string();
        let co_taught: Vec<String> = course_co_teacher::Entity::find()
            .filter(course_co_teacher::Column::TeacherId.eq(teacher_id.clone()))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|row| row.course_id)
            .collect();

        let mut condition = Condition::any().add(course::Column::TeacherId.eq(teacher_id));
        if !co_taught.is_empty() {
            condition = condition.add(course::Column::Id.is_in(co_taught));
        }

        let models = course::Entity::find()
            .filter(condition)
            .order_by_desc(course::Column::CreatedAt)
            .order_by_asc(course::Column::Id)
            .all(&self.db)
            .await?;

        models.into_iter().map(Self::map_model).collect()
    }

    async fn list_enrolled(&self, student_id: UserId) -> Result<Vec<CourseRecord>> {
        let models = course::Entity::find()
            .join(JoinType::InnerJoin, course::Relation::CourseStudent.def())
            .filter(course_student::Column::StudentId.eq(student_id.to_string()))
            .order_by_desc(course::Column::CreatedAt)
            .order_by_asc(course::Column::Id)
            .all(&self.db)
            .await?;

        models.into_iter().map(Self::map_model).collect()
    }

    async fn membership(&self, course_id: CourseId) -> Result<Option<CourseMembership>> {
        let Some(course) = self.find_by_id(course_id).await? else {
            return Ok(None);
        };

        let co_teacher_ids = course_co_teacher::Entity::find()
            .filter(course_co_teacher::Column::CourseId.eq(course_id.to_string()))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|row| Self::parse_user_id(&row.teacher_id, "course_co_teacher.teacher_id"))
            .collect::<Result<Vec<_>>>()?;

        let student_ids = course_student::Entity::find()
            .filter(course_student::Column::CourseId.eq(course_id.to_string()))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|row| Self::parse_user_id(&row.student_id, "course_student.student_id"))
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(
            CourseMembership::new(course.id, course.teacher_id)
                .with_co_teachers(co_teacher_ids)
                .with_students(student_ids),
        ))
    }

    async fn students(&self, course_id: CourseId) -> Result<Vec<UserRecord>> {
        let models = user::Entity::find()
            .join(JoinType::InnerJoin, course_student::Relation::User.def().rev())
            .filter(course_student::Column::CourseId.eq(course_id.to_string()))
            .order_by_asc(user::Column::Name)
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;

        Self::map_users(models)
    }

    async fn earliest_students(&self, course_id: CourseId, limit: u64) -> Result<Vec<UserRecord>> {
        let models = user::Entity::find()
            .join(JoinType::InnerJoin, course_student::Relation::User.def().rev())
            .filter(course_student::Column::CourseId.eq(course_id.to_string()))
            .order_by_asc(course_student::Column::JoinedAt)
            .order_by_asc(user::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await?;

        Self::map_users(models)
    }

    async fn count_students(&self, course_id: CourseId) -> Result<u64> {
        let count = course_student::Entity::find()
            .filter(course_student::Column::CourseId.eq(course_id.to_string()))
            .count(&self.db)
            .await?;

        Ok(count)
    }

    async fn co_teachers(&self, course_id: CourseId) -> Result<Vec<UserRecord>> {
        let models = user::Entity::find()
            .join(JoinType::InnerJoin, course_co_teacher::Relation::User.def().rev())
            .filter(course_co_teacher::Column::CourseId.eq(course_id.to_string()))
            .order_by_asc(user::Column::Name)
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;

        Self::map_users(models)
    }

    async fn add_student(&self, course_id: CourseId, student_id: UserId) -> Result<bool> {
        let active_model = course_student::ActiveModel {
            course_id: Set(course_id.to_string()),
            student_id: Set(student_id.to_string()),
            joined_at: Set(Utc::now().naive_utc()),
        };

        let result = course_student::Entity::insert(active_model)
            .on_conflict(
                OnConflict::columns([
                    course_student::Column::CourseId,
                    course_student::Column::StudentId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await;

        Self::inserted(result)
    }

    async fn add_co_teacher(&self, course_id: CourseId, teacher_id: UserId) -> Result<bool> {
        let active_model = course_co_teacher::ActiveModel {
            course_id: Set(course_id.to_string()),
            teacher_id: Set(teacher_id.to_string()),
            joined_at: Set(Utc::now().naive_utc()),
        };

        let result = course_co_teacher::Entity::insert(active_model)
            .on_conflict(
                OnConflict::columns([
                    course_co_teacher::Column::CourseId,
                    course_co_teacher::Column::TeacherId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await;

        Self::inserted(result)
    }

    async fn remove_co_teacher(&self, course_id: CourseId, teacher_id: UserId) -> Result<u64> {
        let result = course_co_teacher::Entity::delete_many()
            .filter(course_co_teacher::Column::CourseId.eq(course_id.to_string()))
            .filter(course_co_teacher::Column::TeacherId.eq(teacher_id.to_string()))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
