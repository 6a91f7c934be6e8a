use classroom_core::domain::{AccessScope, Caller, require_role};
use tracing::info;

use super::error::ServiceError;
use super::input::CourseInput;
use crate::repository::{CourseRecord, NewCourse, Repositories, UserRecord};

/// Students shown on a teacher's course card.
pub const PREVIEW_STUDENTS: u64 = 3;

pub struct CourseOverview {
    pub course: CourseRecord,
    pub student_count: u64,
    pub preview_students: Vec<UserRecord>,
}

#[derive(Clone)]
pub struct CourseService {
    repos: Repositories,
}

impl CourseService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    /// The caller becomes the main teacher of the new course.
    pub async fn create_course(
        &self,
        caller: &Caller,
        input: CourseInput,
    ) -> Result<CourseRecord, ServiceError> {
        require_role(Some(caller), AccessScope::Teacher)?;

        let course = self
            .repos
            .courses
            .create(NewCourse {
                name: input.name,
                description: input.description,
                thumbnail: input.thumbnail,
                teacher_id: caller.id,
            })
            .await?;

        info!(course_id = %course.id, teacher_id = %caller.id, "course created");
        Ok(course)
    }

    pub async fn teacher_courses(&self, caller: &Caller) -> Result<Vec<CourseOverview>, ServiceError> {
        require_role(Some(caller), AccessScope::Teacher)?;

        let courses = self.repos.courses.list_taught_by(caller.id).await?;
        let mut overviews = Vec::with_capacity(courses.len());
        for course in courses {
            let student_count = self.repos.courses.count_students(course.id).await?;
            let preview_students = self
                .repos
                .courses
                .earliest_students(course.id, PREVIEW_STUDENTS)
                .await?;
            overviews.push(CourseOverview {
                course,
                student_count,
                preview_students,
            });
        }

        Ok(overviews)
    }

    pub async fn student_courses(&self, caller: &Caller) -> Result<Vec<CourseRecord>, ServiceError> {
        require_role(Some(caller), AccessScope::Student)?;

        Ok(self.repos.courses.list_enrolled(caller.id).await?)
    }
}
