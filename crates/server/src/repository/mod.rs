pub mod assignment_repository;
pub mod course_repository;
pub mod feedback_repository;
pub mod resource_repository;
pub mod schedule_repository;
pub mod submission_repository;
pub mod user_repository;

pub use assignment_repository::{
    AssignmentRecord, AssignmentRepository, NewAssignment, SeaOrmAssignmentRepository,
};
pub use course_repository::{CourseRecord, CourseRepository, NewCourse, SeaOrmCourseRepository};
pub use feedback_repository::{
    FeedbackRecord, FeedbackRepository, FeedbackUpsert, SeaOrmFeedbackRepository,
};
pub use resource_repository::{
    NewResource, ResourceRecord, ResourceRepository, SeaOrmResourceRepository,
};
pub use schedule_repository::{
    NewSchedule, ScheduleRecord, ScheduleRepository, SeaOrmScheduleRepository,
};
pub use submission_repository::{
    NewSubmission, SeaOrmSubmissionRepository, SubmissionRecord, SubmissionRepository,
};
pub use user_repository::{NewUser, SeaOrmUserRepository, UserRecord, UserRepository};

use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Every repository behind a trait object, backed by one connection pool.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub assignments: Arc<dyn AssignmentRepository>,
    pub submissions: Arc<dyn SubmissionRepository>,
    pub feedback: Arc<dyn FeedbackRepository>,
    pub schedules: Arc<dyn ScheduleRepository>,
    pub resources: Arc<dyn ResourceRepository>,
}

impl Repositories {
    pub fn sea_orm(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(SeaOrmUserRepository::new(db.clone())),
            courses: Arc::new(SeaOrmCourseRepository::new(db.clone())),
            assignments: Arc::new(SeaOrmAssignmentRepository::new(db.clone())),
            submissions: Arc::new(SeaOrmSubmissionRepository::new(db.clone())),
            feedback: Arc::new(SeaOrmFeedbackRepository::new(db.clone())),
            schedules: Arc::new(SeaOrmScheduleRepository::new(db.clone())),
            resources: Arc::new(SeaOrmResourceRepository::new(db)),
        }
    }
}
