//! Use cases shared by the HTTP handlers.
//!
//! Every operation receives an already resolved [`Caller`] and performs its own
//! access decision through [`AccessResolver`].
//!
//! [`Caller`]: classroom_core::domain::Caller

pub mod access;
pub mod courses;
pub mod coursework;
pub mod error;
pub mod grading;
pub mod input;
pub mod membership;

use std::sync::Arc;

use classroom_core::domain::FileStore;

pub use access::AccessResolver;
pub use courses::{CourseOverview, CourseService};
pub use coursework::{AssignmentOverview, CourseworkService, StudentAssignment, SubmissionDetail};
pub use error::{ServiceError, Validator};
pub use grading::{GradingService, StudentPeople, TeacherPeople};
pub use membership::MembershipService;

use crate::repository::Repositories;

#[derive(Clone)]
pub struct Services {
    pub access: AccessResolver,
    pub courses: CourseService,
    pub membership: MembershipService,
    pub grading: GradingService,
    pub coursework: CourseworkService,
}

impl Services {
    pub fn new(repos: Repositories, files: Arc<dyn FileStore>) -> Self {
        let access = AccessResolver::new(repos.courses.clone());

        Self {
            courses: CourseService::new(repos.clone()),
            membership: MembershipService::new(repos.clone(), access.clone()),
            grading: GradingService::new(repos.clone(), access.clone()),
            coursework: CourseworkService::new(repos, access.clone(), files),
            access,
        }
    }
}
