pub mod assignment;
pub mod course;
pub mod course_co_teacher;
pub mod course_student;
pub mod feedback;
pub mod resource;
pub mod schedule;
pub mod submission;
pub mod user;
