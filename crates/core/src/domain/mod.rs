mod access;
mod assignment_status;
mod course_code;
mod error;
mod file_store;
mod grade;
mod ids;
mod membership;
mod performance;
mod resource_type;
mod role;
mod text;

pub use access::{AccessError, AccessScope, Caller, CourseMembership, authorize, require_role};
pub use assignment_status::AssignmentStatus;
pub use course_code::{CodeError, CodeKind, CodedCourse, CourseCode, check_format, decode};
pub use error::DomainError;
pub use file_store::{FileCategory, FileStore, FileStoreError, UploadedFile, is_absolute_url};
pub use grade::Grade;
pub use ids::{AssignmentId, CourseId, FeedbackId, ResourceId, ScheduleId, SubmissionId, UserId};
pub use membership::{Member, MembershipError, check_enroll, check_invite, check_join};
pub use performance::{
    AssignmentWork, FeedbackMark, Gradebook, PerformanceStatus, RankedPerformer,
    StudentPerformance, StudentSummary, SubmissionWork, TOP_PERFORMER_COUNT, average_for,
    average_grade, compute_roster, rank,
};
pub use resource_type::ResourceType;
pub use role::Role;
pub use text::{CourseDescription, CourseName, Email, HttpUrl, RequiredText};
