//! Student-facing routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    routing::{get, post},
};
use classroom_api_types::{
    CourseQuery, CourseRef, JoinCourseRequest, JoinCourseResponse, ResourcesResponse,
    SchedulesResponse, StudentAssignmentsResponse, StudentCoursesResponse, StudentPeopleResponse,
    SubmissionResponse, SubmitAssignmentRequest, Success,
};
use classroom_core::domain::AccessScope;

use super::auth::CurrentUser;
use super::error::ApiError;
use super::present;
use super::state::AppState;
use crate::service::input;

type ApiResult<T> = Result<Json<Success<T>>, ApiError>;

pub fn create_student_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/student/courses", get(list_courses))
        .route("/api/student/courses/join", post(join_course))
        .route("/api/student/assignments", get(list_assignments))
        .route("/api/student/assignments/{id}/submit", post(submit_assignment))
        .route("/api/student/schedule", get(list_schedules))
        .route("/api/student/resources", get(list_resources))
        .route("/api/student/people", get(people))
}

async fn list_courses(
    state: State<Arc<AppState>>,
    user: CurrentUser,
) -> ApiResult<StudentCoursesResponse> {
    let caller = user.require(AccessScope::Student)?;
    let courses = state.services.courses.student_courses(&caller).await?;

    Ok(Json(Success::new(StudentCoursesResponse {
        courses: courses.iter().map(present::course).collect(),
    })))
}

async fn join_course(
    state: State<Arc<AppState>>,
    user: CurrentUser,
    body: Result<Json<JoinCourseRequest>, JsonRejection>,
) -> ApiResult<JoinCourseResponse> {
    let caller = user.require(AccessScope::Student)?;
    let Json(request) = body?;
    let code = input::join_code(request)?;
    let course = state
        .services
        .membership
        .join_as_student(&caller, &code)
        .await?;

    Ok(Json(Success::new(JoinCourseResponse {
        message: "Successfully joined the course".to_string(),
        course: CourseRef {
            id: course.id.to_string(),
            name: course.name,
        },
    })))
}

async fn list_assignments(
    state: State<Arc<AppState>>,
    user: CurrentUser,
    query: Result<Query<CourseQuery>, QueryRejection>,
) -> ApiResult<StudentAssignmentsResponse> {
    let caller = user.require(AccessScope::Student)?;
    let Query(query) = query?;
    let course_id = input::course_id_param(query.course_id.as_deref())?;
    let assignments = state
        .services
        .coursework
        .student_assignments(&caller, course_id)
        .await?;

    Ok(Json(Success::new(StudentAssignmentsResponse {
        assignments: assignments
            .iter()
            .map(|view| present::student_assignment(view, state.files.as_ref()))
            .collect(),
    })))
}

async fn submit_assignment(
    state: State<Arc<AppState>>,
    user: CurrentUser,
    Path(assignment_id): Path<String>,
    body: Result<Json<SubmitAssignmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Success<SubmissionResponse>>), ApiError> {
    let caller = user.require(AccessScope::Student)?;
    let Json(request) = body?;
    let detail = state
        .services
        .coursework
        .submit_assignment(&caller, &assignment_id, input::submission(request)?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(Success::new(SubmissionResponse {
            submission: present::submission(&detail, state.files.as_ref()),
        })),
    ))
}

async fn list_schedules(
    state: State<Arc<AppState>>,
    user: CurrentUser,
    query: Result<Query<CourseQuery>, QueryRejection>,
) -> ApiResult<SchedulesResponse> {
    let caller = user.require(AccessScope::Student)?;
    let Query(query) = query?;
    let course_id = input::course_id_param(query.course_id.as_deref())?;
    let schedules = state
        .services
        .coursework
        .schedules(&caller, course_id, AccessScope::Student)
        .await?;

    Ok(Json(Success::new(SchedulesResponse {
        schedules: schedules.iter().map(present::schedule).collect(),
    })))
}

async fn list_resources(
    state: State<Arc<AppState>>,
    user: CurrentUser,
    query: Result<Query<CourseQuery>, QueryRejection>,
) -> ApiResult<ResourcesResponse> {
    let caller = user.require(AccessScope::Student)?;
    let Query(query) = query?;
    let course_id = input::course_id_param(query.course_id.as_deref())?;
    let resources = state
        .services
        .coursework
        .resources(&caller, course_id, AccessScope::Student)
        .await?;

    Ok(Json(Success::new(ResourcesResponse {
        resources: resources
            .iter()
            .map(|resource| present::resource(resource, state.files.as_ref()))
            .collect(),
    })))
}

async fn people(
    state: State<Arc<AppState>>,
    user: CurrentUser,
    query: Result<Query<CourseQuery>, QueryRejection>,
) -> ApiResult<StudentPeopleResponse> {
    let caller = user.require(AccessScope::Student)?;
    let Query(query) = query?;
    let course_id = input::course_id_param(query.course_id.as_deref())?;
    let people = state.services.grading.student_people(&caller, course_id).await?;

    Ok(Json(Success::new(StudentPeopleResponse {
        current_student_average: people.current_average,
        top_performers: people.top_performers.iter().map(present::top_performer).collect(),
        roster: people
            .roster
            .iter()
            .map(|entry| present::summary(&entry.student))
            .collect(),
        shareable_link: state.config.shareable_link(people.course_id),
    })))
}
