//! Teacher-facing routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    routing::{get, post, put},
};
use classroom_api_types::{
    AssignmentResponse, AssignmentsResponse, CourseBody, CourseQuery, CreateAssignmentRequest,
    CreateCourseRequest, CreateResourceRequest, CreateScheduleRequest, EnrollStudentRequest,
    EnrollStudentResponse, FeedbackResponse, InviteCoTeacherRequest, InviteCoTeacherResponse,
    Message, RemoveCoTeacherQuery, ResourceResponse, ResourcesResponse, ScheduleResponse,
    SchedulesResponse, SubmissionsResponse, SubmitFeedbackRequest, Success, TeacherCourseBody,
    TeacherCoursesResponse, TeacherPeopleResponse,
};
use classroom_core::domain::AccessScope;

use super::auth::CurrentUser;
use super::error::ApiError;
use super::present;
use super::state::AppState;
use crate::service::{AssignmentOverview, input};

type ApiResult<T> = Result<Json<Success<T>>, ApiError>;
type Created<T> = Result<(StatusCode, Json<Success<T>>), ApiError>;

pub fn create_teacher_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/teacher/courses", get(list_courses).post(create_course))
        .route("/api/teacher/people", get(people))
        .route(
            "/api/teacher/co-teachers",
            put(invite_co_teacher).delete(remove_co_teacher),
        )
        .route("/api/teacher/students", post(enroll_student))
        .route(
            "/api/teacher/assignments",
            get(list_assignments).post(create_assignment),
        )
        .route(
            "/api/teacher/assignments/{id}/submissions",
            get(assignment_submissions),
        )
        .route(
            "/api/teacher/assignments/submissions/{id}/feedback",
            post(submit_feedback),
        )
        .route("/api/teacher/schedule", get(list_schedules).post(create_schedule))
        .route("/api/teacher/resources", get(list_resources).post(create_resource))
}

async fn list_courses(
    state: State<Arc<AppState>>,
    user: CurrentUser,
) -> ApiResult<TeacherCoursesResponse> {
    let caller = user.require(AccessScope::Teacher)?;
    let overviews = state.services.courses.teacher_courses(&caller).await?;

    let courses = overviews
        .iter()
        .map(|overview| TeacherCourseBody {
            course: present::course(&overview.course),
            student_count: overview.student_count,
            students: overview.preview_students.iter().map(present::person).collect(),
        })
        .collect();
    Ok(Json(Success::new(TeacherCoursesResponse { courses })))
}

async fn create_course(
    state: State<Arc<AppState>>,
    user: CurrentUser,
    body: Result<Json<CreateCourseRequest>, JsonRejection>,
) -> Created<CourseBody> {
    let caller = user.require(AccessScope::Teacher)?;
    let Json(request) = body?;
    let course = state
        .services
        .courses
        .create_course(&caller, input::course(request)?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(Success::new(present::course(&course))),
    ))
}

async fn people(
    state: State<Arc<AppState>>,
    user: CurrentUser,
    query: Result<Query<CourseQuery>, QueryRejection>,
) -> ApiResult<TeacherPeopleResponse> {
    let caller = user.require(AccessScope::Teacher)?;
    let Query(query) = query?;
    let course_id = input::course_id_param(query.course_id.as_deref())?;
    let people = state.services.grading.teacher_people(&caller, course_id).await?;

    let mut team_members = vec![present::team_member(&people.main_teacher, "Teacher")];
    team_members.extend(
        people
            .co_teachers
            .iter()
            .map(|user| present::team_member(user, "Co-Teacher")),
    );

    Ok(Json(Success::new(TeacherPeopleResponse {
        student_performance: people.roster.iter().map(present::performance).collect(),
        roster: people
            .roster
            .iter()
            .map(|entry| present::summary(&entry.student))
            .collect(),
        shareable_link: state.config.shareable_link(course_id),
        teacher_code: people.teacher_code.into_inner(),
        student_code: people.student_code.into_inner(),
        team_members,
        main_teacher: present::person(&people.main_teacher),
        co_teachers: people.co_teachers.iter().map(present::person).collect(),
        is_main_teacher: people.is_main_teacher,
    })))
}

async fn invite_co_teacher(
    state: State<Arc<AppState>>,
    user: CurrentUser,
    body: Result<Json<InviteCoTeacherRequest>, JsonRejection>,
) -> ApiResult<InviteCoTeacherResponse> {
    let caller = user.require(AccessScope::Teacher)?;
    let Json(request) = body?;
    let invitee = state
        .services
        .membership
        .invite_co_teacher(&caller, input::co_teacher_invite(request)?)
        .await?;

    Ok(Json(Success::new(InviteCoTeacherResponse {
        message: format!("Successfully invited {} as co-teacher", invitee.name),
        co_teacher: present::person(&invitee),
    })))
}

async fn remove_co_teacher(
    state: State<Arc<AppState>>,
    user: CurrentUser,
    query: Result<Query<RemoveCoTeacherQuery>, QueryRejection>,
) -> ApiResult<Message> {
    let caller = user.require(AccessScope::Teacher)?;
    let Query(query) = query?;
    let (course_id, co_teacher_id) = input::co_teacher_removal(query)?;
    state
        .services
        .membership
        .remove_co_teacher(&caller, course_id, co_teacher_id)
        .await?;

    Ok(Json(Success::new(Message {
        message: "Co-teacher removed successfully".to_string(),
    })))
}

async fn enroll_student(
    state: State<Arc<AppState>>,
    user: CurrentUser,
    body: Result<Json<EnrollStudentRequest>, JsonRejection>,
) -> ApiResult<EnrollStudentResponse> {
    let caller = user.require(AccessScope::Teacher)?;
    let Json(request) = body?;
    let student = state
        .services
        .membership
        .enroll_student(&caller, input::student_enrollment(request)?)
        .await?;

    Ok(Json(Success::new(EnrollStudentResponse {
        message: format!("Successfully enrolled {} in the course", student.name),
        student: present::person(&student),
    })))
}

async fn list_assignments(
    state: State<Arc<AppState>>,
    user: CurrentUser,
    query: Result<Query<CourseQuery>, QueryRejection>,
) -> ApiResult<AssignmentsResponse> {
    let caller = user.require(AccessScope::Teacher)?;
    let Query(query) = query?;
    let course_id = input::course_id_param(query.course_id.as_deref())?;
    let assignments = state
        .services
        .coursework
        .teacher_assignments(&caller, course_id)
        .await?;

    Ok(Json(Success::new(AssignmentsResponse {
        assignments: assignments
            .iter()
            .map(|overview| present::assignment(overview, state.files.as_ref()))
            .collect(),
    })))
}

async fn create_assignment(
    state: State<Arc<AppState>>,
    user: CurrentUser,
    body: Result<Json<CreateAssignmentRequest>, JsonRejection>,
) -> Created<AssignmentResponse> {
    let caller = user.require(AccessScope::Teacher)?;
    let Json(request) = body?;
    let assignment = state
        .services
        .coursework
        .create_assignment(&caller, input::assignment(request)?)
        .await?;

    let overview = AssignmentOverview {
        assignment,
        submission_count: 0,
    };
    Ok((
        StatusCode::CREATED,
        Json(Success::new(AssignmentResponse {
            assignment: present::assignment(&overview, state.files.as_ref()),
        })),
    ))
}

async fn assignment_submissions(
    state: State<Arc<AppState>>,
    user: CurrentUser,
    Path(assignment_id): Path<String>,
) -> ApiResult<SubmissionsResponse> {
    let caller = user.require(AccessScope::Teacher)?;
    let submissions = state
        .services
        .coursework
        .assignment_submissions(&caller, &assignment_id)
        .await?;

    Ok(Json(Success::new(SubmissionsResponse {
        submissions: submissions
            .iter()
            .map(|detail| present::submission(detail, state.files.as_ref()))
            .collect(),
    })))
}

async fn submit_feedback(
    state: State<Arc<AppState>>,
    user: CurrentUser,
    Path(submission_id): Path<String>,
    body: Result<Json<SubmitFeedbackRequest>, JsonRejection>,
) -> ApiResult<FeedbackResponse> {
    let caller = user.require(AccessScope::Teacher)?;
    let Json(request) = body?;
    let feedback = state
        .services
        .grading
        .submit_feedback(&caller, &submission_id, input::feedback(request)?)
        .await?;

    Ok(Json(Success::new(FeedbackResponse {
        feedback: present::feedback(&feedback),
    })))
}

async fn list_schedules(
    state: State<Arc<AppState>>,
    user: CurrentUser,
    query: Result<Query<CourseQuery>, QueryRejection>,
) -> ApiResult<SchedulesResponse> {
    let caller = user.require(AccessScope::Teacher)?;
    let Query(query) = query?;
    let course_id = input::course_id_param(query.course_id.as_deref())?;
    let schedules = state
        .services
        .coursework
        .schedules(&caller, course_id, AccessScope::Teacher)
        .await?;

    Ok(Json(Success::new(SchedulesResponse {
        schedules: schedules.iter().map(present::schedule).collect(),
    })))
}

async fn create_schedule(
    state: State<Arc<AppState>>,
    user: CurrentUser,
    body: Result<Json<CreateScheduleRequest>, JsonRejection>,
) -> Created<ScheduleResponse> {
    let caller = user.require(AccessScope::Teacher)?;
    let Json(request) = body?;
    let schedule = state
        .services
        .coursework
        .create_schedule(&caller, input::schedule(request)?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(Success::new(ScheduleResponse {
            schedule: present::schedule(&schedule),
        })),
    ))
}

async fn list_resources(
    state: State<Arc<AppState>>,
    user: CurrentUser,
    query: Result<Query<CourseQuery>, QueryRejection>,
) -> ApiResult<ResourcesResponse> {
    let caller = user.require(AccessScope::Teacher)?;
    let Query(query) = query?;
    let course_id = input::course_id_param(query.course_id.as_deref())?;
    let resources = state
        .services
        .coursework
        .resources(&caller, course_id, AccessScope::Teacher)
        .await?;

    Ok(Json(Success::new(ResourcesResponse {
        resources: resources
            .iter()
            .map(|resource| present::resource(resource, state.files.as_ref()))
            .collect(),
    })))
}

async fn create_resource(
    state: State<Arc<AppState>>,
    user: CurrentUser,
    body: Result<Json<CreateResourceRequest>, JsonRejection>,
) -> Created<ResourceResponse> {
    let caller = user.require(AccessScope::Teacher)?;
    let Json(request) = body?;
    let resource = state
        .services
        .coursework
        .create_resource(&caller, input::resource(request)?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(Success::new(ResourceResponse {
            resource: present::resource(&resource, state.files.as_ref()),
        })),
    ))
}
