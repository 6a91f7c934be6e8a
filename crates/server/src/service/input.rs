//! Request bodies turned into checked domain values.
//!
//! Every function collects all field failures of its body and reports them
//! together as [`ServiceError::Validation`].

use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime};
use classroom_api_types::{
    CreateAssignmentRequest, CreateCourseRequest, CreateResourceRequest, CreateScheduleRequest,
    EnrollStudentRequest, InviteCoTeacherRequest, JoinCourseRequest, RemoveCoTeacherQuery,
    SubmitAssignmentRequest, SubmitFeedbackRequest,
};
use classroom_core::domain::{
    AccessError, CourseDescription, CourseId, CourseName, Email, Grade, HttpUrl, RequiredText,
    ResourceType, UserId,
};

use super::error::{ServiceError, Validator};
use crate::repository::{NewAssignment, NewResource};

pub const COURSE_ID_REQUIRED: &str = "Course ID is required";
pub const REMOVAL_IDS_REQUIRED: &str = "Course ID and Co-Teacher ID are required";

#[derive(Debug, Clone)]
pub struct CourseInput {
    pub name: CourseName,
    pub description: Option<CourseDescription>,
    pub thumbnail: Option<HttpUrl>,
}

#[derive(Debug, Clone)]
pub struct ScheduleInput {
    pub course_id: CourseId,
    pub subject: RequiredText,
    pub topic: RequiredText,
    pub time: NaiveDateTime,
    pub meeting_link: HttpUrl,
}

#[derive(Debug, Clone)]
pub struct FeedbackInput {
    pub comment: RequiredText,
    pub grade: Option<Grade>,
}

#[derive(Debug, Clone)]
pub struct SubmissionInput {
    pub summary: Option<String>,
    pub file_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MemberInput {
    pub course_id: CourseId,
    pub email: Email,
}

/// Course id taken from a query string.
pub fn course_id_param(raw: Option<&str>) -> Result<CourseId, ServiceError> {
    let raw = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(ServiceError::BadRequest(COURSE_ID_REQUIRED))?;

    parse_course_id(raw)
}

/// Both ids of a co-teacher removal. An unparseable co-teacher id names
/// nobody and yields `None`.
pub fn co_teacher_removal(
    query: RemoveCoTeacherQuery,
) -> Result<(CourseId, Option<UserId>), ServiceError> {
    let present = |value: Option<String>| value.filter(|value| !value.trim().is_empty());
    let (Some(course_id), Some(co_teacher_id)) =
        (present(query.course_id), present(query.co_teacher_id))
    else {
        return Err(ServiceError::BadRequest(REMOVAL_IDS_REQUIRED));
    };

    Ok((
        parse_course_id(course_id.trim())?,
        UserId::from_str(co_teacher_id.trim()).ok(),
    ))
}

/// An id that cannot name any course is reported like a course the caller
/// cannot see.
fn parse_course_id(raw: &str) -> Result<CourseId, ServiceError> {
    CourseId::from_str(raw).map_err(|_| AccessError::NotFoundOrDenied.into())
}

fn timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|value| value.naive_utc())
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").ok())
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M").ok())
}

fn grade(raw: Option<f64>) -> Result<Option<Grade>, String> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    if !raw.is_finite() || raw.fract() != 0.0 {
        return Err("grade must be a whole number".to_string());
    }
    if !(0.0..=100.0).contains(&raw) {
        return Err("grade must be between 0 and 100".to_string());
    }

    // Range checked above, the cast is exact.
    Grade::new(raw as u16).map(Some).map_err(|err| err.to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn join_code(request: JoinCourseRequest) -> Result<String, ServiceError> {
    RequiredText::new("code", request.code)
        .map(RequiredText::into_inner)
        .map_err(|err| ServiceError::invalid("code", err))
}

pub fn course(request: CreateCourseRequest) -> Result<CourseInput, ServiceError> {
    let mut validator = Validator::new();
    let name = validator.check("name", CourseName::new(request.name));
    let description = validator.check("description", CourseDescription::optional(request.description));
    let thumbnail = validator.check("thumbnail", HttpUrl::optional("thumbnail", request.thumbnail));

    match (name, description, thumbnail) {
        (Some(name), Some(description), Some(thumbnail)) if validator.is_clean() => Ok(CourseInput {
            name,
            description,
            thumbnail,
        }),
        _ => Err(validator.into_error()),
    }
}

pub fn assignment(request: CreateAssignmentRequest) -> Result<NewAssignment, ServiceError> {
    let mut validator = Validator::new();
    let course_id = validator.check("courseId", RequiredText::new("courseId", request.course_id));
    let title = validator.check("title", RequiredText::new("title", request.title));
    let description = validator.check(
        "description",
        RequiredText::new("description", request.description),
    );
    let due_date = timestamp(&request.due_date);
    if due_date.is_none() {
        validator.reject("dueDate", "dueDate must be an RFC 3339 timestamp");
    }

    match (course_id, title, description, due_date) {
        (Some(course_id), Some(title), Some(description), Some(due_date))
            if validator.is_clean() =>
        {
            Ok(NewAssignment {
                course_id: parse_course_id(course_id.as_str())?,
                title,
                description,
                due_date,
                attachment: non_blank(request.attachment),
            })
        }
        _ => Err(validator.into_error()),
    }
}

pub fn schedule(request: CreateScheduleRequest) -> Result<ScheduleInput, ServiceError> {
    let mut validator = Validator::new();
    let course_id = validator.check("courseId", RequiredText::new("courseId", request.course_id));
    let subject = validator.check("subject", RequiredText::new("subject", request.subject));
    let topic = validator.check("topic", RequiredText::new("topic", request.topic));
    let time = timestamp(&request.time);
    if time.is_none() {
        validator.reject("time", "time must be an RFC 3339 timestamp");
    }
    let meeting_link = validator.check(
        "meetingLink",
        HttpUrl::new("meetingLink", request.meeting_link),
    );

    match (course_id, subject, topic, time, meeting_link) {
        (Some(course_id), Some(subject), Some(topic), Some(time), Some(meeting_link))
            if validator.is_clean() =>
        {
            Ok(ScheduleInput {
                course_id: parse_course_id(course_id.as_str())?,
                subject,
                topic,
                time,
                meeting_link,
            })
        }
        _ => Err(validator.into_error()),
    }
}

pub fn resource(request: CreateResourceRequest) -> Result<NewResource, ServiceError> {
    let mut validator = Validator::new();
    let course_id = validator.check("courseId", RequiredText::new("courseId", request.course_id));
    let title = validator.check("title", RequiredText::new("title", request.title));
    let resource_type = validator.check("type", ResourceType::from_str(request.resource_type.trim()));
    let attachment = validator.check(
        "attachment",
        RequiredText::new("attachment", request.attachment),
    );

    match (course_id, title, resource_type, attachment) {
        (Some(course_id), Some(title), Some(resource_type), Some(attachment))
            if validator.is_clean() =>
        {
            Ok(NewResource {
                course_id: parse_course_id(course_id.as_str())?,
                title,
                resource_type,
                attachment,
            })
        }
        _ => Err(validator.into_error()),
    }
}

pub fn feedback(request: SubmitFeedbackRequest) -> Result<FeedbackInput, ServiceError> {
    let mut validator = Validator::new();
    let comment = validator.check("comment", RequiredText::new("comment", request.comment));
    let grade = match grade(request.grade) {
        Ok(grade) => grade,
        Err(message) => {
            validator.reject("grade", message);
            None
        }
    };

    match comment {
        Some(comment) if validator.is_clean() => Ok(FeedbackInput { comment, grade }),
        _ => Err(validator.into_error()),
    }
}

pub fn submission(request: SubmitAssignmentRequest) -> Result<SubmissionInput, ServiceError> {
    let summary = non_blank(request.summary);
    let file_url = non_blank(request.file_url);

    if summary.is_none() && file_url.is_none() {
        let mut validator = Validator::new();
        validator.reject("summary", "a summary or a file is required");
        return Err(validator.into_error());
    }

    Ok(SubmissionInput { summary, file_url })
}

pub fn co_teacher_invite(request: InviteCoTeacherRequest) -> Result<MemberInput, ServiceError> {
    member(request.course_id, request.email)
}

pub fn student_enrollment(request: EnrollStudentRequest) -> Result<MemberInput, ServiceError> {
    member(request.course_id, request.email)
}

fn member(course_id: String, email: String) -> Result<MemberInput, ServiceError> {
    let mut validator = Validator::new();
    let email = validator.check("email", Email::new(email));
    let course_id = validator.check("courseId", RequiredText::new("courseId", course_id));

    match (course_id, email) {
        (Some(course_id), Some(email)) if validator.is_clean() => Ok(MemberInput {
            course_id: parse_course_id(course_id.as_str())?,
            email,
        }),
        _ => Err(validator.into_error()),
    }
}
