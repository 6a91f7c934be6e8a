//! Records to response bodies.

use chrono::{NaiveDateTime, SecondsFormat};
use classroom_api_types::{
    AssignmentBody, CourseBody, FeedbackBody, PersonBody, ResourceBody, ScheduleBody,
    StudentAssignmentBody, StudentPerformanceBody, SubmissionBody, TeamMemberBody,
    TopPerformerBody,
};
use classroom_core::domain::{FileStore, RankedPerformer, StudentPerformance, StudentSummary};

use crate::repository::{
    CourseRecord, FeedbackRecord, ResourceRecord, ScheduleRecord, UserRecord,
};
use crate::service::{AssignmentOverview, StudentAssignment, SubmissionDetail};

/// Stored timestamps are UTC; rendered as `2026-03-01T09:00:00.000Z`.
pub fn timestamp(value: NaiveDateTime) -> String {
    value.and_utc().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn person(user: &UserRecord) -> PersonBody {
    PersonBody {
        id: user.id.to_string(),
        name: user.name.clone(),
        email: user.email.clone(),
    }
}

pub fn summary(student: &StudentSummary) -> PersonBody {
    PersonBody {
        id: student.id.to_string(),
        name: student.name.clone(),
        email: student.email.clone(),
    }
}

pub fn team_member(user: &UserRecord, role: &str) -> TeamMemberBody {
    TeamMemberBody {
        id: user.id.to_string(),
        name: user.name.clone(),
        email: user.email.clone(),
        role: role.to_string(),
    }
}

pub fn course(course: &CourseRecord) -> CourseBody {
    CourseBody {
        id: course.id.to_string(),
        name: course.name.clone(),
        description: course.description.clone(),
        thumbnail: course.thumbnail.clone(),
        teacher_id: course.teacher_id.to_string(),
        created_at: timestamp(course.created_at),
        updated_at: timestamp(course.updated_at),
    }
}

pub fn performance(entry: &StudentPerformance) -> StudentPerformanceBody {
    StudentPerformanceBody {
        id: entry.student.id.to_string(),
        name: entry.student.name.clone(),
        email: entry.student.email.clone(),
        average_grade: entry.average_grade,
        completed_assignments: entry.completed_assignments,
        total_assignments: entry.total_assignments,
        status: entry.status.as_str().to_string(),
    }
}

pub fn top_performer(entry: &RankedPerformer) -> TopPerformerBody {
    TopPerformerBody {
        rank: entry.rank,
        id: entry.student.id.to_string(),
        name: entry.student.name.clone(),
        average_grade: entry.average_grade,
        percentage: entry.average_grade,
    }
}

pub fn feedback(feedback: &FeedbackRecord) -> FeedbackBody {
    FeedbackBody {
        id: feedback.id.to_string(),
        comment: feedback.comment.clone(),
        grade: feedback.grade.map(|grade| grade.value()),
    }
}

pub fn assignment(overview: &AssignmentOverview, files: &dyn FileStore) -> AssignmentBody {
    let assignment = &overview.assignment;
    AssignmentBody {
        id: assignment.id.to_string(),
        title: assignment.title.clone(),
        description: assignment.description.clone(),
        due_date: timestamp(assignment.due_date),
        attachment: assignment.attachment.as_deref().map(|key| files.to_url(key)),
        submissions: overview.submission_count,
    }
}

pub fn student_assignment(view: &StudentAssignment, files: &dyn FileStore) -> StudentAssignmentBody {
    let assignment = &view.assignment;
    let submission = view.submission.as_ref();
    StudentAssignmentBody {
        id: assignment.id.to_string(),
        title: assignment.title.clone(),
        description: assignment.description.clone(),
        due_date: timestamp(assignment.due_date),
        attachment: assignment.attachment.as_deref().map(|key| files.to_url(key)),
        status: view.status.as_str().to_string(),
        submission: submission.and_then(|s| s.summary.clone()),
        submitted_file: submission
            .and_then(|s| s.file_url.as_deref())
            .map(|key| files.to_url(key)),
        feedback: view.feedback.as_ref().map(|f| f.comment.clone()),
        grade: view
            .feedback
            .as_ref()
            .and_then(|f| f.grade)
            .map(|grade| format!("{}/100", grade.value())),
    }
}

pub fn submission(detail: &SubmissionDetail, files: &dyn FileStore) -> SubmissionBody {
    SubmissionBody {
        id: detail.submission.id.to_string(),
        student: person(&detail.student),
        summary: detail.submission.summary.clone(),
        file_url: detail
            .submission
            .file_url
            .as_deref()
            .map(|key| files.to_url(key)),
        submitted_at: timestamp(detail.submission.submitted_at),
        feedback: detail.feedback.as_ref().map(feedback),
    }
}

pub fn schedule(schedule: &ScheduleRecord) -> ScheduleBody {
    ScheduleBody {
        id: schedule.id.to_string(),
        subject: schedule.subject.clone(),
        topic: schedule.topic.clone(),
        time: timestamp(schedule.time),
        meeting_link: schedule.meeting_link.clone(),
    }
}

pub fn resource(resource: &ResourceRecord, files: &dyn FileStore) -> ResourceBody {
    ResourceBody {
        id: resource.id.to_string(),
        title: resource.title.clone(),
        resource_type: resource.resource_type.as_str().to_string(),
        attachment: files.to_url(&resource.attachment),
        created_at: timestamp(resource.created_at),
    }
}
