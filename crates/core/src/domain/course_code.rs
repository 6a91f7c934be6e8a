//! Shareable course codes.
//!
//! A code has the shape `PREFIX-NAME4-ID4`: the audience prefix, the first four
//! characters of the course name and the first four characters of the course
//! id, both upper-cased. Codes are not stored; decoding recomputes the code of
//! every candidate course and returns the first exact match.

use std::fmt;

use thiserror::Error;

use super::CourseId;

const SEGMENT_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeKind {
    /// Handed to students so they can join.
    Student,
    /// Shown to the teaching team.
    Teacher,
}

impl CodeKind {
    pub fn prefix(self) -> &'static str {
        match self {
            CodeKind::Student => "STUD",
            CodeKind::Teacher => "TEACH",
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodeError {
    #[error("Invalid course code format")]
    InvalidFormat,
    #[error("Invalid course code")]
    NotFound,
}

/// Anything a course code can be derived from.
pub trait CodedCourse {
    fn course_id(&self) -> CourseId;
    fn course_name(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CourseCode(String);

impl CourseCode {
    pub fn derive(kind: CodeKind, name: &str, id: CourseId) -> Self {
        let id = id.to_string();
        Self(format!(
            "{}-{}-{}",
            kind.prefix(),
            leading_upper(name),
            leading_upper(&id)
        ))
    }

    pub fn for_course(kind: CodeKind, course: &impl CodedCourse) -> Self {
        Self::derive(kind, course.course_name(), course.course_id())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn leading_upper(value: &str) -> String {
    value
        .chars()
        .take(SEGMENT_LEN)
        .collect::<String>()
        .to_uppercase()
}

/// Checks the outer shape of `code` without looking at any course.
pub fn check_format(code: &str, kind: CodeKind) -> Result<(), CodeError> {
    let mut segments = code.split('-');
    let prefix = segments.next();
    if prefix != Some(kind.prefix()) || segments.count() != 2 {
        return Err(CodeError::InvalidFormat);
    }
    Ok(())
}

/// Finds the course whose `kind` code equals `code`.
///
/// Scans every candidate in order; on a `NAME4-ID4` collision the earliest
/// candidate wins.
pub fn decode<'a, C: CodedCourse>(
    code: &str,
    kind: CodeKind,
    candidates: &'a [C],
) -> Result<&'a C, CodeError> {
    check_format(code, kind)?;

    candidates
        .iter()
        .find(|course| CourseCode::for_course(kind, *course).as_str() == code)
        .ok_or(CodeError::NotFound)
}
