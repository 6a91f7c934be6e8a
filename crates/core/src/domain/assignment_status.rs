/// Where a single student stands on a single assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignmentStatus {
    Pending,
    Submitted,
    Graded,
}

impl AssignmentStatus {
    /// Any feedback, even comment-only, moves the assignment to `Graded`.
    pub fn from_progress(has_submission: bool, has_feedback: bool) -> Self {
        if has_feedback {
            AssignmentStatus::Graded
        } else if has_submission {
            AssignmentStatus::Submitted
        } else {
            AssignmentStatus::Pending
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentStatus::Pending => "pending",
            AssignmentStatus::Submitted => "submitted",
            AssignmentStatus::Graded => "graded",
        }
    }
}
