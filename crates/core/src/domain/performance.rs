//! Per-student grade aggregation for a course.
//!
//! A submission counts as graded only when its feedback carries a grade;
//! comment-only feedback is visible to the student but never enters an
//! average. Averages are whole numbers rounded half up, and a student with
//! nothing graded averages 0.

use std::cmp::Reverse;
use std::collections::HashMap;

use super::{Grade, UserId};

/// How many students the leaderboard shows.
pub const TOP_PERFORMER_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentSummary {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Feedback as far as grading is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackMark {
    pub grade: Option<Grade>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionWork {
    pub student_id: UserId,
    pub feedback: Option<FeedbackMark>,
}

impl SubmissionWork {
    pub fn new(student_id: UserId, feedback: Option<FeedbackMark>) -> Self {
        Self {
            student_id,
            feedback,
        }
    }

    pub fn grade(&self) -> Option<Grade> {
        self.feedback.and_then(|feedback| feedback.grade)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentWork {
    pub submissions: Vec<SubmissionWork>,
}

/// Everything the aggregator needs to know about one course.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gradebook {
    pub students: Vec<StudentSummary>,
    pub assignments: Vec<AssignmentWork>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PerformanceStatus {
    Excellent,
    Good,
    Average,
    NeedsImprovement,
}

impl PerformanceStatus {
    pub fn from_average(average: u8) -> Self {
        match average {
            90.. => PerformanceStatus::Excellent,
            75..=89 => PerformanceStatus::Good,
            60..=74 => PerformanceStatus::Average,
            _ => PerformanceStatus::NeedsImprovement,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PerformanceStatus::Excellent => "Excellent",
            PerformanceStatus::Good => "Good",
            PerformanceStatus::Average => "Average",
            PerformanceStatus::NeedsImprovement => "Needs Improvement",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentPerformance {
    pub student: StudentSummary,
    pub average_grade: u8,
    pub graded_count: usize,
    pub completed_assignments: usize,
    pub total_assignments: usize,
    pub status: PerformanceStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedPerformer {
    pub rank: u8,
    pub student: StudentSummary,
    pub average_grade: u8,
}

/// Mean of `grades` rounded half up; 0 for an empty slice.
pub fn average_grade(grades: &[Grade]) -> u8 {
    if grades.is_empty() {
        return 0;
    }

    let count = grades.len() as u64;
    let sum: u64 = grades.iter().map(|grade| u64::from(grade.value())).sum();

    // floor(sum / count + 1/2) without leaving integers.
    ((2 * sum + count) / (2 * count)) as u8
}

/// One entry per enrolled student, in enrollment order.
pub fn compute_roster(gradebook: &Gradebook) -> Vec<StudentPerformance> {
    let total_assignments = gradebook.assignments.len();

    let mut by_student: HashMap<UserId, Vec<&SubmissionWork>> = HashMap::new();
    for submission in gradebook
        .assignments
        .iter()
        .flat_map(|assignment| assignment.submissions.iter())
    {
        by_student
            .entry(submission.student_id)
            .or_default()
            .push(submission);
    }

    gradebook
        .students
        .iter()
        .map(|student| {
            let submissions = by_student
                .get(&student.id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let grades: Vec<Grade> = submissions.iter().filter_map(|s| s.grade()).collect();
            let average = average_grade(&grades);

            StudentPerformance {
                student: student.clone(),
                average_grade: average,
                graded_count: grades.len(),
                completed_assignments: submissions.len(),
                total_assignments,
                status: PerformanceStatus::from_average(average),
            }
        })
        .collect()
}

/// Leaderboard of students with at least one graded submission.
///
/// Higher averages first; equal averages fall back to student id ascending.
pub fn rank(roster: &[StudentPerformance]) -> Vec<RankedPerformer> {
    let mut ranked: Vec<&StudentPerformance> = roster
        .iter()
        .filter(|performance| performance.graded_count > 0)
        .collect();

    ranked.sort_by_key(|performance| (Reverse(performance.average_grade), performance.student.id));

    ranked
        .into_iter()
        .take(TOP_PERFORMER_COUNT)
        .enumerate()
        .map(|(index, performance)| RankedPerformer {
            rank: index as u8 + 1,
            student: performance.student.clone(),
            average_grade: performance.average_grade,
        })
        .collect()
}

/// Average of `student_id` in `roster`, or 0 when they are not in it.
pub fn average_for(roster: &[StudentPerformance], student_id: UserId) -> u8 {
    roster
        .iter()
        .find(|performance| performance.student.id == student_id)
        .map(|performance| performance.average_grade)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(name: &str) -> StudentSummary {
        StudentSummary {
            id: UserId::new(),
            name: name.to_string(),
            email: format!("{}@school.edu", name.to_lowercase()),
        }
    }

    fn graded(student: &StudentSummary, grade: u16) -> SubmissionWork {
        SubmissionWork::new(
            student.id,
            Some(FeedbackMark {
                grade: Some(Grade::new(grade).expect("test grades are valid")),
            }),
        )
    }

    fn commented(student: &StudentSummary) -> SubmissionWork {
        SubmissionWork::new(student.id, Some(FeedbackMark { grade: None }))
    }

    fn submitted(student: &StudentSummary) -> SubmissionWork {
        SubmissionWork::new(student.id, None)
    }

    fn grades(values: &[u16]) -> Vec<Grade> {
        values
            .iter()
            .map(|value| Grade::new(*value).expect("test grades are valid"))
            .collect()
    }

    #[test]
    fn average_rounds_half_up() {
        assert_eq!(average_grade(&grades(&[60, 89])), 75);
        assert_eq!(average_grade(&grades(&[70, 71, 71, 71])), 71);
        assert_eq!(average_grade(&grades(&[0, 1])), 1);
        assert_eq!(average_grade(&grades(&[100, 100, 99])), 100);
        assert_eq!(average_grade(&[]), 0);
    }

    #[test]
    fn status_band_lower_bounds_are_inclusive() {
        assert_eq!(PerformanceStatus::from_average(100), PerformanceStatus::Excellent);
        assert_eq!(PerformanceStatus::from_average(90), PerformanceStatus::Excellent);
        assert_eq!(PerformanceStatus::from_average(89), PerformanceStatus::Good);
        assert_eq!(PerformanceStatus::from_average(75), PerformanceStatus::Good);
        assert_eq!(PerformanceStatus::from_average(74), PerformanceStatus::Average);
        assert_eq!(PerformanceStatus::from_average(60), PerformanceStatus::Average);
        assert_eq!(
            PerformanceStatus::from_average(59),
            PerformanceStatus::NeedsImprovement
        );
        assert_eq!(PerformanceStatus::NeedsImprovement.as_str(), "Needs Improvement");
    }

    #[test]
    fn roster_aggregates_each_student_across_assignments() {
        let ada = student("Ada");
        let bob = student("Bob");
        let gradebook = Gradebook {
            students: vec![ada.clone(), bob.clone()],
            assignments: vec![
                AssignmentWork {
                    submissions: vec![graded(&ada, 60), submitted(&bob)],
                },
                AssignmentWork {
                    submissions: vec![graded(&ada, 89)],
                },
                AssignmentWork::default(),
            ],
        };

        let roster = compute_roster(&gradebook);

        assert_eq!(roster.len(), 2);
        let ada_row = &roster[0];
        assert_eq!(ada_row.student.id, ada.id);
        assert_eq!(ada_row.average_grade, 75);
        assert_eq!(ada_row.status, PerformanceStatus::Good);
        assert_eq!(ada_row.graded_count, 2);
        assert_eq!(ada_row.completed_assignments, 2);
        assert_eq!(ada_row.total_assignments, 3);

        let bob_row = &roster[1];
        assert_eq!(bob_row.average_grade, 0);
        assert_eq!(bob_row.graded_count, 0);
        assert_eq!(bob_row.completed_assignments, 1);
        assert_eq!(bob_row.status, PerformanceStatus::NeedsImprovement);
    }

    #[test]
    fn comment_only_feedback_is_not_graded() {
        let ada = student("Ada");
        let gradebook = Gradebook {
            students: vec![ada.clone()],
            assignments: vec![
                AssignmentWork {
                    submissions: vec![commented(&ada)],
                },
                AssignmentWork {
                    submissions: vec![graded(&ada, 80)],
                },
            ],
        };

        let roster = compute_roster(&gradebook);

        assert_eq!(roster[0].graded_count, 1);
        assert_eq!(roster[0].average_grade, 80);
        assert_eq!(roster[0].completed_assignments, 2);
    }

    #[test]
    fn submissions_from_unenrolled_students_are_ignored() {
        let ada = student("Ada");
        let departed = student("Gone");
        let gradebook = Gradebook {
            students: vec![ada.clone()],
            assignments: vec![AssignmentWork {
                submissions: vec![graded(&departed, 100), graded(&ada, 50)],
            }],
        };

        let roster = compute_roster(&gradebook);

        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].average_grade, 50);
    }

    #[test]
    fn ranking_skips_ungraded_and_keeps_top_three() {
        let students: Vec<StudentSummary> =
            ["Ada", "Bob", "Cy", "Di", "Eve"].into_iter().map(student).collect();
        let gradebook = Gradebook {
            students: students.clone(),
            assignments: vec![AssignmentWork {
                submissions: vec![
                    graded(&students[0], 70),
                    graded(&students[1], 95),
                    graded(&students[2], 0),
                    graded(&students[3], 88),
                    submitted(&students[4]),
                ],
            }],
        };

        let roster = compute_roster(&gradebook);
        let top = rank(&roster);

        let ranked: Vec<(u8, &str, u8)> = top
            .iter()
            .map(|p| (p.rank, p.student.name.as_str(), p.average_grade))
            .collect();
        assert_eq!(ranked, vec![(1, "Bob", 95), (2, "Di", 88), (3, "Ada", 70)]);
    }

    #[test]
    fn graded_zero_is_ranked_but_ungraded_is_not() {
        let zero = student("Zero");
        let none = student("None");
        let gradebook = Gradebook {
            students: vec![zero.clone(), none.clone()],
            assignments: vec![AssignmentWork {
                submissions: vec![graded(&zero, 0), commented(&none)],
            }],
        };

        let roster = compute_roster(&gradebook);
        let top = rank(&roster);

        assert_eq!(roster.len(), 2);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].student.id, zero.id);
        assert_eq!(top[0].average_grade, 0);
    }

    #[test]
    fn ties_are_broken_by_student_id() {
        let mut students: Vec<StudentSummary> =
            ["A", "B", "C", "D"].into_iter().map(student).collect();
        let gradebook = Gradebook {
            students: students.clone(),
            assignments: vec![AssignmentWork {
                submissions: students.iter().map(|s| graded(s, 80)).collect(),
            }],
        };

        let top = rank(&compute_roster(&gradebook));

        students.sort_by_key(|s| s.id);
        let expected: Vec<UserId> = students.iter().take(3).map(|s| s.id).collect();
        let actual: Vec<UserId> = top.iter().map(|p| p.student.id).collect();
        assert_eq!(actual, expected);
        assert_eq!(top.iter().map(|p| p.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn current_average_defaults_to_zero_when_absent() {
        let ada = student("Ada");
        let gradebook = Gradebook {
            students: vec![ada.clone()],
            assignments: vec![AssignmentWork {
                submissions: vec![graded(&ada, 91)],
            }],
        };
        let roster = compute_roster(&gradebook);

        assert_eq!(average_for(&roster, ada.id), 91);
        assert_eq!(average_for(&roster, UserId::new()), 0);
    }
}
