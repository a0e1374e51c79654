//! Record types read through a [`RecordStore`](crate::RecordStore).
//!
//! These mirror the rows of the student-records service. Optional columns
//! default to `None` when absent from serialized data.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::UnknownCategory;

/// A student profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Primary key.
    pub id: i64,
    /// Full name.
    pub name: String,
    /// Department code, e.g. `CS`.
    pub department: String,
    /// Cumulative GPA, once one exists.
    #[serde(default)]
    pub gpa: Option<f64>,
}

/// A teacher profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    /// Primary key.
    pub id: i64,
    /// Full name.
    pub name: String,
    /// Department code.
    pub department: String,
    /// Contact address.
    pub email: String,
    /// Free-text specialty.
    #[serde(default)]
    pub expertise: Option<String>,
}

/// A course offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Primary key.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// Code in `LETTERS-DIGITS` form, unique across courses.
    pub code: String,
    /// Credit hours.
    pub credit_hours: u32,
    /// Owning department code.
    #[serde(default)]
    pub department: Option<String>,
    /// The instructor, if one is assigned.
    #[serde(default)]
    pub teacher_id: Option<i64>,
}

/// A student taking a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Primary key.
    pub id: i64,
    /// The student.
    pub student_id: i64,
    /// The course.
    pub course_id: i64,
    /// Term label, e.g. `Fall 2025`.
    #[serde(default)]
    pub semester: Option<String>,
    /// Free-form status such as `active` or `passed`.
    #[serde(default)]
    pub status: Option<String>,
    /// Final grade points.
    #[serde(default)]
    pub grade: Option<f64>,
}

/// One scheduled lecture of a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSession {
    /// Primary key.
    pub id: i64,
    /// The course.
    pub course_id: i64,
    /// Day the lecture is held.
    pub lecture_date: NaiveDate,
    /// `HH:MM`, when scheduled.
    #[serde(default)]
    pub start_time: Option<String>,
    /// `HH:MM`, when scheduled.
    #[serde(default)]
    pub end_time: Option<String>,
}

/// How a student showed up to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    /// On time.
    Present,
    /// Not there.
    Absent,
    /// There, but late. Tallied apart from present.
    Late,
}

/// A student's mark for one session. A session with no record for an
/// enrollment counts as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Primary key.
    pub id: i64,
    /// The session.
    pub session_id: i64,
    /// The student's enrollment in the session's course.
    pub enrollment_id: i64,
    /// The mark.
    pub status: AttendanceStatus,
}

/// What a student owes before any transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeAccount {
    /// The student; one account per student.
    pub student_id: i64,
    /// Assessed fee.
    pub total_fee: f64,
}

/// Kinds of fee ledger entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money paid; reduces the balance.
    Payment,
    /// Penalty; adds to the fee.
    Fine,
    /// Waiver; reduces the balance.
    Scholarship,
    /// Signed correction to the fee.
    Adjustment,
}

/// One fee ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeTransaction {
    /// Primary key.
    pub id: i64,
    /// The student.
    pub student_id: i64,
    /// Entry kind.
    pub txn_type: TransactionType,
    /// Amount; only adjustments may be negative.
    pub amount: f64,
    /// Free-text remark.
    #[serde(default)]
    pub note: Option<String>,
    /// When the entry was booked.
    pub created_at: NaiveDateTime,
}

/// Assessment kinds, grouped into grade components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentCategory {
    /// Internal component.
    Quiz,
    /// Internal component.
    Assignment,
    /// Midterm component.
    Mid,
    /// Final component.
    Final,
}

impl AssessmentCategory {
    /// Stored spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentCategory::Quiz => "quiz",
            AssessmentCategory::Assignment => "assignment",
            AssessmentCategory::Mid => "mid",
            AssessmentCategory::Final => "final",
        }
    }

    /// Quizzes and assignments together make up the internal component.
    pub fn is_internal(&self) -> bool {
        matches!(self, AssessmentCategory::Quiz | AssessmentCategory::Assignment)
    }
}

impl fmt::Display for AssessmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssessmentCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quiz" => Ok(AssessmentCategory::Quiz),
            "assignment" => Ok(AssessmentCategory::Assignment),
            "mid" => Ok(AssessmentCategory::Mid),
            "final" => Ok(AssessmentCategory::Final),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// A graded piece of work in a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentItem {
    /// Primary key.
    pub id: i64,
    /// The course.
    pub course_id: i64,
    /// Display title.
    pub title: String,
    /// Grade component it counts towards.
    pub category: AssessmentCategory,
    /// Marks available.
    pub max_marks: f64,
    /// Deadline, if any.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

/// Marks one enrollment obtained on one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentScore {
    /// Primary key.
    pub id: i64,
    /// The item.
    pub assessment_item_id: i64,
    /// The enrollment.
    pub enrollment_id: i64,
    /// Marks obtained.
    pub obtained_marks: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_parse_from_their_stored_spelling() {
        for category in [
            AssessmentCategory::Quiz,
            AssessmentCategory::Assignment,
            AssessmentCategory::Mid,
            AssessmentCategory::Final,
        ] {
            assert_eq!(category.as_str().parse::<AssessmentCategory>(), Ok(category));
        }
        assert_eq!(
            "exam".parse::<AssessmentCategory>(),
            Err(UnknownCategory("exam".to_string()))
        );
    }

    #[test]
    fn only_quizzes_and_assignments_are_internal() {
        assert!(AssessmentCategory::Quiz.is_internal());
        assert!(AssessmentCategory::Assignment.is_internal());
        assert!(!AssessmentCategory::Mid.is_internal());
        assert!(!AssessmentCategory::Final.is_internal());
    }
}
