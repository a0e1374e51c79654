//! The uniform response shape.
//!
//! Every command that does not fail authorization produces exactly one
//! [`ResponseEnvelope`]:
//!
//! ```text
//! {
//!   "raw_text": "show enrollments for student 3",
//!   "parsed": { "intent": "list_enrollments_for_student", "slots": { "student_id": 3 } },
//!   "info": "Found 2 enrollment(s) for student 3.",
//!   "results_type": "enrollments",
//!   "results": [ ... ]
//! }
//! ```

use acadexa_intent::ParseResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `info` for text no rule matched.
pub const UNKNOWN_COMMAND_INFO: &str =
    "I couldn't understand this command. Try commands like 'list students' or 'list courses'.";

/// `info` for recognized write commands.
pub const READ_ONLY_INFO: &str = "Voice commands are read-only. Create, update and delete \
     operations are not executed from this surface.";

/// Tag naming the shape of `results`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultsType {
    /// A list of students.
    Students,
    /// One student.
    Student,
    /// A list of courses.
    Courses,
    /// One course.
    Course,
    /// A list of teachers.
    Teachers,
    /// One teacher.
    Teacher,
    /// A list of enrollments.
    Enrollments,
    /// Per-course attendance of one student.
    AttendanceSummary,
    /// Per-student attendance of one course.
    CourseAttendance,
    /// Attendance sessions, newest first.
    Sessions,
    /// Fee balance with its transactions.
    FeeStatus,
    /// Assessment items of a course.
    AssessmentItems,
    /// Weighted grade breakdown per course.
    GradeSummary,
    /// `{ entity, count }`.
    Count,
    /// Dashboard totals.
    Summary,
    /// Enrollment, grade and pass-rate figures per course.
    CourseStats,
    /// Student, course and GPA figures per department.
    DepartmentStats,
}

/// The answer to one command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// The text as submitted, before normalization.
    pub raw_text: String,
    /// The matched intent and its slots, before scope resolution.
    pub parsed: ParseResult,
    /// Human-readable outcome.
    pub info: String,
    /// Shape of `results`; `None` for unknown and write commands.
    pub results_type: Option<ResultsType>,
    /// A list or a single object; an empty list when there is nothing to show.
    pub results: Value,
}

impl ResponseEnvelope {
    pub(crate) fn new(raw_text: &str, parsed: ParseResult, reply: Reply) -> Self {
        Self {
            raw_text: raw_text.to_string(),
            parsed,
            info: reply.info,
            results_type: reply.results_type,
            results: reply.results,
        }
    }

    /// Rows in `results`, or zero when it is not a list.
    pub fn result_count(&self) -> usize {
        self.results.as_array().map_or(0, Vec::len)
    }
}

/// What a handler produces; the dispatcher wraps it into an envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// Becomes the envelope's `info`.
    pub info: String,
    /// Becomes the envelope's `results_type`.
    pub results_type: Option<ResultsType>,
    /// Becomes the envelope's `results`.
    pub results: Value,
}

impl Reply {
    /// A reply with no payload.
    pub fn empty(results_type: Option<ResultsType>, info: impl Into<String>) -> Self {
        Self {
            info: info.into(),
            results_type,
            results: Value::Array(Vec::new()),
        }
    }

    /// A list payload.
    pub fn rows<T: Serialize>(
        results_type: ResultsType,
        info: impl Into<String>,
        rows: &[T],
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            info: info.into(),
            results_type: Some(results_type),
            results: serde_json::to_value(rows)?,
        })
    }

    /// A single-object payload.
    pub fn object<T: Serialize>(
        results_type: ResultsType,
        info: impl Into<String>,
        object: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            info: info.into(),
            results_type: Some(results_type),
            results: serde_json::to_value(object)?,
        })
    }

    /// The guidance reply for unmatched text.
    pub fn unknown_command() -> Self {
        Self::empty(None, UNKNOWN_COMMAND_INFO)
    }

    /// The rejection for write commands.
    pub fn read_only() -> Self {
        Self::empty(None, READ_ONLY_INFO)
    }

    /// The id slot was missing or did not parse.
    pub fn missing_id(results_type: ResultsType, what: &str) -> Self {
        Self::empty(
            Some(results_type),
            format!("Intent recognized but no valid {what} id found in command."),
        )
    }

    /// The course slot was missing.
    pub fn missing_course(results_type: ResultsType) -> Self {
        Self::empty(
            Some(results_type),
            "Intent recognized but no course code found in command.",
        )
    }

    /// The phrase named a department clause without a department.
    pub fn missing_department(results_type: ResultsType) -> Self {
        Self::empty(
            Some(results_type),
            "Intent recognized but no department found in command.",
        )
    }
}
