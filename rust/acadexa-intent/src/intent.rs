//! The closed set of intents a command can resolve to.
//!
//! Intent names are the wire contract (`parsed.intent` in every response),
//! so each variant has exactly one snake_case spelling. Whether an intent
//! mutates records is decided by its name prefix, which lets the command
//! surface reject writes before any authorization logic runs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IntentError;

/// Name prefixes that mark an intent as a write operation.
pub const MUTATING_PREFIXES: &[&str] = &[
    "create_", "delete_", "update_", "assign_", "enroll_", "drop_", "mark_", "record_",
];

/// A canonical operation name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Register a new student, optionally with a roll number.
    CreateStudent,
    /// Remove a student record.
    DeleteStudent,
    /// Rename a student.
    UpdateStudentName,
    /// Enroll a student in a course.
    EnrollStudent,
    /// Drop a student from a course.
    DropStudent,
    /// Set the grade on an enrollment.
    UpdateEnrollmentGrade,
    /// Mark a student present, absent or late in a course.
    MarkAttendance,
    /// Record a fee payment for a student.
    RecordPayment,
    /// Create a course.
    CreateCourse,
    /// Remove a course.
    DeleteCourse,
    /// Make a teacher the instructor of a course.
    AssignTeacherToCourse,

    /// Students, optionally narrowed to a course or department.
    ListStudents,
    /// One student's profile.
    ShowStudent,
    /// One student's weighted grade summary.
    ShowStudentResult,
    /// Number of students on record.
    CountStudents,
    /// Courses, optionally narrowed to a teacher or department.
    ListCourses,
    /// Courses the caller studies or teaches.
    ListMyCourses,
    /// One course by code.
    ShowCourse,
    /// Number of courses on record.
    CountCourses,
    /// All teachers.
    ListTeachers,
    /// One teacher's profile.
    ShowTeacher,
    /// Number of teachers on record.
    CountTeachers,
    /// Enrollments held by one student.
    ListEnrollmentsForStudent,
    /// Enrollments in one course.
    ListEnrollmentsForCourse,
    /// One student's attendance, per course or for a single course.
    ShowAttendance,
    /// Per-student attendance across one course.
    ShowCourseAttendance,
    /// Attendance sessions held for a course.
    ListSessions,
    /// One student's fee balance.
    ShowFees,
    /// Assessment items of a course, optionally of one category.
    ListAssessments,
    /// Dashboard totals.
    ShowSummary,
    /// Enrollment, grade and pass-rate figures per course.
    ShowCourseStats,
    /// Student, course and GPA figures per department.
    ShowDepartmentStats,

    /// No rule matched.
    Unknown,
}

impl Intent {
    /// Every intent, in declaration order.
    pub const ALL: [Intent; 33] = [
        Intent::CreateStudent,
        Intent::DeleteStudent,
        Intent::UpdateStudentName,
        Intent::EnrollStudent,
        Intent::DropStudent,
        Intent::UpdateEnrollmentGrade,
        Intent::MarkAttendance,
        Intent::RecordPayment,
        Intent::CreateCourse,
        Intent::DeleteCourse,
        Intent::AssignTeacherToCourse,
        Intent::ListStudents,
        Intent::ShowStudent,
        Intent::ShowStudentResult,
        Intent::CountStudents,
        Intent::ListCourses,
        Intent::ListMyCourses,
        Intent::ShowCourse,
        Intent::CountCourses,
        Intent::ListTeachers,
        Intent::ShowTeacher,
        Intent::CountTeachers,
        Intent::ListEnrollmentsForStudent,
        Intent::ListEnrollmentsForCourse,
        Intent::ShowAttendance,
        Intent::ShowCourseAttendance,
        Intent::ListSessions,
        Intent::ShowFees,
        Intent::ListAssessments,
        Intent::ShowSummary,
        Intent::ShowCourseStats,
        Intent::ShowDepartmentStats,
        Intent::Unknown,
    ];

    /// The wire name of this intent.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::CreateStudent => "create_student",
            Intent::DeleteStudent => "delete_student",
            Intent::UpdateStudentName => "update_student_name",
            Intent::EnrollStudent => "enroll_student",
            Intent::DropStudent => "drop_student",
            Intent::UpdateEnrollmentGrade => "update_enrollment_grade",
            Intent::MarkAttendance => "mark_attendance",
            Intent::RecordPayment => "record_payment",
            Intent::CreateCourse => "create_course",
            Intent::DeleteCourse => "delete_course",
            Intent::AssignTeacherToCourse => "assign_teacher_to_course",
            Intent::ListStudents => "list_students",
            Intent::ShowStudent => "show_student",
            Intent::ShowStudentResult => "show_student_result",
            Intent::CountStudents => "count_students",
            Intent::ListCourses => "list_courses",
            Intent::ListMyCourses => "list_my_courses",
            Intent::ShowCourse => "show_course",
            Intent::CountCourses => "count_courses",
            Intent::ListTeachers => "list_teachers",
            Intent::ShowTeacher => "show_teacher",
            Intent::CountTeachers => "count_teachers",
            Intent::ListEnrollmentsForStudent => "list_enrollments_for_student",
            Intent::ListEnrollmentsForCourse => "list_enrollments_for_course",
            Intent::ShowAttendance => "show_attendance",
            Intent::ShowCourseAttendance => "show_course_attendance",
            Intent::ListSessions => "list_sessions",
            Intent::ShowFees => "show_fees",
            Intent::ListAssessments => "list_assessments",
            Intent::ShowSummary => "show_summary",
            Intent::ShowCourseStats => "show_course_stats",
            Intent::ShowDepartmentStats => "show_department_stats",
            Intent::Unknown => "unknown",
        }
    }

    /// True when the intent names a create/update/delete style operation.
    pub fn is_mutating(&self) -> bool {
        let name = self.as_str();
        MUTATING_PREFIXES
            .iter()
            .any(|prefix| name.starts_with(prefix))
    }

    /// True for [`Intent::Unknown`].
    pub fn is_unknown(&self) -> bool {
        matches!(self, Intent::Unknown)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = IntentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intent::ALL
            .iter()
            .copied()
            .find(|intent| intent.as_str() == s)
            .ok_or_else(|| IntentError::UnknownIntentName(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip_through_from_str() {
        for intent in Intent::ALL {
            assert_eq!(intent.as_str().parse::<Intent>().unwrap(), intent);
        }
    }

    #[test]
    fn serde_name_matches_as_str() {
        for intent in Intent::ALL {
            let json = serde_json::to_string(&intent).unwrap();
            assert_eq!(json, format!("\"{}\"", intent.as_str()));
        }
    }

    #[test]
    fn mutating_intents_follow_prefix_convention() {
        let mutating: Vec<_> = Intent::ALL.into_iter().filter(Intent::is_mutating).collect();
        assert_eq!(
            mutating,
            vec![
                Intent::CreateStudent,
                Intent::DeleteStudent,
                Intent::UpdateStudentName,
                Intent::EnrollStudent,
                Intent::DropStudent,
                Intent::UpdateEnrollmentGrade,
                Intent::MarkAttendance,
                Intent::RecordPayment,
                Intent::CreateCourse,
                Intent::DeleteCourse,
                Intent::AssignTeacherToCourse,
            ]
        );
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert!("fly_to_moon".parse::<Intent>().is_err());
    }
}
