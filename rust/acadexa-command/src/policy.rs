//! Per-intent, per-role access table.
//!
//! Every read intent maps each role to exactly one [`Access`] mode. The
//! dispatcher consults this table once per command; handlers never look at
//! roles themselves.
//!
//! ```text
//!                      admin  hod     teacher  student
//! list_students        G      G       CO       -
//! show_student         G      G       -        OS
//! list_my_courses      -      -       OT       OS
//! list_sessions        G      G       CO       CM
//! show_fees            G      -       -        OS
//! show_course_stats    G      G       -        -
//! ```

use acadexa_intent::Intent;

use crate::principal::Role;

/// How a role may use an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// Any target.
    Global,
    /// Only the principal's own student profile. The `student_id` slot is
    /// forced to the linked id.
    OwnStudent,
    /// Only the principal's own teacher profile. The `teacher_id` slot is
    /// forced to the linked id.
    OwnTeacher,
    /// Only a course the principal teaches.
    CourseOwner,
    /// Only a course the principal is enrolled in.
    CourseMember,
    /// Not at all.
    Denied,
}

impl Access {
    /// Whether resolving this mode needs a linked profile.
    pub fn needs_profile(&self) -> bool {
        !matches!(self, Access::Global | Access::Denied)
    }
}

/// The access table.
pub struct Policy;

impl Policy {
    /// Access mode for `role` on `intent`.
    ///
    /// Write intents and `unknown` are denied for every role; the read-only
    /// gate rejects writes before this table is consulted.
    pub fn access(intent: Intent, role: Role) -> Access {
        use Access::*;
        use Role::*;

        match intent {
            Intent::ListStudents => match role {
                Admin | Hod => Global,
                Teacher => CourseOwner,
                Student => Denied,
            },
            Intent::ShowStudent | Intent::ShowStudentResult => match role {
                Admin | Hod => Global,
                Teacher => Denied,
                Student => OwnStudent,
            },
            Intent::CountStudents
            | Intent::CountCourses
            | Intent::CountTeachers
            | Intent::ListTeachers
            | Intent::ShowSummary
            | Intent::ShowCourseStats
            | Intent::ShowDepartmentStats => match role {
                Admin | Hod => Global,
                Teacher | Student => Denied,
            },
            Intent::ListCourses | Intent::ShowCourse => Global,
            Intent::ListMyCourses => match role {
                Admin | Hod => Denied,
                Teacher => OwnTeacher,
                Student => OwnStudent,
            },
            Intent::ShowTeacher => match role {
                Admin | Hod => Global,
                Teacher => OwnTeacher,
                Student => Denied,
            },
            Intent::ListEnrollmentsForStudent | Intent::ShowAttendance => match role {
                Admin | Hod => Global,
                Teacher => Denied,
                Student => OwnStudent,
            },
            Intent::ListEnrollmentsForCourse | Intent::ShowCourseAttendance => match role {
                Admin | Hod => Global,
                Teacher => CourseOwner,
                Student => Denied,
            },
            Intent::ListSessions | Intent::ListAssessments => match role {
                Admin | Hod => Global,
                Teacher => CourseOwner,
                Student => CourseMember,
            },
            Intent::ShowFees => match role {
                Admin => Global,
                Hod | Teacher => Denied,
                Student => OwnStudent,
            },
            Intent::CreateStudent
            | Intent::DeleteStudent
            | Intent::UpdateStudentName
            | Intent::EnrollStudent
            | Intent::DropStudent
            | Intent::UpdateEnrollmentGrade
            | Intent::MarkAttendance
            | Intent::RecordPayment
            | Intent::CreateCourse
            | Intent::DeleteCourse
            | Intent::AssignTeacherToCourse
            | Intent::Unknown => Denied,
        }
    }
}
