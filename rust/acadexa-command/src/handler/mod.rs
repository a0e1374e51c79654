//! Per-intent handlers.
//!
//! Handlers run after authorization and scope resolution, so the slots they
//! receive are already pinned to what the principal may see. They only turn
//! slots into store reads and shape the reply. Missing targets are ordinary
//! replies with an explanatory `info`, never errors.

mod analytics;
mod assessments;
mod attendance;
mod courses;
mod enrollments;
mod fees;
mod students;
mod teachers;

use acadexa_intent::{Intent, SlotName, Slots};

use crate::envelope::Reply;
use crate::error::DispatchError;
use crate::store::{RecordKind, RecordStore};

/// Run the handler for `intent`.
pub(crate) async fn handle(
    intent: Intent,
    slots: &Slots,
    store: &dyn RecordStore,
) -> Result<Reply, DispatchError> {
    match intent {
        Intent::ListStudents => students::list(slots, store).await,
        Intent::ShowStudent => students::show(slots, store).await,
        Intent::ShowStudentResult => assessments::grade_summary(slots, store).await,
        Intent::CountStudents => analytics::count(RecordKind::Students, store).await,
        Intent::ListCourses => courses::list(slots, store).await,
        Intent::ListMyCourses => courses::mine(slots, store).await,
        Intent::ShowCourse => courses::show(slots, store).await,
        Intent::CountCourses => analytics::count(RecordKind::Courses, store).await,
        Intent::ListTeachers => teachers::list(store).await,
        Intent::ShowTeacher => teachers::show(slots, store).await,
        Intent::CountTeachers => analytics::count(RecordKind::Teachers, store).await,
        Intent::ListEnrollmentsForStudent => enrollments::for_student(slots, store).await,
        Intent::ListEnrollmentsForCourse => enrollments::for_course(slots, store).await,
        Intent::ShowAttendance => attendance::for_student(slots, store).await,
        Intent::ShowCourseAttendance => attendance::for_course(slots, store).await,
        Intent::ListSessions => attendance::sessions(slots, store).await,
        Intent::ShowFees => fees::status(slots, store).await,
        Intent::ListAssessments => assessments::list(slots, store).await,
        Intent::ShowSummary => analytics::summary(store).await,
        Intent::ShowCourseStats => analytics::course_stats(store).await,
        Intent::ShowDepartmentStats => analytics::department_stats(store).await,
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
        | Intent::AssignTeacherToCourse => Ok(Reply::read_only()),
        Intent::Unknown => Ok(Reply::unknown_command()),
    }
}

/// A usable id: present, numeric and positive.
fn id(slots: &Slots, name: SlotName) -> Option<i64> {
    slots.integer(name).filter(|id| *id > 0)
}

/// Percentage of `part` in `whole`, or zero when `whole` is empty.
fn percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 { part / whole * 100.0 } else { 0.0 }
}
