use acadexa_intent::{SlotName, Slots};
use serde::Serialize;

use super::id;
use crate::envelope::{Reply, ResultsType};
use crate::error::DispatchError;
use crate::records::{Course, Enrollment, Student};
use crate::store::RecordStore;

/// An enrollment joined with its student and course.
#[derive(Debug, Serialize)]
struct EnrollmentRow {
    id: i64,
    student_id: i64,
    student_name: String,
    course_id: i64,
    course_code: String,
    course_title: String,
    semester: Option<String>,
    status: Option<String>,
    grade: Option<f64>,
}

impl EnrollmentRow {
    fn join(enrollment: Enrollment, student: &Student, course: &Course) -> Self {
        Self {
            id: enrollment.id,
            student_id: student.id,
            student_name: student.name.clone(),
            course_id: course.id,
            course_code: course.code.clone(),
            course_title: course.title.clone(),
            semester: enrollment.semester,
            status: enrollment.status,
            grade: enrollment.grade,
        }
    }
}

pub(super) async fn for_student(
    slots: &Slots,
    store: &dyn RecordStore,
) -> Result<Reply, DispatchError> {
    let Some(student_id) = id(slots, SlotName::StudentId) else {
        return Ok(Reply::missing_id(ResultsType::Enrollments, "student"));
    };
    let no_rows = || {
        Reply::empty(
            Some(ResultsType::Enrollments),
            format!("No enrollments found for student {student_id}."),
        )
    };

    let Some(student) = store.student(student_id).await? else {
        return Ok(no_rows());
    };

    let mut rows = Vec::new();
    for enrollment in store.enrollments_for_student(student_id).await? {
        if let Some(course) = store.course(enrollment.course_id).await? {
            rows.push(EnrollmentRow::join(enrollment, &student, &course));
        }
    }
    if rows.is_empty() {
        return Ok(no_rows());
    }

    let info = format!("Found {} enrollment(s) for student {student_id}.", rows.len());
    Ok(Reply::rows(ResultsType::Enrollments, info, &rows)?)
}

pub(super) async fn for_course(
    slots: &Slots,
    store: &dyn RecordStore,
) -> Result<Reply, DispatchError> {
    let Some(code) = slots.text(SlotName::Course) else {
        return Ok(Reply::missing_course(ResultsType::Enrollments));
    };
    let Some(course) = store.course_by_code(code).await? else {
        return Ok(Reply::empty(
            Some(ResultsType::Enrollments),
            format!("No course found with code {code}."),
        ));
    };

    let mut rows = Vec::new();
    for enrollment in store.enrollments_for_course(course.id).await? {
        if let Some(student) = store.student(enrollment.student_id).await? {
            rows.push(EnrollmentRow::join(enrollment, &student, &course));
        }
    }
    if rows.is_empty() {
        return Ok(Reply::empty(
            Some(ResultsType::Enrollments),
            format!("No enrollments found for course {}.", course.code),
        ));
    }

    let info = format!("Found {} enrollment(s) for course {}.", rows.len(), course.code);
    Ok(Reply::rows(ResultsType::Enrollments, info, &rows)?)
}
