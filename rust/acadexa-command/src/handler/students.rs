use acadexa_intent::{SlotName, Slots};

use super::id;
use crate::envelope::{Reply, ResultsType};
use crate::error::DispatchError;
use crate::store::RecordStore;

pub(super) async fn list(slots: &Slots, store: &dyn RecordStore) -> Result<Reply, DispatchError> {
    if let Some(code) = slots.text(SlotName::Course) {
        let Some(course) = store.course_by_code(code).await? else {
            return Ok(Reply::empty(
                Some(ResultsType::Students),
                format!("No students found in course {code}."),
            ));
        };
        let students = store.students_in_course(course.id).await?;
        if students.is_empty() {
            return Ok(Reply::empty(
                Some(ResultsType::Students),
                format!("No students found in course {}.", course.code),
            ));
        }
        let info = format!("Found {} student(s) in course {}.", students.len(), course.code);
        return Ok(Reply::rows(ResultsType::Students, info, &students)?);
    }

    if slots.contains(SlotName::Department) {
        let Some(department) = slots.text(SlotName::Department) else {
            return Ok(Reply::missing_department(ResultsType::Students));
        };
        let students = store.students_in_department(department).await?;
        if students.is_empty() {
            return Ok(Reply::empty(
                Some(ResultsType::Students),
                format!("No students found in department {department}."),
            ));
        }
        let info = format!(
            "Found {} student(s) in department {department}.",
            students.len()
        );
        return Ok(Reply::rows(ResultsType::Students, info, &students)?);
    }

    let students = store.students().await?;
    if students.is_empty() {
        return Ok(Reply::empty(
            Some(ResultsType::Students),
            "No students matched this query.",
        ));
    }
    let info = format!("Found {} student(s).", students.len());
    Ok(Reply::rows(ResultsType::Students, info, &students)?)
}

pub(super) async fn show(slots: &Slots, store: &dyn RecordStore) -> Result<Reply, DispatchError> {
    let Some(student_id) = id(slots, SlotName::StudentId) else {
        return Ok(Reply::missing_id(ResultsType::Student, "student"));
    };
    let Some(student) = store.student(student_id).await? else {
        return Ok(Reply::empty(
            Some(ResultsType::Student),
            format!("No student found with id {student_id}."),
        ));
    };
    let info = format!("Student {student_id}: {}.", student.name);
    Ok(Reply::object(ResultsType::Student, info, &student)?)
}
