use acadexa_intent::{SlotName, Slots};

use super::id;
use crate::envelope::{Reply, ResultsType};
use crate::error::DispatchError;
use crate::records::Course;
use crate::store::{CourseFilter, RecordStore};

pub(super) async fn list(slots: &Slots, store: &dyn RecordStore) -> Result<Reply, DispatchError> {
    let mut filter = CourseFilter::default();

    if slots.contains(SlotName::TeacherId) {
        let Some(teacher_id) = id(slots, SlotName::TeacherId) else {
            return Ok(Reply::missing_id(ResultsType::Courses, "teacher"));
        };
        filter.teacher_id = Some(teacher_id);
    }
    if slots.contains(SlotName::Department) {
        let Some(department) = slots.text(SlotName::Department) else {
            return Ok(Reply::missing_department(ResultsType::Courses));
        };
        filter.department = Some(department.to_string());
    }

    let courses = store.courses(&filter).await?;
    if courses.is_empty() {
        let info = match (&filter.department, filter.teacher_id) {
            (Some(department), _) => format!("No courses found in department {department}."),
            (None, Some(teacher_id)) => format!("No courses found for teacher {teacher_id}."),
            (None, None) => "No courses found.".to_string(),
        };
        return Ok(Reply::empty(Some(ResultsType::Courses), info));
    }

    let info = format!("Found {} course(s).", courses.len());
    Ok(Reply::rows(ResultsType::Courses, info, &courses)?)
}

/// Courses the caller studies or teaches. Scope resolution has already
/// pinned exactly one of `student_id` and `teacher_id`.
pub(super) async fn mine(slots: &Slots, store: &dyn RecordStore) -> Result<Reply, DispatchError> {
    if let Some(teacher_id) = id(slots, SlotName::TeacherId) {
        let courses = store.courses(&CourseFilter::teacher(teacher_id)).await?;
        if courses.is_empty() {
            return Ok(Reply::empty(
                Some(ResultsType::Courses),
                format!("No courses found for teacher {teacher_id}."),
            ));
        }
        let info = format!("Found {} course(s) taught by teacher {teacher_id}.", courses.len());
        return Ok(Reply::rows(ResultsType::Courses, info, &courses)?);
    }

    let Some(student_id) = id(slots, SlotName::StudentId) else {
        return Ok(Reply::missing_id(ResultsType::Courses, "student"));
    };
    let mut courses: Vec<Course> = Vec::new();
    for enrollment in store.enrollments_for_student(student_id).await? {
        if let Some(course) = store.course(enrollment.course_id).await? {
            courses.push(course);
        }
    }
    if courses.is_empty() {
        return Ok(Reply::empty(
            Some(ResultsType::Courses),
            format!("No courses found for student {student_id}."),
        ));
    }
    let info = format!("Found {} course(s) for student {student_id}.", courses.len());
    Ok(Reply::rows(ResultsType::Courses, info, &courses)?)
}

pub(super) async fn show(slots: &Slots, store: &dyn RecordStore) -> Result<Reply, DispatchError> {
    let Some(code) = slots.text(SlotName::Course) else {
        return Ok(Reply::missing_course(ResultsType::Course));
    };
    let Some(course) = store.course_by_code(code).await? else {
        return Ok(Reply::empty(
            Some(ResultsType::Course),
            format!("No course found with code {code}."),
        ));
    };
    let info = format!("{}: {}.", course.code, course.title);
    Ok(Reply::object(ResultsType::Course, info, &course)?)
}
