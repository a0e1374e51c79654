//! Attendance summaries.
//!
//! A summary walks the sessions of a course and looks up the enrollment's
//! record for each one. A session with no record is counted as absent, so
//! `present + absent + late == total_sessions` always holds and the
//! percentage is taken over every scheduled session.

use acadexa_intent::{SlotName, Slots};
use serde::Serialize;

use super::{id, percent};
use crate::envelope::{Reply, ResultsType};
use crate::error::DispatchError;
use crate::records::{AttendanceRecord, AttendanceSession, AttendanceStatus, Course, Enrollment};
use crate::store::RecordStore;

#[derive(Debug, Default, Serialize)]
struct Tally {
    total_sessions: usize,
    present: usize,
    absent: usize,
    late: usize,
    percent_present: f64,
}

fn tally(sessions: &[AttendanceSession], records: &[AttendanceRecord]) -> Tally {
    let mut tally = Tally {
        total_sessions: sessions.len(),
        ..Tally::default()
    };
    for session in sessions {
        let status = records
            .iter()
            .find(|record| record.session_id == session.id)
            .map_or(AttendanceStatus::Absent, |record| record.status);
        match status {
            AttendanceStatus::Present => tally.present += 1,
            AttendanceStatus::Absent => tally.absent += 1,
            AttendanceStatus::Late => tally.late += 1,
        }
    }
    tally.percent_present = percent(tally.present as f64, tally.total_sessions as f64);
    tally
}

async fn tally_enrollment(
    store: &dyn RecordStore,
    enrollment: &Enrollment,
) -> Result<Tally, DispatchError> {
    let sessions = store.sessions_for_course(enrollment.course_id).await?;
    let records = store.attendance_for_enrollment(enrollment.id).await?;
    Ok(tally(&sessions, &records))
}

#[derive(Debug, Serialize)]
struct StudentAttendance {
    course_id: i64,
    course_code: String,
    course_title: String,
    #[serde(flatten)]
    tally: Tally,
}

#[derive(Debug, Serialize)]
struct CourseAttendance {
    enrollment_id: i64,
    student_id: i64,
    student_name: String,
    #[serde(flatten)]
    tally: Tally,
}

/// Per-course attendance for one student, optionally narrowed to a course.
pub(super) async fn for_student(
    slots: &Slots,
    store: &dyn RecordStore,
) -> Result<Reply, DispatchError> {
    let Some(student_id) = id(slots, SlotName::StudentId) else {
        return Ok(Reply::missing_id(ResultsType::AttendanceSummary, "student"));
    };
    if store.student(student_id).await?.is_none() {
        return Ok(Reply::empty(
            Some(ResultsType::AttendanceSummary),
            format!("No student found with id {student_id}."),
        ));
    }

    let enrollments = match slots.text(SlotName::Course) {
        None => store.enrollments_for_student(student_id).await?,
        Some(code) => {
            let Some(course) = store.course_by_code(code).await? else {
                return Ok(Reply::empty(
                    Some(ResultsType::AttendanceSummary),
                    format!("No course found with code {code}."),
                ));
            };
            match store.enrollment(student_id, course.id).await? {
                Some(enrollment) => vec![enrollment],
                None => {
                    return Ok(Reply::empty(
                        Some(ResultsType::AttendanceSummary),
                        format!("Student {student_id} is not enrolled in course {}.", course.code),
                    ));
                }
            }
        }
    };

    let mut rows = Vec::new();
    for enrollment in &enrollments {
        let Some(course) = store.course(enrollment.course_id).await? else {
            continue;
        };
        rows.push(StudentAttendance {
            course_id: course.id,
            course_code: course.code,
            course_title: course.title,
            tally: tally_enrollment(store, enrollment).await?,
        });
    }
    if rows.is_empty() {
        return Ok(Reply::empty(
            Some(ResultsType::AttendanceSummary),
            format!("No enrollments found for student {student_id}."),
        ));
    }

    let info = format!(
        "Attendance for student {student_id} across {} course(s).",
        rows.len()
    );
    Ok(Reply::rows(ResultsType::AttendanceSummary, info, &rows)?)
}

/// Attendance of every student enrolled in one course.
pub(super) async fn for_course(
    slots: &Slots,
    store: &dyn RecordStore,
) -> Result<Reply, DispatchError> {
    let Some(course) = course_from_slots(slots, store).await? else {
        return Ok(not_found(slots, ResultsType::CourseAttendance));
    };

    let mut rows = Vec::new();
    for enrollment in store.enrollments_for_course(course.id).await? {
        let Some(student) = store.student(enrollment.student_id).await? else {
            continue;
        };
        rows.push(CourseAttendance {
            enrollment_id: enrollment.id,
            student_id: student.id,
            student_name: student.name,
            tally: tally_enrollment(store, &enrollment).await?,
        });
    }
    if rows.is_empty() {
        return Ok(Reply::empty(
            Some(ResultsType::CourseAttendance),
            format!("No students enrolled in course {}.", course.code),
        ));
    }

    let info = format!(
        "Attendance for {} student(s) in course {}.",
        rows.len(),
        course.code
    );
    Ok(Reply::rows(ResultsType::CourseAttendance, info, &rows)?)
}

/// Sessions of a course, newest first.
pub(super) async fn sessions(slots: &Slots, store: &dyn RecordStore) -> Result<Reply, DispatchError> {
    let Some(course) = course_from_slots(slots, store).await? else {
        return Ok(not_found(slots, ResultsType::Sessions));
    };

    let sessions = store.sessions_for_course(course.id).await?;
    if sessions.is_empty() {
        return Ok(Reply::empty(
            Some(ResultsType::Sessions),
            format!("No sessions found for course {}.", course.code),
        ));
    }
    let info = format!(
        "Found {} session(s) for course {}.",
        sessions.len(),
        course.code
    );
    Ok(Reply::rows(ResultsType::Sessions, info, &sessions)?)
}

async fn course_from_slots(
    slots: &Slots,
    store: &dyn RecordStore,
) -> Result<Option<Course>, DispatchError> {
    match slots.text(SlotName::Course) {
        Some(code) => Ok(store.course_by_code(code).await?),
        None => Ok(None),
    }
}

fn not_found(slots: &Slots, shape: ResultsType) -> Reply {
    match slots.text(SlotName::Course) {
        Some(code) => Reply::empty(Some(shape), format!("No course found with code {code}.")),
        None => Reply::missing_course(shape),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn session(id: i64, day: u32) -> AttendanceSession {
        AttendanceSession {
            id,
            course_id: 1,
            lecture_date: NaiveDate::from_ymd_opt(2025, 9, day).unwrap(),
            start_time: None,
            end_time: None,
        }
    }

    fn record(session_id: i64, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: session_id,
            session_id,
            enrollment_id: 1,
            status,
        }
    }

    #[test]
    fn missing_records_count_as_absent() {
        let sessions = [session(1, 1), session(2, 8), session(3, 15), session(4, 22)];
        let records = [
            record(1, AttendanceStatus::Present),
            record(2, AttendanceStatus::Late),
        ];
        let tally = tally(&sessions, &records);
        assert_eq!(
            (tally.present, tally.late, tally.absent, tally.total_sessions),
            (1, 1, 2, 4)
        );
        assert_eq!(tally.percent_present, 25.0);
    }

    #[test]
    fn no_sessions_means_zero_percent() {
        let tally = tally(&[], &[]);
        assert_eq!(tally.total_sessions, 0);
        assert_eq!(tally.percent_present, 0.0);
    }

    #[test]
    fn records_for_other_sessions_are_ignored() {
        let sessions = [session(1, 1)];
        let records = [record(9, AttendanceStatus::Present)];
        let tally = tally(&sessions, &records);
        assert_eq!((tally.present, tally.absent), (0, 1));
    }
}
