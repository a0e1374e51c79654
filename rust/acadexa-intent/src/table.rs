//! The built-in command table.
//!
//! Rules are grouped by intent family, but within the table the order is
//! what matters: qualified phrasings come before the bare phrasing of the
//! same intent, and any phrase that reads like a more general rule (for
//! example "list courses for student 3") is claimed by its specific rule
//! first.
//!
//! `id!()` accepts any word so that "show student abc" still resolves to
//! `show_student` with a null id instead of falling through to `unknown`.
//! Write intents use it too, so "delete student abc" is still recognized
//! and gets the read-only answer.

use crate::error::IntentError;
use crate::extract;
use crate::intent::Intent;
use crate::rule::{RuleTable, no_slots};
use crate::slot::{SlotName, Slots};

macro_rules! id {
    () => {
        r"[a-z0-9-]+"
    };
}

macro_rules! course_code {
    () => {
        r"[a-z0-9-]+(?:\s\d+)?"
    };
}

/// Build the standard table.
pub fn standard_table() -> Result<RuleTable, IntentError> {
    RuleTable::builder()
        // Student writes
        .rule(
            Intent::CreateStudent,
            r"(?:add|create|register)\s+student\s+(?P<name>[a-z][a-z\s]+?)(?:\s+roll\s*(?P<roll>\d+))?",
            |caps| {
                Slots::new()
                    .with(SlotName::Name, extract::text(caps, "name"))
                    .with(SlotName::Roll, extract::integer(caps, "roll"))
            },
        )
        .rule(
            Intent::DeleteStudent,
            concat!(r"(?:delete|remove)\s+student\s+(?P<student_id>", id!(), r")"),
            |caps| Slots::new().with(SlotName::StudentId, extract::integer(caps, "student_id")),
        )
        .rule(
            Intent::UpdateStudentName,
            concat!(
                r"(?:update|change)\s+student\s+(?P<student_id>",
                id!(),
                r")\s+name\s+to\s+(?P<name>[a-z][a-z\s]+)"
            ),
            |caps| {
                Slots::new()
                    .with(SlotName::StudentId, extract::integer(caps, "student_id"))
                    .with(SlotName::Name, extract::text(caps, "name"))
            },
        )
        .rule(
            Intent::EnrollStudent,
            concat!(
                r"(?:enroll|enrol|register)\s+student\s+(?P<student_id>",
                id!(),
                r")\s+(?:in|into|to)\s+",
                r"(?:course\s+)?(?P<course>",
                course_code!(),
                r")"
            ),
            |caps| {
                Slots::new()
                    .with(SlotName::StudentId, extract::integer(caps, "student_id"))
                    .with(SlotName::Course, extract::course(caps, "course"))
            },
        )
        .rule(
            Intent::DropStudent,
            concat!(
                r"(?:drop|unenroll|unenrol)\s+student\s+(?P<student_id>",
                id!(),
                r")\s+from\s+",
                r"(?:course\s+)?(?P<course>",
                course_code!(),
                r")"
            ),
            |caps| {
                Slots::new()
                    .with(SlotName::StudentId, extract::integer(caps, "student_id"))
                    .with(SlotName::Course, extract::course(caps, "course"))
            },
        )
        .rule(
            Intent::UpdateEnrollmentGrade,
            concat!(
                r"(?:set|update|change)\s+(?:the\s+)?grade\s+(?:of|for)\s+enrollment\s+",
                r"(?P<enrollment_id>",
                id!(),
                r")\s+to\s+(?P<whole>\d+)(?:\s+point\s+(?P<fraction>\d+))?"
            ),
            |caps| {
                Slots::new()
                    .with(SlotName::EnrollmentId, extract::integer(caps, "enrollment_id"))
                    .with(SlotName::Grade, extract::decimal(caps, "whole", "fraction"))
            },
        )
        .rule(
            Intent::MarkAttendance,
            concat!(
                r"mark\s+student\s+(?P<student_id>",
                id!(),
                r")\s+(?:as\s+)?(?P<status>present|absent|late)",
                r"\s+(?:in|for)\s+(?:course\s+)?(?P<course>",
                course_code!(),
                r")"
            ),
            |caps| {
                Slots::new()
                    .with(SlotName::StudentId, extract::integer(caps, "student_id"))
                    .with(SlotName::Status, extract::text(caps, "status"))
                    .with(SlotName::Course, extract::course(caps, "course"))
            },
        )
        .rule(
            Intent::RecordPayment,
            concat!(
                r"record\s+(?:a\s+)?payment\s+of\s+(?P<whole>\d+)(?:\s+point\s+(?P<fraction>\d+))?",
                r"\s+for\s+student\s+(?P<student_id>",
                id!(),
                r")"
            ),
            |caps| {
                Slots::new()
                    .with(SlotName::Amount, extract::decimal(caps, "whole", "fraction"))
                    .with(SlotName::StudentId, extract::integer(caps, "student_id"))
            },
        )
        // Student reads
        .rule(
            Intent::ListStudents,
            concat!(
                r"(?:list|show|display)\s+(?:all\s+)?students(?:\s+in\s+course\s+(?P<course>",
                course_code!(),
                r"))?"
            ),
            |caps| {
                let mut slots = Slots::new();
                if caps.name("course").is_some() {
                    slots.insert(SlotName::Course, extract::course(caps, "course"));
                }
                slots
            },
        )
        .rule(
            Intent::ListStudents,
            r"(?:list|show|display|get)\s+(?:all\s+)?students\s+(?:in|of|from)\s+(?:department|dept)\s+(?P<department>[a-z0-9-]+)",
            |caps| Slots::new().with(SlotName::Department, extract::upper(caps, "department")),
        )
        .rule(
            Intent::ListStudents,
            r"(?:list|show|get)\s+(?:all\s+)?students(?:\s+list)?",
            no_slots,
        )
        .rule(
            Intent::ShowStudentResult,
            r"(?:show|get|display)\s+(?:me\s+)?my\s+(?:results?|marks|grades?)",
            no_slots,
        )
        .rule(
            Intent::ShowStudentResult,
            concat!(
                r"(?:show|get|display).*(?:result|marks|grades?).*(?:student|roll)",
                r"(?:\s+(?P<student_id>",
                id!(),
                r")|(?P<attached_id>\d+))"
            ),
            |caps| {
                // "roll77" arrives with the number attached to the keyword.
                let id = match caps.name("attached_id") {
                    Some(_) => extract::integer(caps, "attached_id"),
                    None => extract::integer(caps, "student_id"),
                };
                Slots::new().with(SlotName::StudentId, id)
            },
        )
        .rule(
            Intent::ShowStudent,
            r"(?:show|get|display)\s+(?:me\s+)?my\s+(?:profile|details|record)",
            no_slots,
        )
        .rule(
            Intent::ShowStudent,
            concat!(
                r"(?:show|get|display)\s+(?:(?:details|profile|record)\s+(?:of|for)\s+)?student\s+(?P<student_id>",
                id!(),
                r")"
            ),
            |caps| Slots::new().with(SlotName::StudentId, extract::integer(caps, "student_id")),
        )
        .rule(
            Intent::CountStudents,
            r"(?:how\s+many|count|number\s+of|total)\s+students(?:\s+are\s+there)?",
            no_slots,
        )
        // Course and teacher writes
        .rule(
            Intent::CreateCourse,
            r"(?:add|create)\s+course\s+(?P<title>[a-z][a-z0-9\s-]+)",
            |caps| Slots::new().with(SlotName::Title, extract::text(caps, "title")),
        )
        .rule(
            Intent::DeleteCourse,
            concat!(r"(?:delete|remove)\s+course\s+(?P<course_code>", course_code!(), r")"),
            |caps| Slots::new().with(SlotName::CourseCode, extract::course(caps, "course_code")),
        )
        .rule(
            Intent::CountTeachers,
            r"(?:how\s+many|count|number\s+of|total)\s+teachers(?:\s+are\s+there)?",
            no_slots,
        )
        .rule(
            Intent::AssignTeacherToCourse,
            concat!(
                r"(?:assign|set)\s+teacher\s+(?P<teacher>[a-z][a-z\s]+?)\s+to\s+course\s+(?P<course>",
                course_code!(),
                r")"
            ),
            |caps| {
                Slots::new()
                    .with(SlotName::Teacher, extract::text(caps, "teacher"))
                    .with(SlotName::Course, extract::course(caps, "course"))
            },
        )
        // Enrollments and course lists
        .rule(
            Intent::ListEnrollmentsForStudent,
            r"(?:list|show|get)\s+(?:me\s+)?my\s+enrol?lments?",
            no_slots,
        )
        .rule(
            Intent::ListEnrollmentsForStudent,
            concat!(
                r"(?:list|show|get)\s+(?:enrol?lments?|courses)\s+(?:for|of)\s+student\s+(?P<student_id>",
                id!(),
                r")"
            ),
            |caps| Slots::new().with(SlotName::StudentId, extract::integer(caps, "student_id")),
        )
        .rule(
            Intent::ListEnrollmentsForCourse,
            concat!(
                r"(?:list|show|get)\s+(?:all\s+)?enrol?lments?\s+(?:in|for|of)\s+course\s+(?P<course>",
                course_code!(),
                r")"
            ),
            |caps| Slots::new().with(SlotName::Course, extract::course(caps, "course")),
        )
        .rule(
            Intent::ListMyCourses,
            r"(?:list|show|get)\s+(?:me\s+)?my\s+courses",
            no_slots,
        )
        .rule(
            Intent::ListCourses,
            concat!(
                r"(?:list|show|get)\s+courses\s+(?:for|by|of)\s+teacher\s+(?P<teacher_id>",
                id!(),
                r")"
            ),
            |caps| Slots::new().with(SlotName::TeacherId, extract::integer(caps, "teacher_id")),
        )
        .rule(
            Intent::ListCourses,
            r"(?:list|show|get)\s+courses\s+in\s+(?:(?:department|dept)\s+)?(?P<department>[a-z0-9-]+)",
            |caps| Slots::new().with(SlotName::Department, extract::upper(caps, "department")),
        )
        .rule(
            Intent::ListCourses,
            r"(?:list|show|get)\s+(?:all\s+)?courses(?:\s+list)?",
            no_slots,
        )
        .rule(
            Intent::CountCourses,
            r"(?:how\s+many|count|number\s+of|total)\s+courses(?:\s+are\s+there)?",
            no_slots,
        )
        // Ahead of show_course, which would read "stats" as a course code.
        .rule(
            Intent::ShowCourseStats,
            r"(?:show|get|display)\s+(?:the\s+)?(?:per\s+)?course\s+(?:statistics|stats)",
            no_slots,
        )
        .rule(
            Intent::ShowDepartmentStats,
            r"(?:show|get|display)\s+(?:the\s+)?(?:per\s+)?department\s+(?:statistics|stats)",
            no_slots,
        )
        .rule(
            Intent::ShowCourse,
            concat!(
                r"(?:show|get|display)\s+(?:(?:details|info)\s+(?:of|for)\s+)?course\s+(?P<course>",
                course_code!(),
                r")"
            ),
            |caps| Slots::new().with(SlotName::Course, extract::course(caps, "course")),
        )
        .rule(
            Intent::ListTeachers,
            r"(?:list|show|get)\s+(?:all\s+)?teachers(?:\s+list)?",
            no_slots,
        )
        .rule(
            Intent::ShowTeacher,
            concat!(
                r"(?:show|get|display)\s+(?:me\s+)?(?:my\s+teacher\s+profile|",
                r"(?:(?:details|profile)\s+(?:of|for)\s+)?teacher\s+(?P<teacher_id>",
                id!(),
                r"))"
            ),
            |caps| {
                let mut slots = Slots::new();
                if let Some(id) = extract::optional_integer(caps, "teacher_id") {
                    slots.insert(SlotName::TeacherId, id);
                }
                slots
            },
        )
        // Attendance
        .rule(
            Intent::ShowAttendance,
            concat!(
                r"(?:show|get|display)\s+(?:me\s+)?my\s+attendance",
                r"(?:\s+(?:for|in|of)\s+(?:course\s+)?(?P<course>",
                course_code!(),
                r"))?"
            ),
            |caps| Slots::new().with(SlotName::Course, extract::course(caps, "course")),
        )
        .rule(
            Intent::ShowAttendance,
            concat!(
                r"(?:show|get|display)\s+attendance\s+(?:for|of)\s+student\s+(?P<student_id>",
                id!(),
                r")(?:\s+(?:for|in)\s+(?:course\s+)?(?P<course>",
                course_code!(),
                r"))?"
            ),
            |caps| {
                Slots::new()
                    .with(SlotName::StudentId, extract::integer(caps, "student_id"))
                    .with(SlotName::Course, extract::course(caps, "course"))
            },
        )
        .rule(
            Intent::ShowCourseAttendance,
            concat!(
                r"(?:show|get|display)\s+(?:attendance\s+(?:for|of|in)\s+course|course\s+attendance\s+(?:for|of))",
                r"\s+(?P<course>",
                course_code!(),
                r")"
            ),
            |caps| Slots::new().with(SlotName::Course, extract::course(caps, "course")),
        )
        .rule(
            Intent::ListSessions,
            concat!(
                r"(?:list|show|get)\s+(?:all\s+)?(?:attendance\s+)?sessions\s+(?:for|of|in)\s+",
                r"(?:course\s+)?(?P<course>",
                course_code!(),
                r")"
            ),
            |caps| Slots::new().with(SlotName::Course, extract::course(caps, "course")),
        )
        // Fees
        .rule(
            Intent::ShowFees,
            concat!(
                r"(?:show|get|display)\s+(?:me\s+)?(?:my\s+fees?(?:\s+status)?|",
                r"fees?(?:\s+status)?\s+(?:for|of)\s+student\s+(?P<student_id>",
                id!(),
                r"))"
            ),
            |caps| {
                let mut slots = Slots::new();
                if let Some(id) = extract::optional_integer(caps, "student_id") {
                    slots.insert(SlotName::StudentId, id);
                }
                slots
            },
        )
        // Assessments
        .rule(
            Intent::ListAssessments,
            concat!(
                r"(?:list|show|get)\s+(?:all\s+)?",
                r"(?P<category>quiz(?:zes)?|assignments?|mids?|midterms?|finals?|assessments?)",
                r"\s+(?:for|of|in)\s+(?:course\s+)?(?P<course>",
                course_code!(),
                r")"
            ),
            |caps| {
                Slots::new()
                    .with(SlotName::Category, extract::category(caps, "category"))
                    .with(SlotName::Course, extract::course(caps, "course"))
            },
        )
        // Dashboard
        .rule(
            Intent::ShowSummary,
            r"(?:show|get|display)\s+(?:the\s+)?(?:overall\s+)?(?:summary|statistics|stats)",
            no_slots,
        )
        .build()
}
