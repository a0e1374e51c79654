use acadexa_command::{
    AssessmentCategory, AssessmentItem, AssessmentScore, AttendanceRecord, AttendanceSession,
    Course, CourseFilter, DispatchError, Dispatcher, Enrollment, FeeAccount, FeeTransaction,
    MemoryRecordStore, Principal, READ_ONLY_INFO, RecordKind, RecordStore, ResponseEnvelope,
    ResultsType, Role, StoreError, Student, Teacher, UNKNOWN_COMMAND_INFO,
};
use acadexa_intent::{Intent, SlotName, SlotValue, Slots};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

const CAMPUS: &str = include_str!("../fixtures/campus.json");

fn campus() -> Result<Dispatcher<MemoryRecordStore>> {
    Ok(Dispatcher::new(MemoryRecordStore::from_json(CAMPUS)?))
}

fn admin() -> Principal {
    Principal::admin(100)
}

/// Student account linked to student profile 1.
fn student_one() -> Principal {
    Principal::student(201, Some(1))
}

/// Teacher account linked to teacher profile 1, who teaches CS-101 and CS-401.
fn teacher_one() -> Principal {
    Principal::teacher(301, Some(1))
}

fn ids(envelope: &ResponseEnvelope, key: &str) -> Vec<i64> {
    envelope
        .results
        .as_array()
        .map(|rows| rows.iter().filter_map(|row| row[key].as_i64()).collect())
        .unwrap_or_default()
}

fn expect_kind(result: Result<ResponseEnvelope, DispatchError>, kind: &str) -> Result<()> {
    match result {
        Ok(envelope) => Err(anyhow!("expected {kind}, got envelope {:?}", envelope.info)),
        Err(error) => {
            assert_eq!(error.kind(), kind, "{error}");
            Ok(())
        }
    }
}

fn close(actual: &Value, expected: f64) -> bool {
    actual.as_f64().is_some_and(|actual| (actual - expected).abs() < 1e-9)
}

/// Fails every read, so a command that succeeds against it never touched
/// the data layer.
struct UnreachableStore;

fn consulted<T>() -> Result<T, StoreError> {
    Err(StoreError::Backend("store was consulted".into()))
}

#[async_trait]
impl RecordStore for UnreachableStore {
    async fn student(&self, _: i64) -> Result<Option<Student>, StoreError> {
        consulted()
    }
    async fn students(&self) -> Result<Vec<Student>, StoreError> {
        consulted()
    }
    async fn students_in_course(&self, _: i64) -> Result<Vec<Student>, StoreError> {
        consulted()
    }
    async fn students_in_department(&self, _: &str) -> Result<Vec<Student>, StoreError> {
        consulted()
    }
    async fn teacher(&self, _: i64) -> Result<Option<Teacher>, StoreError> {
        consulted()
    }
    async fn teachers(&self) -> Result<Vec<Teacher>, StoreError> {
        consulted()
    }
    async fn course(&self, _: i64) -> Result<Option<Course>, StoreError> {
        consulted()
    }
    async fn course_by_code(&self, _: &str) -> Result<Option<Course>, StoreError> {
        consulted()
    }
    async fn courses(&self, _: &CourseFilter) -> Result<Vec<Course>, StoreError> {
        consulted()
    }
    async fn enrollment(&self, _: i64, _: i64) -> Result<Option<Enrollment>, StoreError> {
        consulted()
    }
    async fn enrollments_for_student(&self, _: i64) -> Result<Vec<Enrollment>, StoreError> {
        consulted()
    }
    async fn enrollments_for_course(&self, _: i64) -> Result<Vec<Enrollment>, StoreError> {
        consulted()
    }
    async fn sessions_for_course(&self, _: i64) -> Result<Vec<AttendanceSession>, StoreError> {
        consulted()
    }
    async fn attendance_for_enrollment(
        &self,
        _: i64,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        consulted()
    }
    async fn fee_account(&self, _: i64) -> Result<Option<FeeAccount>, StoreError> {
        consulted()
    }
    async fn fee_transactions(&self, _: i64) -> Result<Vec<FeeTransaction>, StoreError> {
        consulted()
    }
    async fn assessment_items(
        &self,
        _: i64,
        _: Option<AssessmentCategory>,
    ) -> Result<Vec<AssessmentItem>, StoreError> {
        consulted()
    }
    async fn scores_for_enrollment(&self, _: i64) -> Result<Vec<AssessmentScore>, StoreError> {
        consulted()
    }
    async fn count(&self, _: RecordKind) -> Result<u64, StoreError> {
        consulted()
    }
    async fn average_gpa(&self) -> Result<Option<f64>, StoreError> {
        consulted()
    }
}

#[test_log::test(tokio::test)]
async fn it_explains_unmatched_commands() -> Result<()> {
    let dispatcher = campus()?;
    let envelope = dispatcher
        .submit_command("open the door please", &admin())
        .await?;

    assert_eq!(
        serde_json::to_value(&envelope)?,
        json!({
            "raw_text": "open the door please",
            "parsed": { "intent": "unknown", "slots": {} },
            "info": UNKNOWN_COMMAND_INFO,
            "results_type": null,
            "results": []
        })
    );
    Ok(())
}

#[test_log::test(tokio::test)]
async fn it_rejects_writes_for_every_role_without_reading_the_store() -> Result<()> {
    let dispatcher = Dispatcher::new(UnreachableStore);
    let principals = [
        admin(),
        Principal::hod(101),
        teacher_one(),
        student_one(),
        Principal::student(202, None),
    ];

    for principal in &principals {
        let envelope = dispatcher
            .submit_command("Add student Ali Raza roll 125", principal)
            .await?;
        assert_eq!(envelope.parsed.intent, Intent::CreateStudent);
        assert_eq!(
            envelope.parsed.slots,
            Slots::new()
                .with(SlotName::Name, "ali raza")
                .with(SlotName::Roll, 125i64)
        );
        assert_eq!(envelope.info, READ_ONLY_INFO);
        assert_eq!(envelope.results_type, None);
        assert_eq!(envelope.results, json!([]));
    }

    for text in [
        "delete student 42",
        "delete student abc",
        "enroll student x1 in course cs 101",
        "record payment of 5000 for student 3",
        "set grade of enrollment 4 to 3 point 5",
        "assign teacher ahmed ali to course cs 101",
    ] {
        let envelope = dispatcher.submit_command(text, &admin()).await?;
        assert!(envelope.parsed.intent.is_mutating(), "{text}");
        assert_eq!(envelope.info, READ_ONLY_INFO, "{text}");
    }
    Ok(())
}

#[test_log::test(tokio::test)]
async fn it_lists_enrollments_for_a_named_student() -> Result<()> {
    let dispatcher = campus()?;
    let envelope = dispatcher
        .submit_command("show enrollments for student 3", &admin())
        .await?;

    assert_eq!(envelope.parsed.intent, Intent::ListEnrollmentsForStudent);
    assert_eq!(envelope.parsed.slots.integer(SlotName::StudentId), Some(3));
    assert_eq!(envelope.results_type, Some(ResultsType::Enrollments));
    assert_eq!(envelope.info, "Found 2 enrollment(s) for student 3.");
    assert_eq!(ids(&envelope, "id"), vec![5, 6]);
    assert_eq!(envelope.results[0]["course_code"], "EE-201");
    assert_eq!(envelope.results[1]["student_name"], "Ali Raza");
    Ok(())
}

#[test_log::test(tokio::test)]
async fn it_denies_students_global_reads() -> Result<()> {
    let dispatcher = campus()?;
    for text in [
        "list teachers",
        "how many students",
        "show summary",
        "list students",
        "show course stats",
        "show department statistics",
    ] {
        expect_kind(
            dispatcher.submit_command(text, &student_one()).await,
            "forbidden",
        )?;
    }
    Ok(())
}

#[test_log::test(tokio::test)]
async fn it_scopes_students_to_their_own_profile() -> Result<()> {
    let dispatcher = campus()?;

    for text in ["show my enrollments", "show enrollments for student 1"] {
        let envelope = dispatcher.submit_command(text, &student_one()).await?;
        assert_eq!(envelope.results_type, Some(ResultsType::Enrollments));
        assert_eq!(ids(&envelope, "student_id"), vec![1, 1], "{text}");
    }

    let own = dispatcher
        .submit_command("show my enrollments", &student_one())
        .await?;
    assert!(own.parsed.slots.is_empty());
    assert_eq!(own.info, "Found 2 enrollment(s) for student 1.");

    expect_kind(
        dispatcher
            .submit_command("show enrollments for student 2", &student_one())
            .await,
        "forbidden",
    )
}

#[test_log::test(tokio::test)]
async fn it_replaces_a_malformed_id_with_the_linked_profile() -> Result<()> {
    let dispatcher = campus()?;
    let envelope = dispatcher
        .submit_command("show student x1", &student_one())
        .await?;

    assert_eq!(
        envelope.parsed.slots.get(SlotName::StudentId),
        Some(&SlotValue::Absent)
    );
    assert_eq!(envelope.results["id"], 1);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn it_reports_unlinked_profiles_distinctly() -> Result<()> {
    let dispatcher = campus()?;
    let result = dispatcher
        .submit_command("show my enrollments", &Principal::student(202, None))
        .await;
    assert!(matches!(
        result,
        Err(DispatchError::ProfileNotLinked {
            role: Role::Student
        })
    ));

    expect_kind(
        dispatcher
            .submit_command("show my courses", &Principal::teacher(302, None))
            .await,
        "profile_not_linked",
    )
}

#[test_log::test(tokio::test)]
async fn it_lets_teachers_read_only_the_courses_they_teach() -> Result<()> {
    let dispatcher = campus()?;

    let envelope = dispatcher
        .submit_command("list students in course cs 101", &teacher_one())
        .await?;
    assert_eq!(envelope.results_type, Some(ResultsType::Students));
    assert_eq!(ids(&envelope, "id"), vec![1, 2, 3]);
    assert_eq!(envelope.info, "Found 3 student(s) in course CS-101.");

    let sessions = dispatcher
        .submit_command("list sessions for course cs101", &teacher_one())
        .await?;
    assert_eq!(ids(&sessions, "id"), vec![4, 3, 2, 1]);

    // Foreign, unknown and missing courses all look the same.
    for text in [
        "list students in course cs-402",
        "list students in course cs-999",
        "list students",
        "show attendance for course ee-201",
    ] {
        expect_kind(dispatcher.submit_command(text, &teacher_one()).await, "forbidden")?;
    }
    Ok(())
}

#[test_log::test(tokio::test)]
async fn it_lets_students_read_courses_they_are_enrolled_in() -> Result<()> {
    let dispatcher = campus()?;

    let quizzes = dispatcher
        .submit_command("list quizzes for course cs-101", &student_one())
        .await?;
    assert_eq!(quizzes.results_type, Some(ResultsType::AssessmentItems));
    assert_eq!(quizzes.info, "Found 1 quiz item(s) for course CS-101.");
    assert_eq!(quizzes.results[0]["title"], "Quiz 1");

    let all = dispatcher
        .submit_command("list assessments for course cs-101", &student_one())
        .await?;
    assert_eq!(ids(&all, "id"), vec![1, 2, 3, 4]);

    expect_kind(
        dispatcher
            .submit_command("list sessions for course cs-402", &student_one())
            .await,
        "forbidden",
    )
}

#[test_log::test(tokio::test)]
async fn it_counts_missing_attendance_records_as_absent() -> Result<()> {
    let dispatcher = campus()?;
    let cases = [
        ("show attendance for student 1 in course cs-101", 2, 1, 1, 50.0),
        ("show attendance for student 2 in course cs 101", 3, 1, 0, 75.0),
        ("show attendance for student 3 in course cs101", 0, 4, 0, 0.0),
    ];

    for (text, present, absent, late, percent) in cases {
        let envelope = dispatcher.submit_command(text, &admin()).await?;
        assert_eq!(envelope.results_type, Some(ResultsType::AttendanceSummary));
        let row = &envelope.results[0];
        assert_eq!(row["course_code"], "CS-101", "{text}");
        assert_eq!(row["total_sessions"], 4, "{text}");
        assert_eq!(
            (row["present"].clone(), row["absent"].clone(), row["late"].clone()),
            (json!(present), json!(absent), json!(late)),
            "{text}"
        );
        assert!(close(&row["percent_present"], percent), "{text}: {row}");
    }

    let mine = dispatcher
        .submit_command("show my attendance", &student_one())
        .await?;
    assert_eq!(ids(&mine, "course_id"), vec![1, 2]);
    assert!(close(&mine.results[1]["percent_present"], 100.0));

    let not_enrolled = dispatcher
        .submit_command("show attendance for student 4 in course cs-101", &admin())
        .await?;
    assert_eq!(
        not_enrolled.info,
        "Student 4 is not enrolled in course CS-101."
    );
    assert_eq!(not_enrolled.results, json!([]));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn it_summarizes_attendance_for_a_course() -> Result<()> {
    let dispatcher = campus()?;
    let envelope = dispatcher
        .submit_command("show attendance for course cs-101", &teacher_one())
        .await?;

    assert_eq!(envelope.results_type, Some(ResultsType::CourseAttendance));
    assert_eq!(ids(&envelope, "student_id"), vec![1, 2, 3]);
    let percents: Vec<f64> = envelope
        .results
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|row| row["percent_present"].as_f64())
        .collect();
    assert_eq!(percents, vec![50.0, 75.0, 0.0]);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn it_settles_fee_balances() -> Result<()> {
    let dispatcher = campus()?;

    let owing = dispatcher
        .submit_command("show fee status for student 1", &admin())
        .await?;
    assert_eq!(owing.results_type, Some(ResultsType::FeeStatus));
    assert!(close(&owing.results["paid"], 50_000.0));
    assert!(close(&owing.results["pending"], 51_000.0));
    assert_eq!(owing.results["transactions"].as_array().map(Vec::len), Some(4));

    let settled = dispatcher
        .submit_command("show my fees", &Principal::student(203, Some(2)))
        .await?;
    assert!(close(&settled.results["pending"], 0.0));

    let missing = dispatcher
        .submit_command("show fees for student 3", &admin())
        .await?;
    assert_eq!(missing.info, "No fee account found for student 3.");
    assert_eq!(missing.results, json!([]));

    expect_kind(
        dispatcher
            .submit_command("show fees for student 1", &Principal::hod(101))
            .await,
        "forbidden",
    )
}

#[test_log::test(tokio::test)]
async fn it_weighs_grade_components() -> Result<()> {
    let dispatcher = campus()?;
    let envelope = dispatcher
        .submit_command("show my results", &student_one())
        .await?;

    assert_eq!(envelope.parsed.intent, Intent::ShowStudentResult);
    assert_eq!(envelope.results_type, Some(ResultsType::GradeSummary));
    let first = &envelope.results[0];
    assert_eq!(first["course_code"], "CS-101");
    assert!(close(&first["internal_percent"], 80.0));
    assert!(close(&first["mid_percent"], 80.0));
    assert!(close(&first["final_percent"], 0.0));
    assert!(close(&first["total_out_of_100"], 48.0));
    assert!(close(&envelope.results[1]["total_out_of_100"], 27.0));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn it_answers_missing_targets_with_an_explanation() -> Result<()> {
    let dispatcher = campus()?;

    let malformed = dispatcher.submit_command("show student abc", &admin()).await?;
    assert_eq!(
        malformed.parsed.slots.get(SlotName::StudentId),
        Some(&SlotValue::Absent)
    );
    assert_eq!(
        malformed.info,
        "Intent recognized but no valid student id found in command."
    );
    assert_eq!(malformed.results_type, Some(ResultsType::Student));
    assert_eq!(malformed.results, json!([]));

    let missing = dispatcher.submit_command("show student 99", &admin()).await?;
    assert_eq!(missing.info, "No student found with id 99.");
    assert_eq!(missing.results, json!([]));

    let course = dispatcher
        .submit_command("show course cs-999", &student_one())
        .await?;
    assert_eq!(course.info, "No course found with code CS-999.");

    let result = dispatcher
        .submit_command("show result of student abc", &admin())
        .await?;
    assert_eq!(result.parsed.intent, Intent::ShowStudentResult);
    assert_eq!(
        result.info,
        "Intent recognized but no valid student id found in command."
    );
    assert_eq!(result.results_type, Some(ResultsType::GradeSummary));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn it_asks_for_a_code_when_only_the_keyword_was_said() -> Result<()> {
    let dispatcher = campus()?;

    let sessions = dispatcher
        .submit_command("list sessions for course", &admin())
        .await?;
    assert_eq!(sessions.parsed.intent, Intent::ListSessions);
    assert_eq!(
        sessions.info,
        "Intent recognized but no course code found in command."
    );
    assert_eq!(sessions.results_type, Some(ResultsType::Sessions));

    let quizzes = dispatcher
        .submit_command("list quizzes for course", &admin())
        .await?;
    assert_eq!(
        quizzes.info,
        "Intent recognized but no course code found in command."
    );

    let courses = dispatcher
        .submit_command("list courses in department", &admin())
        .await?;
    assert_eq!(
        courses.info,
        "Intent recognized but no department found in command."
    );
    assert_eq!(courses.results, json!([]));

    // Without a code a teacher has no course to own.
    expect_kind(
        dispatcher
            .submit_command("list sessions for course", &teacher_one())
            .await,
        "forbidden",
    )?;

    let mine = dispatcher
        .submit_command("show my attendance for course", &student_one())
        .await?;
    assert_eq!(ids(&mine, "course_id"), vec![1, 2]);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn it_reports_counts_and_the_dashboard_summary() -> Result<()> {
    let dispatcher = campus()?;

    let count = dispatcher.submit_command("how many students", &admin()).await?;
    assert_eq!(count.results, json!({ "entity": "students", "count": 4 }));

    let summary = dispatcher
        .submit_command("show statistics", &Principal::hod(101))
        .await?;
    assert_eq!(summary.results_type, Some(ResultsType::Summary));
    assert_eq!(summary.results["total_students"], 4);
    assert_eq!(summary.results["total_courses"], 5);
    assert_eq!(summary.results["total_teachers"], 2);
    assert_eq!(summary.results["total_enrollments"], 6);
    assert!(close(&summary.results["avg_gpa"], 3.3));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn it_reports_per_course_statistics() -> Result<()> {
    let dispatcher = campus()?;
    let envelope = dispatcher
        .submit_command("show course stats", &Principal::hod(101))
        .await?;

    assert_eq!(envelope.parsed.intent, Intent::ShowCourseStats);
    assert_eq!(envelope.results_type, Some(ResultsType::CourseStats));
    assert_eq!(envelope.info, "Statistics for 5 course(s).");
    // Ordered by course code.
    assert_eq!(ids(&envelope, "course_id"), vec![1, 2, 3, 5, 4]);

    let rows = &envelope.results;
    assert_eq!(rows[0]["course_code"], "CS-101");
    assert_eq!(rows[0]["total_enrollments"], 3);
    assert_eq!(rows[0]["avg_grade"], Value::Null);
    assert!(close(&rows[0]["pass_rate"], 0.0));

    assert_eq!(rows[1]["total_enrollments"], 1);
    assert!(close(&rows[1]["avg_grade"], 3.3));
    assert!(close(&rows[1]["pass_rate"], 100.0));

    // Nobody took the capstone yet.
    assert_eq!(rows[3]["course_code"], "CS-499");
    assert_eq!(rows[3]["total_enrollments"], 0);
    assert_eq!(rows[3]["pass_rate"], Value::Null);

    // Completed is not passed.
    assert_eq!(rows[4]["course_code"], "EE-201");
    assert!(close(&rows[4]["avg_grade"], 3.5));
    assert!(close(&rows[4]["pass_rate"], 0.0));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn it_reports_per_department_statistics() -> Result<()> {
    let dispatcher = campus()?;
    let envelope = dispatcher
        .submit_command("show department statistics", &admin())
        .await?;

    assert_eq!(envelope.results_type, Some(ResultsType::DepartmentStats));
    assert_eq!(envelope.info, "Statistics for 2 department(s).");

    let cs = &envelope.results[0];
    assert_eq!(cs["department"], "CS");
    assert_eq!(cs["total_students"], 3);
    assert_eq!(cs["total_courses"], 4);
    assert!(close(&cs["avg_gpa"], 3.4));

    let ee = &envelope.results[1];
    assert_eq!(ee["department"], "EE");
    assert_eq!((ee["total_students"].clone(), ee["total_courses"].clone()), (json!(1), json!(1)));
    assert!(close(&ee["avg_gpa"], 3.0));

    expect_kind(
        dispatcher
            .submit_command("show department stats", &teacher_one())
            .await,
        "forbidden",
    )
}

#[test_log::test(tokio::test)]
async fn it_filters_course_listings() -> Result<()> {
    let dispatcher = campus()?;

    let by_teacher = dispatcher
        .submit_command("list courses for teacher 2", &student_one())
        .await?;
    assert_eq!(ids(&by_teacher, "id"), vec![3, 4]);

    let by_department = dispatcher
        .submit_command("list courses in department ee", &admin())
        .await?;
    assert_eq!(ids(&by_department, "id"), vec![4]);

    let taught = dispatcher
        .submit_command("show my courses", &teacher_one())
        .await?;
    assert_eq!(ids(&taught, "id"), vec![1, 2]);

    let bad_teacher = dispatcher
        .submit_command("list courses for teacher abc", &admin())
        .await?;
    assert_eq!(
        bad_teacher.info,
        "Intent recognized but no valid teacher id found in command."
    );
    Ok(())
}
