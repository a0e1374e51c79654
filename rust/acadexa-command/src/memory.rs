use std::sync::Arc;

use acadexa_intent::canonical_course_code;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::records::{
    AssessmentCategory, AssessmentItem, AssessmentScore, AttendanceRecord, AttendanceSession,
    Course, Enrollment, FeeAccount, FeeTransaction, Student, Teacher,
};
use crate::store::{CourseFilter, RecordKind, RecordStore};

/// A complete set of records, as loaded from JSON.
///
/// Every table is optional in the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    /// Student profiles.
    pub students: Vec<Student>,
    /// Teacher profiles.
    pub teachers: Vec<Teacher>,
    /// Courses.
    pub courses: Vec<Course>,
    /// Enrollments.
    pub enrollments: Vec<Enrollment>,
    /// Attendance sessions.
    pub sessions: Vec<AttendanceSession>,
    /// Attendance marks.
    pub attendance: Vec<AttendanceRecord>,
    /// Fee accounts.
    pub fee_accounts: Vec<FeeAccount>,
    /// Fee ledger entries.
    pub fee_transactions: Vec<FeeTransaction>,
    /// Assessment items.
    pub assessment_items: Vec<AssessmentItem>,
    /// Assessment scores.
    pub assessment_scores: Vec<AssessmentScore>,
}

impl Dataset {
    /// Decode a dataset and check that its foreign keys resolve.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let dataset: Dataset = serde_json::from_str(json)?;
        dataset.validate()?;
        Ok(dataset)
    }

    fn validate(&self) -> Result<(), StoreError> {
        let dangling = |what: &str, id: i64| {
            Err(StoreError::Inconsistent(format!("{what} {id} refers to a missing row")))
        };

        for course in &self.courses {
            if let Some(teacher_id) = course.teacher_id {
                if !self.teachers.iter().any(|t| t.id == teacher_id) {
                    return dangling("course", course.id);
                }
            }
        }
        for enrollment in &self.enrollments {
            let student = self.students.iter().any(|s| s.id == enrollment.student_id);
            let course = self.courses.iter().any(|c| c.id == enrollment.course_id);
            if !(student && course) {
                return dangling("enrollment", enrollment.id);
            }
        }
        for session in &self.sessions {
            if !self.courses.iter().any(|c| c.id == session.course_id) {
                return dangling("session", session.id);
            }
        }
        for record in &self.attendance {
            let session = self.sessions.iter().any(|s| s.id == record.session_id);
            let enrollment = self.enrollments.iter().any(|e| e.id == record.enrollment_id);
            if !(session && enrollment) {
                return dangling("attendance record", record.id);
            }
        }
        for item in &self.assessment_items {
            if !self.courses.iter().any(|c| c.id == item.course_id) {
                return dangling("assessment item", item.id);
            }
        }
        for score in &self.assessment_scores {
            let item = self.assessment_items.iter().any(|i| i.id == score.assessment_item_id);
            let enrollment = self.enrollments.iter().any(|e| e.id == score.enrollment_id);
            if !(item && enrollment) {
                return dangling("assessment score", score.id);
            }
        }

        Ok(())
    }
}

/// A [`RecordStore`] that keeps a [`Dataset`] in memory and never persists.
#[derive(Clone, Default)]
pub struct MemoryRecordStore {
    dataset: Arc<RwLock<Dataset>>,
}

impl MemoryRecordStore {
    /// Serve `dataset` as is, without validation.
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(RwLock::new(dataset)),
        }
    }

    /// Decode and validate a dataset, see [`Dataset::from_json`].
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(Self::new(Dataset::from_json(json)?))
    }

    /// Apply an edit to the underlying dataset.
    pub async fn update<F>(&self, edit: F)
    where
        F: FnOnce(&mut Dataset),
    {
        let mut dataset = self.dataset.write().await;
        edit(&mut dataset);
    }
}

fn sorted_by_id<T>(rows: impl Iterator<Item = T>, id: impl Fn(&T) -> i64) -> Vec<T> {
    let mut rows: Vec<T> = rows.collect();
    rows.sort_by_key(|row| id(row));
    rows
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn student(&self, id: i64) -> Result<Option<Student>, StoreError> {
        let dataset = self.dataset.read().await;
        Ok(dataset.students.iter().find(|s| s.id == id).cloned())
    }

    async fn students(&self) -> Result<Vec<Student>, StoreError> {
        let dataset = self.dataset.read().await;
        Ok(sorted_by_id(dataset.students.iter().cloned(), |s| s.id))
    }

    async fn students_in_course(&self, course_id: i64) -> Result<Vec<Student>, StoreError> {
        let dataset = self.dataset.read().await;
        let enrolled = dataset
            .students
            .iter()
            .filter(|student| {
                dataset
                    .enrollments
                    .iter()
                    .any(|e| e.course_id == course_id && e.student_id == student.id)
            })
            .cloned();
        Ok(sorted_by_id(enrolled, |s| s.id))
    }

    async fn students_in_department(&self, department: &str) -> Result<Vec<Student>, StoreError> {
        let dataset = self.dataset.read().await;
        let matching = dataset
            .students
            .iter()
            .filter(|s| s.department.eq_ignore_ascii_case(department))
            .cloned();
        Ok(sorted_by_id(matching, |s| s.id))
    }

    async fn teacher(&self, id: i64) -> Result<Option<Teacher>, StoreError> {
        let dataset = self.dataset.read().await;
        Ok(dataset.teachers.iter().find(|t| t.id == id).cloned())
    }

    async fn teachers(&self) -> Result<Vec<Teacher>, StoreError> {
        let dataset = self.dataset.read().await;
        Ok(sorted_by_id(dataset.teachers.iter().cloned(), |t| t.id))
    }

    async fn course(&self, id: i64) -> Result<Option<Course>, StoreError> {
        let dataset = self.dataset.read().await;
        Ok(dataset.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn course_by_code(&self, code: &str) -> Result<Option<Course>, StoreError> {
        let wanted = canonical_course_code(code);
        let dataset = self.dataset.read().await;
        Ok(dataset
            .courses
            .iter()
            .find(|c| canonical_course_code(&c.code) == wanted)
            .cloned())
    }

    async fn courses(&self, filter: &CourseFilter) -> Result<Vec<Course>, StoreError> {
        let dataset = self.dataset.read().await;
        let matching = dataset.courses.iter().filter(|c| filter.accepts(c)).cloned();
        Ok(sorted_by_id(matching, |c| c.id))
    }

    async fn enrollment(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<Enrollment>, StoreError> {
        let dataset = self.dataset.read().await;
        Ok(dataset
            .enrollments
            .iter()
            .find(|e| e.student_id == student_id && e.course_id == course_id)
            .cloned())
    }

    async fn enrollments_for_student(
        &self,
        student_id: i64,
    ) -> Result<Vec<Enrollment>, StoreError> {
        let dataset = self.dataset.read().await;
        let matching = dataset
            .enrollments
            .iter()
            .filter(|e| e.student_id == student_id)
            .cloned();
        Ok(sorted_by_id(matching, |e| e.id))
    }

    async fn enrollments_for_course(&self, course_id: i64) -> Result<Vec<Enrollment>, StoreError> {
        let dataset = self.dataset.read().await;
        let matching = dataset
            .enrollments
            .iter()
            .filter(|e| e.course_id == course_id)
            .cloned();
        Ok(sorted_by_id(matching, |e| e.id))
    }

    async fn sessions_for_course(
        &self,
        course_id: i64,
    ) -> Result<Vec<AttendanceSession>, StoreError> {
        let dataset = self.dataset.read().await;
        let mut sessions: Vec<_> = dataset
            .sessions
            .iter()
            .filter(|s| s.course_id == course_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| {
            b.lecture_date
                .cmp(&a.lecture_date)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(sessions)
    }

    async fn attendance_for_enrollment(
        &self,
        enrollment_id: i64,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let dataset = self.dataset.read().await;
        let matching = dataset
            .attendance
            .iter()
            .filter(|r| r.enrollment_id == enrollment_id)
            .cloned();
        Ok(sorted_by_id(matching, |r| r.id))
    }

    async fn fee_account(&self, student_id: i64) -> Result<Option<FeeAccount>, StoreError> {
        let dataset = self.dataset.read().await;
        Ok(dataset
            .fee_accounts
            .iter()
            .find(|a| a.student_id == student_id)
            .cloned())
    }

    async fn fee_transactions(&self, student_id: i64) -> Result<Vec<FeeTransaction>, StoreError> {
        let dataset = self.dataset.read().await;
        let matching = dataset
            .fee_transactions
            .iter()
            .filter(|t| t.student_id == student_id)
            .cloned();
        Ok(sorted_by_id(matching, |t| t.id))
    }

    async fn assessment_items(
        &self,
        course_id: i64,
        category: Option<AssessmentCategory>,
    ) -> Result<Vec<AssessmentItem>, StoreError> {
        let dataset = self.dataset.read().await;
        let matching = dataset
            .assessment_items
            .iter()
            .filter(|i| i.course_id == course_id)
            .filter(|i| category.is_none_or(|c| i.category == c))
            .cloned();
        Ok(sorted_by_id(matching, |i| i.id))
    }

    async fn scores_for_enrollment(
        &self,
        enrollment_id: i64,
    ) -> Result<Vec<AssessmentScore>, StoreError> {
        let dataset = self.dataset.read().await;
        let matching = dataset
            .assessment_scores
            .iter()
            .filter(|s| s.enrollment_id == enrollment_id)
            .cloned();
        Ok(sorted_by_id(matching, |s| s.id))
    }

    async fn count(&self, kind: RecordKind) -> Result<u64, StoreError> {
        let dataset = self.dataset.read().await;
        let count = match kind {
            RecordKind::Students => dataset.students.len(),
            RecordKind::Teachers => dataset.teachers.len(),
            RecordKind::Courses => dataset.courses.len(),
            RecordKind::Enrollments => dataset.enrollments.len(),
        };
        Ok(count as u64)
    }

    async fn average_gpa(&self) -> Result<Option<f64>, StoreError> {
        let dataset = self.dataset.read().await;
        let gpas: Vec<f64> = dataset.students.iter().filter_map(|s| s.gpa).collect();
        if gpas.is_empty() {
            return Ok(None);
        }
        Ok(Some(gpas.iter().sum::<f64>() / gpas.len() as f64))
    }
}
