use async_trait::async_trait;

use crate::error::StoreError;
use crate::records::{
    AssessmentCategory, AssessmentItem, AssessmentScore, AttendanceRecord, AttendanceSession,
    Course, Enrollment, FeeAccount, FeeTransaction, Student, Teacher,
};

/// Filters for [`RecordStore::courses`]. Unset fields do not filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseFilter {
    /// Compared case-insensitively.
    pub department: Option<String>,
    /// Only courses taught by this teacher.
    pub teacher_id: Option<i64>,
}

impl CourseFilter {
    /// Courses of one department.
    pub fn department(department: impl Into<String>) -> Self {
        Self {
            department: Some(department.into()),
            ..Self::default()
        }
    }

    /// Courses taught by one teacher.
    pub fn teacher(teacher_id: i64) -> Self {
        Self {
            teacher_id: Some(teacher_id),
            ..Self::default()
        }
    }

    /// True if `course` passes every set field.
    pub fn accepts(&self, course: &Course) -> bool {
        let department = match (&self.department, &course.department) {
            (None, _) => true,
            (Some(wanted), Some(actual)) => wanted.eq_ignore_ascii_case(actual),
            (Some(_), None) => false,
        };
        let teacher = self
            .teacher_id
            .is_none_or(|wanted| course.teacher_id == Some(wanted));
        department && teacher
    }
}

/// Record families that can be counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// [`Student`] rows.
    Students,
    /// [`Teacher`] rows.
    Teachers,
    /// [`Course`] rows.
    Courses,
    /// [`Enrollment`] rows.
    Enrollments,
}

impl RecordKind {
    /// Plural noun used in replies.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Students => "students",
            RecordKind::Teachers => "teachers",
            RecordKind::Courses => "courses",
            RecordKind::Enrollments => "enrollments",
        }
    }
}

/// Read access to the student-records service.
///
/// Lists come back ordered by id, except sessions, which are newest first.
/// Single-row lookups return `Ok(None)` for a missing row; `Err` is reserved
/// for the backend itself failing.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// One student by id.
    async fn student(&self, id: i64) -> Result<Option<Student>, StoreError>;

    /// Every student.
    async fn students(&self) -> Result<Vec<Student>, StoreError>;

    /// Students with an enrollment in the course.
    async fn students_in_course(&self, course_id: i64) -> Result<Vec<Student>, StoreError>;

    /// Students of a department, compared case-insensitively.
    async fn students_in_department(&self, department: &str) -> Result<Vec<Student>, StoreError>;

    /// One teacher by id.
    async fn teacher(&self, id: i64) -> Result<Option<Teacher>, StoreError>;

    /// Every teacher.
    async fn teachers(&self) -> Result<Vec<Teacher>, StoreError>;

    /// One course by id.
    async fn course(&self, id: i64) -> Result<Option<Course>, StoreError>;

    /// Looks a course up by code. "cs 101", "cs101" and "CS-101" all find
    /// the course stored as "CS-101".
    async fn course_by_code(&self, code: &str) -> Result<Option<Course>, StoreError>;

    /// Courses accepted by `filter`.
    async fn courses(&self, filter: &CourseFilter) -> Result<Vec<Course>, StoreError>;

    /// The enrollment of one student in one course.
    async fn enrollment(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<Enrollment>, StoreError>;

    /// Enrollments held by a student.
    async fn enrollments_for_student(&self, student_id: i64)
    -> Result<Vec<Enrollment>, StoreError>;

    /// Enrollments in a course.
    async fn enrollments_for_course(&self, course_id: i64) -> Result<Vec<Enrollment>, StoreError>;

    /// Sessions of a course, newest first.
    async fn sessions_for_course(
        &self,
        course_id: i64,
    ) -> Result<Vec<AttendanceSession>, StoreError>;

    /// Attendance marks of one enrollment.
    async fn attendance_for_enrollment(
        &self,
        enrollment_id: i64,
    ) -> Result<Vec<AttendanceRecord>, StoreError>;

    /// A student's fee account.
    async fn fee_account(&self, student_id: i64) -> Result<Option<FeeAccount>, StoreError>;

    /// A student's fee ledger.
    async fn fee_transactions(&self, student_id: i64) -> Result<Vec<FeeTransaction>, StoreError>;

    /// Items of a course, all categories when `category` is `None`.
    async fn assessment_items(
        &self,
        course_id: i64,
        category: Option<AssessmentCategory>,
    ) -> Result<Vec<AssessmentItem>, StoreError>;

    /// Scores of one enrollment.
    async fn scores_for_enrollment(
        &self,
        enrollment_id: i64,
    ) -> Result<Vec<AssessmentScore>, StoreError>;

    /// Number of rows of one family.
    async fn count(&self, kind: RecordKind) -> Result<u64, StoreError>;

    /// Mean GPA over students that have one.
    async fn average_gpa(&self) -> Result<Option<f64>, StoreError>;
}
