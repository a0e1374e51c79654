//! Counts and dashboard aggregates.
//!
//! Per-course and per-department figures are computed from plain store
//! reads. Averages skip missing values and are `None` when nothing is left
//! to average.

use std::collections::BTreeMap;

use serde::Serialize;

use super::percent;
use crate::envelope::{Reply, ResultsType};
use crate::error::DispatchError;
use crate::records::Enrollment;
use crate::store::{CourseFilter, RecordKind, RecordStore};

/// Enrollment status counted towards a course's pass rate.
const PASSED: &str = "passed";

#[derive(Debug, Serialize)]
struct Count {
    entity: &'static str,
    count: u64,
}

#[derive(Debug, Serialize)]
struct Summary {
    total_students: u64,
    total_courses: u64,
    total_teachers: u64,
    total_enrollments: u64,
    avg_gpa: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct CourseStats {
    course_id: i64,
    course_code: String,
    course_title: String,
    total_enrollments: usize,
    avg_grade: Option<f64>,
    /// Percentage, rounded to two places. `None` for a course nobody took.
    pass_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
struct DepartmentStats {
    department: String,
    total_students: usize,
    total_courses: usize,
    avg_gpa: Option<f64>,
}

fn mean(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}

fn pass_rate(enrollments: &[Enrollment]) -> Option<f64> {
    if enrollments.is_empty() {
        return None;
    }
    let passed = enrollments
        .iter()
        .filter(|enrollment| enrollment.status.as_deref() == Some(PASSED))
        .count();
    let rate = percent(passed as f64, enrollments.len() as f64);
    Some((rate * 100.0).round() / 100.0)
}

pub(super) async fn count(kind: RecordKind, store: &dyn RecordStore) -> Result<Reply, DispatchError> {
    let count = Count {
        entity: kind.as_str(),
        count: store.count(kind).await?,
    };
    let info = format!("There are {} {}.", count.count, count.entity);
    Ok(Reply::object(ResultsType::Count, info, &count)?)
}

pub(super) async fn summary(store: &dyn RecordStore) -> Result<Reply, DispatchError> {
    let summary = Summary {
        total_students: store.count(RecordKind::Students).await?,
        total_courses: store.count(RecordKind::Courses).await?,
        total_teachers: store.count(RecordKind::Teachers).await?,
        total_enrollments: store.count(RecordKind::Enrollments).await?,
        avg_gpa: store.average_gpa().await?,
    };
    let info = format!(
        "{} students, {} courses, {} teachers and {} enrollments on record.",
        summary.total_students,
        summary.total_courses,
        summary.total_teachers,
        summary.total_enrollments
    );
    Ok(Reply::object(ResultsType::Summary, info, &summary)?)
}

pub(super) async fn course_stats(store: &dyn RecordStore) -> Result<Reply, DispatchError> {
    let mut courses = store.courses(&CourseFilter::default()).await?;
    if courses.is_empty() {
        return Ok(Reply::empty(Some(ResultsType::CourseStats), "No courses found."));
    }
    courses.sort_by(|a, b| a.code.cmp(&b.code));

    let mut rows = Vec::with_capacity(courses.len());
    for course in courses {
        let enrollments = store.enrollments_for_course(course.id).await?;
        let grades: Vec<f64> = enrollments.iter().filter_map(|e| e.grade).collect();
        rows.push(CourseStats {
            course_id: course.id,
            course_code: course.code,
            course_title: course.title,
            total_enrollments: enrollments.len(),
            avg_grade: mean(&grades),
            pass_rate: pass_rate(&enrollments),
        });
    }

    let info = format!("Statistics for {} course(s).", rows.len());
    Ok(Reply::rows(ResultsType::CourseStats, info, &rows)?)
}

pub(super) async fn department_stats(store: &dyn RecordStore) -> Result<Reply, DispatchError> {
    let mut departments: BTreeMap<String, DepartmentStats> = BTreeMap::new();
    let mut gpas: BTreeMap<String, Vec<f64>> = BTreeMap::new();

    for student in store.students().await? {
        if student.department.is_empty() {
            continue;
        }
        departments
            .entry(student.department.clone())
            .or_default()
            .total_students += 1;
        if let Some(gpa) = student.gpa {
            gpas.entry(student.department).or_default().push(gpa);
        }
    }
    for course in store.courses(&CourseFilter::default()).await? {
        let Some(department) = course.department.filter(|d| !d.is_empty()) else {
            continue;
        };
        departments.entry(department).or_default().total_courses += 1;
    }

    if departments.is_empty() {
        return Ok(Reply::empty(
            Some(ResultsType::DepartmentStats),
            "No departments found.",
        ));
    }

    let rows: Vec<DepartmentStats> = departments
        .into_iter()
        .map(|(department, stats)| DepartmentStats {
            avg_gpa: gpas.remove(&department).and_then(|gpas| mean(&gpas)),
            department,
            ..stats
        })
        .collect();
    let info = format!("Statistics for {} department(s).", rows.len());
    Ok(Reply::rows(ResultsType::DepartmentStats, info, &rows)?)
}
