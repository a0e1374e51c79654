//! Assessment listings and grade summaries.
//!
//! A grade summary weighs three components of each enrolled course:
//!
//! ```text
//!   internal (quizzes + assignments)  30%
//!   mid                               30%
//!   final                             40%
//! ```
//!
//! Each component is the obtained share of its maximum marks. An item the
//! student has no score for contributes zero, and a component with no items
//! scores zero.

use acadexa_intent::{SlotName, Slots};
use serde::Serialize;

use super::{id, percent};
use crate::envelope::{Reply, ResultsType};
use crate::error::DispatchError;
use crate::records::{AssessmentCategory, AssessmentItem, AssessmentScore};
use crate::store::RecordStore;

const INTERNAL_WEIGHT: f64 = 0.3;
const MID_WEIGHT: f64 = 0.3;
const FINAL_WEIGHT: f64 = 0.4;

pub(super) async fn list(slots: &Slots, store: &dyn RecordStore) -> Result<Reply, DispatchError> {
    let Some(code) = slots.text(SlotName::Course) else {
        return Ok(Reply::missing_course(ResultsType::AssessmentItems));
    };
    let Some(course) = store.course_by_code(code).await? else {
        return Ok(Reply::empty(
            Some(ResultsType::AssessmentItems),
            format!("No course found with code {code}."),
        ));
    };

    let category = slots
        .text(SlotName::Category)
        .and_then(|category| category.parse::<AssessmentCategory>().ok());
    let label = category.map_or("assessment", |category| category.as_str());

    let items = store.assessment_items(course.id, category).await?;
    if items.is_empty() {
        return Ok(Reply::empty(
            Some(ResultsType::AssessmentItems),
            format!("No {label} items found for course {}.", course.code),
        ));
    }
    let info = format!(
        "Found {} {label} item(s) for course {}.",
        items.len(),
        course.code
    );
    Ok(Reply::rows(ResultsType::AssessmentItems, info, &items)?)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct GradeSummary {
    course_id: i64,
    course_code: String,
    course_title: String,
    internal_percent: f64,
    mid_percent: f64,
    final_percent: f64,
    total_out_of_100: f64,
}

#[derive(Debug, Default, Clone, Copy)]
struct Component {
    obtained: f64,
    max: f64,
}

impl Component {
    fn percent(&self) -> f64 {
        percent(self.obtained, self.max)
    }
}

/// Obtained and maximum marks for (internal, mid, final).
fn components(
    items: &[AssessmentItem],
    scores: &[AssessmentScore],
) -> (Component, Component, Component) {
    let mut internal = Component::default();
    let mut mid = Component::default();
    let mut last = Component::default();

    for item in items {
        let obtained: f64 = scores
            .iter()
            .filter(|score| score.assessment_item_id == item.id)
            .map(|score| score.obtained_marks)
            .sum();
        let component = match item.category {
            category if category.is_internal() => &mut internal,
            AssessmentCategory::Mid => &mut mid,
            _ => &mut last,
        };
        component.obtained += obtained;
        component.max += item.max_marks;
    }
    (internal, mid, last)
}

pub(super) async fn grade_summary(
    slots: &Slots,
    store: &dyn RecordStore,
) -> Result<Reply, DispatchError> {
    let Some(student_id) = id(slots, SlotName::StudentId) else {
        return Ok(Reply::missing_id(ResultsType::GradeSummary, "student"));
    };
    if store.student(student_id).await?.is_none() {
        return Ok(Reply::empty(
            Some(ResultsType::GradeSummary),
            format!("No student found with id {student_id}."),
        ));
    }

    let mut rows = Vec::new();
    for enrollment in store.enrollments_for_student(student_id).await? {
        let Some(course) = store.course(enrollment.course_id).await? else {
            continue;
        };
        let items = store.assessment_items(course.id, None).await?;
        let scores = store.scores_for_enrollment(enrollment.id).await?;
        let (internal, mid, last) = components(&items, &scores);

        let total = INTERNAL_WEIGHT * internal.percent()
            + MID_WEIGHT * mid.percent()
            + FINAL_WEIGHT * last.percent();
        rows.push(GradeSummary {
            course_id: course.id,
            course_code: course.code,
            course_title: course.title,
            internal_percent: internal.percent(),
            mid_percent: mid.percent(),
            final_percent: last.percent(),
            total_out_of_100: total,
        });
    }
    if rows.is_empty() {
        return Ok(Reply::empty(
            Some(ResultsType::GradeSummary),
            format!("No enrollments found for student {student_id}."),
        ));
    }

    let info = format!(
        "Grade summary for student {student_id} across {} course(s).",
        rows.len()
    );
    Ok(Reply::rows(ResultsType::GradeSummary, info, &rows)?)
}
