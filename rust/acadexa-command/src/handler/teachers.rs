use acadexa_intent::{SlotName, Slots};

use super::id;
use crate::envelope::{Reply, ResultsType};
use crate::error::DispatchError;
use crate::store::RecordStore;

pub(super) async fn list(store: &dyn RecordStore) -> Result<Reply, DispatchError> {
    let teachers = store.teachers().await?;
    if teachers.is_empty() {
        return Ok(Reply::empty(Some(ResultsType::Teachers), "No teachers found."));
    }
    let info = format!("Found {} teacher(s).", teachers.len());
    Ok(Reply::rows(ResultsType::Teachers, info, &teachers)?)
}

pub(super) async fn show(slots: &Slots, store: &dyn RecordStore) -> Result<Reply, DispatchError> {
    let Some(teacher_id) = id(slots, SlotName::TeacherId) else {
        return Ok(Reply::missing_id(ResultsType::Teacher, "teacher"));
    };
    let Some(teacher) = store.teacher(teacher_id).await? else {
        return Ok(Reply::empty(
            Some(ResultsType::Teacher),
            format!("No teacher found with id {teacher_id}."),
        ));
    };
    let info = format!("Teacher {teacher_id}: {}.", teacher.name);
    Ok(Reply::object(ResultsType::Teacher, info, &teacher)?)
}
