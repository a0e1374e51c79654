//! Applying an [`Access`] mode to a parsed command.
//!
//! Resolution either returns the slots a handler should run with, or fails
//! closed. The order of checks is fixed:
//!
//! ```text
//! Denied            → Unauthorized
//! needs a profile?  → ProfileNotLinked when the link is missing
//! OwnStudent        → student_id := linked id   (other explicit id → Unauthorized)
//! OwnTeacher        → teacher_id := linked id   (other explicit id → Unauthorized)
//! CourseOwner       → course must exist and be taught by the linked teacher
//! CourseMember      → course must exist and list the linked student
//! ```
//!
//! An unknown course under `CourseOwner`/`CourseMember` is reported as
//! `Unauthorized`, the same as a foreign course, so the answer does not
//! reveal which course codes exist.

use acadexa_intent::{Intent, SlotName, SlotValue, Slots};

use crate::error::DispatchError;
use crate::policy::Access;
use crate::principal::{Principal, Role, role_of};
use crate::store::RecordStore;

/// Resolve `slots` for `principal` under `access`.
pub async fn resolve(
    intent: Intent,
    access: Access,
    principal: &Principal,
    mut slots: Slots,
    store: &dyn RecordStore,
) -> Result<Slots, DispatchError> {
    let role = role_of(principal);
    let unauthorized = || {
        tracing::warn!(%intent, %role, principal = principal.id, "command not authorized");
        DispatchError::Unauthorized { intent }
    };

    match access {
        Access::Global => Ok(slots),
        Access::Denied => Err(unauthorized()),
        Access::OwnStudent => {
            let own = linked_student(principal)?;
            if !claim(&mut slots, SlotName::StudentId, own) {
                return Err(unauthorized());
            }
            Ok(slots)
        }
        Access::OwnTeacher => {
            let own = linked_teacher(principal)?;
            if !claim(&mut slots, SlotName::TeacherId, own) {
                return Err(unauthorized());
            }
            Ok(slots)
        }
        Access::CourseOwner => {
            let own = linked_teacher(principal)?;
            let Some(code) = slots.text(SlotName::Course) else {
                return Err(unauthorized());
            };
            match store.course_by_code(code).await? {
                Some(course) if course.teacher_id == Some(own) => Ok(slots),
                _ => Err(unauthorized()),
            }
        }
        Access::CourseMember => {
            let own = linked_student(principal)?;
            let Some(code) = slots.text(SlotName::Course) else {
                return Err(unauthorized());
            };
            let Some(course) = store.course_by_code(code).await? else {
                return Err(unauthorized());
            };
            match store.enrollment(own, course.id).await? {
                Some(_) => Ok(slots),
                None => Err(unauthorized()),
            }
        }
    }
}

fn linked_student(principal: &Principal) -> Result<i64, DispatchError> {
    principal.student_id.ok_or_else(|| not_linked(principal))
}

fn linked_teacher(principal: &Principal) -> Result<i64, DispatchError> {
    principal.teacher_id.ok_or_else(|| not_linked(principal))
}

fn not_linked(principal: &Principal) -> DispatchError {
    let role: Role = role_of(principal);
    tracing::warn!(%role, principal = principal.id, "account has no linked profile");
    DispatchError::ProfileNotLinked { role }
}

/// Force `name` to `own`. Returns false, leaving `slots` untouched, when
/// the command names a different well-formed id. A missing or malformed id
/// is replaced.
fn claim(slots: &mut Slots, name: SlotName, own: i64) -> bool {
    if let Some(SlotValue::Integer(explicit)) = slots.get(name) {
        if *explicit != own {
            return false;
        }
    }
    slots.insert(name, own);
    true
}
