//! Slots: the typed parameters extracted from a matched phrase.
//!
//! A slot is keyed by a [`SlotName`] from a closed set, so a handler asking
//! for `SlotName::StudentId` cannot misspell it. Values are a small tagged
//! union rather than free-form JSON:
//!
//! ```text
//! "add student ali raza roll 125"
//!   → { name: Text("ali raza"), roll: Integer(125) }
//!
//! "add student ali raza"
//!   → { name: Text("ali raza"), roll: Absent }
//! ```
//!
//! `Absent` is a present key with no usable value. Extractors produce it
//! for optional groups that did not participate in the match and for
//! numeric text that failed to coerce, so downstream code can tell "the
//! phrase had no id" apart from "this intent never takes an id".

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Every slot name any rule can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotName {
    /// A person's name as spoken.
    Name,
    /// Roll number given when registering a student.
    Roll,
    /// Student primary key.
    StudentId,
    /// Teacher primary key.
    TeacherId,
    /// Enrollment primary key.
    EnrollmentId,
    /// Course code in `LETTERS-DIGITS` form.
    Course,
    /// Course code naming the course a write targets.
    CourseCode,
    /// Upper-cased department code.
    Department,
    /// Course title.
    Title,
    /// Teacher name.
    Teacher,
    /// Assessment category (`quiz`, `assignment`, `mid`, `final`).
    Category,
    /// Attendance status word.
    Status,
    /// Grade points.
    Grade,
    /// Payment amount.
    Amount,
}

impl SlotName {
    /// The key this slot serializes under.
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotName::Name => "name",
            SlotName::Roll => "roll",
            SlotName::StudentId => "student_id",
            SlotName::TeacherId => "teacher_id",
            SlotName::EnrollmentId => "enrollment_id",
            SlotName::Course => "course",
            SlotName::CourseCode => "course_code",
            SlotName::Department => "department",
            SlotName::Title => "title",
            SlotName::Teacher => "teacher",
            SlotName::Category => "category",
            SlotName::Status => "status",
            SlotName::Grade => "grade",
            SlotName::Amount => "amount",
        }
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single extracted value.
///
/// Serializes untagged: integers and decimals as JSON numbers, text as a
/// string, `Absent` as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotValue {
    /// A whole number, usually an id.
    Integer(i64),
    /// A number with a fractional part.
    Decimal(f64),
    /// Free text or a code.
    Text(String),
    /// Key present, value missing or malformed.
    Absent,
}

impl SlotValue {
    /// True for [`SlotValue::Absent`].
    pub fn is_absent(&self) -> bool {
        matches!(self, SlotValue::Absent)
    }

    /// Integer view; decimals and text are `None`.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SlotValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Decimal view; integers widen.
    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            SlotValue::Decimal(value) => Some(*value),
            SlotValue::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    /// Text view.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SlotValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for SlotValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotValue::Integer(value) => write!(f, "{value}"),
            SlotValue::Decimal(value) => write!(f, "{value}"),
            SlotValue::Text(value) => write!(f, "{value:?}"),
            SlotValue::Absent => write!(f, "null"),
        }
    }
}

impl From<i64> for SlotValue {
    fn from(value: i64) -> Self {
        SlotValue::Integer(value)
    }
}

impl From<f64> for SlotValue {
    fn from(value: f64) -> Self {
        SlotValue::Decimal(value)
    }
}

impl From<&str> for SlotValue {
    fn from(value: &str) -> Self {
        SlotValue::Text(value.to_string())
    }
}

impl From<String> for SlotValue {
    fn from(value: String) -> Self {
        SlotValue::Text(value)
    }
}

impl<T> From<Option<T>> for SlotValue
where
    T: Into<SlotValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(SlotValue::Absent, Into::into)
    }
}

/// The slot mapping of one parse.
///
/// Ordered by slot name so serialization is stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slots(BTreeMap<SlotName, SlotValue>);

impl Slots {
    /// An empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: SlotName, value: impl Into<SlotValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set `name`, replacing any earlier value.
    pub fn insert(&mut self, name: SlotName, value: impl Into<SlotValue>) {
        self.0.insert(name, value.into());
    }

    /// The raw value under `name`.
    pub fn get(&self, name: SlotName) -> Option<&SlotValue> {
        self.0.get(&name)
    }

    /// True when the key exists, even if its value is `Absent`.
    pub fn contains(&self, name: SlotName) -> bool {
        self.0.contains_key(&name)
    }

    /// The integer under `name`, if it is one.
    pub fn integer(&self, name: SlotName) -> Option<i64> {
        self.get(name).and_then(SlotValue::as_integer)
    }

    /// The number under `name`, integers included.
    pub fn decimal(&self, name: SlotName) -> Option<f64> {
        self.get(name).and_then(SlotValue::as_decimal)
    }

    /// The text under `name`, if it is text.
    pub fn text(&self, name: SlotName) -> Option<&str> {
        self.get(name).and_then(SlotValue::as_text)
    }

    /// True when no key is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of keys, `Absent` ones included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Entries in slot-name order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotName, &SlotValue)> {
        self.0.iter().map(|(name, value)| (*name, value))
    }
}

impl fmt::Display for Slots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn absent_serializes_as_null() {
        let slots = Slots::new()
            .with(SlotName::Name, "ali raza")
            .with(SlotName::Roll, None::<i64>);
        assert_eq!(
            serde_json::to_value(&slots).unwrap(),
            serde_json::json!({ "name": "ali raza", "roll": null })
        );
    }

    #[test]
    fn typed_accessors_do_not_cross_types() {
        let slots = Slots::new()
            .with(SlotName::StudentId, 7i64)
            .with(SlotName::Course, "CS-101");
        assert_eq!(slots.integer(SlotName::StudentId), Some(7));
        assert_eq!(slots.text(SlotName::StudentId), None);
        assert_eq!(slots.text(SlotName::Course), Some("CS-101"));
        assert_eq!(slots.integer(SlotName::TeacherId), None);
    }

    #[test]
    fn decimal_view_widens_integers() {
        let slots = Slots::new()
            .with(SlotName::Amount, 5000i64)
            .with(SlotName::Grade, 3.5);
        assert_eq!(slots.decimal(SlotName::Amount), Some(5000.0));
        assert_eq!(slots.decimal(SlotName::Grade), Some(3.5));
    }

    #[test]
    fn contains_sees_absent_keys() {
        let slots = Slots::new().with(SlotName::Course, SlotValue::Absent);
        assert!(slots.contains(SlotName::Course));
        assert_eq!(slots.text(SlotName::Course), None);
    }

    #[test]
    fn display_is_readable() {
        let slots = Slots::new()
            .with(SlotName::StudentId, 3i64)
            .with(SlotName::Course, "CS-101");
        assert_eq!(slots.to_string(), "{student_id: 3, course: \"CS-101\"}");
    }
}
