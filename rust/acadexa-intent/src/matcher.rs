//! First-match resolution over a rule table.
//!
//! ```text
//! "list courses in department cs"
//!   list_courses  courses in (department)? <dept>   ✓  ← taken
//!   list_courses  (all)? courses (list)?             ✗
//! ```
//!
//! The matcher walks rules top to bottom and stops at the first pattern that
//! accepts the whole text. There is no scoring and no fallback search, which
//! keeps every outcome a pure function of the text and the table.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::intent::Intent;
use crate::normalize::normalize;
use crate::rule::RuleTable;
use crate::slot::Slots;
use crate::table::standard_table;

/// The outcome of matching one command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    /// The intent of the first accepting rule, or `unknown`.
    pub intent: Intent,
    /// Slots produced by that rule's extractor.
    pub slots: Slots,
}

impl ParseResult {
    /// The no-match result: `unknown` with no slots.
    pub fn unknown() -> Self {
        Self {
            intent: Intent::Unknown,
            slots: Slots::new(),
        }
    }

    /// True when no rule matched.
    pub fn is_unknown(&self) -> bool {
        self.intent.is_unknown()
    }
}

static STANDARD: LazyLock<IntentMatcher> = LazyLock::new(|| {
    IntentMatcher::new(standard_table().expect("built-in rule table compiles"))
});

/// Resolves text to an intent using an ordered [`RuleTable`].
#[derive(Debug, Clone)]
pub struct IntentMatcher {
    table: RuleTable,
}

impl IntentMatcher {
    /// A matcher over `table`.
    pub fn new(table: RuleTable) -> Self {
        Self { table }
    }

    /// The shared matcher over the built-in table, compiled on first use.
    pub fn standard() -> &'static IntentMatcher {
        &STANDARD
    }

    /// The table this matcher walks.
    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Match text that has already been through [`normalize`].
    pub fn match_normalized(&self, text: &str) -> ParseResult {
        for (index, rule) in self.table.rules().iter().enumerate() {
            if let Some(slots) = rule.apply(text) {
                tracing::trace!(index, intent = %rule.intent(), %slots, "rule matched");
                return ParseResult {
                    intent: rule.intent(),
                    slots,
                };
            }
        }

        tracing::trace!(text, "no rule matched");
        ParseResult::unknown()
    }

    /// Normalize raw text, then match it.
    pub fn parse(&self, raw: &str) -> ParseResult {
        self.match_normalized(&normalize(raw))
    }

    /// Every intent whose rule accepts `raw`, in table order.
    ///
    /// The first element, if any, is what [`IntentMatcher::parse`] returns.
    /// An intent appears once per accepting rule.
    pub fn explain(&self, raw: &str) -> Vec<Intent> {
        let text = normalize(raw);
        self.table
            .rules()
            .iter()
            .filter(|rule| rule.accepts(&text))
            .map(|rule| rule.intent())
            .collect()
    }
}

/// Parse raw command text with the built-in table.
pub fn parse_command(raw: &str) -> ParseResult {
    IntentMatcher::standard().parse(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::no_slots;
    use crate::slot::SlotName;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_matching_rule_wins() {
        let table = RuleTable::builder()
            .rule(Intent::CountCourses, r"courses", no_slots)
            .rule(Intent::ListCourses, r"courses", no_slots)
            .build()
            .unwrap();
        let matcher = IntentMatcher::new(table);

        assert_eq!(matcher.parse("Courses!").intent, Intent::CountCourses);
        assert_eq!(
            matcher.explain("courses"),
            vec![Intent::CountCourses, Intent::ListCourses]
        );
    }

    #[test]
    fn no_match_is_unknown_with_empty_slots() {
        let result = parse_command("open the door please");
        assert_eq!(result, ParseResult::unknown());
        assert!(result.slots.is_empty());
    }

    #[test]
    fn parse_normalizes_before_matching() {
        let a = parse_command("  DELETE   student 42 ");
        let b = parse_command("delete student 42");
        assert_eq!(a, b);
        assert_eq!(a.slots.integer(SlotName::StudentId), Some(42));
    }

    #[test]
    fn parse_result_wire_shape() {
        let result = parse_command("show enrollments for student 3");
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({
                "intent": "list_enrollments_for_student",
                "slots": { "student_id": 3 }
            })
        );
    }
}
