//! Rules and ordered rule tables.
//!
//! A [`Rule`] binds an intent to a pattern and a slot extractor. A
//! [`RuleTable`] is an ordered list of rules; order is part of its meaning,
//! since the matcher takes the first rule that accepts the text.
//!
//! Patterns are written against normalized text and are anchored on both
//! ends when compiled, so a rule never fires on a substring:
//!
//! ```text
//! authored:  (?:list|show)\s+teachers
//! compiled:  ^(?:(?:list|show)\s+teachers)$
//! ```

use std::fmt;

use regex::{Captures, Regex};

use crate::error::IntentError;
use crate::intent::Intent;
use crate::slot::Slots;

/// Turns a successful match into slots. Must not fail.
pub type Extractor = fn(&Captures<'_>) -> Slots;

/// Extractor for rules that carry no parameters.
pub fn no_slots(_: &Captures<'_>) -> Slots {
    Slots::new()
}

/// One (intent, pattern, extractor) triple.
#[derive(Clone)]
pub struct Rule {
    intent: Intent,
    source: String,
    pattern: Regex,
    extract: Extractor,
}

impl Rule {
    /// Compile a rule. The pattern is anchored to the whole text.
    pub fn new(intent: Intent, pattern: &str, extract: Extractor) -> Result<Self, IntentError> {
        let anchored = format!("^(?:{pattern})$");
        let compiled =
            Regex::new(&anchored).map_err(|source| IntentError::InvalidPattern { intent, source })?;

        Ok(Self {
            intent,
            source: pattern.to_string(),
            pattern: compiled,
            extract,
        })
    }

    /// The intent this rule resolves to.
    pub fn intent(&self) -> Intent {
        self.intent
    }

    /// The pattern as authored, without the anchors.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Slots for `text` if this rule accepts it.
    pub fn apply(&self, text: &str) -> Option<Slots> {
        self.pattern
            .captures(text)
            .map(|caps| (self.extract)(&caps))
    }

    /// True if the whole of `text` matches.
    pub fn accepts(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("intent", &self.intent)
            .field("pattern", &self.source)
            .finish_non_exhaustive()
    }
}

/// An ordered, immutable list of rules.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Start an empty table.
    pub fn builder() -> RuleTableBuilder {
        RuleTableBuilder::default()
    }

    /// Rules in match order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Always false for a built table.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Collects rules in authored order and compiles them in one go.
#[derive(Default)]
pub struct RuleTableBuilder {
    pending: Vec<(Intent, String, Extractor)>,
}

impl RuleTableBuilder {
    /// Append a rule. Earlier rules win over later ones.
    pub fn rule(mut self, intent: Intent, pattern: impl Into<String>, extract: Extractor) -> Self {
        self.pending.push((intent, pattern.into(), extract));
        self
    }

    /// Compile every pattern. Fails on the first one that does not compile.
    pub fn build(self) -> Result<RuleTable, IntentError> {
        if self.pending.is_empty() {
            return Err(IntentError::EmptyTable);
        }

        let rules = self
            .pending
            .into_iter()
            .map(|(intent, pattern, extract)| Rule::new(intent, &pattern, extract))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RuleTable { rules })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract;
    use crate::slot::SlotName;

    #[test]
    fn patterns_are_anchored_at_both_ends() {
        let rule = Rule::new(Intent::ListTeachers, r"list\s+teachers", no_slots).unwrap();
        assert!(rule.accepts("list teachers"));
        assert!(!rule.accepts("please list teachers"));
        assert!(!rule.accepts("list teachers now"));
    }

    #[test]
    fn alternation_is_anchored_as_a_whole() {
        let rule = Rule::new(Intent::ShowSummary, r"summary|stats", no_slots).unwrap();
        assert!(rule.accepts("stats"));
        assert!(!rule.accepts("summary stats"));
    }

    #[test]
    fn extractor_runs_on_match() {
        let rule = Rule::new(
            Intent::DeleteStudent,
            r"delete\s+student\s+(?P<student_id>\d+)",
            |caps| Slots::new().with(SlotName::StudentId, extract::integer(caps, "student_id")),
        )
        .unwrap();

        let slots = rule.apply("delete student 42").unwrap();
        assert_eq!(slots.integer(SlotName::StudentId), Some(42));
        assert!(rule.apply("delete course 42").is_none());
    }

    #[test]
    fn builder_reports_the_offending_intent() {
        let err = RuleTable::builder()
            .rule(Intent::ListCourses, r"list\s+courses", no_slots)
            .rule(Intent::ShowCourse, r"show\s+course\s+(?P<course>", no_slots)
            .build()
            .unwrap_err();

        assert!(matches!(
            err,
            IntentError::InvalidPattern {
                intent: Intent::ShowCourse,
                ..
            }
        ));
    }

    #[test]
    fn empty_builder_is_rejected() {
        assert!(matches!(
            RuleTable::builder().build(),
            Err(IntentError::EmptyTable)
        ));
    }

    #[test]
    fn builder_preserves_authored_order() {
        let table = RuleTable::builder()
            .rule(Intent::ListCourses, r"list\s+courses\s+in\s+\w+", no_slots)
            .rule(Intent::ListCourses, r"list\s+courses", no_slots)
            .rule(Intent::CountCourses, r"count\s+courses", no_slots)
            .build()
            .unwrap();

        let sources: Vec<_> = table.rules().iter().map(Rule::source).collect();
        assert_eq!(
            sources,
            vec![r"list\s+courses\s+in\s+\w+", r"list\s+courses", r"count\s+courses"]
        );
    }
}
