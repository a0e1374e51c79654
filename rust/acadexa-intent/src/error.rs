//! Error types for the intent parser.

use thiserror::Error;

use crate::intent::Intent;

/// Failures while building a rule table or naming an intent.
#[derive(Debug, Error)]
pub enum IntentError {
    /// A rule's pattern is not a valid regular expression.
    #[error("pattern for intent '{intent}' does not compile: {source}")]
    InvalidPattern {
        /// The intent the rule was registered for.
        intent: Intent,
        /// The compiler's complaint.
        #[source]
        source: regex::Error,
    },

    /// A string that is not the wire name of any intent.
    #[error("'{0}' is not a known intent name")]
    UnknownIntentName(String),

    /// [`crate::RuleTableBuilder::build`] was called with no rules.
    #[error("a rule table needs at least one rule")]
    EmptyTable,
}
