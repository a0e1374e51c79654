//! # ACADEXA intent parser
//!
//! Turns a short free-text command ("show my attendance for CS-101") into a
//! canonical [`Intent`] plus typed [`Slots`]. Matching is deterministic: an
//! ordered [`RuleTable`] of anchored regular expressions is walked top to
//! bottom and the first rule that accepts the normalized text wins.
//!
//! ```text
//! raw text ─► normalize ─► rule 1 ─► rule 2 ─► … ─► rule n ─► unknown
//!                            │         │              │
//!                            └─────────┴──── first ✓ ─┴─► ParseResult { intent, slots }
//! ```
//!
//! ```rust
//! use acadexa_intent::{parse_command, Intent, SlotName};
//!
//! let parsed = parse_command("Delete student 42");
//! assert_eq!(parsed.intent, Intent::DeleteStudent);
//! assert_eq!(parsed.slots.integer(SlotName::StudentId), Some(42));
//! ```
//!
//! The built-in table is compiled once and shared; callers that need a
//! different vocabulary can assemble their own with [`RuleTable::builder`]
//! and the coercion helpers in [`extract`].

#![warn(missing_docs)]

mod error;
pub use error::*;

mod intent;
pub use intent::*;

mod normalize;
pub use normalize::*;

mod slot;
pub use slot::*;

pub mod extract;
pub use extract::canonical_course_code;

mod rule;
pub use rule::*;

mod table;
pub use table::*;

mod matcher;
pub use matcher::*;
