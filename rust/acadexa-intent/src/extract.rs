//! Slot coercion helpers shared by rule extractors.
//!
//! Each helper reads one named capture group and turns it into a
//! [`SlotValue`]. None of them fail: a group that did not participate in
//! the match, numeric text that does not parse, or a code group that only
//! caught its own keyword ("list sessions for course") becomes
//! [`SlotValue::Absent`].

use regex::Captures;

use crate::slot::SlotValue;

/// Words that introduce a code and are never a code themselves.
const CODE_KEYWORDS: [&str; 4] = ["course", "courses", "department", "dept"];

fn group<'t>(caps: &Captures<'t>, name: &str) -> Option<&'t str> {
    caps.name(name).map(|m| m.as_str().trim()).filter(|s| !s.is_empty())
}

fn code_group<'t>(caps: &Captures<'t>, name: &str) -> Option<&'t str> {
    group(caps, name).filter(|raw| !CODE_KEYWORDS.contains(raw))
}

/// Integer slot. Anything that is not a plain decimal number is absent.
pub fn integer(caps: &Captures<'_>, name: &str) -> SlotValue {
    group(caps, name)
        .and_then(|raw| raw.parse::<i64>().ok())
        .into()
}

/// Integer slot, or `None` when the group did not take part in the match.
///
/// Used by rules whose id clause is itself optional, so the key is left out
/// of the mapping instead of being present as `null`.
pub fn optional_integer(caps: &Captures<'_>, name: &str) -> Option<SlotValue> {
    caps.name(name).map(|_| integer(caps, name))
}

/// Trimmed free text.
pub fn text(caps: &Captures<'_>, name: &str) -> SlotValue {
    group(caps, name).into()
}

/// Upper-cased code text, for department codes and the like.
pub fn upper(caps: &Captures<'_>, name: &str) -> SlotValue {
    code_group(caps, name).map(str::to_ascii_uppercase).into()
}

/// Course code in canonical form, see [`canonical_course_code`].
pub fn course(caps: &Captures<'_>, name: &str) -> SlotValue {
    code_group(caps, name).map(canonical_course_code).into()
}

/// Decimal spoken as `<whole> [point <fraction>]`.
///
/// Punctuation is gone after normalization, so "3.5" can only arrive as
/// "3 point 5" (or as "35", which is read as thirty-five).
pub fn decimal(caps: &Captures<'_>, whole: &str, fraction: &str) -> SlotValue {
    let Some(whole) = group(caps, whole) else {
        return SlotValue::Absent;
    };
    let literal = match group(caps, fraction) {
        Some(fraction) => format!("{whole}.{fraction}"),
        None => whole.to_string(),
    };
    literal.parse::<f64>().ok().into()
}

/// Assessment category folded to its stored spelling.
///
/// The generic words ("assessments", "assessment") mean "any category" and
/// yield an absent slot.
pub fn category(caps: &Captures<'_>, name: &str) -> SlotValue {
    let folded = group(caps, name).and_then(|raw| match raw {
        "quiz" | "quizzes" => Some("quiz"),
        "assignment" | "assignments" => Some("assignment"),
        "mid" | "mids" | "midterm" | "midterms" => Some("mid"),
        "final" | "finals" => Some("final"),
        _ => None,
    });
    folded.into()
}

/// Fold a spoken or typed course code into `LETTERS-DIGITS` form.
///
/// ```text
/// "cs 101" → "CS-101"
/// "cs101"  → "CS-101"
/// "CS-101" → "CS-101"
/// "ai lab" → "AI-LAB"
/// ```
///
/// Codes that are not letters followed by digits are upper-cased with inner
/// whitespace turned into hyphens.
pub fn canonical_course_code(raw: &str) -> String {
    let trimmed = raw.trim();
    let letters_end = trimmed
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(trimmed.len());
    let (letters, rest) = trimmed.split_at(letters_end);
    let digits = rest.strip_prefix([' ', '-']).unwrap_or(rest);

    if !letters.is_empty() && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return format!("{}-{}", letters.to_ascii_uppercase(), digits);
    }

    trimmed
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_ascii_uppercase()
}
