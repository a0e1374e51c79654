//! Normalization: folding raw command text into the form rules match.
//!
//! Text arrives either typed or from a speech-to-text collaborator, so it
//! carries arbitrary casing, punctuation and spacing. Every rule in the
//! table is written against the normalized form only:
//!
//! ```text
//! "  Show my Attendance, for CS-101!! "  →  "show my attendance for cs-101"
//! ```
//!
//! Hyphens survive because course codes such as `CS-101` must stay a single
//! token. Every other non-alphanumeric character is dropped outright rather
//! than replaced with a space.

/// Normalize raw command text.
///
/// Lower-cases, keeps only ASCII letters, digits, hyphens and whitespace,
/// collapses whitespace runs to one space and trims the ends. The result is
/// a fixed point: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }

        if !(ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-') {
            continue;
        }

        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(ch);
    }

    out
}
