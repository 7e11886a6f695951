//! Slug codec for public routing keys.
//!
//! A slug is `<token>-<fragment>`: a normalized title followed by the first
//! eight characters of the owning record's identifier. The fragment is what
//! routing resolves on; the token exists for humans. All three operations
//! are total — bad input degrades to an empty token or an absent fragment,
//! never an error.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum length of the normalized title portion of a slug.
pub const MAX_TOKEN_LEN: usize = 60;

/// Number of record-id characters embedded in a slug.
pub const FRAGMENT_LEN: usize = 8;

static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9_\s-]").expect("Invalid disallowed-character pattern"));
static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s-]+").expect("Invalid separator pattern"));

/// Normalize a title into a URL-safe token.
///
/// Lowercases, strips everything outside `[a-z0-9_]`, whitespace, and
/// hyphens (non-ASCII letters are dropped, not transliterated), collapses
/// separator runs into single hyphens, trims edge hyphens, and truncates to
/// [`MAX_TOKEN_LEN`]. May return an empty string when nothing survives.
/// Idempotent: normalizing an already-normalized token is a no-op.
pub fn normalize(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = DISALLOWED.replace_all(lowered.trim(), "");
    let mut token = SEPARATORS
        .replace_all(&stripped, "-")
        .trim_matches('-')
        .to_string();
    token.truncate(MAX_TOKEN_LEN);
    // Truncation can cut right after a separator; the token never carries
    // a trailing hyphen.
    if token.ends_with('-') {
        token.pop();
    }
    token
}

/// Build the public slug for a record.
///
/// Deterministic for a given (title, record id) pair. Two records can
/// collide only when their titles normalize identically and their ids share
/// an eight-character prefix; ids come from a large identifier space, so
/// this is accepted rather than worked around.
pub fn build_slug(title: &str, record_id: &str) -> String {
    let token = normalize(title);
    let fragment: String = record_id.chars().take(FRAGMENT_LEN).collect();
    format!("{}-{}", token, fragment)
}

/// Recover the record-id fragment from a slug, if one is present.
///
/// Takes the last hyphen-delimited segment when it is at least
/// [`FRAGMENT_LEN`] ASCII alphanumerics. This is a heuristic: a token whose
/// own tail looks like a fragment will match, and ids longer than eight
/// characters are only recovered as their embedded prefix. Callers fall
/// back to another resolution strategy on `None`.
pub fn extract_fragment(slug: &str) -> Option<&str> {
    let last = slug.rsplit('-').next()?;
    if last.len() >= FRAGMENT_LEN && last.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(last)
    } else {
        None
    }
}
