//! Name canonicalization and rejection rules
//!
//! Rules are applied in order: canonicalize, reject names of one character
//! or less, reject header echoes. Identical names from different rows are
//! all accepted; matching against existing students is the backend's job.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use super::row_normalizer::RowCandidate;
use crate::app::models::{ImportedStudent, SkipReason};
use crate::constants::header_echo::{GIVEN_NAME, SURNAME};
use crate::constants::{HEADER_ECHO_TOKENS, MIN_NAME_CHARS};

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Collapse whitespace runs to single spaces, trim and upper-case
pub fn canonicalize_name(name: &str) -> String {
    WHITESPACE_RUN
        .replace_all(name, " ")
        .trim()
        .to_uppercase()
}

/// Upper-case text with diacritics removed, for label comparisons
fn fold_accents(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Whether a canonical name is a column label rather than a person
pub fn is_header_echo(canonical_name: &str) -> bool {
    let folded = fold_accents(canonical_name);

    if HEADER_ECHO_TOKENS.contains(&folded.as_str()) {
        return true;
    }

    folded.contains(SURNAME) && folded.contains(GIVEN_NAME)
}

/// Apply the filter to one candidate, producing the emitted record
pub fn validate_candidate(
    candidate: RowCandidate,
    source_row: usize,
) -> Result<ImportedStudent, SkipReason> {
    let name = canonicalize_name(&candidate.name);

    if name.chars().count() < MIN_NAME_CHARS {
        return Err(SkipReason::TooShort);
    }

    if is_header_echo(&name) {
        return Err(SkipReason::HeaderEcho);
    }

    Ok(ImportedStudent::new(
        name,
        candidate.class_name.trim(),
        source_row,
    ))
}
