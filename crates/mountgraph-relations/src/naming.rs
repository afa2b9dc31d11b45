//! String helpers for alias derivation: depluralizing, camel-casing,
//! case-insensitive affix handling and dotted-path diffing.

use crate::error::RelationError;
use convert_case::{Case, Casing};

/// Naive English singular form of a property name.
///
/// `policies` → `policy`; otherwise a trailing `s` is dropped, which covers
/// `statuses` → `status` and `pods` → `pod` but also turns `boxes` into
/// `boxe`. Words without a trailing `s` come back unchanged.
pub fn depluralize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{stem}y");
    }
    match word.strip_suffix('s') {
        Some(stem) => stem.to_string(),
        None => word.to_string(),
    }
}

/// Lower camel-case identifier; dots count as word boundaries.
pub fn to_camel_identifier(text: &str) -> String {
    text.replace('.', " ").to_case(Case::Camel)
}

pub fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len() && text.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

pub fn ends_with_ignore_case(text: &str, suffix: &str) -> bool {
    text.len() >= suffix.len()
        && text.as_bytes()[text.len() - suffix.len()..].eq_ignore_ascii_case(suffix.as_bytes())
}

/// Removes `affix` from the front of `text`, or failing that from the back.
/// Returns `text` unchanged when it carries neither.
pub fn strip_affix_ignore_case<'t>(text: &'t str, affix: &str) -> &'t str {
    if starts_with_ignore_case(text, affix) {
        &text[affix.len()..]
    } else if ends_with_ignore_case(text, affix) {
        &text[..text.len() - affix.len()]
    } else {
        text
    }
}

/// Distinguishing slice of each dotted path.
///
/// Segments from the first index at which the paths disagree through the
/// last such index (inclusive) are kept and re-joined with dots; a path too
/// short to reach an index contributes nothing for it. A path that runs out
/// before the first disagreement (`a` against `a.b`) is represented by its
/// last segment. Paths that never disagree come back whole.
pub fn path_diff(paths: &[String]) -> Result<Vec<String>, RelationError> {
    if paths.len() < 2 {
        return Err(RelationError::DegeneratePathDiff { count: paths.len() });
    }

    let segments: Vec<Vec<&str>> = paths.iter().map(|p| p.split('.').collect()).collect();
    let width = segments.iter().map(Vec::len).max().unwrap_or(0);
    let disagree = |index: usize| {
        let head = segments[0].get(index);
        segments.iter().any(|s| s.get(index) != head)
    };

    let (Some(first), Some(last)) = ((0..width).find(|&i| disagree(i)), (0..width).rev().find(|&i| disagree(i)))
    else {
        return Ok(paths.to_vec());
    };

    Ok(segments
        .iter()
        .map(|s| {
            if first >= s.len() {
                return s.last().copied().unwrap_or_default().to_string();
            }
            s[first..(last + 1).min(s.len())].join(".")
        })
        .collect())
}
