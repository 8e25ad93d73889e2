//! Deterministic bullet-to-sentence expansion.
//!
//! The template for a point is picked by hashing the point's text, so the same plan always
//! expands the same way.

use crate::foundation::math::fnv1a64_str;

const FOLLOW_UPS: [&str; 5] = [
    "This concept is fundamental to understanding the overall topic.",
    "It is worth exploring this idea in more detail.",
    "This plays a central role in the broader context.",
    "Understanding this builds a strong foundation for what follows.",
    "This connects directly to the main objectives of the lecture.",
];

/// Points longer than this are left alone.
pub const MAX_EXPANDABLE_WORDS: usize = 12;

/// Expand a terse bullet into a short sentence pair.
///
/// Text that already ends in sentence punctuation, or runs past [`MAX_EXPANDABLE_WORDS`]
/// words, is returned trimmed but otherwise unchanged.
pub fn expand_point(point: &str) -> String {
    let point = point.trim();
    if point.is_empty()
        || point.ends_with(['.', '!', '?'])
        || point.split_whitespace().count() > MAX_EXPANDABLE_WORDS
    {
        return point.to_owned();
    }
    let idx = (fnv1a64_str(point) % FOLLOW_UPS.len() as u64) as usize;
    let point = point.trim_end_matches([',', ';', ':']);
    format!("{point}. {}", FOLLOW_UPS[idx])
}

#[cfg(test)]
#[path = "../../tests/unit/plan/expand.rs"]
mod tests;
