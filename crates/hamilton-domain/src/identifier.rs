//! Identifier normalization for case-insensitive identity lookup.

use caseless::default_case_fold_str;
use unicode_normalization::UnicodeNormalization;

use crate::provider::Provider;

/// Normalize an identifier for lookup under the given provider.
///
/// Applies NFKC, strips surrounding whitespace, then full Unicode case
/// folding for providers whose identifiers are case-insensitive by
/// convention (email, username, room). Phone and SSO identifiers keep
/// their case.
///
/// Pure and locale-independent: equal `(provider, raw)` inputs always
/// produce equal output, and the function is idempotent.
pub fn normalize_identifier(provider: Provider, raw: &str) -> String {
    let composed: String = raw.nfkc().collect();
    let trimmed = composed.trim();
    if provider.is_case_insensitive() {
        default_case_fold_str(trimmed)
    } else {
        trimmed.to_owned()
    }
}
