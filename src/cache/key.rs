//! Key Validation Module
//!
//! Rules that decide whether a key may be handed to the backend.

use regex::Regex;

use crate::error::{CacheError, Result};

// == Validate Key ==
/// Checks that a key is non-empty and, if a pattern is given, matches it.
///
/// The pattern is applied with [`Regex::is_match`], so anchoring is up to the
/// pattern itself.
pub fn validate_key(key: &str, pattern: Option<&Regex>) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidKey("Key cannot be empty".to_string()));
    }

    if let Some(pattern) = pattern {
        if !pattern.is_match(key) {
            return Err(CacheError::InvalidKey(format!(
                "Key '{}' does not match pattern '{}'",
                key,
                pattern.as_str()
            )));
        }
    }

    Ok(())
}

// == Validate Keys ==
/// Validates every key in order and stops at the first invalid one.
pub fn validate_keys<I, K>(keys: I, pattern: Option<&Regex>) -> Result<()>
where
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
{
    keys.into_iter()
        .try_for_each(|key| validate_key(key.as_ref(), pattern))
}
