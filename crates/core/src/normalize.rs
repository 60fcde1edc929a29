//! UTS-46 name normalization.
//!
//! Names are folded with `to_unicode`, STD3 ASCII rules enforced and non-transitional
//! processing (so `ß` stays `ß` instead of becoming `ss`). Two inputs that render the
//! same logical name converge to the same string before they are hashed.

use crate::error::{CoreError, Result};

/// Normalize a raw domain name.
///
/// The empty string is returned unchanged.
///
/// # Errors
///
/// Returns [`CoreError::Normalization`] if the mapping table disallows a code point
/// (for example `_` or a space under STD3 rules).
///
/// # Example
///
/// ```
/// use cronosid_core::normalize;
///
/// assert_eq!(normalize("Alice.CRO").unwrap(), "alice.cro");
/// assert!(normalize("bad_name.cro").is_err());
/// ```
pub fn normalize(name: &str) -> Result<String> {
    if name.is_empty() {
        return Ok(String::new());
    }

    let (normalized, outcome) = idna::Config::default()
        .use_std3_ascii_rules(true)
        .transitional_processing(false)
        .to_unicode(name);

    outcome.map_err(|errors| CoreError::Normalization {
        name: name.to_string(),
        reason: format!("{:?}", errors),
    })?;

    Ok(normalized)
}
