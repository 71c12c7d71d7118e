//! Input validation for KREG
//!
//! Container and network names are handed straight to the runtime CLI as
//! argv entries, so they are checked against docker's own naming rule
//! before any process is spawned.

use crate::error::ValidationError;

/// Minimum length for container and network names
pub const MIN_NAME_LENGTH: usize = 2;

/// Maximum length for container and network names
pub const MAX_NAME_LENGTH: usize = 128;

/// Validate a container or network name.
///
/// Names must:
/// - Be 2-128 characters long
/// - Start with an ASCII letter or digit
/// - Contain only ASCII alphanumerics, underscores, periods, and hyphens
///
/// # Examples
///
/// ```
/// use kreg_core::validation::validate_name;
///
/// assert!(validate_name("docker-image-reg").is_ok());
/// assert!(validate_name("kind").is_ok());
/// assert!(validate_name("reg_1.local").is_ok());
/// assert!(validate_name("").is_err());
/// assert!(validate_name("a").is_err());
/// assert!(validate_name("-reg").is_err());
/// assert!(validate_name("reg; rm -rf /").is_err());
/// ```
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.contains('\0') {
        return Err(ValidationError::NullByteInInput);
    }

    if name.len() < MIN_NAME_LENGTH || name.len() > MAX_NAME_LENGTH {
        return Err(ValidationError::InvalidNameLength(name.len()));
    }

    let mut chars = name.chars();
    let starts_ok = chars.next().is_some_and(|c| c.is_ascii_alphanumeric());

    if !starts_ok
        || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-')
    {
        return Err(ValidationError::InvalidNameCharacters);
    }

    Ok(())
}

/// Validate that a string is not empty.
pub fn validate_not_empty(input: &str) -> Result<(), ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    Ok(())
}
