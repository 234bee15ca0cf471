use std::borrow::Cow;

use validator::ValidationError;

/// Rejects empty or whitespace-only text.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some(Cow::from("This field is required."));
        return Err(error);
    }

    Ok(())
}
