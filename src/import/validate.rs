//! Submission validation
//!
//! Explicit validation functions invoked at the pipeline boundary (job
//! submission), returning the full list of field errors rather than failing
//! on the first.

/// A single invalid field on a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validates an import submission before any processing starts
pub fn validate_submission(display_name: &str) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if display_name.trim().is_empty() {
        errors.push(FieldError::new("display_name", "can't be blank"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
