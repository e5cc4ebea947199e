use std::error::Error;
use std::fmt::{Display, Formatter};

/// Input validation failure for task/goal drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// Task subject is empty after trimming.
    EmptySubject,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptySubject => write!(f, "subject must not be empty"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(value: &str, error: ValidationError) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error);
    }
    Ok(())
}
