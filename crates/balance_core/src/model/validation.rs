//! Form validators gating task and resource creation.
//!
//! Both validators are pure: no state, no side effects.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reason a task or resource form was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Title is empty or whitespace-only.
    EmptyTitle,
    /// `from_time` is not strictly before `to_time`.
    InvalidTimeRange { from_time: String, to_time: String },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::InvalidTimeRange { from_time, to_time } => write!(
                f,
                "start time `{from_time}` must be before end time `{to_time}`"
            ),
        }
    }
}

impl Error for ValidationError {}

/// Checks task form fields. The title is checked before the time range.
///
/// Times compare as strings, which orders zero-padded `HH:MM` values
/// correctly within one day.
pub fn validate_task_fields(
    title: &str,
    from_time: &str,
    to_time: &str,
) -> Result<(), ValidationError> {
    validate_title(title)?;
    if from_time >= to_time {
        return Err(ValidationError::InvalidTimeRange {
            from_time: from_time.to_string(),
            to_time: to_time.to_string(),
        });
    }
    Ok(())
}

/// Checks resource form fields. Only the title is constrained.
pub fn validate_resource_fields(title: &str) -> Result<(), ValidationError> {
    validate_title(title)
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}
