//! Validation error types

use std::fmt;

/// Validation error for incoming request data
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Required field is absent from the request body
    Missing { field: &'static str },

    /// Field is present but empty
    Empty { field: &'static str },

    /// Invalid enum variant (e.g. an unsupported filter field)
    InvalidVariant { field: &'static str, value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "missing required field '{}'", field),
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::InvalidVariant { field, value } => {
                write!(f, "invalid {} value: '{}'", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
