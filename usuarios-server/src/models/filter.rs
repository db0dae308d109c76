//! Listing filter field

use crate::models::ValidationError;

/// Column a listing is filtered on.
///
/// Parsed from the `filtro` query parameter; the closed set is what keeps
/// the column choice out of the SQL text a client can influence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Name,
    Email,
    Age,
}

impl FilterField {
    /// Parse a `filtro` query value.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "nombre" => Ok(Self::Name),
            "correo" => Ok(Self::Email),
            "edad" => Ok(Self::Age),
            _ => Err(ValidationError::InvalidVariant {
                field: "filtro",
                value: value.to_owned(),
            }),
        }
    }

    /// SQL expression the substring match runs against.
    ///
    /// `age` is an integer column; the match applies to its text rendering,
    /// keeping the same substring operator as the text fields.
    pub fn match_expr(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Age => "age::text",
        }
    }
}

impl Default for FilterField {
    fn default() -> Self {
        Self::Name
    }
}
