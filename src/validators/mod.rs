//! Input validation for team-member writes.

pub mod email;
pub mod name;

pub use email::validate_email;
pub use name::{validate_label, validate_name};

use crate::AccessError;
use crate::team::{CreateTeamMember, UpdateTeamMember};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmailEmpty,
    EmailTooLong,
    EmailInvalidFormat,
    NameEmpty,
    NameTooLong,
    LabelTooLong(&'static str),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmailEmpty => write!(f, "Email cannot be empty"),
            Self::EmailTooLong => write!(f, "Email is too long (max 254 characters)"),
            Self::EmailInvalidFormat => write!(f, "Invalid email format"),
            Self::NameEmpty => write!(f, "Name cannot be empty"),
            Self::NameTooLong => write!(f, "Name is too long (max 100 characters)"),
            Self::LabelTooLong(field) => write!(f, "{field} is too long (max 100 characters)"),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for AccessError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

pub fn validate_create(data: &CreateTeamMember) -> Result<(), ValidationError> {
    validate_email(&data.email)?;
    validate_name(&data.name)?;
    validate_label("department", data.department.as_deref())?;
    validate_label("position", data.position.as_deref())?;
    Ok(())
}

/// Only the fields being changed are checked.
pub fn validate_update(data: &UpdateTeamMember) -> Result<(), ValidationError> {
    if let Some(name) = &data.name {
        validate_name(name)?;
    }
    validate_label("department", data.department.as_deref())?;
    validate_label("position", data.position.as_deref())?;
    Ok(())
}
