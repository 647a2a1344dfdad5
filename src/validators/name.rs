use super::ValidationError;

pub const MAX_NAME_LENGTH: usize = 100;

/// Longest department or position label.
pub const MAX_LABEL_LENGTH: usize = 100;

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::NameEmpty);
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong);
    }

    Ok(())
}

/// Optional free-text labels: absent is fine, present must fit.
pub fn validate_label(field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(value) if value.trim().chars().count() > MAX_LABEL_LENGTH => {
            Err(ValidationError::LabelTooLong(field))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(validate_name("John").is_ok());
        assert!(validate_name("John Doe").is_ok());
        assert!(validate_name("José García").is_ok());
        assert!(validate_name("名前").is_ok());
    }

    #[test]
    fn test_name_empty() {
        assert_eq!(validate_name("").unwrap_err(), ValidationError::NameEmpty);
        assert_eq!(validate_name("   ").unwrap_err(), ValidationError::NameEmpty);
    }

    #[test]
    fn test_name_too_long() {
        let long_name = "a".repeat(101);
        assert_eq!(validate_name(&long_name).unwrap_err(), ValidationError::NameTooLong);
    }

    #[test]
    fn test_labels() {
        assert!(validate_label("department", None).is_ok());
        assert!(validate_label("department", Some("Live Ops")).is_ok());
        assert_eq!(
            validate_label("position", Some(&"x".repeat(101))).unwrap_err(),
            ValidationError::LabelTooLong("position")
        );
    }
}
