use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{name} cannot be empty")]
    Empty { name: String },
    #[error("{name} must be positive")]
    NotPositive { name: String },
}

/// Checks that a string parameter is not empty or blank.
pub fn check_not_empty(value: &str, name: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Checks that a numeric parameter is strictly positive.
pub fn check_positive(value: i64, name: &str) -> Result<(), ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NotPositive {
            name: name.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn fails_on_empty() {
        assert_eq!(
            check_not_empty("", "name"),
            Err(ValidationError::Empty {
                name: "name".to_string()
            })
        );
        assert!(check_not_empty("   ", "name").is_err());
        assert!(check_not_empty("value", "name").is_ok());
    }

    #[test]
    fn fails_on_zero() {
        assert!(check_positive(0, "port").is_err());
    }

    #[test]
    fn fails_on_negative_values() {
        assert_eq!(
            check_positive(-1, "port"),
            Err(ValidationError::NotPositive {
                name: "port".to_string()
            })
        );
        assert!(check_positive(1, "port").is_ok());
    }
}
