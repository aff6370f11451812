//! Character-class checks shared by the creation DTOs.

use validator::ValidationError;

/// Letters and spaces only, at least one character.
pub(crate) fn validate_name(value: &str) -> Result<(), ValidationError> {
    let valid = !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic() || c == ' ');
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("name_charset"))
    }
}

/// Letters, digits and spaces only, at least one character.
pub(crate) fn validate_address_line(value: &str) -> Result<(), ValidationError> {
    let valid = !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric() || c == ' ');
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("address_charset"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_accepts_letters_and_spaces() {
        assert!(validate_name("Ada Lovelace").is_ok());
        assert!(validate_name("Ada1").is_err());
        assert!(validate_name("").is_err());
        assert!(validate_name("O'Brien").is_err());
    }

    #[test]
    fn test_address_line_accepts_alphanumerics() {
        assert!(validate_address_line("221B Baker Street").is_ok());
        assert!(validate_address_line("Flat 2, Baker Street").is_err());
        assert!(validate_address_line("").is_err());
    }
}
