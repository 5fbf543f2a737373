//! Brazilian postal codes (CEP).
//!
//! Stored as eight bare digits, displayed as `12345-678`.

use crate::error::CoreError;

/// Number of digits in a CEP.
pub const CEP_DIGITS: usize = 8;

/// Strip punctuation and require exactly eight digits.
pub fn normalize_cep(raw: &str) -> Result<String, CoreError> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() != CEP_DIGITS {
        return Err(CoreError::Validation(format!(
            "CEP must have {CEP_DIGITS} digits, got {}",
            digits.len()
        )));
    }
    Ok(digits)
}

/// Format an eight-digit CEP as `NNNNN-NNN`. Other input is returned as-is.
pub fn format_cep(cep: &str) -> String {
    if cep.len() == CEP_DIGITS && cep.chars().all(|c| c.is_ascii_digit()) {
        format!("{}-{}", &cep[..5], &cep[5..])
    } else {
        cep.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_punctuated_input() {
        assert_eq!(normalize_cep("01310-100").unwrap(), "01310100");
        assert_eq!(normalize_cep(" 01.310-100 ").unwrap(), "01310100");
    }

    #[test]
    fn rejects_wrong_digit_count() {
        assert!(normalize_cep("1234-567").is_err());
        assert!(normalize_cep("123456789").is_err());
        assert!(normalize_cep("").is_err());
    }

    #[test]
    fn formats_eight_digits() {
        assert_eq!(format_cep("01310100"), "01310-100");
    }

    #[test]
    fn leaves_unexpected_values_alone() {
        assert_eq!(format_cep("01310-100"), "01310-100");
        assert_eq!(format_cep("123"), "123");
    }
}
