use crate::utils::error::{QrBillError, Result};
use regex::Regex;
use std::sync::LazyLock;

pub const IBAN_LENGTH: usize = 21;

// prefix(2) + check(2) + institution(5) + account(12)
static IBAN_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}[0-9]{2}[0-9]{5}[A-Z0-9]{12}$").expect("static regex"));

/// Cleans a user-entered account identifier and verifies its mod-97 checksum.
///
/// Whitespace and punctuation are dropped and letters uppercased. Trailing
/// garbage after a prefixed 21-character identifier is cut off with a warning.
pub fn clean_and_validate(raw: &str, country_prefix: &str) -> Result<String> {
    let mut cleaned: String = raw
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();

    if cleaned.starts_with(country_prefix) && cleaned.len() > IBAN_LENGTH {
        tracing::warn!(
            "Account identifier has {} characters, truncating to {}",
            cleaned.len(),
            IBAN_LENGTH
        );
        cleaned.truncate(IBAN_LENGTH);
    }

    if cleaned.len() != IBAN_LENGTH {
        return Err(QrBillError::InvalidLength {
            length: cleaned.len(),
        });
    }

    if !cleaned.starts_with(country_prefix) {
        return Err(QrBillError::InvalidPrefix {
            expected: country_prefix.to_string(),
        });
    }

    if !IBAN_FORMAT.is_match(&cleaned) {
        return Err(QrBillError::InvalidFormat { value: cleaned });
    }

    // 前四碼移到最後再計算
    let rearranged = format!("{}{}", &cleaned[4..], &cleaned[..4]);
    match mod97(&rearranged) {
        Some(1) => Ok(cleaned),
        _ => Err(QrBillError::InvalidChecksum { value: cleaned }),
    }
}

/// Streaming mod-97 over an alphanumeric string, letters expanded to two
/// digits (A=10 .. Z=35). Returns `None` on any other character.
pub(crate) fn mod97(input: &str) -> Option<u32> {
    let mut state: u32 = 0;
    for c in input.chars() {
        let value = c.to_digit(36)?;
        if value >= 10 {
            state = (state * 10 + value / 10) % 97;
            state = (state * 10 + value % 10) % 97;
        } else {
            state = (state * 10 + value) % 97;
        }
    }
    Some(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "CH9300762011623852957";

    #[test]
    fn test_valid_identifier_is_unchanged() {
        assert_eq!(clean_and_validate(VALID, "CH").unwrap(), VALID);
    }

    #[test]
    fn test_whitespace_and_case_are_normalised() {
        let cleaned = clean_and_validate(" ch93 0076 2011 6238 5295 7\n", "CH").unwrap();
        assert_eq!(cleaned, VALID);
        let cleaned = clean_and_validate("CH93-0076-2011-6238-5295-7", "CH").unwrap();
        assert_eq!(cleaned, VALID);
    }

    #[test]
    fn test_trailing_characters_are_truncated() {
        let cleaned = clean_and_validate("CH4431999123000889012B", "CH").unwrap();
        assert_eq!(cleaned, "CH4431999123000889012");
    }

    #[test]
    fn test_short_identifier_fails_with_length() {
        assert!(matches!(
            clean_and_validate("CH930076201162385295", "CH"),
            Err(QrBillError::InvalidLength { length: 20 })
        ));
    }

    #[test]
    fn test_long_identifier_without_prefix_is_not_truncated() {
        assert!(matches!(
            clean_and_validate("DE9300762011623852957XX", "CH"),
            Err(QrBillError::InvalidLength { length: 23 })
        ));
    }

    #[test]
    fn test_wrong_prefix() {
        assert!(matches!(
            clean_and_validate("DE9300762011623852957", "CH"),
            Err(QrBillError::InvalidPrefix { .. })
        ));
    }

    #[test]
    fn test_letters_in_institution_part_fail_format() {
        assert!(matches!(
            clean_and_validate("CH930076A011623852957", "CH"),
            Err(QrBillError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_any_single_digit_flip_breaks_checksum() {
        for (i, c) in VALID.char_indices().skip(2) {
            let digit = c.to_digit(10).unwrap();
            let flipped = char::from_digit((digit + 1) % 10, 10).unwrap();
            let mut candidate = VALID.to_string();
            candidate.replace_range(i..i + 1, &flipped.to_string());
            assert!(
                matches!(
                    clean_and_validate(&candidate, "CH"),
                    Err(QrBillError::InvalidChecksum { .. })
                ),
                "flipping position {} should fail",
                i
            );
        }
    }

    #[test]
    fn test_mod97() {
        assert_eq!(mod97("00762011623852957CH93"), Some(1));
        assert_eq!(mod97("A"), Some(10));
        assert_eq!(mod97("12-3"), None);
    }
}
