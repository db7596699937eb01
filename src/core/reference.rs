use crate::core::iban::mod97;
use crate::domain::model::PaymentReference;
use chrono::{Datelike, NaiveDate};

/// Institution codes reserved for accounts that require a 27-digit reference.
pub const INSTITUTION_RANGE: std::ops::RangeInclusive<u32> = 30000..=31999;

pub const QRR_LENGTH: usize = 27;
pub const SCOR_MAX_TOKEN: usize = 21;

const MOD10_TABLE: [[u8; 10]; 10] = [
    [0, 9, 4, 6, 8, 2, 7, 1, 3, 5],
    [9, 4, 6, 8, 2, 7, 1, 3, 5, 0],
    [4, 6, 8, 2, 7, 1, 3, 5, 0, 9],
    [6, 8, 2, 7, 1, 3, 5, 0, 9, 4],
    [8, 2, 7, 1, 3, 5, 0, 9, 4, 6],
    [2, 7, 1, 3, 5, 0, 9, 4, 6, 8],
    [7, 1, 3, 5, 0, 9, 4, 6, 8, 2],
    [1, 3, 5, 0, 9, 4, 6, 8, 2, 7],
    [3, 5, 0, 9, 4, 6, 8, 2, 7, 1],
    [5, 0, 9, 4, 6, 8, 2, 7, 1, 3],
];

/// Whether a validated identifier belongs to the institution range.
pub fn is_institution_range(iban: &str) -> bool {
    iban.get(4..9)
        .and_then(|code| code.parse::<u32>().ok())
        .map(|code| INSTITUTION_RANGE.contains(&code))
        .unwrap_or(false)
}

/// Picks the reference format for `iban` and computes it for the invoice.
pub fn generate_reference(iban: &str, invoice_number: &str, date: NaiveDate) -> PaymentReference {
    if is_institution_range(iban) {
        let reference = qrr_reference(invoice_number, date);
        tracing::debug!("Using QRR reference {}", reference);
        return PaymentReference::Qrr(reference);
    }

    match scor_reference(invoice_number) {
        Some(reference) => {
            tracing::debug!("Using SCOR reference {}", reference);
            PaymentReference::Scor(reference)
        }
        None => {
            tracing::warn!(
                "Could not derive a creditor reference from invoice number {:?}, using NON",
                invoice_number
            );
            PaymentReference::None
        }
    }
}

/// 26 digits of invoice number + date, left-padded, followed by a mod-10 check digit.
pub fn qrr_reference(invoice_number: &str, date: NaiveDate) -> String {
    let digits: String = invoice_number.chars().filter(char::is_ascii_digit).collect();
    let raw = format!(
        "{}{:04}{:02}{:02}",
        digits,
        date.year(),
        date.month(),
        date.day()
    );
    let base: String = format!("{:0>26}", raw).chars().take(QRR_LENGTH - 1).collect();

    // base 只含數字，check digit 必定存在
    let check = mod10_recursive(&base).unwrap_or(0);
    format!("{}{}", base, check)
}

/// Recursive mod-10 check digit. `None` if `digits` contains a non-digit.
pub fn mod10_recursive(digits: &str) -> Option<u8> {
    let mut carry = 0u8;
    for c in digits.chars() {
        let digit = c.to_digit(10)? as usize;
        carry = MOD10_TABLE[carry as usize][digit];
    }
    Some((10 - carry) % 10)
}

/// `RF` + two check digits + the cleaned invoice number, or `None` when the
/// invoice number has no usable characters.
pub fn scor_reference(invoice_number: &str) -> Option<String> {
    let token: String = invoice_number
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .take(SCOR_MAX_TOKEN)
        .collect();

    if token.is_empty() {
        return None;
    }

    let remainder = mod97(&format!("{}RF00", token))?;
    Some(format!("RF{:02}{}", 98 - remainder, token))
}
