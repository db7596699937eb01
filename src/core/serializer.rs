use crate::domain::model::{
    Currency, PaymentPayload, ACCEPTED_VERSIONS, CODING_TYPE, PAYLOAD_FIELD_COUNT, QR_TYPE,
};
use crate::utils::error::{QrBillError, Result};

pub const LINE_SEPARATOR: &str = "\r\n";

fn header_error(field: &str, value: &str) -> QrBillError {
    QrBillError::InvalidHeader {
        field: field.to_string(),
        value: value.to_string(),
    }
}

/// Checks the constant header lines and the currency.
pub fn validate_header(payload: &PaymentPayload) -> Result<()> {
    if payload.qr_type != QR_TYPE {
        return Err(header_error("type", &payload.qr_type));
    }
    if !ACCEPTED_VERSIONS.contains(&payload.version.as_str()) {
        return Err(header_error("version", &payload.version));
    }
    if payload.coding != CODING_TYPE {
        return Err(header_error("coding", &payload.coding));
    }
    if !Currency::accepted().contains(&payload.currency.as_str()) {
        return Err(header_error("currency", &payload.currency));
    }
    Ok(())
}

/// Joins the 33 fields with CRLF, no trailing separator.
pub fn serialize(payload: &PaymentPayload) -> Result<String> {
    validate_header(payload)?;

    let fields = payload.fields();
    let text = fields.join(LINE_SEPARATOR);

    // 欄位內若含換行，解析時行數會不符
    let actual = text.replace(LINE_SEPARATOR, "\n").split(['\r', '\n']).count();
    if actual != PAYLOAD_FIELD_COUNT {
        return Err(QrBillError::LineCountMismatch {
            expected: PAYLOAD_FIELD_COUNT,
            actual,
        });
    }

    Ok(text)
}

impl PaymentPayload {
    pub fn to_wire(&self) -> Result<String> {
        serialize(self)
    }

    /// Reads a serialized payload back. Header rules are checked like on output.
    pub fn parse(text: &str) -> Result<Self> {
        let fields: Vec<&str> = text.split(LINE_SEPARATOR).collect();
        if fields.len() != PAYLOAD_FIELD_COUNT {
            return Err(QrBillError::LineCountMismatch {
                expected: PAYLOAD_FIELD_COUNT,
                actual: fields.len(),
            });
        }

        let payload = Self::from_fields(&fields);
        validate_header(&payload)?;
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> PaymentPayload {
        let mut payload = PaymentPayload {
            qr_type: "SPC".to_string(),
            version: "0200".to_string(),
            coding: "1".to_string(),
            account: "CH9300762011623852957".to_string(),
            amount: "50.00".to_string(),
            currency: "CHF".to_string(),
            reference_type: "NON".to_string(),
            ..Default::default()
        };
        payload.creditor.address_type = "S".to_string();
        payload.creditor.name = "Muster AG".to_string();
        payload.creditor.country = "CH".to_string();
        payload
    }

    #[test]
    fn test_serialize_exact_layout() {
        let text = serialize(&payload()).unwrap();
        assert!(text.starts_with("SPC\r\n0200\r\n1\r\nCH9300762011623852957\r\nS\r\nMuster AG\r\n"));
        assert!(!text.ends_with("\r\n"));

        let lines: Vec<&str> = text.split("\r\n").collect();
        assert_eq!(lines.len(), 33);
        let expected = payload();
        assert_eq!(lines, expected.fields());
        assert_eq!(lines[18], "50.00");
        assert_eq!(lines[19], "CHF");
        assert_eq!(lines[27], "NON");
        assert_eq!(lines[32], "");
    }

    #[test]
    fn test_all_empty_tail_still_counts_33_lines() {
        let text = serialize(&payload()).unwrap();
        assert!(text.ends_with("NON\r\n\r\n\r\n\r\n\r\n"));
    }

    #[test]
    fn test_header_validation() {
        let mut bad = payload();
        bad.qr_type = "BCD".to_string();
        assert!(matches!(serialize(&bad), Err(QrBillError::InvalidHeader { field, .. }) if field == "type"));

        let mut bad = payload();
        bad.version = "0100".to_string();
        assert!(matches!(serialize(&bad), Err(QrBillError::InvalidHeader { field, .. }) if field == "version"));

        let mut ok = payload();
        ok.version = "0210".to_string();
        assert!(serialize(&ok).is_ok());

        let mut bad = payload();
        bad.coding = "2".to_string();
        assert!(matches!(serialize(&bad), Err(QrBillError::InvalidHeader { field, .. }) if field == "coding"));

        let mut bad = payload();
        bad.currency = "USD".to_string();
        assert!(matches!(serialize(&bad), Err(QrBillError::InvalidHeader { field, .. }) if field == "currency"));
    }

    #[test]
    fn test_embedded_line_break_is_rejected() {
        let mut bad = payload();
        bad.message = "first\r\nsecond".to_string();
        assert!(matches!(
            serialize(&bad),
            Err(QrBillError::LineCountMismatch { expected: 33, actual: 34 })
        ));

        let mut bad = payload();
        bad.message = "first\nsecond".to_string();
        assert!(matches!(serialize(&bad), Err(QrBillError::LineCountMismatch { .. })));
    }

    #[test]
    fn test_parse_round_trip() {
        let original = payload();
        let parsed = PaymentPayload::parse(&original.to_wire().unwrap()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_parse_rejects_wrong_line_count() {
        assert!(matches!(
            PaymentPayload::parse("SPC\r\n0200\r\n1"),
            Err(QrBillError::LineCountMismatch { expected: 33, actual: 3 })
        ));
    }
}
