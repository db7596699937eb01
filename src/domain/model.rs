use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of lines in a serialized payment payload.
pub const PAYLOAD_FIELD_COUNT: usize = 33;

pub const QR_TYPE: &str = "SPC";
pub const QR_VERSION: &str = "0200";
pub const ACCEPTED_VERSIONS: [&str; 2] = ["0200", "0210"];
pub const CODING_TYPE: &str = "1";
pub const ADDRESS_TYPE_STRUCTURED: &str = "S";
pub const DEFAULT_COUNTRY: &str = "CH";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Chf,
    Eur,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Chf => "CHF",
            Currency::Eur => "EUR",
        }
    }

    pub fn accepted() -> [&'static str; 2] {
        ["CHF", "EUR"]
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CHF" => Ok(Currency::Chf),
            "EUR" => Ok(Currency::Eur),
            other => Err(format!("unsupported currency: {}", other)),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Address split into the components the payload needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructuredAddress {
    pub street: String,
    pub building_number: String,
    pub postal_code: String,
    pub town: String,
}

impl StructuredAddress {
    pub fn has_locality(&self) -> bool {
        !self.postal_code.is_empty() || !self.town.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum PaymentReference {
    #[serde(rename = "NON")]
    None,
    #[serde(rename = "QRR")]
    Qrr(String),
    #[serde(rename = "SCOR")]
    Scor(String),
}

impl PaymentReference {
    /// Tag written to the reference type line.
    pub fn type_code(&self) -> &'static str {
        match self {
            PaymentReference::None => "NON",
            PaymentReference::Qrr(_) => "QRR",
            PaymentReference::Scor(_) => "SCOR",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            PaymentReference::None => "",
            PaymentReference::Qrr(value) | PaymentReference::Scor(value) => value,
        }
    }
}

/// Creditor settings as stored by the invoicing vendor. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditorSettings {
    pub name: Option<String>,
    pub address: Option<String>,
    pub account: Option<String>,
}

/// The slice of an invoice the payment code is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub number: String,
    pub amount: Decimal,
    pub currency: Currency,
    pub debtor_name: Option<String>,
    pub message: Option<String>,
    pub bill_information: Option<String>,
    pub issue_date: NaiveDate,
}

impl Invoice {
    pub fn new(number: impl Into<String>, amount: Decimal, issue_date: NaiveDate) -> Self {
        Self {
            number: number.into(),
            amount,
            currency: Currency::default(),
            debtor_name: None,
            message: None,
            bill_information: None,
            issue_date,
        }
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_debtor(mut self, name: impl Into<String>) -> Self {
        self.debtor_name = Some(name.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_bill_information(mut self, info: impl Into<String>) -> Self {
        self.bill_information = Some(info.into());
        self
    }
}

/// One party block (creditor, ultimate creditor or debtor) as seven lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PartyBlock {
    pub address_type: String,
    pub name: String,
    pub street: String,
    pub building_number: String,
    pub postal_code: String,
    pub town: String,
    pub country: String,
}

impl PartyBlock {
    fn lines(&self) -> [&str; 7] {
        [
            self.address_type.as_str(),
            self.name.as_str(),
            self.street.as_str(),
            self.building_number.as_str(),
            self.postal_code.as_str(),
            self.town.as_str(),
            self.country.as_str(),
        ]
    }

    fn from_lines(lines: &[&str]) -> Self {
        Self {
            address_type: lines[0].to_string(),
            name: lines[1].to_string(),
            street: lines[2].to_string(),
            building_number: lines[3].to_string(),
            postal_code: lines[4].to_string(),
            town: lines[5].to_string(),
            country: lines[6].to_string(),
        }
    }
}

/// The 33-field payment record, in wire order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaymentPayload {
    pub qr_type: String,
    pub version: String,
    pub coding: String,
    pub account: String,
    pub creditor: PartyBlock,
    pub ultimate_creditor: PartyBlock,
    pub amount: String,
    pub currency: String,
    pub debtor: PartyBlock,
    pub reference_type: String,
    pub reference: String,
    pub message: String,
    pub bill_information: String,
    pub alternative_scheme_1: String,
    pub alternative_scheme_2: String,
}

impl PaymentPayload {
    /// All fields in wire order.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields = Vec::with_capacity(PAYLOAD_FIELD_COUNT);
        fields.extend([
            self.qr_type.as_str(),
            self.version.as_str(),
            self.coding.as_str(),
            self.account.as_str(),
        ]);
        fields.extend(self.creditor.lines());
        fields.extend(self.ultimate_creditor.lines());
        fields.extend([self.amount.as_str(), self.currency.as_str()]);
        fields.extend(self.debtor.lines());
        fields.extend([
            self.reference_type.as_str(),
            self.reference.as_str(),
            self.message.as_str(),
            self.bill_information.as_str(),
            self.alternative_scheme_1.as_str(),
            self.alternative_scheme_2.as_str(),
        ]);
        fields
    }

    /// Inverse of [`PaymentPayload::fields`]. Callers check the length first.
    pub(crate) fn from_fields(fields: &[&str]) -> Self {
        debug_assert_eq!(fields.len(), PAYLOAD_FIELD_COUNT);
        Self {
            qr_type: fields[0].to_string(),
            version: fields[1].to_string(),
            coding: fields[2].to_string(),
            account: fields[3].to_string(),
            creditor: PartyBlock::from_lines(&fields[4..11]),
            ultimate_creditor: PartyBlock::from_lines(&fields[11..18]),
            amount: fields[18].to_string(),
            currency: fields[19].to_string(),
            debtor: PartyBlock::from_lines(&fields[20..27]),
            reference_type: fields[27].to_string(),
            reference: fields[28].to_string(),
            message: fields[29].to_string(),
            bill_information: fields[30].to_string(),
            alternative_scheme_1: fields[31].to_string(),
            alternative_scheme_2: fields[32].to_string(),
        }
    }
}

/// Square grid of dark/light modules produced by a matrix encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    side: usize,
    modules: Vec<bool>,
}

impl ModuleMatrix {
    /// Returns `None` unless `modules` holds exactly `side * side` entries.
    pub fn new(side: usize, modules: Vec<bool>) -> Option<Self> {
        if side == 0 || modules.len() != side * side {
            return None;
        }
        Some(Self { side, modules })
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        row < self.side && col < self.side && self.modules[row * self.side + col]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCorrection {
    Low,
    Medium,
    Quartile,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}
