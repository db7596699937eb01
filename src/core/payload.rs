use crate::core::address::parse_address;
use crate::core::iban::clean_and_validate;
use crate::core::reference::generate_reference;
use crate::domain::model::{
    CreditorSettings, Invoice, PartyBlock, PaymentPayload, StructuredAddress,
    ADDRESS_TYPE_STRUCTURED, CODING_TYPE, DEFAULT_COUNTRY, QR_TYPE, QR_VERSION,
};
use crate::utils::error::{QrBillError, Result};
use rust_decimal::{Decimal, RoundingStrategy};

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub max_len: usize,
    pub required: bool,
}

const fn rule(name: &'static str, max_len: usize, required: bool) -> FieldRule {
    FieldRule {
        name,
        max_len,
        required,
    }
}

pub const ACCOUNT: FieldRule = rule("account", 21, true);
pub const ADDRESS_TYPE: FieldRule = rule("address type", 1, false);
pub const CREDITOR_NAME: FieldRule = rule("creditor name", 70, true);
pub const CREDITOR_COUNTRY: FieldRule = rule("creditor country", 2, true);
pub const DEBTOR_NAME: FieldRule = rule("debtor name", 70, false);
pub const DEBTOR_COUNTRY: FieldRule = rule("debtor country", 2, false);
pub const STREET: FieldRule = rule("street", 70, false);
pub const BUILDING_NUMBER: FieldRule = rule("building number", 16, false);
pub const POSTAL_CODE: FieldRule = rule("postal code", 16, false);
pub const TOWN: FieldRule = rule("town", 35, false);
pub const AMOUNT: FieldRule = rule("amount", 12, false);
pub const CURRENCY: FieldRule = rule("currency", 3, true);
pub const REFERENCE_TYPE: FieldRule = rule("reference type", 4, true);
pub const REFERENCE: FieldRule = rule("reference", 27, false);
pub const MESSAGE: FieldRule = rule("message", 140, false);
pub const BILL_INFORMATION: FieldRule = rule("bill information", 140, false);

/// Settings that shape the payload but do not come from the invoice.
#[derive(Debug, Clone)]
pub struct PayloadOptions {
    pub country_prefix: String,
    pub country: String,
    pub version: String,
}

impl Default for PayloadOptions {
    fn default() -> Self {
        Self {
            country_prefix: DEFAULT_COUNTRY.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            version: QR_VERSION.to_string(),
        }
    }
}

/// Replaces characters outside Latin-1 with `?`, cuts to the field length and
/// rejects blank required fields.
pub fn fit_field(value: &str, rule: FieldRule) -> Result<String> {
    let fitted: String = value
        .chars()
        .map(|c| if (c as u32) <= 0xFF { c } else { '?' })
        .take(rule.max_len)
        .collect();

    if rule.required && fitted.trim().is_empty() {
        return Err(QrBillError::EmptyRequiredField {
            field: rule.name.to_string(),
        });
    }

    Ok(fitted)
}

/// Two decimals, or empty for a zero amount (the payer then enters it).
pub fn format_amount(amount: Decimal) -> Result<String> {
    let max = Decimal::new(99_999_999_999, 2);

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(QrBillError::InvalidAmount {
            amount: amount.to_string(),
            reason: "amount must not be negative".to_string(),
        });
    }

    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded > max {
        return Err(QrBillError::InvalidAmount {
            amount: amount.to_string(),
            reason: format!("amount must not exceed {}", max),
        });
    }

    if rounded.is_zero() {
        return Ok(String::new());
    }

    Ok(format!("{:.2}", rounded))
}

fn required_setting<'a>(value: &'a Option<String>, setting: &str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| QrBillError::MissingRequiredSetting {
            setting: setting.to_string(),
        })
}

/// Like [`required_setting`], but a blank value counts as absent.
fn non_blank_setting<'a>(value: &'a Option<String>, setting: &str) -> Result<&'a str> {
    required_setting(value, setting)
        .map(str::trim)
        .and_then(|value| {
            if value.is_empty() {
                Err(QrBillError::MissingRequiredSetting {
                    setting: setting.to_string(),
                })
            } else {
                Ok(value)
            }
        })
}

fn address_lines(address: &StructuredAddress, block: &mut PartyBlock) -> Result<()> {
    block.street = fit_field(&address.street, STREET)?;
    block.building_number = fit_field(&address.building_number, BUILDING_NUMBER)?;
    block.postal_code = fit_field(&address.postal_code, POSTAL_CODE)?;
    block.town = fit_field(&address.town, TOWN)?;
    Ok(())
}

/// Assembles the payload for one invoice from already-fetched collaborator data.
pub fn build_payload(
    invoice: &Invoice,
    creditor: &CreditorSettings,
    debtor_address: Option<&str>,
    options: &PayloadOptions,
) -> Result<PaymentPayload> {
    let creditor_name = required_setting(&creditor.name, "name")?;
    let creditor_address = non_blank_setting(&creditor.address, "address")?;
    let raw_account = non_blank_setting(&creditor.account, "account")?;

    let account = clean_and_validate(raw_account, &options.country_prefix)?;
    let reference = generate_reference(&account, &invoice.number, invoice.issue_date);

    let mut payload = PaymentPayload {
        qr_type: QR_TYPE.to_string(),
        version: options.version.clone(),
        coding: CODING_TYPE.to_string(),
        account: fit_field(&account, ACCOUNT)?,
        ..Default::default()
    };

    let creditor_location = parse_address(creditor_address);
    // 結構化地址必須有城鎮
    if creditor_location.town.trim().is_empty() {
        return Err(QrBillError::EmptyRequiredField {
            field: "creditor town".to_string(),
        });
    }
    payload.creditor.address_type = fit_field(ADDRESS_TYPE_STRUCTURED, ADDRESS_TYPE)?;
    payload.creditor.name = fit_field(creditor_name, CREDITOR_NAME)?;
    address_lines(&creditor_location, &mut payload.creditor)?;
    payload.creditor.country = fit_field(&options.country, CREDITOR_COUNTRY)?;

    payload.amount = fit_field(&format_amount(invoice.amount)?, AMOUNT)?;
    payload.currency = fit_field(invoice.currency.as_str(), CURRENCY)?;

    let debtor_name = invoice
        .debtor_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());
    if let Some(name) = debtor_name {
        let address = parse_address(debtor_address.unwrap_or_default());
        if address.has_locality() {
            payload.debtor.address_type = fit_field(ADDRESS_TYPE_STRUCTURED, ADDRESS_TYPE)?;
            payload.debtor.name = fit_field(name, DEBTOR_NAME)?;
            address_lines(&address, &mut payload.debtor)?;
            payload.debtor.country = fit_field(&options.country, DEBTOR_COUNTRY)?;
        } else {
            tracing::debug!("Debtor {:?} has no usable address, leaving block empty", name);
        }
    }

    payload.reference_type = fit_field(reference.type_code(), REFERENCE_TYPE)?;
    payload.reference = fit_field(reference.value(), REFERENCE)?;
    payload.message = fit_field(invoice.message.as_deref().unwrap_or_default(), MESSAGE)?;
    payload.bill_information = fit_field(
        invoice.bill_information.as_deref().unwrap_or_default(),
        BILL_INFORMATION,
    )?;

    tracing::debug!(
        "Assembled payload for invoice {} ({} reference)",
        invoice.number,
        payload.reference_type
    );

    Ok(payload)
}
