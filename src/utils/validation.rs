use crate::utils::error::{QrBillError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_positive_length(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(QrBillError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Length must be a positive number of millimetres".to_string(),
        });
    }
    Ok(())
}

pub fn validate_less_than(field_name: &str, value: f64, limit: f64, limit_name: &str) -> Result<()> {
    if value >= limit {
        return Err(QrBillError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be smaller than {} ({})", limit_name, limit),
        });
    }
    Ok(())
}

pub fn validate_country_prefix(field_name: &str, prefix: &str) -> Result<()> {
    if prefix.len() != 2 || !prefix.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(QrBillError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: prefix.to_string(),
            reason: "Country prefix must be two uppercase letters".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(QrBillError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Allowed values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(QrBillError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive_length() {
        assert!(validate_positive_length("render.size_mm", 46.0).is_ok());
        assert!(validate_positive_length("render.size_mm", 0.0).is_err());
        assert!(validate_positive_length("render.size_mm", -1.0).is_err());
        assert!(validate_positive_length("render.size_mm", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_country_prefix() {
        assert!(validate_country_prefix("payload.country_prefix", "CH").is_ok());
        assert!(validate_country_prefix("payload.country_prefix", "ch").is_err());
        assert!(validate_country_prefix("payload.country_prefix", "CHE").is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("payload.version", "0200", &["0200", "0210"]).is_ok());
        assert!(validate_one_of("payload.version", "0100", &["0200", "0210"]).is_err());
    }
}
