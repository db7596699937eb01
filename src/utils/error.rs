use thiserror::Error;

#[derive(Error, Debug)]
pub enum QrBillError {
    #[error("Invalid account identifier length: expected 21 characters, got {length}")]
    InvalidLength { length: usize },

    #[error("Account identifier must start with country prefix {expected}")]
    InvalidPrefix { expected: String },

    #[error("Account identifier has an invalid format: {value}")]
    InvalidFormat { value: String },

    #[error("Account identifier checksum is invalid: {value}")]
    InvalidChecksum { value: String },

    #[error("Missing required setting: {setting}")]
    MissingRequiredSetting { setting: String },

    #[error("Required payload field is empty: {field}")]
    EmptyRequiredField { field: String },

    #[error("Invalid amount {amount}: {reason}")]
    InvalidAmount { amount: String, reason: String },

    #[error("Invalid payload header {field}: {value}")]
    InvalidHeader { field: String, value: String },

    #[error("Payload line count mismatch: expected {expected}, got {actual}")]
    LineCountMismatch { expected: usize, actual: usize },

    #[error("Module matrix encoding unavailable: {reason}")]
    EncodingUnavailable { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Assembly,
    Encoding,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl QrBillError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            QrBillError::InvalidLength { .. }
            | QrBillError::InvalidPrefix { .. }
            | QrBillError::InvalidFormat { .. }
            | QrBillError::InvalidChecksum { .. }
            | QrBillError::InvalidAmount { .. } => ErrorCategory::Validation,
            QrBillError::MissingRequiredSetting { .. } | QrBillError::EmptyRequiredField { .. } => {
                ErrorCategory::Assembly
            }
            QrBillError::InvalidHeader { .. }
            | QrBillError::LineCountMismatch { .. }
            | QrBillError::EncodingUnavailable { .. } => ErrorCategory::Encoding,
            QrBillError::ConfigError { .. }
            | QrBillError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            QrBillError::IoError(_) | QrBillError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::Assembly => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Encoding => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            QrBillError::InvalidLength { .. }
            | QrBillError::InvalidPrefix { .. }
            | QrBillError::InvalidFormat { .. } => {
                "Check the account identifier in the creditor settings (21 characters, country prefix first)".to_string()
            }
            QrBillError::InvalidChecksum { .. } => {
                "The account identifier contains a typo; copy it again from the bank statement".to_string()
            }
            QrBillError::MissingRequiredSetting { setting } => {
                format!("Add `{}` to the [creditor] section of the configuration", setting)
            }
            QrBillError::EmptyRequiredField { field } => {
                format!("Provide a non-empty value for {}", field)
            }
            QrBillError::InvalidAmount { .. } => {
                "Use a positive amount below 1'000'000'000.00".to_string()
            }
            QrBillError::InvalidHeader { .. } | QrBillError::LineCountMismatch { .. } => {
                "Regenerate the payload; header constants or field contents are malformed".to_string()
            }
            QrBillError::EncodingUnavailable { .. } => {
                "Shorten the free-text fields so the payload fits in a code".to_string()
            }
            QrBillError::ConfigError { .. } | QrBillError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and try again".to_string()
            }
            QrBillError::IoError(_) => "Check file paths and permissions".to_string(),
            QrBillError::SerializationError(_) => "Report this as a bug".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Validation => format!("The payment data is invalid: {}", self),
            ErrorCategory::Assembly => format!("The payment code could not be assembled: {}", self),
            ErrorCategory::Encoding => format!("The payment code could not be encoded: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, QrBillError>;
