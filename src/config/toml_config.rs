use crate::core::payload::PayloadOptions;
use crate::core::renderer::RenderLayout;
use crate::core::{CreditorSettings, CreditorSettingsProvider, DebtorLookup};
use crate::domain::model::{ACCEPTED_VERSIONS, DEFAULT_COUNTRY, QR_VERSION};
use crate::utils::error::{QrBillError, Result};
use crate::utils::validation::{
    validate_country_prefix, validate_less_than, validate_non_empty_string, validate_one_of,
    validate_positive_length, Validate,
};
use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("static regex"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub creditor: Option<CreditorConfig>,
    #[serde(default)]
    pub debtors: Vec<DebtorConfig>,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub payload: PayloadConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreditorConfig {
    pub name: Option<String>,
    pub address: Option<String>,
    pub account: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtorConfig {
    pub name: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_size")]
    pub size_mm: f64,
    #[serde(default = "default_quiet_zone")]
    pub quiet_zone_mm: f64,
    #[serde(default = "default_emblem")]
    pub emblem_mm: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadConfig {
    #[serde(default = "default_country")]
    pub country_prefix: String,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_size() -> f64 {
    46.0
}

fn default_quiet_zone() -> f64 {
    5.0
}

fn default_emblem() -> f64 {
    7.0
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

fn default_version() -> String {
    QR_VERSION.to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size_mm: default_size(),
            quiet_zone_mm: default_quiet_zone(),
            emblem_mm: default_emblem(),
        }
    }
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self {
            country_prefix: default_country(),
            country: default_country(),
            version: default_version(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QrBillError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| QrBillError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CREDITOR_ACCOUNT})
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        let render = &self.render;
        validate_positive_length("render.size_mm", render.size_mm)?;
        if !(render.quiet_zone_mm.is_finite() && render.quiet_zone_mm >= 0.0) {
            return Err(QrBillError::InvalidConfigValueError {
                field: "render.quiet_zone_mm".to_string(),
                value: render.quiet_zone_mm.to_string(),
                reason: "Quiet zone must be a non-negative number".to_string(),
            });
        }
        validate_less_than(
            "render.quiet_zone_mm",
            render.quiet_zone_mm * 2.0,
            render.size_mm,
            "render.size_mm",
        )?;
        validate_positive_length("render.emblem_mm", render.emblem_mm)?;
        validate_less_than(
            "render.emblem_mm",
            render.emblem_mm,
            render.size_mm - 2.0 * render.quiet_zone_mm,
            "the code area",
        )?;

        validate_country_prefix("payload.country_prefix", &self.payload.country_prefix)?;
        validate_country_prefix("payload.country", &self.payload.country)?;
        validate_one_of("payload.version", &self.payload.version, &ACCEPTED_VERSIONS)?;

        for (i, debtor) in self.debtors.iter().enumerate() {
            validate_non_empty_string(&format!("debtors[{}].name", i), &debtor.name)?;
        }

        Ok(())
    }

    /// 取得繪製版面
    pub fn layout(&self) -> RenderLayout {
        RenderLayout {
            size: self.render.size_mm,
            quiet_zone: self.render.quiet_zone_mm,
            emblem_size: self.render.emblem_mm,
            ..Default::default()
        }
    }

    pub fn payload_options(&self) -> PayloadOptions {
        PayloadOptions {
            country_prefix: self.payload.country_prefix.clone(),
            country: self.payload.country.clone(),
            version: self.payload.version.clone(),
        }
    }
}

#[async_trait]
impl CreditorSettingsProvider for TomlConfig {
    async fn creditor_settings(&self) -> Result<CreditorSettings> {
        let creditor = self
            .creditor
            .as_ref()
            .ok_or_else(|| QrBillError::MissingRequiredSetting {
                setting: "creditor".to_string(),
            })?;

        Ok(CreditorSettings {
            name: creditor.name.clone(),
            address: creditor.address.clone(),
            account: creditor.account.clone(),
        })
    }
}

#[async_trait]
impl DebtorLookup for TomlConfig {
    async fn debtor_address(&self, name: &str) -> Result<Option<String>> {
        let wanted = name.trim().to_lowercase();
        Ok(self
            .debtors
            .iter()
            .find(|debtor| debtor.name.trim().to_lowercase() == wanted)
            .map(|debtor| debtor.address.clone())
            .filter(|address| !address.trim().is_empty()))
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
