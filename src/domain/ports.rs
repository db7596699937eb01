use crate::domain::model::{CreditorSettings, ErrorCorrection, ModuleMatrix, Rgb};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Turns text into a module matrix. Implementations are deterministic.
pub trait MatrixEncoder: Send + Sync {
    fn encode(&self, text: &str, level: ErrorCorrection) -> Result<ModuleMatrix>;
}

#[async_trait]
pub trait CreditorSettingsProvider: Send + Sync {
    async fn creditor_settings(&self) -> Result<CreditorSettings>;
}

#[async_trait]
pub trait DebtorLookup: Send + Sync {
    /// `Ok(None)` when the customer has no address on file.
    async fn debtor_address(&self, name: &str) -> Result<Option<String>>;
}

/// Drawing primitives in physical (millimetre) coordinates.
pub trait DrawingSurface {
    fn set_fill_color(&mut self, color: Rgb);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
}
