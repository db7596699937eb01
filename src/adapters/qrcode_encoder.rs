use crate::domain::model::{ErrorCorrection, ModuleMatrix};
use crate::domain::ports::MatrixEncoder;
use crate::utils::error::{QrBillError, Result};
use qrcode::{Color, EcLevel, QrCode};

/// Module matrices from the `qrcode` crate, byte mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrCodeEncoder;

impl QrCodeEncoder {
    pub fn new() -> Self {
        Self
    }
}

fn ec_level(level: ErrorCorrection) -> EcLevel {
    match level {
        ErrorCorrection::Low => EcLevel::L,
        ErrorCorrection::Medium => EcLevel::M,
        ErrorCorrection::Quartile => EcLevel::Q,
        ErrorCorrection::High => EcLevel::H,
    }
}

impl MatrixEncoder for QrCodeEncoder {
    fn encode(&self, text: &str, level: ErrorCorrection) -> Result<ModuleMatrix> {
        let code = QrCode::with_error_correction_level(text.as_bytes(), ec_level(level)).map_err(|e| {
            QrBillError::EncodingUnavailable {
                reason: e.to_string(),
            }
        })?;

        let side = code.width();
        let modules = code.to_colors().into_iter().map(|c| c == Color::Dark).collect();

        ModuleMatrix::new(side, modules).ok_or_else(|| QrBillError::EncodingUnavailable {
            reason: format!("encoder returned a malformed {}x{} matrix", side, side),
        })
    }
}
