pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalOutput, CliConfig, OutputFormat};

pub use adapters::{QrCodeEncoder, SvgSurface};
pub use config::toml_config::TomlConfig;
pub use core::generator::{QrBill, QrBillEngine};
pub use core::renderer::{BarcodeRenderer, RenderLayout};
pub use domain::model::{Currency, Invoice, PaymentPayload, PaymentReference};
pub use utils::error::{QrBillError, Result};
