pub mod address;
pub mod generator;
pub mod iban;
pub mod payload;
pub mod reference;
pub mod renderer;
pub mod serializer;

pub use crate::domain::model::{
    CreditorSettings, Currency, Invoice, ModuleMatrix, PaymentPayload, PaymentReference,
    StructuredAddress,
};
pub use crate::domain::ports::{CreditorSettingsProvider, DebtorLookup, DrawingSurface, MatrixEncoder};
pub use crate::utils::error::Result;
