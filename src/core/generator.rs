use crate::core::payload::{build_payload, PayloadOptions};
use crate::core::renderer::{BarcodeRenderer, RenderLayout};
use crate::core::serializer::serialize;
use crate::core::{CreditorSettingsProvider, DebtorLookup, DrawingSurface, MatrixEncoder};
use crate::domain::model::{Invoice, PaymentPayload};
use crate::utils::error::Result;

/// A finished payment code: the structured record and its wire text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrBill {
    pub payload: PaymentPayload,
    pub text: String,
}

/// Runs the whole pipeline for one invoice: fetch settings, assemble,
/// serialize and optionally draw.
pub struct QrBillEngine<C: CreditorSettingsProvider, D: DebtorLookup, E: MatrixEncoder> {
    creditor: C,
    debtors: D,
    renderer: BarcodeRenderer<E>,
    options: PayloadOptions,
}

impl<C: CreditorSettingsProvider, D: DebtorLookup, E: MatrixEncoder> QrBillEngine<C, D, E> {
    pub fn new(creditor: C, debtors: D, encoder: E) -> Self {
        Self {
            creditor,
            debtors,
            renderer: BarcodeRenderer::new(encoder),
            options: PayloadOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PayloadOptions) -> Self {
        self.options = options;
        self
    }

    pub async fn build(&self, invoice: &Invoice) -> Result<QrBill> {
        tracing::debug!("Building payment code for invoice {}", invoice.number);

        let settings = self.creditor.creditor_settings().await?;

        let debtor_address = match invoice.debtor_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => self.debtors.debtor_address(name).await?,
            _ => None,
        };

        let payload = build_payload(invoice, &settings, debtor_address.as_deref(), &self.options)?;
        let text = serialize(&payload)?;

        tracing::info!(
            "Payment code ready for invoice {} ({} reference, {} bytes)",
            invoice.number,
            payload.reference_type,
            text.len()
        );

        Ok(QrBill { payload, text })
    }

    /// Builds the code and draws it. The surface is untouched on any error.
    pub async fn run(
        &self,
        invoice: &Invoice,
        layout: &RenderLayout,
        surface: &mut dyn DrawingSurface,
    ) -> Result<QrBill> {
        let bill = self.build(invoice).await?;
        self.renderer.render(&bill.text, layout, surface)?;
        Ok(bill)
    }
}
