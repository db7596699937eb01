#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw payload, CRLF separated
    Text,
    /// Payload fields as JSON
    Json,
    /// Rendered code as SVG
    Svg,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "qrbill")]
#[command(about = "Generate structured payment codes for invoices")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "qrbill.toml")]
    pub config: String,

    #[arg(long)]
    pub invoice_number: String,

    /// Amount in major units, e.g. 1250.50 (0 leaves it open)
    #[arg(long, default_value = "0")]
    pub amount: rust_decimal::Decimal,

    #[arg(long, default_value = "CHF")]
    pub currency: crate::domain::model::Currency,

    /// Customer name, looked up in the [[debtors]] table
    #[arg(long)]
    pub debtor: Option<String>,

    #[arg(long)]
    pub message: Option<String>,

    #[arg(long)]
    pub bill_info: Option<String>,

    /// Issue date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<chrono::NaiveDate>,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn invoice(&self) -> crate::domain::model::Invoice {
        let date = self
            .date
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let mut invoice = crate::domain::model::Invoice::new(&self.invoice_number, self.amount, date)
            .with_currency(self.currency);
        invoice.debtor_name = self.debtor.clone();
        invoice.message = self.message.clone();
        invoice.bill_information = self.bill_info.clone();
        invoice
    }
}
