use clap::Parser;
use qrbill::utils::error::{ErrorSeverity, QrBillError};
use qrbill::utils::{logger, validation::Validate};
use qrbill::{CliConfig, LocalOutput, OutputFormat, QrBillEngine, QrCodeEncoder, SvgSurface, TomlConfig};

async fn run(args: &CliConfig) -> Result<String, QrBillError> {
    tracing::info!("📁 Loading configuration from: {}", args.config);
    let config = TomlConfig::from_file(&args.config)?;
    config.validate()?;
    tracing::info!("✅ Configuration loaded and validated successfully");

    let layout = config.layout();
    let engine = QrBillEngine::new(config.clone(), config.clone(), QrCodeEncoder::new())
        .with_options(config.payload_options());

    let invoice = args.invoice();
    let output = LocalOutput::new(args.output.clone());

    let data = match args.format {
        OutputFormat::Text => engine.build(&invoice).await?.text,
        OutputFormat::Json => {
            let bill = engine.build(&invoice).await?;
            serde_json::to_string_pretty(&bill.payload)?
        }
        OutputFormat::Svg => {
            let mut surface = SvgSurface::new(layout.size, layout.size);
            engine.run(&invoice, &layout, &mut surface).await?;
            tracing::debug!("SVG contains {} rectangles", surface.rect_count());
            surface.to_svg()
        }
    };

    output.write(data.as_bytes())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting qrbill for invoice {}", args.invoice_number);
    if args.verbose {
        tracing::debug!("CLI config: {:?}", args);
    }

    match run(&args).await {
        Ok(destination) => {
            tracing::info!("✅ Payment code written to: {}", destination);
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Payment code generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
