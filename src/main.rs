use anyhow::Result;
use clap::Parser;
use sales_etl::utils::{logger, validation::Validate};
use sales_etl::{CliConfig, EtlEngine, LocalStorage, SalesPipeline};

#[tokio::main]
async fn main() -> Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting sales-etl");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let storage = LocalStorage::new();
    let pipeline = SalesPipeline::new(storage, config);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Sales analytics run completed");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!("Pipeline failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    }

    Ok(())
}
