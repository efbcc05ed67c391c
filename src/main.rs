use clap::Parser;
use qgarp_screener::utils::{logger, validation::Validate};
use qgarp_screener::{CliConfig, LocalStorage, ScreenPipeline, ScreenerEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting qgarp-screener CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = ScreenPipeline::new(storage, config);

    let engine = ScreenerEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("Screening run completed successfully!");
            println!("✅ Screening run completed successfully!");
            println!("📁 Report saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!("Screening run failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
