use clap::Parser;
use qgarp_screener::config::toml_config::TomlConfig;
use qgarp_screener::core::ConfigProvider;
use qgarp_screener::utils::{logger, validation::Validate};
use qgarp_screener::{LocalStorage, ScreenPipeline, ScreenerEngine};

#[derive(Parser)]
#[command(name = "toml-screen")]
#[command(about = "QGARP screener driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "screen-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the max-tickers cap from the config
    #[arg(long)]
    max_tickers: Option<usize>,

    /// Dry run - show what would be screened without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("Starting TOML-driven screener");
    tracing::info!("Loading configuration from: {}", args.config);

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Some(max) = args.max_tickers {
        config.extract.max_tickers = Some(max);
        tracing::info!("Max tickers overridden to: {}", max);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    tracing::info!("Configuration loaded and validated successfully");

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("DRY RUN MODE - no requests will be made");
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path().to_string());
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

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Screen: {}", config.screen.name);
    println!("  Universe: {}", config.universe_label());
    println!("  Universe endpoint: {}", config.universe_endpoint());
    println!("  Quote endpoint: {}", config.quote_endpoint());
    println!("  Output: {}", config.output_path());
    println!("  Concurrent Requests: {}", config.concurrent_requests());

    if let Some(max) = config.max_tickers() {
        println!("  Max Tickers: {}", max);
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
