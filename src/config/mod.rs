pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "qgarp-screener")]
#[command(about = "Screens a ticker universe against the QGARP rubric")]
pub struct CliConfig {
    /// Endpoint returning the universe as a JSON array of ticker symbols
    #[arg(long, default_value = "http://localhost:8080/universe")]
    pub universe_endpoint: String,

    /// Base endpoint for per-ticker quotes; the ticker is appended as a path segment
    #[arg(long, default_value = "http://localhost:8080/quote")]
    pub quote_endpoint: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Label stamped on every report row (e.g. the index being screened)
    #[arg(long, default_value = "sp500")]
    pub universe: String,

    #[arg(long, default_value = "5")]
    pub concurrent_requests: usize,

    /// Cap the number of tickers screened (useful for quick runs)
    #[arg(long)]
    pub max_tickers: Option<usize>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn universe_endpoint(&self) -> &str {
        &self.universe_endpoint
    }

    fn quote_endpoint(&self) -> &str {
        &self.quote_endpoint
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn universe_label(&self) -> &str {
        &self.universe
    }

    fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
    }

    fn max_tickers(&self) -> Option<usize> {
        self.max_tickers
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("universe_endpoint", &self.universe_endpoint)?;
        validation::validate_url("quote_endpoint", &self.quote_endpoint)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_non_empty_string("universe", &self.universe)?;
        validation::validate_positive_number("concurrent_requests", self.concurrent_requests, 1)?;
        Ok(())
    }
}
