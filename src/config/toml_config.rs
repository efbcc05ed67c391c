use crate::core::ConfigProvider;
use crate::utils::error::{Result, ScreenError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub screen: ScreenConfig,
    pub source: SourceConfig,
    pub extract: ExtractConfig,
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenConfig {
    pub name: String,
    /// Universe label stamped on every report row.
    pub universe: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub universe_endpoint: String,
    pub quote_endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    pub concurrent_requests: Option<usize>,
    pub max_tickers: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScreenError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScreenError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` placeholders with the environment variable's
    /// value; unknown variables are left verbatim.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScreenError::ConfigError {
            message: format!("env substitution pattern failed to compile: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("source.universe_endpoint", &self.source.universe_endpoint)?;
        validation::validate_url("source.quote_endpoint", &self.source.quote_endpoint)?;
        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_non_empty_string("screen.universe", &self.screen.universe)?;

        if let Some(concurrent) = self.extract.concurrent_requests {
            validation::validate_positive_number("extract.concurrent_requests", concurrent, 1)?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn universe_endpoint(&self) -> &str {
        &self.source.universe_endpoint
    }

    fn quote_endpoint(&self) -> &str {
        &self.source.quote_endpoint
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn universe_label(&self) -> &str {
        &self.screen.universe
    }

    fn concurrent_requests(&self) -> usize {
        self.extract.concurrent_requests.unwrap_or(5)
    }

    fn max_tickers(&self) -> Option<usize> {
        self.extract.max_tickers
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
