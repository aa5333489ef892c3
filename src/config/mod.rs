pub mod cli;

use crate::core::{ConfigProvider, EtlError, Result};
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;

/// What to do with repeated transaction ids. The legacy feed contained
/// duplicates and treated them as distinct sales, so `keep` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DuplicatePolicy {
    /// Accept duplicates as distinct records.
    Keep,
    /// Keep the first occurrence, drop the rest.
    Drop,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "sales-etl")]
#[command(about = "Clean, analyze and enrich raw sales transaction data")]
pub struct CliConfig {
    /// Pipe-delimited sales data file
    #[arg(value_name = "INPUT")]
    pub input_path: String,

    #[arg(long, default_value = "https://dummyjson.com/products")]
    pub api_endpoint: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Only analyze transactions from these regions
    #[arg(long, value_delimiter = ',')]
    pub regions: Vec<String>,

    /// Only analyze transactions with amount >= this value
    #[arg(long)]
    pub min_amount: Option<Decimal>,

    /// Only analyze transactions with amount <= this value
    #[arg(long)]
    pub max_amount: Option<Decimal>,

    /// How many products to list in the top/bottom rankings
    #[arg(long, default_value = "5")]
    pub top_n: usize,

    #[arg(long, value_enum, default_value = "keep")]
    pub on_duplicate: DuplicatePolicy,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn regions(&self) -> Option<&[String]> {
        if self.regions.is_empty() {
            None
        } else {
            Some(&self.regions)
        }
    }

    fn min_amount(&self) -> Option<Decimal> {
        self.min_amount
    }

    fn max_amount(&self) -> Option<Decimal> {
        self.max_amount
    }

    fn top_n(&self) -> usize {
        self.top_n
    }

    fn drop_duplicates(&self) -> bool {
        self.on_duplicate == DuplicatePolicy::Drop
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input_path", &self.input_path)?;
        validate_path("output_path", &self.output_path)?;
        validate_url("api_endpoint", &self.api_endpoint)?;
        validate_positive_number("top_n", self.top_n, 1)?;

        if let (Some(min), Some(max)) = (self.min_amount, self.max_amount) {
            if min > max {
                return Err(EtlError::InvalidConfigValueError {
                    field: "min_amount".to_string(),
                    value: min.to_string(),
                    reason: format!("min_amount exceeds max_amount ({})", max),
                });
            }
        }

        Ok(())
    }
}
