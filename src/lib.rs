pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, CliConfig, DuplicatePolicy};
pub use core::{etl::EtlEngine, pipeline::SalesPipeline};
pub use utils::error::{EtlError, Result};
