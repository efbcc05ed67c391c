pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, CliConfig};
pub use core::{engine::ScreenerEngine, pipeline::ScreenPipeline};
pub use utils::error::{Result, ScreenError};
