pub mod engine;
pub mod pipeline;
pub mod resolver;
pub mod scorer;

pub use crate::domain::model::{
    RawAttributes, ResolvedMetrics, ScoreRecord, ScreenOutcome, ScreenResult,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
