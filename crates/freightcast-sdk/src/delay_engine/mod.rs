//! DelayEngine - shared handle over the current trained artifact
//!
//! The module is organized into:
//! - `types`: response types (TrainOutcome, ModelInfo, LoadOutcome)
//! - `engine`: DelayEngine with train / retrain / predict / reload

mod engine;
mod types;

pub use engine::DelayEngine;
pub use types::{LoadOutcome, ModelInfo, TrainOutcome};
