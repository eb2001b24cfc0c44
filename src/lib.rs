//! Infogrid - character-distribution analysis and predictor client
//!
//! Two small cores, both owned explicitly by the caller:
//! - `analysis`: Shannon entropy, cross-entropy and KL divergence over
//!   character frequencies, plus the debounced `live` driver that keeps
//!   published results in sync with two editable text buffers.
//! - `points` / `predict`: an ordered store of labeled 2-D samples and the
//!   request/response contract with an external spatial-regression service.
//!
//! Rendering is not part of this crate. Everything is published by value.

pub mod analysis;
pub mod config;
pub mod live;
pub mod logging;
pub mod models;
pub mod notice;
pub mod points;
pub mod predict;
pub mod workspace;

pub use analysis::{CharFrequency, DivergenceResult, EntropyResult};
pub use models::{Point, PredictionRequest, PredictionResponse};
pub use predict::{PredictError, PredictResult};
