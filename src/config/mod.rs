//! Configuration module for Infogrid
//!
//! This module handles:
//! - Predictor service location and timeout
//! - Live recomputation debounce delay
//! - Notice lifetime

mod user_config;

pub use user_config::{
    LiveSection,
    NoticeSection,
    PredictorSection,
    UserConfig,
    DEFAULT_DEBOUNCE_MS,
    ENV_DEBOUNCE_MS,
    ENV_PREDICTOR_TIMEOUT,
    ENV_PREDICTOR_URL,
};
