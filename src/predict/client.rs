//! HTTP predictor client
//!
//! Uses ureq (sync HTTP), no async runtime needed for a round trip.

use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::{PredictError, PredictResult, Predictor};
use crate::models::{PredictionRequest, PredictionResponse};

pub const DEFAULT_PREDICTOR_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct PredictorConfig {
    /// Service root; endpoints are appended to it
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PREDICTOR_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl PredictorConfig {
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Predictor reached over HTTP, sync via ureq
pub struct HttpPredictor {
    config: PredictorConfig,
    agent: ureq::Agent,
}

fn make_agent(timeout: Duration) -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false) // status codes are mapped to PredictError::Status below
        .timeout_global(Some(timeout))
        .build()
        .new_agent()
}

impl HttpPredictor {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_config(PredictorConfig {
            base_url: base_url.into(),
            ..Default::default()
        })
    }

    pub fn with_config(config: PredictorConfig) -> Self {
        let agent = make_agent(config.timeout);
        Self { config, agent }
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    /// `GET /health` reports `{"status": "ok"}`
    pub fn health(&self) -> PredictResult<bool> {
        let body: HealthResponse = self.get_json("health")?;
        Ok(body.status == "ok")
    }

    /// `GET /health/model` reports `{"model": "ready"}`
    pub fn model_ready(&self) -> PredictResult<bool> {
        let body: ModelHealthResponse = self.get_json("health/model")?;
        Ok(body.model == "ready")
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> PredictResult<T> {
        let url = self.config.endpoint(path);
        let response = self
            .agent
            .get(url.as_str())
            .call()
            .map_err(|e| PredictError::Transport {
                message: e.to_string(),
            })?;
        read_success_json(response)
    }
}

impl Predictor for HttpPredictor {
    fn predict(&self, request: &PredictionRequest) -> PredictResult<PredictionResponse> {
        let url = self.config.endpoint("predict");
        debug!(%url, points = request.points.len(), "posting prediction request");

        let response = self
            .agent
            .post(url.as_str())
            .header("Content-Type", "application/json")
            .send_json(request)
            .map_err(|e| PredictError::Transport {
                message: e.to_string(),
            })?;

        let grid: PredictionResponse = read_success_json(response)?;
        grid.validate().map_err(PredictError::MalformedResponse)?;
        Ok(grid)
    }
}

fn read_success_json<T: serde::de::DeserializeOwned>(
    response: ureq::http::Response<ureq::Body>,
) -> PredictResult<T> {
    let status = response.status().as_u16();
    if status >= 400 {
        let message = response.into_body().read_to_string().unwrap_or_default();
        warn!(status, "predictor returned an error status");
        return Err(PredictError::Status { status, message });
    }

    response
        .into_body()
        .read_json()
        .map_err(|e| PredictError::MalformedResponse(e.to_string()))
}

#[derive(Deserialize)]
struct HealthResponse {
    status: String,
}

#[derive(Deserialize)]
struct ModelHealthResponse {
    model: String,
}
