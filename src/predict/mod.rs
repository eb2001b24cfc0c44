//! Client side of the spatial-regression predictor service
//!
//! A [`PredictionRequester`] validates a point snapshot, hands it to a
//! [`Predictor`] and keeps track of which submission is current. The
//! regression itself runs inside the external service; [`HttpPredictor`]
//! speaks its JSON contract over sync HTTP.
//!
//! # Example
//!
//! ```rust,ignore
//! use infogrid::predict::{HttpPredictor, PredictionRequester};
//!
//! let requester = PredictionRequester::new(HttpPredictor::new("http://127.0.0.1:8000"));
//! let submission = requester.submit(&store.snapshot())?;
//! ```

mod client;
mod requester;

pub use client::{HttpPredictor, PredictorConfig};
pub use requester::{PredictionRequester, Submission, Ticket};

use thiserror::Error;

use crate::models::{PredictionRequest, PredictionResponse};

/// Errors from a prediction submission. All of them leave the caller usable.
#[derive(Error, Debug)]
pub enum PredictError {
    #[error("Cannot request a prediction without any points")]
    EmptySubmission,

    #[error("Predictor unreachable: {message}")]
    Transport { message: String },

    #[error("Predictor error: {status} - {message}")]
    Status { status: u16, message: String },

    #[error("Malformed predictor response: {0}")]
    MalformedResponse(String),
}

impl PredictError {
    /// Whether the caller can resubmit as-is; every failure here is
    pub fn is_recoverable(&self) -> bool {
        true
    }

    /// True for failures raised before any I/O
    pub fn is_validation(&self) -> bool {
        matches!(self, PredictError::EmptySubmission)
    }

    /// Network failure or non-success status
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            PredictError::Transport { .. } | PredictError::Status { .. }
        )
    }
}

pub type PredictResult<T> = Result<T, PredictError>;

/// Something that turns labeled points into an interpolated grid
pub trait Predictor {
    fn predict(&self, request: &PredictionRequest) -> PredictResult<PredictionResponse>;
}

impl<P: Predictor + ?Sized> Predictor for &P {
    fn predict(&self, request: &PredictionRequest) -> PredictResult<PredictionResponse> {
        (**self).predict(request)
    }
}

impl<P: Predictor + ?Sized> Predictor for Box<P> {
    fn predict(&self, request: &PredictionRequest) -> PredictResult<PredictionResponse> {
        (**self).predict(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert!(PredictError::EmptySubmission.is_validation());
        assert!(!PredictError::EmptySubmission.is_transport());

        let status = PredictError::Status {
            status: 503,
            message: "busy".into(),
        };
        assert!(status.is_transport());
        assert!(status.is_recoverable());
        assert_eq!(status.to_string(), "Predictor error: 503 - busy");

        let malformed = PredictError::MalformedResponse("bad".into());
        assert!(!malformed.is_transport());
        assert!(malformed.is_recoverable());
    }
}
