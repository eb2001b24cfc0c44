//! Submission handling: validation, dispatch and ticketing

use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

use super::{PredictError, PredictResult, Predictor};
use crate::models::{Point, PredictionRequest, PredictionResponse};

/// Identifies one submission. Later submissions get larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// A completed submission
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub ticket: Ticket,
    pub response: PredictionResponse,
}

pub struct PredictionRequester<P> {
    predictor: P,
    last_issued: AtomicU64,
}

impl<P: Predictor> PredictionRequester<P> {
    pub fn new(predictor: P) -> Self {
        Self {
            predictor,
            last_issued: AtomicU64::new(0),
        }
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    /// Send `points` to the predictor and wait for the grid.
    ///
    /// An empty slice fails with [`PredictError::EmptySubmission`] before any
    /// request is made and without issuing a ticket.
    pub fn submit(&self, points: &[Point]) -> PredictResult<Submission> {
        if points.is_empty() {
            return Err(PredictError::EmptySubmission);
        }

        let ticket = Ticket(self.last_issued.fetch_add(1, Ordering::SeqCst) + 1);
        let request = PredictionRequest {
            points: points.to_vec(),
        };
        debug!(ticket = ticket.id(), points = points.len(), "submitting prediction");

        match self.predictor.predict(&request) {
            Ok(response) => {
                let (rows, cols) = response.shape();
                info!(ticket = ticket.id(), rows, cols, "prediction received");
                Ok(Submission { ticket, response })
            }
            Err(e) => {
                warn!(ticket = ticket.id(), "prediction failed: {}", e);
                Err(e)
            }
        }
    }

    /// Newest ticket handed out so far, `None` before the first submission
    pub fn latest_ticket(&self) -> Option<Ticket> {
        match self.last_issued.load(Ordering::SeqCst) {
            0 => None,
            n => Some(Ticket(n)),
        }
    }

    /// Whether a response for `ticket` may still be treated as current
    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.latest_ticket() == Some(ticket)
    }
}
