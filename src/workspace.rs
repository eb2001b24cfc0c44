//! Session state for one user
//!
//! `Workspace` owns the point collection, the predictor requester, the
//! current prediction and the notice board. Hosts keep one per session and
//! pass it around explicitly; nothing here is global.

use tracing::debug;

use crate::config::UserConfig;
use crate::models::{Point, PredictionResponse};
use crate::notice::{Notice, NoticeBoard, NoticeKind};
use crate::points::{Field, PointStore, RangeWarning};
use crate::predict::{
    HttpPredictor, PredictError, PredictResult, PredictionRequester, Predictor, Submission,
};

pub struct Workspace<P> {
    points: PointStore,
    requester: PredictionRequester<P>,
    current: Option<Submission>,
    notices: NoticeBoard,
}

impl Workspace<HttpPredictor> {
    /// Workspace talking to the predictor configured in `config`
    pub fn from_config(config: &UserConfig) -> Self {
        Self::new(
            HttpPredictor::with_config(config.predictor_config()),
            NoticeBoard::new(config.notice_ttl()),
        )
    }
}

impl<P: Predictor> Workspace<P> {
    pub fn new(predictor: P, notices: NoticeBoard) -> Self {
        Self {
            points: PointStore::new(),
            requester: PredictionRequester::new(predictor),
            current: None,
            notices,
        }
    }

    pub fn points(&self) -> &PointStore {
        &self.points
    }

    pub fn requester(&self) -> &PredictionRequester<P> {
        &self.requester
    }

    /// Add a point; an out-of-range point is kept and a warning notice posted
    pub fn add_point(&mut self, point: Point) -> Option<RangeWarning> {
        let warning = self.points.add(point);
        self.post_range_warning(warning.as_ref());
        warning
    }

    pub fn add_default_point(&mut self) -> usize {
        self.points.add_default()
    }

    pub fn remove_point(&mut self, index: usize) -> Option<Point> {
        self.points.remove(index)
    }

    /// Edit one field of a point; `false` if `index` does not exist
    pub fn update_point(&mut self, index: usize, field: Field, value: f64) -> bool {
        match self.points.update(index, field, value) {
            Some(warning) => {
                self.post_range_warning(warning.as_ref());
                true
            }
            None => false,
        }
    }

    /// Submit the current points and make the response the current prediction.
    ///
    /// Failures are posted as notices and returned; the previous prediction
    /// and the points are left as they were.
    pub fn predict(&mut self) -> PredictResult<&PredictionResponse> {
        let snapshot = self.points.snapshot();
        match self.requester.submit(&snapshot) {
            Ok(submission) => Ok(&self.current.insert(submission).response),
            Err(e) => {
                self.report(&e);
                Err(e)
            }
        }
    }

    /// Install a submission completed elsewhere (for example on a worker
    /// thread via [`requester`](Self::requester)). Responses to superseded
    /// tickets are discarded; returns whether it was installed.
    pub fn accept(&mut self, submission: Submission) -> bool {
        if !self.requester.is_latest(submission.ticket) {
            debug!(ticket = submission.ticket.id(), "discarding stale prediction");
            return false;
        }
        self.current = Some(submission);
        true
    }

    /// The most recent successful prediction
    pub fn prediction(&self) -> Option<&PredictionResponse> {
        self.current.as_ref().map(|s| &s.response)
    }

    /// Post the user-facing notice for a failed submission
    pub fn report(&mut self, error: &PredictError) {
        let kind = if error.is_validation() {
            NoticeKind::Validation
        } else {
            NoticeKind::Network
        };
        self.notices.post(kind, error.to_string());
    }

    /// Live notice, if one has been posted and not yet expired
    pub fn notice(&mut self) -> Option<&Notice> {
        self.notices.current()
    }

    pub fn notices_mut(&mut self) -> &mut NoticeBoard {
        &mut self.notices
    }

    fn post_range_warning(&mut self, warning: Option<&RangeWarning>) {
        if let Some(warning) = warning {
            self.notices.post(NoticeKind::Warning, warning.to_string());
        }
    }
}
