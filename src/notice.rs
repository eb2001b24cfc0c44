//! Transient user-facing notices
//!
//! Failures at the predictor boundary are reported here instead of being
//! raised to the host. A notice clears itself once its time-to-live has
//! passed; posting a new notice replaces the old one.

use std::time::{Duration, Instant};

/// Default time a notice stays visible
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Input rejected before any request was made
    Validation,
    /// Predictor unreachable or answered with an error
    Network,
    /// Accepted input that looks suspicious
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub expires_at: Instant,
}

impl Notice {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Holds at most one live notice
#[derive(Debug)]
pub struct NoticeBoard {
    ttl: Duration,
    current: Option<Notice>,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_TTL)
    }
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn post(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.post_at(kind, message, Instant::now());
    }

    pub fn post_at(&mut self, kind: NoticeKind, message: impl Into<String>, now: Instant) {
        self.current = Some(Notice {
            kind,
            message: message.into(),
            expires_at: now + self.ttl,
        });
    }

    /// The live notice, if any
    pub fn current(&mut self) -> Option<&Notice> {
        self.current_at(Instant::now())
    }

    /// The live notice as of `now`; an expired one is dropped
    pub fn current_at(&mut self, now: Instant) -> Option<&Notice> {
        if self.current.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.current = None;
        }
        self.current.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
