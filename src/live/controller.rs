//! Debounced recomputation over a pair of text buffers

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

use super::debounce::Debouncer;
use crate::analysis::{self, DivergenceResult, EntropyResult};
use crate::config::UserConfig;

/// Which of the two compared buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Plays P in cross-entropy and KL divergence
    Left,
    /// Plays Q
    Right,
}

impl Side {
    fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

#[derive(Debug, Default)]
struct Counters {
    entropy: [AtomicU64; 2],
    comparison: AtomicU64,
}

/// One watched buffer: its text, its timer and where its result goes
#[derive(Debug)]
struct Buffer {
    text: String,
    timer: Debouncer,
    published: Arc<watch::Sender<Option<EntropyResult>>>,
}

impl Buffer {
    fn new(delay: Duration) -> Self {
        Self {
            text: String::new(),
            timer: Debouncer::new(delay),
            published: Arc::new(watch::Sender::new(None)),
        }
    }
}

/// Keeps published entropy results in step with two editable buffers.
///
/// Each buffer has its own timer publishing its [`EntropyResult`]; the pair
/// shares a third timer publishing the [`DivergenceResult`] of left against
/// right. Every edit restarts the affected timers, and an edit that leaves
/// a result undefined clears it immediately instead.
///
/// Timers are tokio tasks, so edits must happen inside a tokio runtime.
/// Either runtime flavor works: a recompute that finishes after a newer
/// edit finds its lease stale and publishes nothing.
#[derive(Debug)]
pub struct LiveRecomputeController {
    buffers: [Buffer; 2],
    pair_timer: Debouncer,
    comparison: Arc<watch::Sender<Option<DivergenceResult>>>,
    counters: Arc<Counters>,
}

impl LiveRecomputeController {
    pub fn new(delay: Duration) -> Self {
        Self {
            buffers: [Buffer::new(delay), Buffer::new(delay)],
            pair_timer: Debouncer::new(delay),
            comparison: Arc::new(watch::Sender::new(None)),
            counters: Arc::new(Counters::default()),
        }
    }

    pub fn from_config(config: &UserConfig) -> Self {
        Self::new(config.debounce())
    }

    pub fn delay(&self) -> Duration {
        self.pair_timer.delay()
    }

    pub fn text(&self, side: Side) -> &str {
        &self.buffers[side.index()].text
    }

    pub fn set_text(&mut self, side: Side, text: impl Into<String>) {
        self.buffers[side.index()].text = text.into();
        self.on_mutation(side);
    }

    pub fn push_str(&mut self, side: Side, s: &str) {
        self.buffers[side.index()].text.push_str(s);
        self.on_mutation(side);
    }

    pub fn clear(&mut self, side: Side) {
        self.buffers[side.index()].text.clear();
        self.on_mutation(side);
    }

    /// Receiver for the entropy result of one buffer
    pub fn subscribe_entropy(&self, side: Side) -> watch::Receiver<Option<EntropyResult>> {
        self.buffers[side.index()].published.subscribe()
    }

    /// Receiver for the left-vs-right comparison
    pub fn subscribe_comparison(&self) -> watch::Receiver<Option<DivergenceResult>> {
        self.comparison.subscribe()
    }

    pub fn entropy(&self, side: Side) -> Option<EntropyResult> {
        self.buffers[side.index()].published.borrow().clone()
    }

    pub fn comparison(&self) -> Option<DivergenceResult> {
        self.comparison.borrow().clone()
    }

    /// How many times the entropy of `side` has been recomputed
    pub fn entropy_recomputations(&self, side: Side) -> u64 {
        self.counters.entropy[side.index()].load(Ordering::SeqCst)
    }

    /// How many times the comparison has been recomputed
    pub fn comparison_recomputations(&self) -> u64 {
        self.counters.comparison.load(Ordering::SeqCst)
    }

    /// Whether any recomputation is waiting on its timer
    pub fn is_pending(&self) -> bool {
        self.pair_timer.is_armed() || self.buffers.iter().any(|b| b.timer.is_armed())
    }

    fn on_mutation(&mut self, side: Side) {
        self.rearm_entropy(side);
        self.rearm_comparison();
    }

    fn rearm_entropy(&mut self, side: Side) {
        let buffer = &mut self.buffers[side.index()];
        // Invalidates a recompute that is already running, not just a waiting one
        buffer.timer.cancel();

        if buffer.text.is_empty() {
            debug!(%side, "buffer emptied, clearing entropy");
            buffer.published.send_replace(None);
            return;
        }

        let text = buffer.text.clone();
        let published = buffer.published.clone();
        let counters = self.counters.clone();
        buffer.timer.schedule(move |lease| {
            let result = analysis::entropy_report(&text);
            let (entropy, len) = (result.entropy, result.text_length);
            // Checked under the channel lock, which the synchronous clear also takes
            let fresh = published.send_if_modified(|slot| {
                if !lease.is_current() {
                    return false;
                }
                *slot = Some(result);
                true
            });
            if fresh {
                counters.entropy[side.index()].fetch_add(1, Ordering::SeqCst);
                debug!(%side, entropy, len, "entropy recomputed");
            } else {
                debug!(%side, "discarding superseded entropy");
            }
        });
    }

    fn rearm_comparison(&mut self) {
        self.pair_timer.cancel();

        let left = &self.buffers[Side::Left.index()].text;
        let right = &self.buffers[Side::Right.index()].text;
        if left.is_empty() || right.is_empty() {
            debug!("a compared buffer is empty, clearing comparison");
            self.comparison.send_replace(None);
            return;
        }

        let (left, right) = (left.clone(), right.clone());
        let published = self.comparison.clone();
        let counters = self.counters.clone();
        self.pair_timer.schedule(move |lease| {
            let result = analysis::compare(&left, &right);
            let (cross_entropy, kl_divergence) = (result.cross_entropy, result.kl_divergence);
            let fresh = published.send_if_modified(|slot| {
                if !lease.is_current() {
                    return false;
                }
                *slot = Some(result);
                true
            });
            if fresh {
                counters.comparison.fetch_add(1, Ordering::SeqCst);
                debug!(?cross_entropy, ?kl_divergence, "comparison recomputed");
            } else {
                debug!("discarding superseded comparison");
            }
        });
    }
}
