//! Live recomputation of entropy results as text is edited
//!
//! Edits are cheap and frequent; recomputation is deferred until a buffer
//! has been quiet for the debounce delay (400 ms by default). Results are
//! published on `tokio::sync::watch` channels for whatever renders them.
//!
//! # Example
//!
//! ```rust,ignore
//! use infogrid::live::{LiveRecomputeController, Side};
//!
//! let mut live = LiveRecomputeController::new(Duration::from_millis(400));
//! let mut comparison = live.subscribe_comparison();
//! live.set_text(Side::Left, "hello");
//! live.set_text(Side::Right, "world");
//! comparison.changed().await?;
//! ```

mod controller;
mod debounce;

pub use controller::{LiveRecomputeController, Side};
pub use debounce::{Debouncer, Lease};
