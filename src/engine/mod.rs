//! Per-instance visualizer controller
//!
//! - [`visualizer`]: [`Visualizer`], which owns the live snapshot, log,
//!   scheduler and generation counter of one visualizer and plays recorded
//!   traces back step by step
//! - [`errors`]: API error types
//!
//! # Execution Model
//!
//! Starting an operation records its whole trace up front (see
//! [`crate::drivers`]), bumps the generation and spawns a local playback task.
//! The task commits one frame, awaits the scheduler delay, and repeats. Each
//! commit re-checks the run token inside the same borrow that mutates the live
//! state, so a run superseded by a reset or a newer run stops without touching
//! anything.
//!
//! Everything runs on one thread: the visualizer shares its state through
//! `Rc<RefCell<..>>` and must be driven from inside a `tokio::task::LocalSet`.

pub mod errors;
pub mod visualizer;

pub use visualizer::{Live, Visualizer};
