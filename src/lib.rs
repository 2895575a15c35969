//! # Introduction
//!
//! Algoscope animates classic algorithms one visual step at a time. It covers
//! sorting, binary search trees and the basic linear structures. Each step is
//! drawn with highlight colours next to a log line and running counters in a
//! terminal UI built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Operation → Driver → Trace of Frames → Scheduler playback → Snapshot store → Renderer → TUI
//! ```
//!
//! 1. [`drivers`]: run an algorithm on a copy of the structure and record a
//!    [`snapshot::Frame`] for each visual step.
//! 2. [`scheduler`]: pausable, speed-scaled delays between steps, cancelled
//!    through generation tokens.
//! 3. [`engine`]: the per-instance [`engine::Visualizer`] that plays traces
//!    back, owns the live state and keeps the history of the last run for
//!    stepping back and forth.
//! 4. [`snapshot`] and [`log`]: the live structure, its highlight sets, and the
//!    bounded operation log.
//! 5. [`render`]: pure mapping from snapshot and highlights to drawable cells.
//! 6. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! [`config`] holds the JSON-loadable settings and [`protocol`] the wire shapes
//! of the judge, game and assistant services a front end talks to.

pub mod config;
pub mod drivers;
pub mod engine;
pub mod log;
pub mod protocol;
pub mod render;
pub mod scheduler;
pub mod snapshot;
pub mod ui;
