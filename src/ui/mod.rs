//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into four layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus, input buffer
//! - **[`menu`]**: the operations offered per structure family and input parsing
//! - **[`panes`]**: stateless render functions for each visible pane (structure,
//!   log, stats, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a [`Visualizer`] and
//! await [`App::run`] inside a `tokio::task::LocalSet`.
//!
//! [`Visualizer`]: crate::engine::Visualizer
//! [`App::run`]: app::App::run

pub mod app;
pub mod menu;
pub mod panes;
pub mod theme;

pub use app::App;
