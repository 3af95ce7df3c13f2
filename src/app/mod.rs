//! Windowed viewer.
//!
//! - [`app_state`]: [`AppState`], the renderer that lives as long as the window
//! - [`event_handler`]: [`App`], window lifecycle and event routing
//!
//! The board never changes after generation, so the loop waits for events and
//! only redraws on request (first frame, resizes, exposure).

pub mod app_state;
pub mod event_handler;

pub use app_state::AppState;
pub use event_handler::{App, AppEvent, FatalError, ViewerSettings};
