//! Callscreen Host
//!
//! Ties the theme store, animation engine and commit controller into a
//! per-call [`CallSession`], and loads the `callscreen.toml` configuration
//! used by the `callscreen` binary.

pub mod config;
pub mod session;

pub use config::CallscreenConfig;
pub use session::{CallSession, ControlFrame, RenderFrame, ThumbFrame};
