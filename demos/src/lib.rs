//! # Lilium Inspector Demos
//!
//! Sample scene objects with actions, shared by the demo binaries.
//!
//! ## Available Demos
//!
//! - `action_panel_demo` - headless walk through the action panel: render,
//!   edit parameters, invoke on several targets, undo

pub mod scene;

/// Demos library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
