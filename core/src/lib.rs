//! # Lilium Core
//!
//! Value types and editing targets shared by the Lilium inspector crates.
//!
//! - [`math`] - vector aliases and the inspector's plain value types
//!   (colors, rectangles, bounds, curves, layer masks)
//! - [`editor`] - inspectable targets and the undo/dirty history that
//!   records every mutation made through the inspector

pub mod editor;
pub mod math;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
