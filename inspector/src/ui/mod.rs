//! egui rendering of the action panel.
//!
//! [`show_action_panel`] is the per-refresh entry point: it draws the host's
//! default inspector, then the action section built from
//! [`ActionPanel::build_view`](crate::ActionPanel::build_view). Field widgets
//! live in [`param_field`], one editor per [`ParamKind`](crate::ParamKind).

mod action_panel;
mod fields;

pub use action_panel::show_action_panel;
pub use fields::{FieldContext, mask_summary, param_field};
