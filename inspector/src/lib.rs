//! # Lilium Inspector - action panel
//!
//! Exposes methods of inspected objects as buttons with editable parameter
//! fields, built on [egui](https://docs.rs/egui).
//!
//! ## Pieces
//!
//! - [`actions`](macro@actions) / [`ParamEnum`](macro@ParamEnum) - the
//!   declarative tag surface that fills the registration table
//! - [`ActionRegistry`] - registration table keyed by type identity; discovery
//!   is a lookup against it
//! - [`ActionSpec::can_invoke`] - pure eligibility check with a human-readable reason
//! - [`ParamCache`] - last entered argument values, owned by the panel
//! - [`ActionPanel`] - view model, parameter edits and invocation
//! - [`ui::show_action_panel`] - per-refresh entry point for the host
//!
//! # Usage
//!
//! ```ignore
//! use lilium_inspector::{ActionPanel, ActionRegistry, actions};
//!
//! #[actions]
//! impl Spawner {
//!     #[action("Spawn Wave")]
//!     pub fn spawn_wave(&mut self, count: i32, tint: Color) { /* ... */ }
//! }
//!
//! // During setup
//! let mut registry = ActionRegistry::new();
//! registry.register::<Spawner>();
//! let mut panel = ActionPanel::new(PanelConfig::default());
//!
//! // During frame, inside any egui::Ui container:
//! lilium_inspector::ui::show_action_panel(ui, &mut panel, &registry, &mut targets, &mut history);
//! ```

extern crate self as lilium_inspector;

pub mod action;
pub mod cache;
pub mod config;
pub mod host;
pub mod humanize;
pub mod invoke;
pub mod panel;
pub mod param;
pub mod registry;
pub mod ui;

pub use action::{ActionBuilder, ActionSpec, BlockReason, Eligibility, MemberFlags, Visibility};
pub use cache::{CacheKey, ParamCache};
pub use config::{ConfigError, PanelConfig};
pub use host::InspectorHost;
pub use invoke::{InvocationFailure, InvokeError, InvokeReport};
pub use lilium_inspector_macro::{ParamEnum, actions};
pub use panel::{ActionPanel, ActionView, PanelView, ParamView, SignatureLine};
pub use param::{ObjectRef, ParamDescriptor, ParamEnum, ParamKind, ParamType, ParamValue, PassMode};
pub use registry::{ActionRegistry, HasActions, TypeKey};
