//! Outbound interface to the editor hosting the panel.

use lilium_core::editor::{Inspectable, InvocationHistory};

use crate::invoke::InvocationFailure;
use crate::param::ObjectRef;

/// Services the panel needs from the surrounding editor.
///
/// Undo and dirty notifications are required; everything else has a
/// default. [`InvocationHistory`] implements this trait and is enough for
/// most hosts.
pub trait InspectorHost {
    /// Called once per target, before the action mutates it.
    fn record_undo(&mut self, target: &dyn Inspectable, label: &str);

    /// Called once per target after the action completed successfully.
    fn set_dirty(&mut self, target: &dyn Inspectable);

    /// Called for every target whose invocation failed or panicked.
    fn report_failure(&mut self, failure: &InvocationFailure) {
        log::error!(
            "Action `{}` failed on {} ({}): {}",
            failure.action,
            failure.target_name,
            failure.target,
            failure.error
        );
    }

    /// Objects offered by object-reference fields.
    fn object_candidates(&self) -> Vec<ObjectRef> {
        Vec::new()
    }

    /// Draws the host's own property listing for the targets.
    ///
    /// Runs before the action section on every refresh.
    fn draw_default_inspector(&mut self, _ui: &mut egui::Ui, _targets: &mut [&mut dyn Inspectable]) {}
}

impl InspectorHost for InvocationHistory {
    fn record_undo(&mut self, target: &dyn Inspectable, label: &str) {
        self.record(target, label);
    }

    fn set_dirty(&mut self, target: &dyn Inspectable) {
        self.mark_dirty(target);
    }
}
