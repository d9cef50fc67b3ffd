//! Action section of the inspector.

use egui::{Color32, RichText};

use lilium_core::editor::Inspectable;

use crate::host::InspectorHost;
use crate::invoke::InvokeReport;
use crate::panel::{ActionPanel, ActionView, SignatureLine, inspected_type};
use crate::param::ParamValue;
use crate::registry::ActionRegistry;

use super::fields::{FieldContext, param_field};

const VISIBILITY_COLOR: Color32 = Color32::from_rgb(0x32, 0xa8, 0xa6);
const RETURN_TYPE_COLOR: Color32 = Color32::from_rgb(0xa8, 0x32, 0x75);

/// Draws the inspector for `targets`: the host's property listing followed by
/// one button per discovered action.
///
/// Parameter edits are written to the panel cache. When a button is clicked
/// the action runs on every target and its report is returned. Nothing beyond
/// the host listing is drawn when the selection is empty, mixes types or its
/// type has no actions.
pub fn show_action_panel(
    ui: &mut egui::Ui,
    panel: &mut ActionPanel,
    registry: &ActionRegistry,
    targets: &mut [&mut dyn Inspectable],
    host: &mut dyn InspectorHost,
) -> Option<InvokeReport> {
    host.draw_default_inspector(ui, targets);

    let ty = inspected_type(targets)?;
    let view = panel.build_view(registry, ty);
    let owner = view.owner?;
    if view.is_empty() {
        return None;
    }

    let config = panel.config().clone();
    let objects = host.object_candidates();
    let ctx = FieldContext {
        config: &config,
        objects: &objects,
    };

    ui.add_space(config.section_spacing);
    ui.separator();
    ui.label(RichText::new(&view.title).strong());

    let mut edits: Vec<(String, usize, ParamValue)> = Vec::new();
    let mut clicked: Option<String> = None;

    for action in &view.actions {
        ui.push_id(&action.signature, |ui| {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                if show_action(ui, action, &ctx, config.show_signatures, &mut edits) {
                    clicked = Some(action.signature.clone());
                }
            });
        });
    }

    for (signature, index, value) in edits {
        if let Some(action) = registry.find(ty, &signature) {
            panel.edit_param(owner, action, index, value);
        }
    }

    let signature = clicked?;
    let action = registry.find(ty, &signature)?;
    let report = panel.invoke(owner, action, targets, host);
    if !report.is_success() {
        log::warn!(
            "`{}` failed on {} of {} target(s)",
            report.action,
            report.failed_count(),
            report.targets
        );
    }
    Some(report)
}

/// Draws one action. Returns `true` if its button was clicked.
fn show_action(
    ui: &mut egui::Ui,
    action: &ActionView,
    ctx: &FieldContext<'_>,
    show_signature: bool,
    edits: &mut Vec<(String, usize, ParamValue)>,
) -> bool {
    let clicked = ui
        .add_enabled(action.enabled, egui::Button::new(action.label.as_str()))
        .clicked();

    if show_signature {
        signature_line(ui, &action.signature_line);
    }

    for param in &action.params {
        ui.push_id(param.index, |ui| {
            ui.add_enabled_ui(param.editable, |ui| {
                let value = param_field(ui, param, ctx);
                if value != param.value {
                    edits.push((action.signature.clone(), param.index, value));
                }
            });
        });
    }

    if let Some(reason) = &action.reason {
        ui.colored_label(ui.visuals().warn_fg_color, format!("⚠ {reason}"));
    }

    clicked
}

fn signature_line(ui: &mut egui::Ui, line: &SignatureLine) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;
        ui.label(
            RichText::new(line.visibility.as_str())
                .small()
                .color(VISIBILITY_COLOR),
        );
        ui.label(
            RichText::new(&line.return_type)
                .small()
                .color(RETURN_TYPE_COLOR),
        );
        ui.label(RichText::new(&line.name).small().strong());
    });
}
