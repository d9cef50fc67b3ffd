//! # Action Panel Demo
//!
//! Demonstrates:
//! - Registering `#[actions]` types with the registry
//! - Rendering the action panel in headless egui frames
//! - Editing cached parameters and invoking on a multi-selection
//! - Per-target failure isolation (one turret runs out of ammo)
//! - Undo through the invocation history
//!
//! Usage: `action_panel_demo [panel.toml]`

use std::any::TypeId;
use std::path::PathBuf;

use lilium_core::editor::{Inspectable, InvocationHistory, ObjectId};
use lilium_core::math::{Color, LayerMask};
use lilium_demos::scene::{Barrel, FireMode, Turret};
use lilium_inspector::ui::show_action_panel;
use lilium_inspector::{
    ActionPanel, ActionRegistry, ActionSpec, InspectorHost, InvokeReport, ObjectRef, PanelConfig,
    ParamEnum, ParamType, ParamValue, TypeKey,
};

// === Host ===

/// Invocation history plus the scene objects offered to object fields.
struct DemoHost {
    history: InvocationHistory,
    objects: Vec<ObjectRef>,
}

impl InspectorHost for DemoHost {
    fn record_undo(&mut self, target: &dyn Inspectable, label: &str) {
        self.history.record(target, label);
    }

    fn set_dirty(&mut self, target: &dyn Inspectable) {
        self.history.mark_dirty(target);
    }

    fn object_candidates(&self) -> Vec<ObjectRef> {
        self.objects.clone()
    }
}

// === Helpers ===

/// Runs one headless frame with the panel in a central panel.
fn render(
    ctx: &egui::Context,
    panel: &mut ActionPanel,
    registry: &ActionRegistry,
    targets: &mut [&mut dyn Inspectable],
    host: &mut DemoHost,
) -> Option<InvokeReport> {
    let mut report = None;
    let mut drawn = false;
    let _ = ctx.run(egui::RawInput::default(), |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| {
            if !drawn {
                report = show_action_panel(ui, panel, registry, targets, host);
                drawn = true;
            }
        });
    });
    report
}

fn selection(turrets: &mut [Turret]) -> Vec<&mut dyn Inspectable> {
    turrets
        .iter_mut()
        .map(|t| t as &mut dyn Inspectable)
        .collect()
}

fn find_action<'a>(registry: &'a ActionRegistry, name: &str) -> Option<&'a ActionSpec> {
    registry
        .discover(TypeId::of::<Turret>())
        .into_iter()
        .find(|a| a.name() == name)
}

fn print_turrets(turrets: &[Turret]) {
    for turret in turrets {
        log::info!(
            "  {} ammo={} fired={} mode={} tint={} lock_on={}",
            turret.name,
            turret.ammo,
            turret.shots_fired,
            FireMode::VARIANTS[turret.mode.index()],
            turret.tint.to_hex(),
            turret.lock_on.as_ref().map_or("None", |o| o.name.as_str()),
        );
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("panel.toml"));
    let config = PanelConfig::load_or_default(&config_path);

    let mut registry = ActionRegistry::new();
    registry.register::<Turret>();

    let mut panel = ActionPanel::new(config);
    let mut host = DemoHost {
        history: InvocationHistory::new(panel.config().max_undo),
        objects: vec![
            ObjectRef::new(ObjectId(100), "Player"),
            ObjectRef::new(ObjectId(101), "Boss"),
        ],
    };
    let ctx = egui::Context::default();

    // A selection without actions only gets the default inspector.
    let mut barrel = Barrel { id: ObjectId(50) };
    render(&ctx, &mut panel, &registry, &mut [&mut barrel], &mut host);

    let mut turrets = vec![
        Turret::new(1, "North Turret", 30),
        Turret::new(2, "East Turret", 1),
        Turret::new(3, "South Turret", 30),
    ];

    render(
        &ctx,
        &mut panel,
        &registry,
        &mut selection(&mut turrets),
        &mut host,
    );
    let view = panel.build_view(&registry, TypeId::of::<Turret>());
    if let Some(owner) = view.owner {
        log::info!("{} for {owner}:", view.title);
    }
    for action in &view.actions {
        match &action.reason {
            None => log::info!("  [{}] {}", action.label, action.signature),
            Some(reason) => log::info!("  [{}] disabled: {reason}", action.label),
        }
    }

    // Edit the cached arguments the way the panel fields would.
    let owner = TypeKey::of::<Turret>();
    if let Some(fire) = find_action(&registry, "fire") {
        panel.edit_param(owner, fire, 0, ParamValue::Int(3));
        panel.edit_param(owner, fire, 1, FireMode::Burst.into_value());
    }
    if let Some(configure) = find_action(&registry, "configure") {
        panel.edit_param(owner, configure, 0, Color::rgb(0.9, 0.2, 0.1).into_value());
        panel.edit_param(owner, configure, 1, LayerMask::layer(4).into_value());
        panel.edit_param(
            owner,
            configure,
            2,
            ParamValue::Object(host.objects.first().cloned()),
        );
    }

    for name in ["configure", "fire"] {
        let Some(action) = find_action(&registry, name) else {
            log::warn!("`{name}` is not registered");
            continue;
        };
        let report = panel.invoke(owner, action, &mut selection(&mut turrets), &mut host);
        log::info!(
            "`{}`: {}/{} succeeded",
            report.action,
            report.succeeded,
            report.targets
        );
        for failure in &report.failures {
            log::info!("  {failure}");
        }
    }
    print_turrets(&turrets);

    log::info!("History (most recent first):");
    for description in host.history.undo_descriptions() {
        log::info!("  {description}");
    }

    // One undo step per target that recorded `fire`.
    for _ in 0..turrets.len() {
        match host.history.undo(&mut selection(&mut turrets)) {
            Ok(label) => log::info!("Undid `{label}`"),
            Err(e) => log::warn!("Undo failed: {e}"),
        }
    }
    print_turrets(&turrets);
}
