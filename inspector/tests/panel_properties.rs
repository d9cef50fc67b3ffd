mod common;

use std::any::TypeId;

use common::{Formation, RecordingHost, Rock, Spawner};
use lilium_core::editor::{InvocationHistory, ObjectId};
use lilium_core::math::Curve;
use lilium_inspector::{
    ActionPanel, ActionRegistry, ActionSpec, CacheKey, InvokeError, ParamValue, TypeKey,
};

fn setup() -> (ActionRegistry, ActionPanel) {
    let mut registry = ActionRegistry::new();
    registry.register::<Spawner>();
    registry.register::<Rock>();
    (registry, ActionPanel::default())
}

fn find<'a>(registry: &'a ActionRegistry, name: &str) -> &'a ActionSpec {
    registry
        .discover(TypeId::of::<Spawner>())
        .into_iter()
        .find(|a| a.name() == name)
        .unwrap()
}

#[test]
fn type_without_actions_shows_no_section() {
    let (registry, mut panel) = setup();
    let view = panel.build_view(&registry, TypeId::of::<Rock>());
    assert!(view.is_empty());
    assert!(view.title.is_empty());
    assert!(panel.cache().is_empty());
}

#[test]
fn discovery_order_is_stable() {
    let (registry, mut panel) = setup();
    let ty = TypeId::of::<Spawner>();
    let first: Vec<String> = panel
        .build_view(&registry, ty)
        .actions
        .into_iter()
        .map(|a| a.signature)
        .collect();
    for _ in 0..3 {
        let again: Vec<String> = panel
            .build_view(&registry, ty)
            .actions
            .into_iter()
            .map(|a| a.signature)
            .collect();
        assert_eq!(first, again);
    }
}

#[test]
fn blocked_actions_are_rendered_disabled_with_reason() {
    let (registry, mut panel) = setup();
    let view = panel.build_view(&registry, TypeId::of::<Spawner>());
    let swap = view
        .actions
        .iter()
        .find(|a| a.signature_line.name == "swap_slot")
        .unwrap();
    assert!(!swap.enabled);
    assert!(!swap.params[0].editable);
    assert!(swap.params[1].editable);
    assert!(
        swap.reason
            .as_ref()
            .is_some_and(|r| r.to_string().starts_with("ref/out"))
    );
}

#[test]
fn cache_keys_are_per_type() {
    let (registry, _) = setup();
    let reset = find(&registry, "reset");
    let spawner_key = CacheKey::new(TypeKey::of::<Spawner>(), reset, 0);
    let rock_key = CacheKey::new(TypeKey::of::<Rock>(), reset, 0);
    assert_ne!(spawner_key, rock_key);
    assert_eq!(
        spawner_key,
        CacheKey::new(TypeKey::of::<Spawner>(), reset, 0)
    );
}

#[test]
fn entered_values_survive_redraws() {
    let (registry, mut panel) = setup();
    let ty = TypeId::of::<Spawner>();
    let owner = TypeKey::of::<Spawner>();
    let _ = panel.build_view(&registry, ty);

    let spawn = find(&registry, "spawn_wave");
    assert!(panel.edit_param(owner, spawn, 0, ParamValue::Int(12)));
    assert!(panel.edit_param(owner, spawn, 1, ParamValue::Enum(2)));

    for _ in 0..2 {
        let view = panel.build_view(&registry, ty);
        let spawn_view = view
            .actions
            .iter()
            .find(|a| a.label == "Spawn Wave")
            .unwrap();
        assert_eq!(spawn_view.params[0].value, ParamValue::Int(12));
        assert_eq!(spawn_view.params[1].value, ParamValue::Enum(2));
    }
}

#[test]
fn defaults_per_kind() {
    let (registry, mut panel) = setup();
    let owner = TypeKey::of::<Spawner>();

    let spawn = find(&registry, "spawn_wave");
    assert_eq!(
        panel.arguments(owner, spawn),
        [ParamValue::Int(0), ParamValue::Enum(0)]
    );

    let rename = find(&registry, "rename");
    assert_eq!(
        panel.arguments(owner, rename),
        [ParamValue::Text(String::new())]
    );

    let paint = find(&registry, "paint");
    let args = panel.arguments(owner, paint);
    assert_eq!(args[2], ParamValue::Curve(Curve::new()));
    assert_eq!(args[4], ParamValue::Object(None));
}

#[test]
fn one_failing_target_does_not_stop_the_others() {
    let (registry, mut panel) = setup();
    let owner = TypeKey::of::<Spawner>();
    let spawn = find(&registry, "spawn_wave");
    panel.edit_param(owner, spawn, 0, ParamValue::Int(3));

    let mut first = Spawner::new(1);
    let mut second = Spawner::jammed(2);
    let mut third = Spawner::new(3);
    let mut host = RecordingHost::default();

    let report = panel.invoke(
        owner,
        spawn,
        &mut [&mut first, &mut second, &mut third],
        &mut host,
    );

    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.failures[0].target, ObjectId(2));
    assert_eq!(host.failures.len(), 1);
    assert_eq!(host.failures[0].target_name, "Spawner 2");
    assert_eq!((first.spawned, second.spawned, third.spawned), (3, 0, 3));
    assert_eq!(host.dirty, [ObjectId(1), ObjectId(3)]);
}

#[test]
fn panicking_target_is_isolated() {
    let (registry, mut panel) = setup();
    let owner = TypeKey::of::<Spawner>();
    let overheat = find(&registry, "overheat");

    let mut first = Spawner::new(1);
    let mut second = Spawner::jammed(2);
    let mut third = Spawner::new(3);
    let mut host = RecordingHost::default();

    let report = panel.invoke(
        owner,
        overheat,
        &mut [&mut first, &mut second, &mut third],
        &mut host,
    );

    assert_eq!(report.succeeded, 2);
    assert!(report.failed_on(ObjectId(2)));
    assert_eq!(
        report.failures[0].error,
        InvokeError::Panicked("Spawner 2 overheated".into())
    );
    assert_eq!(first.calls, ["overheat"]);
    assert_eq!(third.calls, ["overheat"]);
}

#[test]
fn zero_parameter_action_runs_once_per_target() {
    let (registry, mut panel) = setup();
    let owner = TypeKey::of::<Spawner>();
    let reset = find(&registry, "reset");

    let mut spawners: Vec<Spawner> = (1..=4).map(Spawner::new).collect();
    let mut targets: Vec<&mut dyn lilium_core::editor::Inspectable> = spawners
        .iter_mut()
        .map(|s| s as &mut dyn lilium_core::editor::Inspectable)
        .collect();
    let mut host = RecordingHost::default();

    let report = panel.invoke(owner, reset, &mut targets, &mut host);

    assert_eq!(report.succeeded, 4);
    assert_eq!(host.undo.len(), 4);
    assert!(host.undo.iter().all(|(_, label)| label == "reset"));
    assert_eq!(host.dirty.len(), 4);
    assert!(spawners.iter().all(|s| s.calls == ["reset"]));
}

#[test]
fn shared_arguments_are_replayed_on_every_target() {
    let (registry, mut panel) = setup();
    let owner = TypeKey::of::<Spawner>();
    let spawn = find(&registry, "spawn_wave");
    panel.edit_param(owner, spawn, 0, ParamValue::Int(2));
    panel.edit_param(owner, spawn, 1, ParamValue::Enum(1));

    let mut a = Spawner::new(1);
    let mut b = Spawner::new(2);
    let mut history = InvocationHistory::default();
    panel.invoke(owner, spawn, &mut [&mut a, &mut b], &mut history);

    assert_eq!((a.spawned, b.spawned), (2, 2));
    assert_eq!((a.formation, b.formation), (Formation::Wedge, Formation::Wedge));
}

#[test]
fn history_undo_restores_targets() {
    let (registry, mut panel) = setup();
    let owner = TypeKey::of::<Spawner>();
    let spawn = find(&registry, "spawn_wave");
    panel.edit_param(owner, spawn, 0, ParamValue::Int(5));

    let mut a = Spawner::new(1);
    let mut b = Spawner::new(2);
    let mut history = InvocationHistory::default();
    panel.invoke(owner, spawn, &mut [&mut a, &mut b], &mut history);
    assert!(history.is_dirty(ObjectId(1)));
    assert_eq!(history.undo_count(), 2);

    // One undo step per target, most recent first.
    assert_eq!(history.undo(&mut [&mut a, &mut b]).unwrap(), "spawn_wave");
    assert_eq!(b.spawned, 0);
    assert_eq!(a.spawned, 5);
    history.undo(&mut [&mut a, &mut b]).unwrap();
    assert_eq!(a.spawned, 0);

    history.redo(&mut [&mut a, &mut b]).unwrap();
    assert_eq!(a.spawned, 5);
}

#[test]
fn blocked_action_is_not_invoked() {
    let (registry, mut panel) = setup();
    let owner = TypeKey::of::<Spawner>();
    let swap = find(&registry, "swap_slot");

    let mut a = Spawner::new(1);
    let mut host = RecordingHost::default();
    let report = panel.invoke(owner, swap, &mut [&mut a], &mut host);

    assert!(report.blocked.is_some());
    assert_eq!(report.succeeded, 0);
    assert!(host.undo.is_empty());
    assert!(host.dirty.is_empty());
}
