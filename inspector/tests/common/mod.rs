#![allow(dead_code)]

use lilium_core::editor::{Inspectable, ObjectId, StateSnapshot};
use lilium_core::math::{Bounds, Color, Curve, LayerMask, Rect, Vec2, Vec3, Vec4};
use lilium_inspector::{InspectorHost, InvocationFailure, ObjectRef, ParamEnum, actions};

#[derive(Debug, Clone, Copy, PartialEq, ParamEnum)]
pub enum Formation {
    Line,
    Wedge,
    Circle,
}

/// Not editable by the panel.
#[derive(Debug, Clone)]
pub struct Mesh;

#[derive(Debug, Clone)]
pub struct Spawner {
    pub id: u64,
    pub name: String,
    pub spawned: i32,
    pub formation: Formation,
    pub tint: Color,
    pub mask: LayerMask,
    pub target: Option<ObjectRef>,
    pub jammed: bool,
    pub calls: Vec<String>,
}

impl Spawner {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            name: format!("Spawner {id}"),
            spawned: 0,
            formation: Formation::Line,
            tint: Color::WHITE,
            mask: LayerMask::NOTHING,
            target: None,
            jammed: false,
            calls: Vec::new(),
        }
    }

    pub fn jammed(id: u64) -> Self {
        Self {
            jammed: true,
            ..Self::new(id)
        }
    }
}

impl Inspectable for Spawner {
    fn object_id(&self) -> ObjectId {
        ObjectId(self.id)
    }

    fn object_name(&self) -> String {
        self.name.clone()
    }

    fn capture_state(&self) -> Option<StateSnapshot> {
        Some(Box::new(self.clone()))
    }

    fn restore_state(&mut self, state: &StateSnapshot) -> bool {
        match state.downcast_ref::<Self>() {
            Some(saved) => {
                *self = saved.clone();
                true
            }
            None => false,
        }
    }
}

#[actions]
impl Spawner {
    #[action]
    pub fn reset(&mut self) {
        self.spawned = 0;
        self.calls.push("reset".into());
    }

    #[action("Spawn Wave")]
    pub fn spawn_wave(&mut self, enemy_count: i32, formation: Formation) -> Result<(), String> {
        if self.jammed {
            return Err(format!("{} is jammed", self.name));
        }
        self.spawned += enemy_count;
        self.formation = formation;
        self.calls.push("spawn_wave".into());
        Ok(())
    }

    #[action(label = "Rename")]
    pub(crate) fn rename(&mut self, name: &str) {
        self.name = name.to_owned();
    }

    #[action]
    fn paint(
        &mut self,
        tint: Color,
        area: Rect,
        falloff: Curve,
        mask: LayerMask,
        target: Option<ObjectRef>,
    ) {
        self.tint = tint;
        self.mask = mask;
        self.target = target;
        self.calls.push(format!("paint {}x{} {}", area.width, area.height, falloff.len()));
    }

    #[action]
    pub fn swap_slot(&mut self, slot: &mut i32, mesh: Mesh) {
        let _ = (slot, mesh);
    }

    #[action]
    pub fn attach(&mut self, mesh: Mesh, slot: &mut i32) {
        let _ = (mesh, slot);
    }

    #[action]
    pub fn create() -> Self {
        Self::new(0)
    }

    #[action]
    pub fn convert<T: Default>(&self) -> T {
        T::default()
    }

    #[action]
    pub fn overheat(&mut self) -> usize {
        if self.jammed {
            panic!("{} overheated", self.name);
        }
        self.calls.push("overheat".into());
        self.calls.len()
    }

    pub fn untagged(&self) -> i32 {
        self.spawned
    }
}

/// Type registered without any actions.
pub struct Rock {
    pub id: u64,
}

impl Inspectable for Rock {
    fn object_id(&self) -> ObjectId {
        ObjectId(self.id)
    }
}

#[actions]
impl Rock {
    pub fn weight(&self) -> f32 {
        1.0
    }
}

/// Covers the value kinds `Spawner` does not use.
#[derive(Debug, Default)]
pub struct Surveyor {
    pub id: u64,
    pub depth: u8,
    pub crew: u64,
    pub surveys: usize,
}

impl Inspectable for Surveyor {
    fn object_id(&self) -> ObjectId {
        ObjectId(self.id)
    }
}

#[actions]
impl Surveyor {
    #[action]
    #[allow(clippy::too_many_arguments)]
    pub fn survey(
        &mut self,
        area: Bounds,
        origin: Vec3,
        heading: Vec2,
        weights: Vec4,
        scale: f64,
        step: f32,
        visible: bool,
        depth: u8,
        crew: u64,
    ) {
        let _ = (area, origin, heading, weights, scale, step, visible);
        self.depth = depth;
        self.crew = crew;
        self.surveys += 1;
    }
}

/// Host that records every call.
#[derive(Default)]
pub struct RecordingHost {
    pub undo: Vec<(ObjectId, String)>,
    pub dirty: Vec<ObjectId>,
    pub failures: Vec<InvocationFailure>,
    pub default_inspector_draws: usize,
    pub candidates: Vec<ObjectRef>,
}

impl InspectorHost for RecordingHost {
    fn record_undo(&mut self, target: &dyn Inspectable, label: &str) {
        self.undo.push((target.object_id(), label.to_owned()));
    }

    fn set_dirty(&mut self, target: &dyn Inspectable) {
        self.dirty.push(target.object_id());
    }

    fn report_failure(&mut self, failure: &InvocationFailure) {
        self.failures.push(failure.clone());
    }

    fn object_candidates(&self) -> Vec<ObjectRef> {
        self.candidates.clone()
    }

    fn draw_default_inspector(&mut self, ui: &mut egui::Ui, targets: &mut [&mut dyn Inspectable]) {
        self.default_inspector_draws += 1;
        for target in targets.iter() {
            ui.label(target.object_name());
        }
    }
}
