//! Demo scene objects.

use std::fmt;

use lilium_core::editor::{Inspectable, ObjectId, StateSnapshot};
use lilium_core::math::{Color, Curve, LayerMask, Vec3};
use lilium_inspector::{ObjectRef, ParamEnum, actions};

#[derive(Debug, Clone, Copy, PartialEq, ParamEnum)]
pub enum FireMode {
    Single,
    Burst,
    Auto,
}

#[derive(Debug)]
pub struct OutOfAmmo {
    pub turret: String,
}

impl fmt::Display for OutOfAmmo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is out of ammo", self.turret)
    }
}

/// A turret that can be aimed, loaded and fired from the inspector.
#[derive(Debug, Clone)]
pub struct Turret {
    pub id: ObjectId,
    pub name: String,
    pub ammo: i32,
    pub aim: Vec3,
    pub mode: FireMode,
    pub tint: Color,
    pub targets: LayerMask,
    pub lock_on: Option<ObjectRef>,
    pub recoil: Curve,
    pub shots_fired: i32,
}

impl Turret {
    pub fn new(id: u64, name: &str, ammo: i32) -> Self {
        Self {
            id: ObjectId(id),
            name: name.to_owned(),
            ammo,
            aim: Vec3::z(),
            mode: FireMode::Single,
            tint: Color::WHITE,
            targets: LayerMask::NOTHING,
            lock_on: None,
            recoil: Curve::new(),
            shots_fired: 0,
        }
    }
}

impl Inspectable for Turret {
    fn object_id(&self) -> ObjectId {
        self.id
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
impl Turret {
    #[action("Fire!")]
    pub fn fire(&mut self, shots: i32, mode: FireMode) -> Result<(), OutOfAmmo> {
        let shots = match mode {
            FireMode::Single => shots.min(1),
            FireMode::Burst => shots.min(3),
            FireMode::Auto => shots,
        };
        if shots > self.ammo {
            return Err(OutOfAmmo {
                turret: self.name.clone(),
            });
        }
        self.ammo -= shots;
        self.shots_fired += shots;
        self.mode = mode;
        Ok(())
    }

    #[action]
    pub fn reload(&mut self) {
        self.ammo = 30;
    }

    #[action]
    pub fn aim_at(&mut self, direction: Vec3) {
        self.aim = direction.try_normalize(f32::EPSILON).unwrap_or(Vec3::z());
    }

    #[action]
    pub(crate) fn configure(
        &mut self,
        tint: Color,
        targets: LayerMask,
        lock_on: Option<ObjectRef>,
        recoil: Curve,
    ) {
        self.tint = tint;
        self.targets = targets;
        self.lock_on = lock_on;
        self.recoil = recoil;
    }

    #[action]
    pub fn rename(&mut self, name: &str) {
        self.name = name.to_owned();
    }

    #[action]
    pub fn swap_ammo(&mut self, other: &mut i32) {
        std::mem::swap(&mut self.ammo, other);
    }

    #[action]
    pub fn spawn() -> Self {
        Self::new(0, "Turret", 30)
    }
}

/// A passive object without actions.
#[derive(Debug)]
pub struct Barrel {
    pub id: ObjectId,
}

impl Inspectable for Barrel {
    fn object_id(&self) -> ObjectId {
        self.id
    }
}
