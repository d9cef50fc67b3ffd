//! Math type aliases and the plain value types edited by the inspector.
//!
//! Vectors are nalgebra aliases (always f32). The remaining types are small
//! `Copy`/`Clone` structs with structural equality, so the inspector can
//! compare an edited value against the cached one before writing it back.

pub use nalgebra;

/// 2D vector (f32).
pub type Vec2 = nalgebra::Vector2<f32>;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// 4D vector (f32).
pub type Vec4 = nalgebra::Vector4<f32>;

// ===== Color =====

/// Linear RGBA color with f32 channels in `[0, 1]`.
///
/// The default is transparent black (all channels zero).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Builds a color from 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Channels as an array in `[r, g, b, a]` order.
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_array(rgba: [f32; 4]) -> Self {
        Self::rgba(rgba[0], rgba[1], rgba[2], rgba[3])
    }

    /// 8-bit channels, each clamped to `[0, 255]`.
    pub fn to_rgba8(self) -> [u8; 4] {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0) as u8;
        [
            channel(self.r),
            channel(self.g),
            channel(self.b),
            channel(self.a),
        ]
    }

    /// Uppercase `RRGGBBAA` hex string (no leading `#`).
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        format!("{r:02X}{g:02X}{b:02X}{a:02X}")
    }
}

// ===== Rect =====

/// Axis-aligned 2D rectangle given by its minimum corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        point.x >= min.x && point.x < max.x && point.y >= min.y && point.y < max.y
    }
}

// ===== Bounds =====

/// Axis-aligned 3D bounding box given by its center and half-size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub center: Vec3,
    pub extents: Vec3,
}

impl Bounds {
    pub fn new(center: Vec3, extents: Vec3) -> Self {
        Self { center, extents }
    }

    pub fn size(&self) -> Vec3 {
        self.extents * 2.0
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.extents
    }

    pub fn contains(&self, point: Vec3) -> bool {
        let (min, max) = (self.min(), self.max());
        (0..3).all(|i| point[i] >= min[i] && point[i] <= max[i])
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(Vec3::zeros(), Vec3::zeros())
    }
}

// ===== Curve =====

/// A single curve key.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
}

impl Keyframe {
    pub const fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

/// Piecewise-linear curve over keyframes sorted by time.
///
/// An empty curve is a valid value and evaluates to `0.0` everywhere.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Curve {
    keys: Vec<Keyframe>,
}

impl Curve {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a curve from arbitrary keys, sorting them by time.
    pub fn from_keys(keys: impl IntoIterator<Item = Keyframe>) -> Self {
        let mut curve = Self::new();
        for key in keys {
            curve.add_key(key);
        }
        curve
    }

    /// Straight line from `(0, 0)` to `(1, 1)`.
    pub fn linear() -> Self {
        Self::from_keys([Keyframe::new(0.0, 0.0), Keyframe::new(1.0, 1.0)])
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Inserts a key, keeping keys ordered by time. Returns its index.
    pub fn add_key(&mut self, key: Keyframe) -> usize {
        let index = self.keys.partition_point(|k| k.time <= key.time);
        self.keys.insert(index, key);
        index
    }

    pub fn remove_key(&mut self, index: usize) -> Option<Keyframe> {
        (index < self.keys.len()).then(|| self.keys.remove(index))
    }

    /// Replaces the key at `index` and restores time ordering.
    pub fn set_key(&mut self, index: usize, key: Keyframe) {
        if self.remove_key(index).is_some() {
            self.add_key(key);
        }
    }

    /// Samples the curve at `time`, clamping outside the key range.
    pub fn evaluate(&self, time: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };
        if time.is_nan() || time <= first.time {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }
        // NaN key times break the ordering, so the neighbours may be missing.
        let next = self.keys.partition_point(|k| k.time <= time);
        let prev = next.checked_sub(1).and_then(|i| self.keys.get(i));
        let (a, b) = match (prev, self.keys.get(next)) {
            (Some(a), Some(b)) => (*a, *b),
            (_, None) => return last.value,
            (None, Some(_)) => return first.value,
        };
        let span = b.time - a.time;
        if span.is_nan() || span <= f32::EPSILON {
            return b.value;
        }
        a.value + (b.value - a.value) * ((time - a.time) / span)
    }
}

// ===== LayerMask =====

/// 32-bit layer selection mask. Bit `n` selects layer `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NOTHING: Self = Self(0);
    pub const EVERYTHING: Self = Self(u32::MAX);

    /// Mask with only `layer` set. Layers outside `0..32` yield an empty mask.
    pub fn layer(layer: u32) -> Self {
        Self(1u32.checked_shl(layer).unwrap_or(0))
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, layer: u32) -> bool {
        self.0 & Self::layer(layer).0 != 0
    }

    pub fn with(self, layer: u32) -> Self {
        Self(self.0 | Self::layer(layer).0)
    }

    pub fn without(self, layer: u32) -> Self {
        Self(self.0 & !Self::layer(layer).0)
    }

    /// Number of selected layers.
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }
}
