//! Parameter value model.
//!
//! [`ParamKind`] is the closed set of value kinds the panel can edit and
//! [`ParamValue`] the matching tagged union stored in the
//! [`ParamCache`](crate::ParamCache). Rust types opt in by implementing
//! [`ParamType`]; enums derive it through `#[derive(ParamEnum)]`.
//!
//! # Tag resolution for generated code
//!
//! The `#[actions]` macro cannot know whether a parameter type implements
//! [`ParamType`]. It wraps the type in a [`Probe`] and relies on Rust's
//! method resolution order: `(&Probe::<T>::new()).describe(..)` resolves to
//! [`SupportedParam`] when `T: ParamType` (no autoref needed) and falls back
//! to [`UnsupportedParam`] otherwise (one extra autoref).

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::RangeInclusive;

use lilium_core::editor::ObjectId;
use lilium_core::math::{Bounds, Color, Curve, LayerMask, Rect, Vec2, Vec3, Vec4};

use crate::invoke::InvokeError;

/// Semantic type tag of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Int,
    Float,
    Double,
    Bool,
    Text,
    Vec2,
    Vec3,
    Vec4,
    Color,
    Rect,
    Bounds,
    Curve,
    LayerMask,
    /// Fieldless enum; the value is the variant index.
    Enum {
        type_name: &'static str,
        variants: &'static [&'static str],
    },
    /// Nullable reference to a host object.
    Object,
    /// Any type the panel cannot edit. Disables the whole action.
    Unsupported,
}

impl ParamKind {
    /// Short lowercase name of the tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Int => "integer",
            Self::Float => "float",
            Self::Double => "double",
            Self::Bool => "boolean",
            Self::Text => "text",
            Self::Vec2 => "vector2",
            Self::Vec3 => "vector3",
            Self::Vec4 => "vector4",
            Self::Color => "color",
            Self::Rect => "rect",
            Self::Bounds => "bounds",
            Self::Curve => "curve",
            Self::LayerMask => "layer mask",
            Self::Enum { .. } => "enum",
            Self::Object => "object reference",
            Self::Unsupported => "unsupported",
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }

    /// Value used when nothing has been entered yet.
    ///
    /// Enums start at their first variant, object references are absent and
    /// curves are empty (never absent).
    pub fn default_value(&self) -> ParamValue {
        match self {
            Self::Int => ParamValue::Int(0),
            Self::Float => ParamValue::Float(0.0),
            Self::Double => ParamValue::Double(0.0),
            Self::Bool => ParamValue::Bool(false),
            Self::Text => ParamValue::Text(String::new()),
            Self::Vec2 => ParamValue::Vec2(Vec2::zeros()),
            Self::Vec3 => ParamValue::Vec3(Vec3::zeros()),
            Self::Vec4 => ParamValue::Vec4(Vec4::zeros()),
            Self::Color => ParamValue::Color(Color::default()),
            Self::Rect => ParamValue::Rect(Rect::default()),
            Self::Bounds => ParamValue::Bounds(Bounds::default()),
            Self::Curve => ParamValue::Curve(Curve::new()),
            Self::LayerMask => ParamValue::LayerMask(LayerMask::NOTHING),
            Self::Enum { .. } => ParamValue::Enum(0),
            Self::Object => ParamValue::Object(None),
            Self::Unsupported => ParamValue::Unsupported,
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enum { type_name, .. } => write!(f, "enum {type_name}"),
            other => f.write_str(other.name()),
        }
    }
}

/// Reference to an object owned by the host.
///
/// Equality is identity: two references are equal when they point at the
/// same [`ObjectId`], whatever their display names.
#[derive(Debug, Clone)]
pub struct ObjectRef {
    pub id: ObjectId,
    pub name: String,
}

impl ObjectRef {
    pub fn new(id: ObjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ObjectRef {}

impl Hash for ObjectRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A parameter value, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Int(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    Text(String),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Color(Color),
    Rect(Rect),
    Bounds(Bounds),
    Curve(Curve),
    LayerMask(LayerMask),
    Enum(usize),
    Object(Option<ObjectRef>),
    Unsupported,
}

impl ParamValue {
    /// Whether this value can stand for a parameter of `kind`.
    pub fn fits(&self, kind: &ParamKind) -> bool {
        match (self, kind) {
            (Self::Enum(index), ParamKind::Enum { variants, .. }) => *index < variants.len(),
            (Self::Int(_), ParamKind::Int)
            | (Self::Float(_), ParamKind::Float)
            | (Self::Double(_), ParamKind::Double)
            | (Self::Bool(_), ParamKind::Bool)
            | (Self::Text(_), ParamKind::Text)
            | (Self::Vec2(_), ParamKind::Vec2)
            | (Self::Vec3(_), ParamKind::Vec3)
            | (Self::Vec4(_), ParamKind::Vec4)
            | (Self::Color(_), ParamKind::Color)
            | (Self::Rect(_), ParamKind::Rect)
            | (Self::Bounds(_), ParamKind::Bounds)
            | (Self::Curve(_), ParamKind::Curve)
            | (Self::LayerMask(_), ParamKind::LayerMask)
            | (Self::Object(_), ParamKind::Object)
            | (Self::Unsupported, ParamKind::Unsupported) => true,
            _ => false,
        }
    }
}

/// How a parameter is passed to the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PassMode {
    /// Owned value or shared borrow.
    #[default]
    ByValue,
    /// `&mut T`: the operation could write back into the argument.
    /// Not supported by the panel.
    ByMutRef,
}

/// One formal parameter of an action.
#[derive(Debug, Clone)]
pub struct ParamDescriptor {
    name: String,
    type_name: String,
    kind: ParamKind,
    pass: PassMode,
    default: fn(&ParamKind) -> ParamValue,
}

impl ParamDescriptor {
    /// Describes a by-value parameter of a known kind.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            kind,
            pass: PassMode::ByValue,
            default: ParamKind::default_value,
        }
    }

    /// Describes a by-value parameter of Rust type `T`.
    pub fn of<T: ParamType>(name: impl Into<String>) -> Self {
        let short = lilium_core::editor::short_type_name(std::any::type_name::<T>());
        Self {
            default: |_| T::default_value(),
            ..Self::new(name, short, T::kind())
        }
    }

    /// Describes a parameter the panel cannot edit.
    pub fn unsupported(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(name, type_name, ParamKind::Unsupported)
    }

    /// Marks the parameter as passed by `&mut` reference.
    pub fn by_mut_ref(mut self) -> Self {
        self.pass = PassMode::ByMutRef;
        self
    }

    pub fn with_pass(mut self, pass: PassMode) -> Self {
        self.pass = pass;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type as written in the signature.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn kind(&self) -> &ParamKind {
        &self.kind
    }

    pub fn pass(&self) -> PassMode {
        self.pass
    }

    pub fn is_by_mut_ref(&self) -> bool {
        self.pass == PassMode::ByMutRef
    }

    /// Fresh default value for this parameter.
    pub fn default_value(&self) -> ParamValue {
        (self.default)(&self.kind)
    }
}

/// Rust types that can be edited as action parameters.
pub trait ParamType: Sized + 'static {
    /// Semantic tag of the type.
    fn kind() -> ParamKind;

    /// Value shown before the user entered anything.
    fn default_value() -> ParamValue {
        Self::kind().default_value()
    }

    /// Converts a cached value back to the Rust type.
    fn from_value(value: &ParamValue) -> Option<Self>;

    fn into_value(self) -> ParamValue;
}

macro_rules! impl_param_type {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ParamType for $ty {
                fn kind() -> ParamKind {
                    ParamKind::$variant
                }

                fn from_value(value: &ParamValue) -> Option<Self> {
                    match value {
                        ParamValue::$variant(v) => Some(v.clone()),
                        _ => None,
                    }
                }

                fn into_value(self) -> ParamValue {
                    ParamValue::$variant(self)
                }
            }
        )*
    };
}

impl_param_type! {
    i64 => Int,
    f32 => Float,
    f64 => Double,
    bool => Bool,
    String => Text,
    Vec2 => Vec2,
    Vec3 => Vec3,
    Vec4 => Vec4,
    Color => Color,
    Rect => Rect,
    Bounds => Bounds,
    Curve => Curve,
    LayerMask => LayerMask,
}

/// Every other integer width shares the `i64` field and converts with a
/// range check on the way back.
macro_rules! impl_int_param_type {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ParamType for $ty {
                fn kind() -> ParamKind {
                    ParamKind::Int
                }

                fn from_value(value: &ParamValue) -> Option<Self> {
                    match value {
                        ParamValue::Int(v) => Self::try_from(*v).ok(),
                        _ => None,
                    }
                }

                fn into_value(self) -> ParamValue {
                    ParamValue::Int(i64::try_from(self).unwrap_or(i64::MAX))
                }
            }
        )*
    };
}

impl_int_param_type!(i8, i16, i32, isize, u8, u16, u32, u64, usize);

/// Representable range of a primitive integer type, by its spelled name.
///
/// `None` for non-integer names and for `i64`, whose range is the whole
/// [`ParamValue::Int`] domain.
pub fn integer_range(type_name: &str) -> Option<RangeInclusive<i64>> {
    let range = match type_name.trim_start_matches('&').trim() {
        "i8" => i64::from(i8::MIN)..=i64::from(i8::MAX),
        "i16" => i64::from(i16::MIN)..=i64::from(i16::MAX),
        "i32" => i64::from(i32::MIN)..=i64::from(i32::MAX),
        "isize" => {
            i64::try_from(isize::MIN).unwrap_or(i64::MIN)..=i64::try_from(isize::MAX).unwrap_or(i64::MAX)
        }
        "u8" => 0..=i64::from(u8::MAX),
        "u16" => 0..=i64::from(u16::MAX),
        "u32" => 0..=i64::from(u32::MAX),
        "u64" | "usize" => 0..=i64::MAX,
        _ => return None,
    };
    Some(range)
}

impl ParamType for Option<ObjectRef> {
    fn kind() -> ParamKind {
        ParamKind::Object
    }

    fn from_value(value: &ParamValue) -> Option<Self> {
        match value {
            ParamValue::Object(obj) => Some(obj.clone()),
            _ => None,
        }
    }

    fn into_value(self) -> ParamValue {
        ParamValue::Object(self)
    }
}

/// Fieldless enums usable as parameters.
///
/// Derive it with `#[derive(Clone, Copy, ParamEnum)]`; the derive also
/// implements [`ParamType`]. The zero value is the first variant.
pub trait ParamEnum: Copy + 'static {
    const TYPE_NAME: &'static str;
    const VARIANTS: &'static [&'static str];

    /// Position of `self` in [`VARIANTS`](Self::VARIANTS).
    fn index(self) -> usize;

    fn from_index(index: usize) -> Option<Self>;
}

/// [`ParamType::kind`] for a [`ParamEnum`].
pub fn enum_kind<E: ParamEnum>() -> ParamKind {
    ParamKind::Enum {
        type_name: E::TYPE_NAME,
        variants: E::VARIANTS,
    }
}

/// [`ParamType::from_value`] for a [`ParamEnum`].
pub fn enum_from_value<E: ParamEnum>(value: &ParamValue) -> Option<E> {
    match value {
        ParamValue::Enum(index) => E::from_index(*index),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Probes used by generated code
// ---------------------------------------------------------------------------

/// Zero-sized stand-in for a parameter type `T` at a macro expansion site.
pub struct Probe<T>(PhantomData<fn() -> T>);

impl<T> Probe<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Probe<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolution for parameter types implementing [`ParamType`].
pub trait SupportedParam {
    type Value;

    fn describe(&self, name: &str, type_name: &str, pass: PassMode) -> ParamDescriptor;

    fn extract(&self, args: &[ParamValue], index: usize) -> Result<Self::Value, InvokeError>;
}

impl<T: ParamType> SupportedParam for Probe<T> {
    type Value = T;

    fn describe(&self, name: &str, type_name: &str, pass: PassMode) -> ParamDescriptor {
        ParamDescriptor {
            name: name.to_owned(),
            type_name: type_name.to_owned(),
            ..ParamDescriptor::of::<T>(name)
        }
        .with_pass(pass)
    }

    fn extract(&self, args: &[ParamValue], index: usize) -> Result<T, InvokeError> {
        args.get(index)
            .and_then(T::from_value)
            .ok_or(InvokeError::ArgumentMismatch {
                index,
                expected: T::kind(),
            })
    }
}

/// Fallback resolution for every other parameter type.
pub trait UnsupportedParam {
    type Value;

    fn describe(&self, name: &str, type_name: &str, pass: PassMode) -> ParamDescriptor;

    fn extract(&self, args: &[ParamValue], index: usize) -> Result<Self::Value, InvokeError>;
}

impl<T> UnsupportedParam for &Probe<T> {
    type Value = T;

    fn describe(&self, name: &str, type_name: &str, pass: PassMode) -> ParamDescriptor {
        ParamDescriptor::unsupported(name, type_name).with_pass(pass)
    }

    fn extract(&self, _args: &[ParamValue], index: usize) -> Result<T, InvokeError> {
        Err(InvokeError::UnsupportedArgument { index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Mode {
        Idle,
        Patrol,
    }

    impl ParamEnum for Mode {
        const TYPE_NAME: &'static str = "Mode";
        const VARIANTS: &'static [&'static str] = &["Idle", "Patrol"];

        fn index(self) -> usize {
            self as usize
        }

        fn from_index(index: usize) -> Option<Self> {
            match index {
                0 => Some(Self::Idle),
                1 => Some(Self::Patrol),
                _ => None,
            }
        }
    }

    impl ParamType for Mode {
        fn kind() -> ParamKind {
            enum_kind::<Self>()
        }

        fn from_value(value: &ParamValue) -> Option<Self> {
            enum_from_value(value)
        }

        fn into_value(self) -> ParamValue {
            ParamValue::Enum(self.index())
        }
    }

    struct Opaque;

    #[test]
    fn defaults_per_kind() {
        assert_eq!(i32::default_value(), ParamValue::Int(0));
        assert_eq!(String::default_value(), ParamValue::Text(String::new()));
        assert_eq!(<Option<ObjectRef>>::default_value(), ParamValue::Object(None));
        assert_eq!(Curve::default_value(), ParamValue::Curve(Curve::new()));
        assert_eq!(LayerMask::default_value(), ParamValue::LayerMask(LayerMask(0)));
        assert_eq!(Mode::default_value(), ParamValue::Enum(0));
    }

    #[test]
    fn integer_widths_share_the_int_kind() {
        assert_eq!(u8::kind(), ParamKind::Int);
        assert_eq!(usize::kind(), ParamKind::Int);
        assert_eq!(u32::MAX.into_value(), ParamValue::Int(4_294_967_295));
        assert_eq!(u64::MAX.into_value(), ParamValue::Int(i64::MAX));
        assert_eq!(u8::from_value(&ParamValue::Int(255)), Some(255));
        assert_eq!(u8::from_value(&ParamValue::Int(256)), None);
        assert_eq!(u32::from_value(&ParamValue::Int(-1)), None);
        assert_eq!(i64::from_value(&ParamValue::Int(-1)), Some(-1));
    }

    #[test]
    fn integer_ranges_by_name() {
        assert_eq!(integer_range("u8"), Some(0..=255));
        assert_eq!(integer_range("&i16"), Some(-32768..=32767));
        assert_eq!(integer_range("usize"), Some(0..=i64::MAX));
        assert_eq!(integer_range("i64"), None);
        assert_eq!(integer_range("Curve"), None);
    }

    #[test]
    fn value_conversions() {
        assert_eq!(i32::from_value(&ParamValue::Int(7)), Some(7));
        assert_eq!(i32::from_value(&ParamValue::Int(i64::from(i32::MAX) + 1)), None);
        assert_eq!(i32::from_value(&ParamValue::Float(7.0)), None);
        assert_eq!(Mode::from_value(&ParamValue::Enum(1)), Some(Mode::Patrol));
        assert_eq!(Mode::from_value(&ParamValue::Enum(5)), None);
        assert_eq!(Color::WHITE.into_value(), ParamValue::Color(Color::WHITE));
    }

    #[test]
    fn fits_matches_kind() {
        let mode = enum_kind::<Mode>();
        assert!(ParamValue::Enum(1).fits(&mode));
        assert!(!ParamValue::Enum(2).fits(&mode));
        assert!(ParamValue::Object(None).fits(&ParamKind::Object));
        assert!(!ParamValue::Int(1).fits(&ParamKind::Float));
        assert!(ParamValue::Unsupported.fits(&ParamKind::Unsupported));
    }

    #[test]
    fn object_refs_compare_by_identity() {
        let a = ObjectRef::new(ObjectId(1), "Crate");
        let renamed = ObjectRef::new(ObjectId(1), "Crate (1)");
        let b = ObjectRef::new(ObjectId(2), "Crate");
        assert_eq!(a, renamed);
        assert_ne!(a, b);
        assert_eq!(ParamValue::Object(None), ParamValue::Object(None));
        assert_ne!(ParamValue::Object(Some(a)), ParamValue::Object(None));
    }

    #[test]
    fn probe_resolves_supported_types() {
        let desc = (&Probe::<f32>::new()).describe("speed", "f32", PassMode::ByValue);
        assert_eq!(desc.kind(), &ParamKind::Float);
        assert_eq!(desc.type_name(), "f32");
        assert_eq!(desc.default_value(), ParamValue::Float(0.0));

        let value = (&Probe::<f32>::new()).extract(&[ParamValue::Float(2.5)], 0);
        assert_eq!(value, Ok(2.5));
    }

    #[test]
    fn probe_falls_back_for_unknown_types() {
        let desc = (&Probe::<Opaque>::new()).describe("thing", "Opaque", PassMode::ByValue);
        assert_eq!(desc.kind(), &ParamKind::Unsupported);
        assert_eq!(desc.default_value(), ParamValue::Unsupported);

        let value = (&Probe::<Opaque>::new()).extract(&[], 3);
        assert!(matches!(value, Err(InvokeError::UnsupportedArgument { index: 3 })));
    }

    #[test]
    fn probe_extract_reports_mismatch() {
        let value = (&Probe::<i32>::new()).extract(&[ParamValue::Bool(true)], 0);
        assert_eq!(
            value,
            Err(InvokeError::ArgumentMismatch {
                index: 0,
                expected: ParamKind::Int,
            })
        );
    }

    #[test]
    fn descriptor_of_uses_short_type_name() {
        let desc = ParamDescriptor::of::<Mode>("mode");
        assert_eq!(desc.type_name(), "Mode");
        assert_eq!(desc.pass(), PassMode::ByValue);
        assert!(desc.by_mut_ref().is_by_mut_ref());
    }
}
