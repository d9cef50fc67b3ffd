//! Inspectable targets.

use std::any::Any;
use std::fmt;

/// Helper trait for downcasting trait objects to concrete types.
///
/// Automatically implemented for all `'static` types. The inspector uses
/// [`as_any_mut`](Self::as_any_mut) on a `&mut dyn Inspectable` to reach the
/// concrete type an action was registered for.
pub trait AsAny: 'static {
    /// Returns a reference to `self` as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns a mutable reference to `self` as `&mut dyn Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Fully-qualified name of the concrete type.
    fn type_name(&self) -> &'static str;
}

impl<T: 'static> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Host-assigned identity of an inspectable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque captured state of a target, produced by [`Inspectable::capture_state`].
pub type StateSnapshot = Box<dyn Any + Send>;

/// An object that can be selected in the inspector and mutated by it.
///
/// Only [`object_id`](Self::object_id) is required. Types that want real
/// undo support override [`capture_state`](Self::capture_state) and
/// [`restore_state`](Self::restore_state), typically by cloning themselves:
///
/// ```ignore
/// impl Inspectable for Spawner {
///     fn object_id(&self) -> ObjectId {
///         self.id
///     }
///
///     fn capture_state(&self) -> Option<StateSnapshot> {
///         Some(Box::new(self.clone()))
///     }
///
///     fn restore_state(&mut self, state: &StateSnapshot) -> bool {
///         match state.downcast_ref::<Self>() {
///             Some(saved) => {
///                 *self = saved.clone();
///                 true
///             }
///             None => false,
///         }
///     }
/// }
/// ```
pub trait Inspectable: AsAny {
    /// Identity used for undo records, dirty tracking and diagnostics.
    fn object_id(&self) -> ObjectId;

    /// Human-readable name for logs and history listings.
    ///
    /// Defaults to the short type name followed by the object id.
    fn object_name(&self) -> String {
        format!("{} {}", short_type_name(self.type_name()), self.object_id())
    }

    /// Captures the current state so it can be restored by undo.
    ///
    /// Default: `None` (undo steps for this target are display-only).
    fn capture_state(&self) -> Option<StateSnapshot> {
        None
    }

    /// Restores a state previously produced by [`capture_state`](Self::capture_state).
    ///
    /// Returns `false` if the snapshot was not understood.
    fn restore_state(&mut self, _state: &StateSnapshot) -> bool {
        false
    }
}

/// Extracts the short type name from a fully-qualified Rust type path.
///
/// e.g. `"game::enemies::Spawner"` → `"Spawner"`. Generic arguments are kept.
pub fn short_type_name(full: &str) -> &str {
    let path_end = full.find('<').unwrap_or(full.len());
    match full[..path_end].rfind("::") {
        Some(pos) => &full[pos + 2..],
        None => full,
    }
}
