//! Action registry.
//!
//! Stores the actions of every registered type so the panel can look them up
//! by the [`TypeId`] of the inspected object. Types are registered during
//! setup, usually through the `#[actions]` macro which implements
//! [`HasActions`].

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;

use lilium_core::editor::short_type_name;

use crate::action::ActionSpec;

/// Identity of a registered type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeKey {
    pub id: TypeId,
    /// Fully-qualified type name.
    pub name: &'static str,
}

impl TypeKey {
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn short_name(&self) -> &'static str {
        short_type_name(self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Types that expose actions to the inspector.
///
/// Implemented by `#[actions]`. The returned list is in declaration order.
pub trait HasActions: 'static {
    fn actions() -> Vec<ActionSpec>;
}

struct TypeEntry {
    key: TypeKey,
    /// Declaration order.
    actions: Vec<ActionSpec>,
}

/// Registry of types with actions.
#[derive(Default)]
pub struct ActionRegistry {
    types: HashMap<TypeId, TypeEntry>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every action of `T`, replacing a previous registration.
    pub fn register<T: HasActions>(&mut self) {
        self.register_actions::<T>(T::actions());
    }

    /// Registers a hand-built action list for `T`, replacing a previous registration.
    pub fn register_actions<T: 'static>(&mut self, actions: Vec<ActionSpec>) {
        let key = TypeKey::of::<T>();
        log::debug!("Registered {} action(s) for {}", actions.len(), key.short_name());
        if self.types.insert(key.id, TypeEntry { key, actions }).is_some() {
            log::debug!("Replaced previous action table of {}", key.short_name());
        }
    }

    /// Appends one action to the table of `T`, creating the entry if needed.
    pub fn add_action<T: 'static>(&mut self, action: ActionSpec) {
        let key = TypeKey::of::<T>();
        self.types
            .entry(key.id)
            .or_insert_with(|| TypeEntry {
                key,
                actions: Vec::new(),
            })
            .actions
            .push(action);
    }

    /// Removes `T` from the registry. Returns `true` if it was registered.
    pub fn unregister<T: 'static>(&mut self) -> bool {
        self.types.remove(&TypeId::of::<T>()).is_some()
    }

    /// Discoverable actions of `ty`, in declaration order.
    ///
    /// Static, generic, abstract and compiler-generated members are skipped.
    /// Unregistered types have no actions.
    pub fn discover(&self, ty: TypeId) -> Vec<&ActionSpec> {
        self.declared_actions(ty)
            .iter()
            .filter(|action| action.is_discoverable())
            .collect()
    }

    /// Every registered action of `ty`, discoverable or not.
    pub fn declared_actions(&self, ty: TypeId) -> &[ActionSpec] {
        self.types
            .get(&ty)
            .map(|entry| entry.actions.as_slice())
            .unwrap_or(&[])
    }

    pub fn type_key(&self, ty: TypeId) -> Option<TypeKey> {
        self.types.get(&ty).map(|entry| entry.key)
    }

    /// Finds a discoverable action of `ty` by its [`signature`](ActionSpec::signature).
    pub fn find(&self, ty: TypeId, signature: &str) -> Option<&ActionSpec> {
        self.discover(ty)
            .into_iter()
            .find(|action| action.signature() == signature)
    }

    pub fn contains(&self, ty: TypeId) -> bool {
        self.types.contains_key(&ty)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
