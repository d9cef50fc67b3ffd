//! Parameter value cache.
//!
//! Remembers the last value entered for each parameter of each action so
//! fields keep their contents across redraws. Entries are created lazily with
//! the parameter's default and are never removed; their number is bounded by
//! the declared actions.

use std::collections::HashMap;
use std::fmt;

use crate::action::ActionSpec;
use crate::param::{ParamDescriptor, ParamValue};
use crate::registry::TypeKey;

/// Identity of a cached parameter: owning type, action signature and position.
///
/// The signature includes the parameter types, so overloads with different
/// parameter lists never share entries. The owning type is part of the key,
/// so identical signatures on different types never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub owner: TypeKey,
    pub signature: String,
    pub index: usize,
}

impl CacheKey {
    pub fn new(owner: TypeKey, action: &ActionSpec, index: usize) -> Self {
        Self {
            owner,
            signature: action.signature(),
            index,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}", self.owner.name, self.signature, self.index)
    }
}

/// Last entered parameter values.
#[derive(Debug, Default)]
pub struct ParamCache {
    entries: HashMap<CacheKey, ParamValue>,
}

impl ParamCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    /// Returns the cached value, inserting the parameter's default on first use.
    ///
    /// A cached value that no longer fits the parameter kind (the type was
    /// re-registered with a different signature under the same name) is
    /// replaced by the default.
    pub fn resolve(&mut self, key: CacheKey, param: &ParamDescriptor) -> &ParamValue {
        let entry = self.entries.entry(key).or_insert_with_key(|key| {
            log::debug!("Parameter cache miss for {key}");
            param.default_value()
        });
        if !entry.fits(param.kind()) {
            *entry = param.default_value();
        }
        entry
    }

    /// Stores `value` unless it equals the cached one. Returns `true` if written.
    pub fn store(&mut self, key: CacheKey, value: ParamValue) -> bool {
        match self.entries.get_mut(&key) {
            Some(current) if *current == value => false,
            Some(current) => {
                *current = value;
                true
            }
            None => {
                self.entries.insert(key, value);
                true
            }
        }
    }

    /// Current argument list for `action` on `owner`, filling defaults as needed.
    pub fn args_for(&mut self, owner: TypeKey, action: &ActionSpec) -> Vec<ParamValue> {
        action
            .params()
            .iter()
            .enumerate()
            .map(|(index, param)| {
                self.resolve(CacheKey::new(owner, action, index), param)
                    .clone()
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CacheKey, &ParamValue)> {
        self.entries.iter()
    }
}
