//! Undo/redo history of inspector mutations.
//!
//! [`InvocationHistory`] keeps one [`UndoStep`] per target per mutation. A
//! step optionally carries a snapshot taken right before the mutation; undo
//! swaps that snapshot back in and keeps the replaced state for redo.
//! Recording a new step clears the redo stack (standard editor behavior).

use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use super::error::{EditError, EditResult};
use super::target::{Inspectable, ObjectId, StateSnapshot};

/// Default maximum number of undo steps.
pub const DEFAULT_MAX_UNDO: usize = 100;

/// A single recorded mutation of one target.
pub struct UndoStep {
    target: ObjectId,
    target_name: String,
    label: String,
    state: Option<StateSnapshot>,
}

impl UndoStep {
    pub fn target(&self) -> ObjectId {
        self.target
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// Short description shown in the edit menu (usually the action name).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether undoing this step can restore the target.
    pub fn is_restorable(&self) -> bool {
        self.state.is_some()
    }
}

impl fmt::Debug for UndoStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UndoStep")
            .field("target", &self.target)
            .field("label", &self.label)
            .field("restorable", &self.is_restorable())
            .finish()
    }
}

/// Undo/redo stack plus the set of targets modified since the last save.
///
/// The undo stack is a bounded [`VecDeque`] - when it exceeds `max_undo`,
/// the oldest step is dropped from the front. The redo stack is an
/// unbounded [`Vec`] (it can never grow larger than the undo stack was).
///
/// # Example
///
/// ```ignore
/// let mut history = InvocationHistory::new(50);
///
/// history.record(&spawner, "spawn_wave");
/// spawner.spawn_wave(3);
/// history.mark_dirty(&spawner);
///
/// history.undo(&mut [&mut spawner])?;
/// ```
pub struct InvocationHistory {
    undo_stack: VecDeque<UndoStep>,
    redo_stack: Vec<UndoStep>,
    max_undo: usize,
    dirty: BTreeSet<ObjectId>,
}

impl InvocationHistory {
    /// Creates a new empty history with the given maximum undo depth.
    pub fn new(max_undo: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_undo,
            dirty: BTreeSet::new(),
        }
    }

    /// Records an undo step for `target`, capturing its current state.
    ///
    /// Must be called before the target is mutated.
    pub fn record(&mut self, target: &dyn Inspectable, label: &str) {
        let step = UndoStep {
            target: target.object_id(),
            target_name: target.object_name(),
            label: label.to_owned(),
            state: target.capture_state(),
        };
        log::trace!("Recording undo step \"{label}\" for {}", step.target_name);

        self.redo_stack.clear();
        self.undo_stack.push_back(step);
        if self.undo_stack.len() > self.max_undo {
            self.undo_stack.pop_front();
        }
    }

    /// Flags `target` as modified since the last save.
    pub fn mark_dirty(&mut self, target: &dyn Inspectable) {
        self.dirty.insert(target.object_id());
    }

    /// Whether the object has unsaved modifications.
    pub fn is_dirty(&self, id: ObjectId) -> bool {
        self.dirty.contains(&id)
    }

    /// Objects with unsaved modifications, in id order.
    pub fn dirty_targets(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.dirty.iter().copied()
    }

    /// Clears the dirty flag of one object (after the host persisted it).
    pub fn mark_saved(&mut self, id: ObjectId) -> bool {
        self.dirty.remove(&id)
    }

    /// Clears every dirty flag.
    pub fn mark_all_saved(&mut self) {
        self.dirty.clear();
    }

    /// Undoes the most recent step and returns its label.
    ///
    /// The recorded target must be present in `targets`. On failure the
    /// step is put back so the stacks stay unchanged. A step whose target no
    /// longer captures state is applied once and then dropped instead of
    /// moving to the redo stack.
    pub fn undo(&mut self, targets: &mut [&mut dyn Inspectable]) -> EditResult<String> {
        let step = self.undo_stack.pop_back().ok_or(EditError::NothingToUndo)?;
        match swap_state(step, targets) {
            Ok(step) => {
                self.dirty.insert(step.target);
                let label = step.label.clone();
                if step.is_restorable() {
                    self.redo_stack.push(step);
                }
                Ok(label)
            }
            Err((step, err)) => {
                self.undo_stack.push_back(step);
                Err(err)
            }
        }
    }

    /// Redoes the most recently undone step and returns its label.
    pub fn redo(&mut self, targets: &mut [&mut dyn Inspectable]) -> EditResult<String> {
        let step = self.redo_stack.pop().ok_or(EditError::NothingToRedo)?;
        match swap_state(step, targets) {
            Ok(step) => {
                self.dirty.insert(step.target);
                let label = step.label.clone();
                if step.is_restorable() {
                    self.undo_stack.push_back(step);
                    if self.undo_stack.len() > self.max_undo {
                        self.undo_stack.pop_front();
                    }
                }
                Ok(label)
            }
            Err((step, err)) => {
                self.redo_stack.push(step);
                Err(err)
            }
        }
    }

    /// Returns `true` if there are steps that can be undone.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns `true` if there are steps that can be redone.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Undo step labels, most recent first.
    pub fn undo_descriptions(&self) -> impl Iterator<Item = &str> {
        self.undo_stack.iter().rev().map(|s| s.label.as_str())
    }

    /// Redo step labels, most recent first.
    pub fn redo_descriptions(&self) -> impl Iterator<Item = &str> {
        self.redo_stack.iter().rev().map(|s| s.label.as_str())
    }

    /// Undo steps, oldest first.
    pub fn undo_steps(&self) -> impl Iterator<Item = &UndoStep> {
        self.undo_stack.iter()
    }

    /// Returns the number of steps in the undo stack.
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Returns the number of steps in the redo stack.
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Returns the maximum undo depth.
    pub fn max_undo(&self) -> usize {
        self.max_undo
    }

    /// Drops all undo and redo steps. Dirty flags are kept.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for InvocationHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UNDO)
    }
}

impl fmt::Debug for InvocationHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvocationHistory")
            .field("undo_count", &self.undo_stack.len())
            .field("redo_count", &self.redo_stack.len())
            .field("max_undo", &self.max_undo)
            .field("dirty", &self.dirty.len())
            .finish()
    }
}

/// Restores the step's snapshot on its target and stores the replaced state
/// in the step, so the same step can travel back the other way.
fn swap_state(
    mut step: UndoStep,
    targets: &mut [&mut dyn Inspectable],
) -> Result<UndoStep, (UndoStep, EditError)> {
    let Some(target) = targets
        .iter_mut()
        .find(|t| t.object_id() == step.target)
    else {
        let err = EditError::TargetNotFound(step.target);
        return Err((step, err));
    };
    let Some(saved) = step.state.take() else {
        let err = EditError::NotRestorable(step.target);
        return Err((step, err));
    };

    let current = target.capture_state();
    if !target.restore_state(&saved) {
        log::warn!("{} rejected a snapshot for \"{}\"", step.target_name, step.label);
        step.state = Some(saved);
        let err = EditError::NotRestorable(step.target);
        return Err((step, err));
    }
    match current {
        Some(current) => step.state = Some(current),
        None => log::warn!(
            "{} stopped capturing state; dropping \"{}\" from the history",
            step.target_name,
            step.label
        ),
    }
    Ok(step)
}
