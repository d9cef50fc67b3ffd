//! Action panel state and view model.
//!
//! [`ActionPanel`] owns the [`ParamCache`] and the [`PanelConfig`]. Each
//! refresh it builds a [`PanelView`] for the inspected type: one
//! [`ActionView`] per discovered action, with eligibility, signature line and
//! the current parameter values. The egui layer in [`crate::ui`] only draws
//! the view and feeds edits and clicks back through
//! [`edit_param`](ActionPanel::edit_param) and [`invoke`](ActionPanel::invoke).

use std::any::TypeId;

use lilium_core::editor::{AsAny, Inspectable};

use crate::action::{ActionSpec, BlockReason, Visibility};
use crate::cache::{CacheKey, ParamCache};
use crate::config::PanelConfig;
use crate::host::InspectorHost;
use crate::humanize::humanize;
use crate::invoke::{InvokeReport, invoke_on_targets};
use crate::param::{ParamKind, ParamValue, PassMode, integer_range};
use crate::registry::{ActionRegistry, TypeKey};

/// Read-only signature line drawn under the button.
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureLine {
    pub visibility: Visibility,
    pub return_type: String,
    pub name: String,
}

/// One parameter field.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamView {
    pub index: usize,
    /// Humanized parameter name.
    pub label: String,
    pub type_name: String,
    pub kind: ParamKind,
    pub value: ParamValue,
    /// `false` for `&mut` parameters.
    pub editable: bool,
}

/// One action in the panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionView {
    /// Identity of the action within its type.
    pub signature: String,
    pub label: String,
    pub enabled: bool,
    pub reason: Option<BlockReason>,
    pub signature_line: SignatureLine,
    pub params: Vec<ParamView>,
}

/// Everything the panel draws for one inspected type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelView {
    pub owner: Option<TypeKey>,
    pub title: String,
    pub actions: Vec<ActionView>,
}

impl PanelView {
    /// An empty view draws no action section at all.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// The action panel: cached parameter values plus configuration.
#[derive(Debug, Default)]
pub struct ActionPanel {
    cache: ParamCache,
    config: PanelConfig,
}

impl ActionPanel {
    pub fn new(config: PanelConfig) -> Self {
        Self {
            cache: ParamCache::new(),
            config,
        }
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut PanelConfig {
        &mut self.config
    }

    pub fn cache(&self) -> &ParamCache {
        &self.cache
    }

    /// Builds the view for `ty`, creating cache entries for new parameters.
    ///
    /// Unregistered types and types without discoverable actions give an
    /// empty view.
    pub fn build_view(&mut self, registry: &ActionRegistry, ty: TypeId) -> PanelView {
        let Some(owner) = registry.type_key(ty) else {
            return PanelView::default();
        };
        let actions: Vec<ActionView> = registry
            .discover(ty)
            .into_iter()
            .map(|action| self.action_view(owner, action))
            .collect();
        if actions.is_empty() {
            return PanelView::default();
        }

        PanelView {
            owner: Some(owner),
            title: self.config.section_title.clone(),
            actions,
        }
    }

    fn action_view(&mut self, owner: TypeKey, action: &ActionSpec) -> ActionView {
        let eligibility = action.can_invoke();
        let params = action
            .params()
            .iter()
            .enumerate()
            .map(|(index, param)| ParamView {
                index,
                label: humanize(param.name()),
                type_name: param.type_name().to_owned(),
                kind: *param.kind(),
                value: self
                    .cache
                    .resolve(CacheKey::new(owner, action, index), param)
                    .clone(),
                editable: param.pass() == PassMode::ByValue,
            })
            .collect();

        ActionView {
            signature: action.signature(),
            label: action.display_label(),
            enabled: eligibility.is_invocable(),
            reason: eligibility.reason().cloned(),
            signature_line: SignatureLine {
                visibility: action.visibility(),
                return_type: action.return_type().to_owned(),
                name: action.name().to_owned(),
            },
            params,
        }
    }

    /// Writes an edited value back to the cache if it differs from the cached one.
    ///
    /// Returns `true` if the cache changed.
    pub fn edit_param(
        &mut self,
        owner: TypeKey,
        action: &ActionSpec,
        index: usize,
        value: ParamValue,
    ) -> bool {
        let Some(param) = action.params().get(index) else {
            log::warn!("`{}` has no parameter {index}", action.qualified_name());
            return false;
        };
        let in_range = match (&value, integer_range(param.type_name())) {
            (ParamValue::Int(v), Some(range)) => range.contains(v),
            _ => true,
        };
        if !value.fits(param.kind()) || !in_range {
            log::warn!(
                "Rejected {} value for parameter `{}` of `{}`",
                param.kind(),
                param.name(),
                action.qualified_name()
            );
            return false;
        }
        self.cache.store(CacheKey::new(owner, action, index), value)
    }

    /// Current arguments of `action`, from the cache or the parameter defaults.
    pub fn arguments(&mut self, owner: TypeKey, action: &ActionSpec) -> Vec<ParamValue> {
        self.cache.args_for(owner, action)
    }

    /// Invokes `action` on every target with one shared argument set.
    pub fn invoke(
        &mut self,
        owner: TypeKey,
        action: &ActionSpec,
        targets: &mut [&mut dyn Inspectable],
        host: &mut dyn InspectorHost,
    ) -> InvokeReport {
        let args = self.arguments(owner, action);
        invoke_on_targets(action, &args, targets, host)
    }
}

/// Type shared by every target, or `None` for an empty or mixed selection.
pub fn inspected_type(targets: &[&mut dyn Inspectable]) -> Option<TypeId> {
    let (first, rest) = targets.split_first()?;
    let ty = (**first).as_any().type_id();
    rest.iter()
        .all(|target| (**target).as_any().type_id() == ty)
        .then_some(ty)
}
