//! Action metadata and eligibility.
//!
//! An [`ActionSpec`] is one registered operation on a target type: its
//! name, optional label override, declared signature and a type-erased
//! invoker. Specs are normally produced by the `#[actions]` macro through
//! [`ActionSpec::builder`], but can be assembled by hand as well.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use lilium_core::editor::short_type_name;

use crate::humanize::humanize;
use crate::invoke::InvokeError;
use crate::param::{ParamDescriptor, ParamValue};

/// Accessibility tier of the operation. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    Public,
    /// `pub(crate)`
    Crate,
    /// `pub(super)`, `pub(in path)`
    Restricted,
    #[default]
    Private,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "pub",
            Self::Crate => "pub(crate)",
            Self::Restricted => "pub(restricted)",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural facts about the member that exclude it from discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemberFlags {
    /// No `self` receiver.
    pub is_static: bool,
    /// Has type, const or explicit lifetime parameters.
    pub is_generic: bool,
    /// Declared without a body (trait requirement).
    pub is_abstract: bool,
    /// Generated by the compiler or a macro rather than written by hand.
    pub is_special: bool,
}

impl MemberFlags {
    pub fn is_discoverable(&self) -> bool {
        !(self.is_static || self.is_generic || self.is_abstract || self.is_special)
    }
}

/// Type-erased invocation closure.
///
/// Receives the target as `&mut dyn Any` and the assembled arguments in
/// declared order.
pub type Invoker = Box<dyn Fn(&mut dyn Any, &[ParamValue]) -> Result<(), InvokeError> + Send + Sync>;

/// Why an action cannot be invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockReason {
    /// A parameter is passed by `&mut`.
    ByRefParameter { index: usize, name: String },
    /// A parameter type has no editor field.
    UnsupportedType {
        index: usize,
        name: String,
        type_name: String,
    },
    /// The action was registered without an invoker.
    NoInvoker,
}

impl BlockReason {
    /// Index of the offending parameter, if any.
    pub fn param_index(&self) -> Option<usize> {
        match self {
            Self::ByRefParameter { index, .. } | Self::UnsupportedType { index, .. } => Some(*index),
            Self::NoInvoker => None,
        }
    }
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByRefParameter { name, .. } => {
                write!(f, "ref/out parameters are not supported: `{name}` is passed by &mut")
            }
            Self::UnsupportedType { type_name, .. } => {
                write!(f, "Unsupported parameter type: {type_name}")
            }
            Self::NoInvoker => f.write_str("operation has no invoker"),
        }
    }
}

/// Result of [`ActionSpec::can_invoke`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    Invocable,
    Blocked(BlockReason),
}

impl Eligibility {
    pub fn is_invocable(&self) -> bool {
        matches!(self, Self::Invocable)
    }

    pub fn reason(&self) -> Option<&BlockReason> {
        match self {
            Self::Invocable => None,
            Self::Blocked(reason) => Some(reason),
        }
    }
}

/// A registered operation on a target type.
pub struct ActionSpec {
    name: String,
    label: Option<String>,
    declared_by: &'static str,
    visibility: Visibility,
    return_type: String,
    params: Vec<ParamDescriptor>,
    flags: MemberFlags,
    invoker: Option<Invoker>,
}

impl ActionSpec {
    /// Starts building an action for an operation on `T`.
    pub fn builder<T: 'static>(name: impl Into<String>) -> ActionBuilder<T> {
        ActionBuilder {
            spec: ActionSpec {
                name: name.into(),
                label: None,
                declared_by: short_type_name(std::any::type_name::<T>()),
                visibility: Visibility::default(),
                return_type: "()".to_owned(),
                params: Vec::new(),
                flags: MemberFlags::default(),
                invoker: None,
            },
            _marker: PhantomData,
        }
    }

    /// Operation name as declared.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Button text: the label override unless blank, otherwise the humanized name.
    pub fn display_label(&self) -> String {
        match self.label.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label.to_owned(),
            _ => humanize(&self.name),
        }
    }

    pub fn declared_by(&self) -> &'static str {
        self.declared_by
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn return_type(&self) -> &str {
        &self.return_type
    }

    pub fn params(&self) -> &[ParamDescriptor] {
        &self.params
    }

    pub fn flags(&self) -> MemberFlags {
        self.flags
    }

    /// `name(type, type, ...)`. Unique per overload within a type.
    pub fn signature(&self) -> String {
        let types: Vec<&str> = self.params.iter().map(ParamDescriptor::type_name).collect();
        format!("{}({})", self.name, types.join(", "))
    }

    /// `Type::name(type, ...)`.
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.declared_by, self.signature())
    }

    /// Whether discovery lists this action.
    pub fn is_discoverable(&self) -> bool {
        self.flags.is_discoverable()
    }

    /// Checks every parameter in order; the first failure wins.
    pub fn can_invoke(&self) -> Eligibility {
        for (index, param) in self.params.iter().enumerate() {
            if param.is_by_mut_ref() {
                return Eligibility::Blocked(BlockReason::ByRefParameter {
                    index,
                    name: param.name().to_owned(),
                });
            }
            if !param.kind().is_supported() {
                return Eligibility::Blocked(BlockReason::UnsupportedType {
                    index,
                    name: param.name().to_owned(),
                    type_name: param.type_name().to_owned(),
                });
            }
        }
        if self.invoker.is_none() {
            return Eligibility::Blocked(BlockReason::NoInvoker);
        }
        Eligibility::Invocable
    }

    /// Runs the operation against one target.
    ///
    /// Does not check eligibility and does not catch panics; see
    /// [`invoke_on_targets`](crate::invoke::invoke_on_targets).
    pub fn call(&self, target: &mut dyn Any, args: &[ParamValue]) -> Result<(), InvokeError> {
        match &self.invoker {
            Some(invoker) => invoker(target, args),
            None => Err(InvokeError::NotInvocable(BlockReason::NoInvoker.to_string())),
        }
    }
}

impl fmt::Debug for ActionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionSpec")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("declared_by", &self.declared_by)
            .field("visibility", &self.visibility)
            .field("return_type", &self.return_type)
            .field("params", &self.params)
            .field("flags", &self.flags)
            .field("has_invoker", &self.invoker.is_some())
            .finish()
    }
}

/// Builder returned by [`ActionSpec::builder`].
pub struct ActionBuilder<T> {
    spec: ActionSpec,
    _marker: PhantomData<fn(&mut T)>,
}

impl<T: 'static> ActionBuilder<T> {
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.spec.label = Some(label.into());
        self
    }

    /// Overrides the declaring type name (defaults to the short name of `T`).
    pub fn declared_by(mut self, type_name: &'static str) -> Self {
        self.spec.declared_by = type_name;
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.spec.visibility = visibility;
        self
    }

    pub fn returns(mut self, type_name: impl Into<String>) -> Self {
        self.spec.return_type = type_name.into();
        self
    }

    pub fn param(mut self, param: ParamDescriptor) -> Self {
        self.spec.params.push(param);
        self
    }

    pub fn static_member(mut self) -> Self {
        self.spec.flags.is_static = true;
        self
    }

    pub fn generic(mut self) -> Self {
        self.spec.flags.is_generic = true;
        self
    }

    pub fn abstract_member(mut self) -> Self {
        self.spec.flags.is_abstract = true;
        self
    }

    pub fn special_member(mut self) -> Self {
        self.spec.flags.is_special = true;
        self
    }

    /// Sets the typed invocation closure.
    pub fn invoker<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut T, &[ParamValue]) -> Result<(), InvokeError> + Send + Sync + 'static,
    {
        let declared_by = self.spec.declared_by;
        self.spec.invoker = Some(Box::new(move |target: &mut dyn Any, args: &[ParamValue]| {
            match target.downcast_mut::<T>() {
                Some(target) => f(target, args),
                None => Err(InvokeError::TargetMismatch {
                    expected: declared_by,
                }),
            }
        }));
        self
    }

    pub fn build(self) -> ActionSpec {
        self.spec
    }
}
