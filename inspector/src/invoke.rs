//! Multi-target invocation with per-target fault isolation.

use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

use lilium_core::editor::{AsAny, Inspectable, ObjectId};

use crate::action::{ActionSpec, BlockReason};
use crate::host::InspectorHost;
use crate::param::{ParamKind, ParamValue};

/// Why a single invocation did not complete.
#[derive(Debug, Clone, PartialEq)]
pub enum InvokeError {
    /// The target is not of the type the action was registered for.
    TargetMismatch { expected: &'static str },
    /// The argument at `index` is missing or of another kind.
    ArgumentMismatch { index: usize, expected: ParamKind },
    /// The parameter at `index` has no editor and cannot receive a value.
    UnsupportedArgument { index: usize },
    /// The operation returned an error.
    Failed(String),
    /// The operation panicked; the payload text is kept.
    Panicked(String),
    /// The action was not invocable.
    NotInvocable(String),
}

impl fmt::Display for InvokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvokeError::TargetMismatch { expected } => {
                write!(f, "target is not a {expected}")
            }
            InvokeError::ArgumentMismatch { index, expected } => {
                write!(f, "argument {index} is not a {expected} value")
            }
            InvokeError::UnsupportedArgument { index } => {
                write!(f, "argument {index} has an unsupported type")
            }
            InvokeError::Failed(msg) => write!(f, "operation failed: {msg}"),
            InvokeError::Panicked(msg) => write!(f, "operation panicked: {msg}"),
            InvokeError::NotInvocable(reason) => write!(f, "not invocable: {reason}"),
        }
    }
}

impl std::error::Error for InvokeError {}

/// Diagnostic for one failed target.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationFailure {
    pub target: ObjectId,
    pub target_name: String,
    /// Operation name.
    pub action: String,
    pub error: InvokeError,
}

impl fmt::Display for InvocationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` on {} ({}): {}",
            self.action, self.target_name, self.target, self.error
        )
    }
}

/// Outcome of invoking one action on a target set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvokeReport {
    /// Operation name.
    pub action: String,
    /// Number of targets in the set.
    pub targets: usize,
    pub succeeded: usize,
    pub failures: Vec<InvocationFailure>,
    /// Set when the action was not invocable; nothing ran.
    pub blocked: Option<BlockReason>,
}

impl InvokeReport {
    /// `true` when the action ran and every target succeeded.
    pub fn is_success(&self) -> bool {
        self.blocked.is_none() && self.failures.is_empty()
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    /// Whether `target` is among the failed targets.
    pub fn failed_on(&self, target: ObjectId) -> bool {
        self.failures.iter().any(|f| f.target == target)
    }
}

/// Invokes `action` with the shared `args` on every target, in order.
///
/// For each target the host records an undo step labeled with the action
/// name, the action runs, and on success the target is marked dirty. Errors
/// and panics are caught per target, reported to the host and collected in
/// the report; the remaining targets still run.
pub fn invoke_on_targets(
    action: &ActionSpec,
    args: &[ParamValue],
    targets: &mut [&mut dyn Inspectable],
    host: &mut dyn InspectorHost,
) -> InvokeReport {
    let mut report = InvokeReport {
        action: action.name().to_owned(),
        targets: targets.len(),
        ..Default::default()
    };

    if let Some(reason) = action.can_invoke().reason() {
        log::warn!("Skipping `{}`: {reason}", action.qualified_name());
        report.blocked = Some(reason.clone());
        return report;
    }

    log::info!(
        "Invoking `{}` on {} target(s)",
        action.qualified_name(),
        targets.len()
    );

    for target in targets.iter_mut() {
        let target: &mut dyn Inspectable = &mut **target;
        host.record_undo(target, action.name());

        let result = {
            let any: &mut dyn Any = target.as_any_mut();
            catch_unwind(AssertUnwindSafe(|| action.call(any, args))).unwrap_or_else(
                |payload| Err(InvokeError::Panicked(panic_payload_to_string(&*payload))),
            )
        };

        match result {
            Ok(()) => {
                host.set_dirty(target);
                report.succeeded += 1;
            }
            Err(error) => {
                let failure = InvocationFailure {
                    target: target.object_id(),
                    target_name: target.object_name(),
                    action: action.name().to_owned(),
                    error,
                };
                host.report_failure(&failure);
                report.failures.push(failure);
            }
        }
    }

    report
}

// ---------------------------------------------------------------------------
// Return value handling for generated invokers
// ---------------------------------------------------------------------------

/// Borrowed return value of an action, inspected by generated code.
///
/// `(&Outcome(&ret)).result()` resolves to [`FallibleOutcome`] for
/// `Result<T, E: Display>` and to [`PlainOutcome`] for every other type.
#[doc(hidden)]
pub struct Outcome<'a, T>(pub &'a T);

#[doc(hidden)]
pub trait FallibleOutcome {
    fn result(&self) -> Result<(), InvokeError>;
}

impl<T, E: fmt::Display> FallibleOutcome for Outcome<'_, Result<T, E>> {
    fn result(&self) -> Result<(), InvokeError> {
        match self.0 {
            Ok(_) => Ok(()),
            Err(e) => Err(InvokeError::Failed(e.to_string())),
        }
    }
}

#[doc(hidden)]
pub trait PlainOutcome {
    fn result(&self) -> Result<(), InvokeError>;
}

impl<T> PlainOutcome for &Outcome<'_, T> {
    fn result(&self) -> Result<(), InvokeError> {
        Ok(())
    }
}

/// Extracts the message of a panic payload.
pub fn panic_payload_to_string(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_owned()
    }
}
