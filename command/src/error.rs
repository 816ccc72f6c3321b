use {
    crate::{buffer::State, capability::Feature},
    failure::Fail,
    strata_core::NativeError,
    strata_descriptor::TableError,
    strata_resource::{AggregateError, RenderTargetError, TypeMismatch},
};

/// Call made in a state or with bindings that don't allow it.
///
/// Detected before anything is recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Fail)]
pub enum ContractViolation {
    /// Command recorded while buffer is not recording.
    #[fail(display = "Command buffer is {}, recording required", state)]
    NotRecording {
        /// State of the buffer.
        state: State,
    },

    /// Lifecycle operation not allowed in the current state.
    #[fail(display = "Can't {} command buffer in {} state", operation, state)]
    InvalidTransition {
        /// Name of the operation.
        operation: &'static str,
        /// State of the buffer.
        state: State,
    },

    /// Resource of wrong kind.
    #[fail(display = "{}", _0)]
    TypeMismatch(#[cause] TypeMismatch),

    /// Clear without bound render target.
    #[fail(display = "No render target is bound")]
    NoRenderTarget,

    /// Depth or stencil clear without bound depth-stencil view.
    #[fail(display = "No depth-stencil view is bound")]
    NoDepthStencil,

    /// Resource bound through a descriptor table
    /// while the bound pipeline has no table.
    #[fail(display = "Bound pipeline has no descriptor table")]
    NoDescriptorTable,
}

/// Error of a command buffer call.
#[derive(Clone, Debug, PartialEq, Fail)]
pub enum CommandError {
    /// Call breaks command buffer contract. Nothing was recorded.
    #[fail(display = "Contract violation: {}", _0)]
    ContractViolation(#[cause] ContractViolation),

    /// Native call failed. Native object must not be used for recording afterwards.
    #[fail(display = "{}", _0)]
    Native(#[cause] NativeError),

    /// Backend doesn't translate the feature.
    #[fail(display = "Feature `{}` is not implemented by the backend", _0)]
    NotImplemented(Feature),

    /// Argument out of accepted range.
    #[fail(display = "Invalid argument: {}", _0)]
    InvalidArgument(String),
}

impl CommandError {
    /// Create invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        CommandError::InvalidArgument(message.into())
    }
}

impl From<ContractViolation> for CommandError {
    fn from(violation: ContractViolation) -> Self {
        CommandError::ContractViolation(violation)
    }
}

impl From<NativeError> for CommandError {
    fn from(error: NativeError) -> Self {
        CommandError::Native(error)
    }
}

impl From<TypeMismatch> for CommandError {
    fn from(mismatch: TypeMismatch) -> Self {
        CommandError::ContractViolation(ContractViolation::TypeMismatch(mismatch))
    }
}

impl From<AggregateError> for CommandError {
    fn from(error: AggregateError) -> Self {
        CommandError::InvalidArgument(error.to_string())
    }
}

impl From<RenderTargetError> for CommandError {
    fn from(error: RenderTargetError) -> Self {
        CommandError::InvalidArgument(error.to_string())
    }
}

impl From<TableError> for CommandError {
    fn from(error: TableError) -> Self {
        CommandError::InvalidArgument(error.to_string())
    }
}
