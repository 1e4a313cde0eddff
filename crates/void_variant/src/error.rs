//! Error types for Variant conversion, call dispatch and settings

use std::num::NonZeroI32;
use thiserror::Error;

use crate::kind::VariantType;

/// Result type for Variant conversions
pub type Result<T> = std::result::Result<T, VariantError>;

/// Result type for call dispatch
pub type CallResult<T> = std::result::Result<T, CallError>;

/// Conversion accessor applied to a Variant of the wrong kind
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariantError {
    /// Active kind is not one the accessor accepts
    #[error("Cannot convert {found} to {expected}")]
    TypeMismatch {
        expected: VariantType,
        found: VariantType,
    },

    /// Text view requested on a buffer that is not valid UTF-8
    #[error("{found} payload is not valid UTF-8 text")]
    InvalidUtf8 { found: VariantType },
}

impl VariantError {
    pub fn type_mismatch(expected: VariantType, found: VariantType) -> Self {
        VariantError::TypeMismatch { expected, found }
    }
}

/// Status code reported by a successful dispatch
pub const CALL_OK: i32 = 0;

/// Failure reported by a [`Dispatcher`](crate::Dispatcher).
///
/// Every variant maps to a nonzero status code so hosts that only speak
/// integers can still branch on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    /// No method with this name on the receiver
    #[error("Invalid method '{0}'")]
    InvalidMethod(String),

    /// Argument at `index` has the wrong kind
    #[error("Invalid argument {index}: expected {expected}")]
    InvalidArgument { index: usize, expected: VariantType },

    #[error("Too many arguments: expected {expected}, got {got}")]
    TooManyArguments { expected: usize, got: usize },

    #[error("Too few arguments: expected {expected}, got {got}")]
    TooFewArguments { expected: usize, got: usize },

    #[error("Receiver instance is null")]
    InstanceIsNull,

    #[error("Method is not const")]
    MethodNotConst,

    /// Dispatcher-specific failure code
    #[error("Dispatcher failure (code {0})")]
    Internal(NonZeroI32),
}

impl CallError {
    pub const INVALID_METHOD: i32 = 1;
    pub const INVALID_ARGUMENT: i32 = 2;
    pub const TOO_MANY_ARGUMENTS: i32 = 3;
    pub const TOO_FEW_ARGUMENTS: i32 = 4;
    pub const INSTANCE_IS_NULL: i32 = 5;
    pub const METHOD_NOT_CONST: i32 = 6;

    /// Nonzero status code
    pub fn code(&self) -> i32 {
        match self {
            CallError::InvalidMethod(_) => Self::INVALID_METHOD,
            CallError::InvalidArgument { .. } => Self::INVALID_ARGUMENT,
            CallError::TooManyArguments { .. } => Self::TOO_MANY_ARGUMENTS,
            CallError::TooFewArguments { .. } => Self::TOO_FEW_ARGUMENTS,
            CallError::InstanceIsNull => Self::INSTANCE_IS_NULL,
            CallError::MethodNotConst => Self::METHOD_NOT_CONST,
            CallError::Internal(code) => code.get(),
        }
    }

    /// Rebuild an error from a raw status code. Detail fields the code does
    /// not carry are left empty. Returns `None` for [`CALL_OK`].
    pub fn from_code(code: i32) -> Option<Self> {
        let error = match code {
            CALL_OK => return None,
            Self::INVALID_METHOD => CallError::InvalidMethod(String::new()),
            Self::INVALID_ARGUMENT => CallError::InvalidArgument {
                index: 0,
                expected: VariantType::Nil,
            },
            Self::TOO_MANY_ARGUMENTS => CallError::TooManyArguments { expected: 0, got: 0 },
            Self::TOO_FEW_ARGUMENTS => CallError::TooFewArguments { expected: 0, got: 0 },
            Self::INSTANCE_IS_NULL => CallError::InstanceIsNull,
            Self::METHOD_NOT_CONST => CallError::MethodNotConst,
            other => CallError::Internal(NonZeroI32::new(other)?),
        };
        Some(error)
    }

    /// Create an invalid method error
    pub fn invalid_method(method: impl Into<String>) -> Self {
        CallError::InvalidMethod(method.into())
    }
}

/// Settings registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("Setting '{0}' is not registered")]
    NotFound(String),

    #[error("Setting '{name}' has type {found}, expected {expected}")]
    TypeMismatch {
        name: String,
        expected: VariantType,
        found: VariantType,
    },

    #[error("Setting conversion failed: {0}")]
    Conversion(#[from] VariantError),
}
