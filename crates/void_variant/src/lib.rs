//! # void_variant - Dynamic Values for the Script Sandbox
//!
//! The tagged-union value exchanged between the engine host and sandboxed
//! guest programs. Every argument, return value, property and setting that
//! crosses the boundary travels as a [`Variant`].
//!
//! ## Overview
//!
//! A Variant holds exactly one of 38 kinds: atomic scalars, fixed-size math
//! aggregates, engine handles and containers, or packed typed arrays. Values
//! go in through `From`, come out through fallible accessors, and support a
//! full operator table plus name-based method dispatch.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐  From<T>   ┌─────────────────┐  as_* / to::<T>()
//! │  Rust values    │───────────▶│     Variant     │──────────────────▶ Result<T>
//! └─────────────────┘            └────────┬────────┘
//!                                         │
//!                  ┌──────────────────────┼──────────────────────┐
//!                  ▼                      ▼                      ▼
//!         ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//!         │    evaluate     │    │     callp       │    │ SettingsRegistry│
//!         │ (Operator table)│    │  (Dispatcher)   │    │ (typed reads)   │
//!         └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use void_variant::prelude::*;
//!
//! let hp = Variant::from(300);
//! assert_eq!(hp.to::<u8>()?, 44); // narrowing truncates
//! assert!(hp.as_bool().is_err());
//!
//! let sum = Variant::evaluate(Operator::Add, &hp, &Variant::from(0.5));
//! assert_eq!(sum, Some(Variant::Float(300.5)));
//!
//! let registry = MethodRegistry::new();
//! let result = Variant::Nil.callp(&registry, "jump", &varargs![1.5]);
//! assert_eq!(result.unwrap_err().code(), CallError::INVALID_METHOD);
//! ```

mod call;
mod collections;
mod convert;
mod error;
mod handle;
mod kind;
pub mod math;
mod operator;
mod settings;
mod text;
mod variant;

pub use call::{
    argument, Dispatcher, MethodRegistry, NativeFn, NativeMethod, DEFAULT_CALL_METHOD,
};
pub use collections::{Array, Dictionary};
pub use convert::FromVariant;
pub use error::{CallError, CallResult, Result, SettingsError, VariantError, CALL_OK};
pub use handle::{Callable, NodePath, ObjectId, Rid, Signal, StringName};
pub use kind::{VariantFamily, VariantType, VARIANT_PAYLOAD_SIZE};
pub use operator::Operator;
pub use settings::{
    PropertyHint, PropertyInfo, SandboxSettings, SettingsRegistry, SettingsResult,
    SETTINGS_ORDER_START,
};
pub use text::TextBuffer;
pub use variant::{OpaquePayload, Variant};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::call::{argument, Dispatcher, MethodRegistry, NativeMethod};
    pub use crate::collections::{Array, Dictionary};
    pub use crate::convert::FromVariant;
    pub use crate::error::{CallError, CallResult, SettingsError, VariantError};
    pub use crate::handle::{Callable, NodePath, ObjectId, Rid, Signal, StringName};
    pub use crate::kind::VariantType;
    pub use crate::operator::Operator;
    pub use crate::settings::{SandboxSettings, SettingsRegistry};
    pub use crate::variant::Variant;
    pub use crate::varargs;
}
