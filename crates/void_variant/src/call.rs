//! Method dispatch by name
//!
//! A Variant never resolves methods itself. Calls are forwarded to a
//! [`Dispatcher`] together with the receiver and a contiguous argument
//! slice; the dispatcher's result or error is returned unchanged.
//!
//! ```ignore
//! let registry = MethodRegistry::new();
//! registry.register(NativeMethod::new("add", 2, |_, args| {
//!     let a: i64 = argument(args, 0)?;
//!     let b: i64 = argument(args, 1)?;
//!     Ok(Variant::from(a + b))
//! }));
//!
//! let sum = Variant::Nil.method_call(&registry, "add", varargs![2, 3])?;
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::convert::FromVariant;
use crate::error::{CallError, CallResult, VariantError, CALL_OK};
use crate::kind::VariantType;
use crate::variant::Variant;

/// Method name used by [`Variant::call`]
pub const DEFAULT_CALL_METHOD: &str = "call";

/// Resolves a method on a receiver and invokes it
pub trait Dispatcher {
    fn call(&self, receiver: &Variant, method: &str, args: &[Variant]) -> CallResult<Variant>;
}

impl<D: Dispatcher + ?Sized> Dispatcher for &D {
    fn call(&self, receiver: &Variant, method: &str, args: &[Variant]) -> CallResult<Variant> {
        (**self).call(receiver, method, args)
    }
}

impl<D: Dispatcher + ?Sized> Dispatcher for Box<D> {
    fn call(&self, receiver: &Variant, method: &str, args: &[Variant]) -> CallResult<Variant> {
        (**self).call(receiver, method, args)
    }
}

impl<D: Dispatcher + ?Sized> Dispatcher for Arc<D> {
    fn call(&self, receiver: &Variant, method: &str, args: &[Variant]) -> CallResult<Variant> {
        (**self).call(receiver, method, args)
    }
}

/// Pack expressions into a `Vec<Variant>` for dispatch
#[macro_export]
macro_rules! varargs {
    () => {
        ::std::vec::Vec::<$crate::Variant>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Variant::from($arg)),+]
    };
}

impl Variant {
    /// Invoke `method` on this value through `dispatcher`
    pub fn callp<D: Dispatcher + ?Sized>(
        &self,
        dispatcher: &D,
        method: &str,
        args: &[Variant],
    ) -> CallResult<Variant> {
        log::trace!(
            "Dispatching '{}' on {} with {} argument(s)",
            method,
            self.type_name(),
            args.len()
        );

        let result = dispatcher.call(self, method, args);
        if let Err(ref e) = result {
            log::debug!("Call to '{}' failed with code {}: {}", method, e.code(), e);
        }
        result
    }

    /// [`Variant::callp`] using out-parameters: on success `r_ret` holds the
    /// result and `r_error` is [`CALL_OK`]; on failure `r_ret` is `Nil` and
    /// `r_error` holds the nonzero code.
    pub fn callp_raw<D: Dispatcher + ?Sized>(
        &self,
        dispatcher: &D,
        method: &str,
        args: &[Variant],
        r_ret: &mut Variant,
        r_error: &mut i32,
    ) {
        match self.callp(dispatcher, method, args) {
            Ok(value) => {
                *r_ret = value;
                *r_error = CALL_OK;
            }
            Err(e) => {
                *r_ret = Variant::Nil;
                *r_error = e.code();
            }
        }
    }

    /// Call `method` with arguments converted from any `Into<Variant>` values
    pub fn method_call<D, I>(&self, dispatcher: &D, method: &str, args: I) -> CallResult<Variant>
    where
        D: Dispatcher + ?Sized,
        I: IntoIterator,
        I::Item: Into<Variant>,
    {
        let args: Vec<Variant> = args.into_iter().map(Into::into).collect();
        self.callp(dispatcher, method, &args)
    }

    /// Invoke this value as a callable (method [`DEFAULT_CALL_METHOD`])
    pub fn call<D, I>(&self, dispatcher: &D, args: I) -> CallResult<Variant>
    where
        D: Dispatcher + ?Sized,
        I: IntoIterator,
        I::Item: Into<Variant>,
    {
        self.method_call(dispatcher, DEFAULT_CALL_METHOD, args)
    }
}

/// Fetch and convert argument `index`.
///
/// A missing argument is reported as [`CallError::TooFewArguments`], a
/// wrong kind as [`CallError::InvalidArgument`].
pub fn argument<T: FromVariant>(args: &[Variant], index: usize) -> CallResult<T> {
    let value = args.get(index).ok_or(CallError::TooFewArguments {
        expected: index + 1,
        got: args.len(),
    })?;

    T::from_variant(value).map_err(|e| {
        let expected = match e {
            VariantError::TypeMismatch { expected, .. } => expected,
            VariantError::InvalidUtf8 { .. } => VariantType::String,
        };
        CallError::InvalidArgument { index, expected }
    })
}

/// Native method implementation
pub type NativeFn = Arc<dyn Fn(&Variant, &[Variant]) -> CallResult<Variant> + Send + Sync>;

/// Named native method with a declared arity
#[derive(Clone)]
pub struct NativeMethod {
    /// Method name
    pub name: String,
    /// Expected number of arguments (`None` for variadic)
    pub arity: Option<usize>,
    /// The method implementation
    pub func: NativeFn,
}

impl NativeMethod {
    /// Create a method taking exactly `arity` arguments
    pub fn new<F>(name: impl Into<String>, arity: usize, func: F) -> Self
    where
        F: Fn(&Variant, &[Variant]) -> CallResult<Variant> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            arity: Some(arity),
            func: Arc::new(func),
        }
    }

    /// Create a method accepting any number of arguments
    pub fn variadic<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Variant, &[Variant]) -> CallResult<Variant> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            arity: None,
            func: Arc::new(func),
        }
    }

    /// Check arity, then run the implementation
    pub fn invoke(&self, receiver: &Variant, args: &[Variant]) -> CallResult<Variant> {
        if let Some(expected) = self.arity {
            let got = args.len();
            if got < expected {
                return Err(CallError::TooFewArguments { expected, got });
            }
            if got > expected {
                return Err(CallError::TooManyArguments { expected, got });
            }
        }
        (self.func)(receiver, args)
    }
}

impl fmt::Debug for NativeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeMethod")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

/// Thread-safe name -> method table usable as a [`Dispatcher`]
#[derive(Default)]
pub struct MethodRegistry {
    methods: RwLock<HashMap<String, NativeMethod>>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a method, returning the one it replaced
    pub fn register(&self, method: NativeMethod) -> Option<NativeMethod> {
        log::debug!("Registered native method '{}'", method.name);
        self.methods.write().insert(method.name.clone(), method)
    }

    pub fn unregister(&self, name: &str) -> Option<NativeMethod> {
        self.methods.write().remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.methods.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.read().is_empty()
    }

    /// Registered names, sorted
    pub fn method_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.methods.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl Dispatcher for MethodRegistry {
    fn call(&self, receiver: &Variant, method: &str, args: &[Variant]) -> CallResult<Variant> {
        // Clone out so the lock is not held while user code runs
        let native = self
            .methods
            .read()
            .get(method)
            .cloned()
            .ok_or_else(|| CallError::invalid_method(method))?;
        native.invoke(receiver, args)
    }
}

impl fmt::Debug for MethodRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodRegistry")
            .field("methods", &self.method_names())
            .finish()
    }
}
