//! Opaque, caller-owned error values.
//!
//! A [`Failure`] is the error half of a notification identity. It keeps the
//! caller's error behind an `Arc` together with the runtime class name
//! captured at construction, since `dyn Error` cannot report its own type.

use std::any::type_name;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// A shared handle to a caller-supplied error.
#[derive(Clone)]
pub struct Failure {
    inner: Arc<dyn Error + Send + Sync + 'static>,
    class_name: String,
}

impl Failure {
    /// Wrap an error, recording its type name as the class name.
    pub fn new<E>(err: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(err),
            class_name: short_type_name(type_name::<E>()).to_string(),
        }
    }

    /// Wrap an error under an explicit class name.
    ///
    /// Useful for boxed or foreign errors whose static type says nothing
    /// about what went wrong.
    pub fn with_class_name<E>(err: E, class_name: impl Into<String>) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(err),
            class_name: class_name.into(),
        }
    }

    /// A generic [`RuntimeError`] carrying `message`.
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::new(RuntimeError::new(message))
    }

    /// The runtime class name of the wrapped error.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// The wrapped error's own message.
    pub fn message(&self) -> String {
        self.inner.to_string()
    }

    /// Check if the wrapped error is of type E.
    pub fn is<E: Error + 'static>(&self) -> bool {
        self.inner.is::<E>()
    }

    /// Downcast the wrapped error to type E.
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }

    /// Whether both handles share the same underlying error.
    pub fn ptr_eq(&self, other: &Failure) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Failure")
            .field("class_name", &self.class_name)
            .field("inner", &self.inner)
            .finish()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl Error for Failure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl Serialize for Failure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Failure", 2)?;
        state.serialize_field("class", &self.class_name)?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}

/// Generic error raised locally when the notification subject is plain text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RuntimeError {
    message: String,
}

impl RuntimeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// `a::b::Foo<c::Bar>` -> `Foo`
fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("user {0} is lazy")]
    struct InvalidUserError(u32);

    #[test]
    fn test_class_name_from_type() {
        let failure = Failure::new(InvalidUserError(3));
        assert_eq!(failure.class_name(), "InvalidUserError");
        assert_eq!(failure.message(), "user 3 is lazy");
    }

    #[test]
    fn test_runtime_failure() {
        let failure = Failure::runtime("test error");
        assert_eq!(failure.class_name(), "RuntimeError");
        assert_eq!(failure.to_string(), "test error");
        assert!(failure.is::<RuntimeError>());
        assert_eq!(
            failure.downcast_ref::<RuntimeError>().unwrap().message(),
            "test error"
        );
    }

    #[test]
    fn test_explicit_class_name() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let failure = Failure::with_class_name(io, "StorageError");
        assert_eq!(failure.class_name(), "StorageError");
        assert!(failure.is::<std::io::Error>());
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("RuntimeError"), "RuntimeError");
        assert_eq!(short_type_name("my_app::errors::RuntimeError"), "RuntimeError");
        assert_eq!(short_type_name("a::Wrapper<b::Inner>"), "Wrapper");
    }

    #[test]
    fn test_clone_shares_error() {
        let failure = Failure::runtime("shared");
        let cloned = failure.clone();
        assert!(failure.ptr_eq(&cloned));
        assert!(!failure.ptr_eq(&Failure::runtime("shared")));
    }

    #[test]
    fn test_serialize() {
        let value = serde_json::to_value(Failure::runtime("boom")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "class": "RuntimeError", "message": "boom" })
        );
    }
}
