//! The external Notifier capability.
//!
//! A `Notifier` delivers a [`Payload`] to a reporting backend. Noticegate
//! never delivers anything itself; it only decides which notifier gets the
//! payload, or whether to raise locally instead.

use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

use crate::error::{NotifierError, NotifierResult};
use crate::request::Payload;

/// Base trait for reporting sinks.
///
/// # Example
///
/// ```rust
/// use noticegate::{Notifier, NotifierResult, Payload};
/// use std::any::Any;
///
/// #[derive(Debug)]
/// struct StderrNotifier;
///
/// impl Notifier for StderrNotifier {
///     fn name(&self) -> &str {
///         "stderr"
///     }
///
///     fn notify(&self, payload: &Payload) -> NotifierResult<()> {
///         eprintln!("{:?}", payload.error_message);
///         Ok(())
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
/// ```
pub trait Notifier: Send + Sync + Debug {
    /// Returns the name of this notifier, used in logs.
    fn name(&self) -> &str;

    /// Deliver a payload.
    ///
    /// Must not block on I/O for long; the dispatch path is synchronous.
    fn notify(&self, payload: &Payload) -> NotifierResult<()>;

    /// Build a sibling notifier that reports under a different API key.
    ///
    /// Used once during configuration to construct the notice-only sink.
    fn with_api_key(&self, _api_key: &str) -> NotifierResult<Arc<dyn Notifier>> {
        Err(NotifierError::NotSupported(format!(
            "{} cannot report under a separate API key",
            self.name()
        )))
    }

    /// Downcast to concrete type for advanced usage.
    fn as_any(&self) -> &dyn Any;
}

/// Extension trait for notifier type checking.
pub trait NotifierExt: Notifier {
    /// Check if this notifier is of type T.
    fn is<T: Notifier + 'static>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Downcast to type T.
    fn downcast_ref<T: Notifier + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

impl<N: Notifier + ?Sized> NotifierExt for N {}
