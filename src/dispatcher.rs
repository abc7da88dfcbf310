//! The dispatch gate.
//!
//! A [`Dispatcher`] either forwards every request to a reporting sink, or,
//! when no sink was injected, raises locally so development fails fast.
//!
//! ```text
//! notify ──► resolve ──► notify_raw ──► [notice-only rewrite] ──► gate
//!                                                                  │
//!                     sink present ◄───────────────────────────────┤
//!                     forward, never raise                         │
//!                                                                  ▼
//!                                        no sink: raise_development?
//!                                        false ─► drop    true ─► raise
//! ```

use std::error::Error;
use std::sync::{Arc, Mutex};

use arc_swap::ArcSwap;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{NotifyError, NotifyResult};
use crate::failure::Failure;
use crate::formatter;
use crate::notifier::Notifier;
use crate::request::{NotificationRequest, Options};
use crate::resolver::{self, Argument};
use crate::sinks::SinkSelector;

/// Immutable view of the configured state.
#[derive(Debug)]
struct Snapshot {
    config: Config,
    selector: Option<SinkSelector>,
}

/// Routes notifications to a sink or raises them locally.
///
/// # Example
///
/// ```rust
/// use noticegate::{Dispatcher, Options};
/// use serde_json::json;
///
/// // No sink injected: notifications raise unless suppressed.
/// let dispatcher = Dispatcher::development();
///
/// let err = dispatcher
///     .notify("InvalidUserError", Some(json!("user must be hard worker")), Options::default())
///     .unwrap_err();
/// assert_eq!(err.to_string(), "user must be hard worker");
///
/// dispatcher
///     .notify(
///         "InvalidUserError",
///         Some(json!("user must be hard worker")),
///         Options::new().raise_development(false),
///     )
///     .unwrap();
/// ```
#[derive(Debug)]
pub struct Dispatcher {
    primary: Option<Arc<dyn Notifier>>,
    state: ArcSwap<Snapshot>,
    // Serializes configure calls; readers only touch `state`.
    configure_lock: Mutex<()>,
}

impl Dispatcher {
    /// Create a dispatcher. `None` means no reporting capability.
    pub fn new(primary: Option<Arc<dyn Notifier>>) -> Self {
        let snapshot = Snapshot {
            config: Config::default(),
            selector: primary.clone().map(SinkSelector::new),
        };
        Self {
            primary,
            state: ArcSwap::from_pointee(snapshot),
            configure_lock: Mutex::new(()),
        }
    }

    /// A dispatcher that forwards to `primary`.
    pub fn reporting(primary: Arc<dyn Notifier>) -> Self {
        Self::new(Some(primary))
    }

    /// A dispatcher without a reporting sink.
    pub fn development() -> Self {
        Self::new(None)
    }

    /// Whether a reporting sink was injected.
    pub fn is_reporting(&self) -> bool {
        self.primary.is_some()
    }

    /// Run a configurator against the current configuration.
    ///
    /// The result is validated and, when a reporting sink exists, the
    /// notice-only sink is rebuilt from it. The new state replaces the old
    /// one atomically; calling this again with the same input yields the
    /// same routing. Concurrent calls run one after another, each starting
    /// from the configuration the previous one stored.
    pub fn configure<F>(&self, configurator: F) -> NotifyResult<()>
    where
        F: FnOnce(&mut Config),
    {
        let _guard = self
            .configure_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut config = self.state.load().config.clone();
        configurator(&mut config);
        config.validate().map_err(NotifyError::Config)?;

        let selector = self
            .primary
            .clone()
            .map(|primary| SinkSelector::from_config(primary, &config));
        self.state.store(Arc::new(Snapshot { config, selector }));
        Ok(())
    }

    /// The current configuration.
    pub fn config(&self) -> Config {
        self.state.load().config.clone()
    }

    /// The current sink selector, if reporting.
    pub fn selector(&self) -> Option<SinkSelector> {
        self.state.load().selector.clone()
    }

    /// Report an error or a labeled notice.
    ///
    /// Accepts `(error, optional attribute map, options)` or
    /// `(label, message, options)`. While reporting, nothing escapes this
    /// call except a failure of the sink itself: any other error is sent to
    /// the primary sink instead of being returned.
    pub fn notify(
        &self,
        primary: impl Into<Argument>,
        secondary: Option<Value>,
        named: Options,
    ) -> NotifyResult<()> {
        let result = resolver::resolve(primary, secondary, named)
            .map_err(NotifyError::from)
            .and_then(|request| self.notify_raw(request));
        match result {
            Err(e) if self.is_reporting() => self.forward_error(e),
            other => other,
        }
    }

    /// Shorthand for `notify(err, None, Options::default())`.
    pub fn notify_error<E>(&self, err: E) -> NotifyResult<()>
    where
        E: Error + Send + Sync + 'static,
    {
        self.notify(Failure::new(err), None, Options::default())
    }

    /// Dispatch an already normalized request.
    pub fn notify_raw(&self, request: NotificationRequest) -> NotifyResult<()> {
        let request = if request.notice_only {
            formatter::apply(request)
        } else {
            request
        };

        let snapshot = self.state.load();
        match &snapshot.selector {
            Some(selector) => forward(selector, &request),
            None => raise_locally(&request),
        }
    }

    fn forward_error(&self, error: NotifyError) -> NotifyResult<()> {
        let snapshot = self.state.load();
        let Some(selector) = &snapshot.selector else {
            return Err(error);
        };
        warn!(error = %error, "Notification failed, reporting the failure instead");
        let request = NotificationRequest::from_failure(failure_of(&error));
        match selector.primary().notify(&request.to_payload()) {
            Ok(()) => Ok(()),
            Err(_) => Err(error),
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::development()
    }
}

fn forward(selector: &SinkSelector, request: &NotificationRequest) -> NotifyResult<()> {
    let sink = selector.select(request.notice_only);
    debug!(
        sink = %sink.name(),
        notice_only = request.notice_only,
        error_class = %request.error_class_label(),
        "Forwarding notification"
    );
    let Err(e) = sink.notify(&request.to_payload()) else {
        return Ok(());
    };

    warn!(sink = %sink.name(), error = %e, "Notifier failed, reporting the failure");
    let fallback = NotificationRequest::from_failure(Failure::new(e.clone()));
    selector
        .primary()
        .notify(&fallback.to_payload())
        .map_err(|_| NotifyError::Forwarding(e))
}

fn raise_locally(request: &NotificationRequest) -> NotifyResult<()> {
    if !request.raise_development {
        debug!(
            error_class = %request.error_class_label(),
            "No reporting sink and raise_development is off, dropping notification"
        );
        return Ok(());
    }

    let failure = match (&request.error_message, request.notice_only) {
        (Some(message), true) => Failure::runtime(message.clone()),
        _ => request.subject().into_failure(),
    };
    Err(NotifyError::Raised(failure))
}

/// The error to report when a notify call itself failed.
fn failure_of(error: &NotifyError) -> Failure {
    match error {
        NotifyError::Argument(e) => Failure::new(e.clone()),
        NotifyError::Forwarding(e) => Failure::new(e.clone()),
        NotifyError::Raised(failure) => failure.clone(),
        NotifyError::Config(_) => Failure::new(error.clone()),
    }
}
