//! Sink selection.
//!
//! The `SinkSelector` holds the primary notifier and, when one was built
//! during configuration, a dedicated notice-only notifier.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Config;
use crate::notifier::Notifier;

/// Chooses the notifier that receives a request.
///
/// # Example
///
/// ```rust
/// use noticegate::{Notifier, NotifierResult, Payload, SinkSelectorBuilder};
/// use std::any::Any;
/// use std::sync::Arc;
///
/// #[derive(Debug)]
/// struct Named(&'static str);
///
/// impl Notifier for Named {
///     fn name(&self) -> &str { self.0 }
///     fn notify(&self, _payload: &Payload) -> NotifierResult<()> { Ok(()) }
///     fn as_any(&self) -> &dyn Any { self }
/// }
///
/// let selector = SinkSelectorBuilder::new()
///     .primary(Arc::new(Named("primary")))
///     .notice_only(Arc::new(Named("notices")))
///     .build()
///     .unwrap();
///
/// assert_eq!(selector.select(true).name(), "notices");
/// assert_eq!(selector.select(false).name(), "primary");
/// ```
#[derive(Debug, Clone)]
pub struct SinkSelector {
    primary: Arc<dyn Notifier>,
    notice_only: Option<Arc<dyn Notifier>>,
}

impl SinkSelector {
    /// A selector with only a primary sink.
    pub fn new(primary: Arc<dyn Notifier>) -> Self {
        Self {
            primary,
            notice_only: None,
        }
    }

    /// Build a selector from configuration.
    ///
    /// The notice-only sink is derived from the primary with the configured
    /// API key. If that fails, every request goes to the primary.
    pub fn from_config(primary: Arc<dyn Notifier>, config: &Config) -> Self {
        let Some(api_key) = config.notice_only_api_key() else {
            return Self::new(primary);
        };
        match primary.with_api_key(api_key) {
            Ok(notice_only) => {
                info!(
                    primary = %primary.name(),
                    sink = %notice_only.name(),
                    "Notice-only sink configured"
                );
                Self {
                    primary,
                    notice_only: Some(notice_only),
                }
            }
            Err(e) => {
                warn!(
                    primary = %primary.name(),
                    error = %e,
                    "Could not build notice-only sink, notices go to the primary sink"
                );
                Self::new(primary)
            }
        }
    }

    /// Pick the sink for a request.
    pub fn select(&self, notice_only: bool) -> &dyn Notifier {
        match (&self.notice_only, notice_only) {
            (Some(sink), true) => sink.as_ref(),
            _ => self.primary.as_ref(),
        }
    }

    /// The primary sink.
    pub fn primary(&self) -> &dyn Notifier {
        self.primary.as_ref()
    }

    /// The notice-only sink, if one exists.
    pub fn notice_only(&self) -> Option<&dyn Notifier> {
        self.notice_only.as_deref()
    }

    /// Check if a dedicated notice-only sink exists.
    pub fn has_notice_only(&self) -> bool {
        self.notice_only.is_some()
    }
}

/// Builder for creating selectors with fluent API.
#[derive(Debug, Default)]
pub struct SinkSelectorBuilder {
    primary: Option<Arc<dyn Notifier>>,
    notice_only: Option<Arc<dyn Notifier>>,
}

impl SinkSelectorBuilder {
    /// Create a new selector builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the primary sink.
    pub fn primary(mut self, sink: Arc<dyn Notifier>) -> Self {
        self.primary = Some(sink);
        self
    }

    /// Set the notice-only sink.
    pub fn notice_only(mut self, sink: Arc<dyn Notifier>) -> Self {
        self.notice_only = Some(sink);
        self
    }

    /// Build the selector. Returns `None` without a primary sink.
    pub fn build(self) -> Option<SinkSelector> {
        Some(SinkSelector {
            primary: self.primary?,
            notice_only: self.notice_only,
        })
    }
}
