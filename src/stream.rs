//! A channel-backed notifier.
//!
//! [`ChannelNotifier`] lets an async host consume payloads from a stream
//! while the dispatch path itself stays synchronous: `notify` only performs
//! a non-blocking `try_send`.

use std::any::Any;
use std::pin::Pin;
use std::sync::Arc;

use futures_core::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::error::{NotifierError, NotifierResult};
use crate::notifier::Notifier;
use crate::request::Payload;

/// Type alias for a boxed async stream of events.
pub type EventStream<T> = Pin<Box<dyn Stream<Item = T> + Send>>;

/// A payload delivered through a [`ChannelNotifier`].
///
/// `sink` names the notifier that accepted it; `api_key` is set when that
/// notifier reports under its own key (the notice-only sibling).
#[derive(Debug, Clone)]
pub struct Delivery {
    pub sink: String,
    pub api_key: Option<String>,
    pub payload: Payload,
}

/// A notifier that pushes payloads into a bounded channel.
///
/// # Example
///
/// ```rust
/// use noticegate::{ChannelNotifier, Dispatcher, Options};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let (notifier, _deliveries) = ChannelNotifier::new("reporter", 8);
/// let dispatcher = Dispatcher::reporting(Arc::new(notifier));
///
/// dispatcher
///     .notify("InvalidUserError", Some(json!("user must be hard worker")), Options::default())
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    name: String,
    api_key: Option<String>,
    tx: mpsc::Sender<Delivery>,
}

impl ChannelNotifier {
    /// Create a notifier and the stream of its deliveries.
    ///
    /// The channel holds at least one delivery; a `buffer_size` of zero is
    /// treated as one.
    pub fn new(name: impl Into<String>, buffer_size: usize) -> (Self, EventStream<Delivery>) {
        let (tx, rx) = mpsc::channel(buffer_size.max(1));
        let notifier = Self {
            name: name.into(),
            api_key: None,
            tx,
        };
        (notifier, Box::pin(ReceiverStream::new(rx)))
    }

    /// The API key this notifier reports under, if any.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Check if the consuming stream has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl Notifier for ChannelNotifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn notify(&self, payload: &Payload) -> NotifierResult<()> {
        let delivery = Delivery {
            sink: self.name.clone(),
            api_key: self.api_key.clone(),
            payload: payload.clone(),
        };
        self.tx.try_send(delivery).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => NotifierError::Rejected(self.name.clone()),
            mpsc::error::TrySendError::Closed(_) => NotifierError::Unavailable(self.name.clone()),
        })
    }

    /// Shares the channel; deliveries carry the derived name and the key.
    fn with_api_key(&self, api_key: &str) -> NotifierResult<Arc<dyn Notifier>> {
        Ok(Arc::new(ChannelNotifier {
            name: format!("{}/notice_only", self.name),
            api_key: Some(api_key.to_string()),
            tx: self.tx.clone(),
        }))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
