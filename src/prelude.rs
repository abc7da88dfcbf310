//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits
//! from Noticegate for convenient glob imports.
//!
//! # Example
//!
//! ```rust
//! use noticegate::prelude::*;
//! ```

// Configuration
pub use crate::config::Config;

// Dispatch
pub use crate::dispatcher::Dispatcher;
pub use crate::resolver::{resolve, Argument};
pub use crate::sinks::{SinkSelector, SinkSelectorBuilder};

// Data model
pub use crate::failure::{Failure, RuntimeError};
pub use crate::request::{Identity, NotificationRequest, Options, Payload};

// Notifiers
pub use crate::notifier::{Notifier, NotifierExt};
pub use crate::stream::{ChannelNotifier, Delivery, EventStream};

// Errors
pub use crate::error::{
    ArgumentError, ArgumentResult, NotifierError, NotifierResult, NotifyError, NotifyResult,
};
