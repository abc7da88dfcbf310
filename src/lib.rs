//! # Noticegate
//!
//! **Noticegate** gives application code one call for reporting an error or an
//! informational notice, and decides at runtime what happens to it.
//!
//! ## Overview
//!
//! - **One call surface**: `notify(error)` or `notify("Label", "message")`,
//!   both with optional attributes
//! - **Fail-fast development**: with no reporting sink injected, a
//!   notification raises locally unless `raise_development` is off
//! - **Fail-soft production**: with a sink injected, notifications are
//!   forwarded and the call never raises
//! - **Notice-only**: informational notifications are relabeled, tagged and
//!   optionally routed to a dedicated sink
//!
//! ## Pipeline
//!
//! ```text
//! caller ─► resolver ─► formatter (notice-only) ─► dispatcher ─► sink selector ─► Notifier
//!                                                       └─► local raise
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use noticegate::prelude::*;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let (notifier, _deliveries) = ChannelNotifier::new("reporter", 64);
//! let dispatcher = Dispatcher::reporting(Arc::new(notifier));
//! dispatcher
//!     .configure(|config| config.notice_only_api_key = Some("notice-key".into()))
//!     .unwrap();
//!
//! dispatcher
//!     .notify(
//!         "InvalidUserError",
//!         Some(json!("user must be hard worker")),
//!         Options::new().notice_only(true),
//!     )
//!     .unwrap();
//! ```

mod config;
mod dispatcher;
mod error;
mod failure;
pub mod formatter;
pub mod global;
mod notifier;
mod request;
mod resolver;
mod sinks;
pub mod stream;

pub mod prelude;

// Re-export core types
pub use config::{Config, NOTICE_ONLY_API_KEY_ENV};
pub use dispatcher::Dispatcher;
pub use error::{
    ArgumentError, ArgumentResult, NotifierError, NotifierResult, NotifyError, NotifyResult,
};
pub use failure::{Failure, RuntimeError};
pub use formatter::{NOTICE_ONLY_PREFIX, NOTICE_ONLY_TAG};
pub use global::{configure, install, notify, notify_error, notify_raw};
pub use notifier::{Notifier, NotifierExt};
pub use request::{Identity, NotificationRequest, Options, Payload, Subject, NOTICE_CLASS};
pub use resolver::{resolve, Argument};
pub use sinks::{SinkSelector, SinkSelectorBuilder};
pub use stream::{ChannelNotifier, Delivery, EventStream};

// Re-export serde_json for building attribute maps
pub use serde_json;
