//! Process-wide dispatcher.
//!
//! Applications install their reporting sink once at startup and then call
//! the free functions from anywhere. Until [`install`] runs, the free
//! functions use a development dispatcher with no sink.

use std::error::Error;
use std::sync::{Arc, OnceLock};

use serde_json::Value;

use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::error::NotifyResult;
use crate::notifier::Notifier;
use crate::request::{NotificationRequest, Options};
use crate::resolver::Argument;

static DISPATCHER: OnceLock<Dispatcher> = OnceLock::new();

/// Install the process-wide reporting sink.
///
/// Succeeds only if no dispatcher has been set up yet, including the
/// implicit development one created by an earlier call to any of the free
/// functions. On failure the notifier is handed back.
pub fn install(primary: Arc<dyn Notifier>) -> Result<(), Arc<dyn Notifier>> {
    let mut slot = Some(primary);
    DISPATCHER.get_or_init(|| Dispatcher::new(slot.take()));
    match slot {
        None => Ok(()),
        Some(primary) => Err(primary),
    }
}

/// The process-wide dispatcher.
pub fn dispatcher() -> &'static Dispatcher {
    DISPATCHER.get_or_init(Dispatcher::development)
}

/// Whether the process-wide dispatcher has a reporting sink.
pub fn is_reporting() -> bool {
    dispatcher().is_reporting()
}

/// See [`Dispatcher::configure`].
pub fn configure<F>(configurator: F) -> NotifyResult<()>
where
    F: FnOnce(&mut Config),
{
    dispatcher().configure(configurator)
}

/// See [`Dispatcher::notify`].
pub fn notify(
    primary: impl Into<Argument>,
    secondary: Option<Value>,
    named: Options,
) -> NotifyResult<()> {
    dispatcher().notify(primary, secondary, named)
}

/// See [`Dispatcher::notify_error`].
pub fn notify_error<E>(err: E) -> NotifyResult<()>
where
    E: Error + Send + Sync + 'static,
{
    dispatcher().notify_error(err)
}

/// See [`Dispatcher::notify_raw`].
pub fn notify_raw(request: NotificationRequest) -> NotifyResult<()> {
    dispatcher().notify_raw(request)
}
