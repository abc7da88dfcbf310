//! Example: Wiring Noticegate into an application
//!
//! Runs the same notifications through a development dispatcher (no sink)
//! and a reporting dispatcher backed by a `ChannelNotifier`, then drains the
//! deliveries the way a background reporter task would.
//!
//! Run with `RUST_LOG=noticegate=debug cargo run --example notify_demo`.

use noticegate::prelude::*;
use serde_json::json;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// =============================================================================
// Application errors
// =============================================================================

#[derive(Debug)]
struct PaymentDeclined {
    order_id: u64,
}

impl std::fmt::Display for PaymentDeclined {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "payment declined for order {}", self.order_id)
    }
}

impl std::error::Error for PaymentDeclined {}

fn report_all(dispatcher: &Dispatcher) {
    let outcomes = [
        (
            "error",
            dispatcher.notify(
                Failure::new(PaymentDeclined { order_id: 42 }),
                Some(json!({ "context": { "order_id": 42 } })),
                Options::new().action("checkout"),
            ),
        ),
        (
            "notice",
            dispatcher.notify(
                "Signup",
                Some(json!("user 7 signed up")),
                Options::new().notice_only(true),
            ),
        ),
        (
            "suppressed",
            dispatcher.notify(
                "CacheMiss",
                Some(json!("profile cache cold")),
                Options::new().raise_development(false),
            ),
        ),
        (
            "malformed",
            dispatcher.notify("Signup", None, Options::default()),
        ),
    ];

    for (label, outcome) in outcomes {
        match outcome {
            Ok(()) => println!("  {:<10} ok", label),
            Err(e) => println!("  {:<10} raised: {}", label, e),
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("development (no sink):");
    report_all(&Dispatcher::development());

    println!("reporting (channel sink):");
    let (notifier, mut deliveries) = ChannelNotifier::new("reporter", 16);
    let dispatcher = Dispatcher::reporting(Arc::new(notifier));
    let config = Config::from_env();
    dispatcher
        .configure(|current| {
            current.notice_only_api_key = config
                .notice_only_api_key
                .or_else(|| Some("demo-notice-key".to_string()));
        })
        .unwrap_or_else(|e| eprintln!("configuration rejected: {}", e));
    report_all(&dispatcher);
    drop(dispatcher);

    use futures::StreamExt;
    while let Some(delivery) = deliveries.next().await {
        let body = serde_json::to_string(&delivery.payload).unwrap_or_default();
        let key = delivery.api_key.as_deref().unwrap_or("default key");
        println!("  -> {} ({}): {}", delivery.sink, key, body);
    }
}
