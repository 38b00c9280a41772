// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Drives the bridge end to end against the stub SDK:
//
//   RUST_LOG=debug cargo run --example attribution_demo

use std::sync::Arc;

use serde_json::{Value, json};

use linkbridge_channel::{Dispatcher, method_channel};
use linkbridge_sdk::StubConnector;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let dispatcher = Dispatcher::new(Arc::new(StubConnector));
    let (channel, server) = method_channel(dispatcher, 16);
    tokio::spawn(server.serve());

    let calls: Vec<(&str, Value)> = vec![
        ("isAvailable", Value::Null),
        ("init", json!({ "token": "demo-token", "debug": true })),
        ("isAvailable", Value::Null),
        (
            "signup",
            json!({
                "userData": {
                    "id": "demo-user",
                    "email": "demo@example.com",
                    "is_first_time_user": true,
                },
                "data": { "referrer": "organic" },
            }),
        ),
        (
            "trackEvent",
            json!({ "eventName": "demo_opened", "eventData": { "screen": "home" } }),
        ),
        (
            "capturePayment",
            json!({ "userId": "demo-user", "amount": 9.99, "type": "FIRST_PAYMENT" }),
        ),
        ("getAttributionData", Value::Null),
        ("getVersion", Value::Null),
        // Deliberately broken: missing required argument.
        ("setPushToken", json!({})),
        // Deliberately unknown method.
        ("selfDestruct", Value::Null),
    ];

    for (method, arguments) in calls {
        match channel.invoke(method, arguments).await {
            Ok(value) => println!("{method:>24} -> {value}"),
            Err(failure) => println!("{method:>24} -> {failure}"),
        }
    }
}
