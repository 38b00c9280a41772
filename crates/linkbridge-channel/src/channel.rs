// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The named bidirectional channel carrying (method, argument map) requests
// and (success value | failure) responses.
//
// Each request is served on its own spawned task, so in-flight calls
// complete in no particular order; the oneshot reply sender guarantees that
// exactly one result reaches the caller.  There is no queueing beyond the
// channel buffer, no batching, and no cancellation: a dispatched call always
// runs to completion.

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use linkbridge_core::{CallFailure, CallId, CallResult};

use crate::dispatch::Dispatcher;

/// Fixed identifier of the bridge's method channel.
pub const CHANNEL_NAME: &str = "linkbridge_native";

/// One in-flight call request.
struct CallRequest {
    id: CallId,
    method: String,
    arguments: Value,
    reply: oneshot::Sender<CallResult>,
}

/// Caller-side handle.  Cheaply cloneable; every clone feeds the same
/// serve loop.
#[derive(Clone)]
pub struct MethodChannel {
    tx: mpsc::Sender<CallRequest>,
}

impl MethodChannel {
    /// Invoke a method and wait for its single result.
    ///
    /// Returns a `CHANNEL_CLOSED` failure if the serve loop has shut down —
    /// the one failure that does not originate from the dispatcher.
    pub async fn invoke(&self, method: impl Into<String>, arguments: Value) -> CallResult {
        let (reply_tx, reply_rx) = oneshot::channel();
        let request = CallRequest {
            id: CallId::new(),
            method: method.into(),
            arguments,
            reply: reply_tx,
        };

        if self.tx.send(request).await.is_err() {
            return Err(CallFailure::channel_closed());
        }
        match reply_rx.await {
            Ok(result) => result,
            Err(_) => Err(CallFailure::channel_closed()),
        }
    }
}

/// Bridge-side serve loop.
pub struct ChannelServer {
    rx: mpsc::Receiver<CallRequest>,
    dispatcher: Dispatcher,
}

impl ChannelServer {
    /// Run until every caller-side handle has been dropped.
    pub async fn serve(mut self) {
        info!(channel = CHANNEL_NAME, "method channel serving");

        while let Some(request) = self.rx.recv().await {
            let dispatcher = self.dispatcher.clone();
            tokio::spawn(async move {
                debug!(call_id = %request.id, method = %request.method, "dispatching call");
                let result = dispatcher.handle(&request.method, request.arguments).await;
                if request.reply.send(result).is_err() {
                    warn!(call_id = %request.id, "caller gone before the result was delivered");
                }
            });
        }

        info!(channel = CHANNEL_NAME, "method channel closed");
    }
}

/// Create a connected (caller handle, serve loop) pair.
pub fn method_channel(dispatcher: Dispatcher, capacity: usize) -> (MethodChannel, ChannelServer) {
    let (tx, rx) = mpsc::channel(capacity);
    (MethodChannel { tx }, ChannelServer { rx, dispatcher })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use serde_json::json;

    use linkbridge_sdk::StubConnector;

    fn spawn_bridge() -> MethodChannel {
        let dispatcher = Dispatcher::new(Arc::new(StubConnector));
        let (channel, server) = method_channel(dispatcher, 16);
        tokio::spawn(server.serve());
        channel
    }

    #[tokio::test]
    async fn full_call_cycle_over_the_channel() {
        let channel = spawn_bridge();

        assert_eq!(
            channel.invoke("isAvailable", Value::Null).await,
            Ok(Value::Bool(false))
        );
        assert_eq!(
            channel.invoke("init", json!({ "token": "tok" })).await,
            Ok(Value::Null)
        );
        assert_eq!(
            channel.invoke("isAvailable", Value::Null).await,
            Ok(Value::Bool(true))
        );
        assert_eq!(
            channel
                .invoke("trackEvent", json!({ "eventName": "open" }))
                .await,
            Ok(Value::Null)
        );
        // The stub never resolves attribution.
        assert_eq!(
            channel.invoke("getAttributionData", Value::Null).await,
            Ok(json!({}))
        );
    }

    #[tokio::test]
    async fn failures_cross_the_channel_as_results() {
        let channel = spawn_bridge();

        let failure = channel
            .invoke("signup", json!({ "userData": { "id": "u" } }))
            .await
            .expect_err("not initialized");
        assert_eq!(failure.code, "NOT_INITIALIZED");

        let failure = channel
            .invoke("doesNotExist", Value::Null)
            .await
            .expect_err("unknown method");
        assert_eq!(failure.code, "NOT_IMPLEMENTED");
    }

    #[tokio::test]
    async fn concurrent_invocations_each_get_their_own_result() {
        let channel = spawn_bridge();
        channel
            .invoke("init", json!({ "token": "tok" }))
            .await
            .expect("init");

        let mut handles = Vec::new();
        for n in 0..8 {
            let channel = channel.clone();
            handles.push(tokio::spawn(async move {
                if n % 2 == 0 {
                    channel
                        .invoke("trackEvent", json!({ "eventName": format!("e-{n}") }))
                        .await
                } else {
                    // Odd calls are malformed on purpose.
                    channel.invoke("trackEvent", json!({})).await
                }
            }));
        }

        for (n, handle) in handles.into_iter().enumerate() {
            let result = handle.await.expect("task");
            if n % 2 == 0 {
                assert_eq!(result, Ok(Value::Null), "call {n}");
            } else {
                assert_eq!(result.expect_err("call should fail").code, "INVALID_ARGUMENT");
            }
        }
    }

    #[tokio::test]
    async fn dropped_server_reports_channel_closed() {
        let dispatcher = Dispatcher::new(Arc::new(StubConnector));
        let (channel, server) = method_channel(dispatcher, 4);
        drop(server);

        let failure = channel
            .invoke("isAvailable", Value::Null)
            .await
            .expect_err("closed");
        assert_eq!(failure.code, "CHANNEL_CLOSED");
    }
}
