// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub SDK for desktop/CI builds where the native attribution SDK is
// unavailable.
//
// Unlike the real SDK it performs no network calls and resolves no
// attribution: every write succeeds and is kept in memory, and
// `attribution_data` reports nothing.  Real implementations bind the
// platform SDK behind the same traits.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

use linkbridge_core::{
    AttributionData, CapturePaymentRequest, IntegrationData, InitOptions, RemovePaymentRequest,
    TrackEventRequest, UserData,
};

use crate::traits::{AttributionSdk, SdkConnector, SdkError};

#[derive(Debug, Default)]
struct StubState {
    user: Option<UserData>,
    integration: Option<IntegrationData>,
    events: Vec<TrackEventRequest>,
    payments: Vec<CapturePaymentRequest>,
    push_token: Option<String>,
    pii_hashing: bool,
    aaid_disabled: bool,
}

/// In-memory SDK used when no native SDK is linked in.
#[derive(Default)]
pub struct StubSdk {
    state: Mutex<StubState>,
}

impl StubSdk {
    /// Number of events recorded so far (test/demo introspection).
    pub fn event_count(&self) -> usize {
        self.state.lock().expect("stub state lock poisoned").events.len()
    }

    /// Number of payments captured so far (test/demo introspection).
    pub fn payment_count(&self) -> usize {
        self.state
            .lock()
            .expect("stub state lock poisoned")
            .payments
            .len()
    }
}

#[async_trait]
impl AttributionSdk for StubSdk {
    async fn signup(
        &self,
        user: UserData,
        extra: Option<Map<String, Value>>,
    ) -> Result<(), SdkError> {
        debug!(user_id = %user.id, has_extra = extra.is_some(), "stub signup");
        self.state.lock().expect("stub state lock poisoned").user = Some(user);
        Ok(())
    }

    async fn set_user_data(&self, user: UserData) -> Result<(), SdkError> {
        self.state.lock().expect("stub state lock poisoned").user = Some(user);
        Ok(())
    }

    async fn set_additional_data(&self, data: IntegrationData) -> Result<(), SdkError> {
        self.state
            .lock()
            .expect("stub state lock poisoned")
            .integration = Some(data);
        Ok(())
    }

    async fn track_event(&self, event: TrackEventRequest) -> Result<(), SdkError> {
        debug!(event = %event.name, "stub track_event");
        self.state
            .lock()
            .expect("stub state lock poisoned")
            .events
            .push(event);
        Ok(())
    }

    async fn capture_payment(&self, request: CapturePaymentRequest) -> Result<(), SdkError> {
        self.state
            .lock()
            .expect("stub state lock poisoned")
            .payments
            .push(request);
        Ok(())
    }

    async fn remove_payment(&self, request: RemovePaymentRequest) -> Result<(), SdkError> {
        let mut state = self.state.lock().expect("stub state lock poisoned");
        state.payments.retain(|p| {
            request
                .payment_id
                .as_ref()
                .is_none_or(|id| &p.payment_id != id)
                && request.user_id.as_ref().is_none_or(|id| &p.user_id != id)
        });
        Ok(())
    }

    async fn attribution_data(&self) -> Result<Option<AttributionData>, SdkError> {
        // The stub never resolves attribution.
        Ok(None)
    }

    async fn trigger_deeplink(&self) -> Result<(), SdkError> {
        debug!("stub trigger_deeplink (no deferred deep link)");
        Ok(())
    }

    async fn set_push_token(&self, token: String) -> Result<(), SdkError> {
        self.state
            .lock()
            .expect("stub state lock poisoned")
            .push_token = Some(token);
        Ok(())
    }

    fn enable_pii_hashing(&self, enabled: bool) -> Result<(), SdkError> {
        self.state
            .lock()
            .expect("stub state lock poisoned")
            .pii_hashing = enabled;
        Ok(())
    }

    fn set_disable_aaid_collection(&self, disabled: bool) -> Result<(), SdkError> {
        self.state
            .lock()
            .expect("stub state lock poisoned")
            .aaid_disabled = disabled;
        Ok(())
    }

    fn aaid_collection_disabled(&self) -> Result<bool, SdkError> {
        Ok(self
            .state
            .lock()
            .expect("stub state lock poisoned")
            .aaid_disabled)
    }

    fn version(&self) -> String {
        concat!(env!("CARGO_PKG_VERSION"), "-stub").to_string()
    }
}

/// Connector returning a fresh [`StubSdk`] on every `init`.
#[derive(Debug, Default)]
pub struct StubConnector;

#[async_trait]
impl SdkConnector for StubConnector {
    async fn initialize(
        &self,
        options: InitOptions,
    ) -> Result<Arc<dyn AttributionSdk>, SdkError> {
        debug!(
            debug_mode = options.debug,
            platform = options.platform.as_deref().unwrap_or("unset"),
            "stub SDK initialized"
        );
        Ok(Arc::new(StubSdk::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_events_and_payments() {
        let sdk = StubSdk::default();
        sdk.track_event(TrackEventRequest {
            name: "open".into(),
            data: None,
            id: None,
        })
        .await
        .expect("track");
        sdk.capture_payment(CapturePaymentRequest {
            payment_id: "p-1".into(),
            user_id: "u-1".into(),
            amount: 10.0,
            payment_type: Default::default(),
            status: Default::default(),
        })
        .await
        .expect("capture");

        assert_eq!(sdk.event_count(), 1);
        assert_eq!(sdk.payment_count(), 1);
    }

    #[tokio::test]
    async fn remove_payment_matches_by_either_id() {
        let sdk = StubSdk::default();
        for (pid, uid) in [("p-1", "u-1"), ("p-2", "u-2")] {
            sdk.capture_payment(CapturePaymentRequest {
                payment_id: pid.into(),
                user_id: uid.into(),
                amount: 1.0,
                payment_type: Default::default(),
                status: Default::default(),
            })
            .await
            .expect("capture");
        }

        sdk.remove_payment(RemovePaymentRequest {
            user_id: None,
            payment_id: Some("p-1".into()),
        })
        .await
        .expect("remove");
        assert_eq!(sdk.payment_count(), 1);

        // Both fields absent removes nothing in particular but must succeed.
        sdk.remove_payment(RemovePaymentRequest::default())
            .await
            .expect("remove with empty request");
    }

    #[tokio::test]
    async fn attribution_is_always_absent() {
        let sdk = StubSdk::default();
        assert!(sdk.attribution_data().await.expect("query").is_none());
    }

    #[test]
    fn aaid_flag_round_trips() {
        let sdk = StubSdk::default();
        assert!(!sdk.aaid_collection_disabled().expect("query"));
        sdk.set_disable_aaid_collection(true).expect("set");
        assert!(sdk.aaid_collection_disabled().expect("query"));
    }

    #[tokio::test]
    async fn connector_hands_out_fresh_instances() {
        let connector = StubConnector;
        let options = InitOptions {
            token: "tok".into(),
            secret_key: None,
            key_id: None,
            debug: false,
            platform: None,
            package_version: None,
            disable_idfa: None,
        };
        let first = connector.initialize(options.clone()).await.expect("init");
        let second = connector.initialize(options).await.expect("init again");
        assert!(!std::ptr::addr_eq(
            Arc::as_ptr(&first),
            Arc::as_ptr(&second)
        ));
    }
}
