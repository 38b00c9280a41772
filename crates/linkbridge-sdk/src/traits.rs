// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Trait seam between the dispatcher and the platform-native attribution SDK.
//
// Asynchronous operations mirror the SDK's own async surface; the privacy
// toggles and the version query are synchronous on every platform and are
// declared as plain methods so the dispatcher can answer them inline.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use linkbridge_core::{
    AttributionData, CapturePaymentRequest, IntegrationData, InitOptions, RemovePaymentRequest,
    TrackEventRequest, UserData,
};

/// Failure reported by the native SDK.
#[derive(Debug, Clone, Error)]
pub enum SdkError {
    /// The SDK rejected the call and said why.
    #[error("{0}")]
    Api(String),

    /// The SDK failed without a message.  The dispatcher substitutes the
    /// operation's fixed fallback string on the wire.
    #[error("native SDK reported failure")]
    Unspecified,

    /// The operation exists in the unified surface but this platform's SDK
    /// build does not ship it.
    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// The platform-native attribution/analytics SDK.
///
/// Implementations own all real logic — attribution resolution, network
/// calls, persistence, retry.  The bridge never inspects their behaviour;
/// it only forwards typed requests and translates results.  Implementations
/// must be safe to call concurrently: the bridge adds no locking around the
/// shared instance.
#[async_trait]
pub trait AttributionSdk: Send + Sync {
    async fn signup(&self, user: UserData, extra: Option<Map<String, Value>>)
    -> Result<(), SdkError>;

    async fn set_user_data(&self, user: UserData) -> Result<(), SdkError>;

    async fn set_additional_data(&self, data: IntegrationData) -> Result<(), SdkError>;

    async fn track_event(&self, event: TrackEventRequest) -> Result<(), SdkError>;

    async fn capture_payment(&self, request: CapturePaymentRequest) -> Result<(), SdkError>;

    async fn remove_payment(&self, request: RemovePaymentRequest) -> Result<(), SdkError>;

    /// Resolved attribution for this install, or `None` when the SDK has
    /// nothing yet.  `None` is not an error.
    async fn attribution_data(&self) -> Result<Option<AttributionData>, SdkError>;

    /// Re-fire the deferred deep link, if any.
    async fn trigger_deeplink(&self) -> Result<(), SdkError>;

    async fn set_push_token(&self, token: String) -> Result<(), SdkError>;

    fn enable_pii_hashing(&self, enabled: bool) -> Result<(), SdkError>;

    fn set_disable_aaid_collection(&self, disabled: bool) -> Result<(), SdkError>;

    fn aaid_collection_disabled(&self) -> Result<bool, SdkError>;

    /// Native SDK version string.
    fn version(&self) -> String;
}

/// Creates (or re-creates) the shared SDK instance on `init`.
///
/// Kept separate from [`AttributionSdk`] so the instance lifecycle is an
/// explicit dependency of the dispatcher rather than a hidden global inside
/// the SDK.
#[async_trait]
pub trait SdkConnector: Send + Sync {
    async fn initialize(&self, options: InitOptions) -> Result<Arc<dyn AttributionSdk>, SdkError>;
}
