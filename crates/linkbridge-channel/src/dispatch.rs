// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The bridge dispatcher: decode a (method, argument bag) request, validate
// required arguments, convert to the SDK's typed requests, invoke, and
// translate the outcome into exactly one call result.
//
// Required-argument checks run synchronously before any native call.  Native
// invocations for asynchronous operations run on their own spawned task, and
// synchronous ones under `catch_unwind`, so a panic inside the SDK (or the
// conversion layer) is contained and surfaced as an `_EXCEPTION` failure
// instead of tearing the bridge down.  Nothing is retried; every failure
// goes back to the caller verbatim.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::task::JoinError;
use tracing::{debug, info, instrument, warn};

use linkbridge_core::{
    ArgumentBag, BridgeError, CallFailure, CallResult, CapturePaymentRequest, InitOptions,
    IntegrationData, RemovePaymentRequest, TrackEventRequest, UserData,
};
use linkbridge_sdk::{AttributionSdk, SdkConnector, SdkError, SdkHandle};

use crate::method::Method;

/// Stateless call handler.  The only thing it holds onto between calls is
/// the shared SDK handle (written by `init`, read by everything else) and
/// the connector that `init` uses to create instances.
#[derive(Clone)]
pub struct Dispatcher {
    handle: SdkHandle,
    connector: Arc<dyn SdkConnector>,
}

impl Dispatcher {
    pub fn new(connector: Arc<dyn SdkConnector>) -> Self {
        Self {
            handle: SdkHandle::new(),
            connector,
        }
    }

    /// The SDK handle, for hosts that need to probe availability directly.
    pub fn sdk_handle(&self) -> &SdkHandle {
        &self.handle
    }

    /// Handle one call request.  Always returns exactly one result; never
    /// panics outward.
    #[instrument(skip(self, arguments))]
    pub async fn handle(&self, method: &str, arguments: Value) -> CallResult {
        let Some(resolved) = Method::parse(method) else {
            debug!("unknown method");
            return Err(CallFailure::from(BridgeError::NotImplemented(
                method.to_string(),
            )));
        };

        let bag = ArgumentBag::new(arguments);
        match self.dispatch(resolved, &bag).await {
            Ok(value) => Ok(value),
            Err(err) => {
                warn!(code = %err.code(), error = %err, "call failed");
                Err(CallFailure::from(err))
            }
        }
    }

    async fn dispatch(&self, method: Method, bag: &ArgumentBag) -> Result<Value, BridgeError> {
        if method.requires_sdk() && !self.handle.is_available() {
            return Err(BridgeError::NotInitialized);
        }

        match method {
            Method::Init => self.init(bag).await,
            Method::IsAvailable => Ok(Value::Bool(self.handle.is_available())),
            Method::GetAttributionData => self.attribution_data().await,
            Method::Signup => self.signup(bag).await,
            Method::SetUserData => self.set_user_data(bag).await,
            Method::SetAdditionalData => self.set_additional_data(bag).await,
            Method::TrackEvent => self.track_event(bag).await,
            Method::CapturePayment => self.capture_payment(bag).await,
            Method::RemovePayment => self.remove_payment(bag).await,
            Method::TriggerDeeplink => self.trigger_deeplink().await,
            Method::SetPushToken => self.set_push_token(bag).await,
            Method::EnablePiiHashing => self.enable_pii_hashing(bag),
            Method::SetDisableAaidCollection => self.set_disable_aaid_collection(bag),
            Method::IsAaidCollectionDisabled => self.is_aaid_collection_disabled(),
            Method::GetVersion => self.get_version(),
        }
    }

    fn sdk(&self) -> Result<Arc<dyn AttributionSdk>, BridgeError> {
        self.handle.get().ok_or(BridgeError::NotInitialized)
    }

    async fn init(&self, bag: &ArgumentBag) -> Result<Value, BridgeError> {
        let Some(options) = InitOptions::from_bag(bag) else {
            return Err(BridgeError::InvalidArgument("Token is required".into()));
        };

        let connector = Arc::clone(&self.connector);
        let sdk = run_native(Method::Init, async move {
            connector.initialize(options).await
        })
        .await?;

        // Repeated init lands here too and replaces the previous instance.
        self.handle.install(sdk);
        info!("native SDK initialized");
        Ok(Value::Null)
    }

    async fn attribution_data(&self) -> Result<Value, BridgeError> {
        let sdk = self.sdk()?;
        let data = run_native(Method::GetAttributionData, async move {
            sdk.attribution_data().await
        })
        .await?;

        // Nothing resolved yet is an empty map, not an error.
        Ok(match data {
            Some(attribution) => attribution.into_payload(),
            None => Value::Object(Map::new()),
        })
    }

    async fn signup(&self, bag: &ArgumentBag) -> Result<Value, BridgeError> {
        let sdk = self.sdk()?;
        let Some(user_bag) = bag.get_bag("userData") else {
            return Err(BridgeError::InvalidArgument("User data is required".into()));
        };
        let user = UserData::from_bag(&user_bag);
        let extra = bag.get_map("data");

        run_native(Method::Signup, async move { sdk.signup(user, extra).await }).await?;
        Ok(Value::Null)
    }

    async fn set_user_data(&self, bag: &ArgumentBag) -> Result<Value, BridgeError> {
        let sdk = self.sdk()?;
        let Some(user_bag) = bag.get_bag("userData") else {
            return Err(BridgeError::InvalidArgument("User data is required".into()));
        };
        let user = UserData::from_bag(&user_bag);

        run_native(Method::SetUserData, async move {
            sdk.set_user_data(user).await
        })
        .await?;
        Ok(Value::Null)
    }

    async fn set_additional_data(&self, bag: &ArgumentBag) -> Result<Value, BridgeError> {
        let sdk = self.sdk()?;
        let Some(data_bag) = bag.get_bag("integrationData") else {
            return Err(BridgeError::InvalidArgument(
                "Integration data is required".into(),
            ));
        };
        let data = IntegrationData::from_bag(&data_bag);

        run_native(Method::SetAdditionalData, async move {
            sdk.set_additional_data(data).await
        })
        .await?;
        Ok(Value::Null)
    }

    async fn track_event(&self, bag: &ArgumentBag) -> Result<Value, BridgeError> {
        let sdk = self.sdk()?;
        let Some(event) = TrackEventRequest::from_bag(bag) else {
            return Err(BridgeError::InvalidArgument("Event name is required".into()));
        };

        run_native(Method::TrackEvent, async move {
            sdk.track_event(event).await
        })
        .await?;
        Ok(Value::Null)
    }

    async fn capture_payment(&self, bag: &ArgumentBag) -> Result<Value, BridgeError> {
        let sdk = self.sdk()?;
        let Some(request) = CapturePaymentRequest::from_bag(bag) else {
            return Err(BridgeError::InvalidArgument(
                "User ID and amount are required".into(),
            ));
        };

        run_native(Method::CapturePayment, async move {
            sdk.capture_payment(request).await
        })
        .await?;
        Ok(Value::Null)
    }

    async fn remove_payment(&self, bag: &ArgumentBag) -> Result<Value, BridgeError> {
        let sdk = self.sdk()?;
        // Both fields optional; an empty request is the SDK's business.
        let request = RemovePaymentRequest::from_bag(bag);

        run_native(Method::RemovePayment, async move {
            sdk.remove_payment(request).await
        })
        .await?;
        Ok(Value::Null)
    }

    async fn trigger_deeplink(&self) -> Result<Value, BridgeError> {
        let sdk = self.sdk()?;
        run_native(Method::TriggerDeeplink, async move {
            sdk.trigger_deeplink().await
        })
        .await?;
        Ok(Value::Null)
    }

    async fn set_push_token(&self, bag: &ArgumentBag) -> Result<Value, BridgeError> {
        let sdk = self.sdk()?;
        let Some(token) = bag.get_string("pushToken") else {
            return Err(BridgeError::InvalidArgument(
                "pushToken parameter is required".into(),
            ));
        };
        if token.trim().is_empty() {
            return Err(BridgeError::InvalidArgument(
                "Push token cannot be empty".into(),
            ));
        }

        run_native(Method::SetPushToken, async move {
            sdk.set_push_token(token).await
        })
        .await?;
        Ok(Value::Null)
    }

    // -- Synchronous operations: answered inline, no spawn ------------------

    fn enable_pii_hashing(&self, bag: &ArgumentBag) -> Result<Value, BridgeError> {
        let sdk = self.sdk()?;
        let Some(enabled) = bag.get_bool("enabled") else {
            return Err(BridgeError::InvalidArgument(
                "enabled parameter is required".into(),
            ));
        };
        run_native_sync(Method::EnablePiiHashing, || sdk.enable_pii_hashing(enabled))?;
        Ok(Value::Null)
    }

    fn set_disable_aaid_collection(&self, bag: &ArgumentBag) -> Result<Value, BridgeError> {
        let sdk = self.sdk()?;
        let Some(disabled) = bag.get_bool("disabled") else {
            return Err(BridgeError::InvalidArgument(
                "disabled parameter is required".into(),
            ));
        };
        run_native_sync(Method::SetDisableAaidCollection, || {
            sdk.set_disable_aaid_collection(disabled)
        })?;
        debug!(disabled, "AAID collection toggled");
        Ok(Value::Null)
    }

    fn is_aaid_collection_disabled(&self) -> Result<Value, BridgeError> {
        let sdk = self.sdk()?;
        let disabled = run_native_sync(Method::IsAaidCollectionDisabled, || {
            sdk.aaid_collection_disabled()
        })?;
        Ok(Value::Bool(disabled))
    }

    fn get_version(&self) -> Result<Value, BridgeError> {
        let sdk = self.sdk()?;
        let version = run_native_sync(Method::GetVersion, || Ok(sdk.version()))?;
        Ok(Value::String(version))
    }
}

/// Translate a native-reported failure, substituting the operation's fixed
/// fallback string when the SDK gave no message.
fn native_failure(method: Method, err: SdkError) -> BridgeError {
    let message = match &err {
        SdkError::Unspecified => method.fallback_message().to_string(),
        other => other.to_string(),
    };
    BridgeError::NativeFailure {
        operation: method.error_prefix(),
        message,
    }
}

/// Run an asynchronous native call on its own task.
///
/// The task boundary contains panics: a panicking SDK call becomes an
/// `_EXCEPTION` failure and the bridge stays usable.
async fn run_native<T, F>(method: Method, call: F) -> Result<T, BridgeError>
where
    F: Future<Output = Result<T, SdkError>> + Send + 'static,
    T: Send + 'static,
{
    match tokio::spawn(call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(native_failure(method, err)),
        Err(join_err) => Err(BridgeError::NativeException {
            operation: method.error_prefix(),
            message: panic_message(join_err),
        }),
    }
}

/// Run a synchronous native call under `catch_unwind`, translating failures
/// and panics the same way [`run_native`] does for spawned calls.
fn run_native_sync<T>(
    method: Method,
    call: impl FnOnce() -> Result<T, SdkError>,
) -> Result<T, BridgeError> {
    match std::panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(native_failure(method, err)),
        Err(payload) => Err(BridgeError::NativeException {
            operation: method.error_prefix(),
            message: payload_message(payload.as_ref()),
        }),
    }
}

fn panic_message(err: JoinError) -> String {
    match err.try_into_panic() {
        Ok(payload) => payload_message(payload.as_ref()),
        Err(_) => "native call cancelled".to_string(),
    }
}

/// Best-effort extraction of a panic payload's message.
fn payload_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "native call panicked".to_string()
    }
}
