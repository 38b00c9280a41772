// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Domain types crossing the bridge.
//
// Each request type owns a total `from_bag` conversion: optional fields that
// are absent (or carry a value of the wrong type) stay unset, never an error.
// Wire key casing follows the channel contract — camelCase for call
// arguments, snake_case for data fields inside `userData` and payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::args::ArgumentBag;

/// Unique identifier correlating a call request with its log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallId(pub Uuid);

impl CallId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CallId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User identity handed to the SDK on `signup` / `setUserData`.
///
/// Only `id` is mandatory on the native side, and even that defaults to an
/// empty string when the caller omits it.  The third-party analytics
/// identifiers are forwarded verbatim when present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default)]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mixpanel_distinct_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amplitude_device_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posthog_distinct_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub braze_device_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ga_app_instance_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ga_session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_first_time_user: Option<bool>,
}

impl UserData {
    pub fn from_bag(bag: &ArgumentBag) -> Self {
        Self {
            id: bag.get_string("id").unwrap_or_default(),
            name: bag.get_string("name"),
            email: bag.get_string("email"),
            phone: bag.get_string("phone"),
            mixpanel_distinct_id: bag.get_string("mixpanel_distinct_id"),
            amplitude_device_id: bag.get_string("amplitude_device_id"),
            posthog_distinct_id: bag.get_string("posthog_distinct_id"),
            braze_device_id: bag.get_string("braze_device_id"),
            ga_app_instance_id: bag.get_string("ga_app_instance_id"),
            ga_session_id: bag.get_string("ga_session_id"),
            user_created_at: bag.get_string("user_created_at"),
            is_first_time_user: bag.get_bool("is_first_time_user"),
        }
    }
}

/// Third-party integration identifiers (`setAdditionalData`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntegrationData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clevertap_id: Option<String>,
}

impl IntegrationData {
    pub fn from_bag(bag: &ArgumentBag) -> Self {
        Self {
            clevertap_id: bag.get_string("clevertap_id"),
        }
    }
}

/// Options accepted by `init`.  Union of both historical platform bindings:
/// `platform`/`packageVersion` tagging came from the Android side,
/// `disableIdfa` from iOS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitOptions {
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
    #[serde(default)]
    pub debug: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_idfa: Option<bool>,
}

impl InitOptions {
    /// Returns `None` when the required `token` argument is absent.
    pub fn from_bag(bag: &ArgumentBag) -> Option<Self> {
        Some(Self {
            token: bag.get_string("token")?,
            secret_key: bag.get_string("secretKey"),
            key_id: bag.get_string("keyId"),
            debug: bag.get_bool("debug").unwrap_or(false),
            platform: bag.get_string("platform"),
            package_version: bag.get_string("packageVersion"),
            disable_idfa: bag.get_bool("disableIdfa"),
        })
    }
}

/// Event to forward to `trackEvent`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackEventRequest {
    #[serde(rename = "eventName")]
    pub name: String,
    #[serde(rename = "eventData", skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
    #[serde(rename = "eventId", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl TrackEventRequest {
    /// Returns `None` when the required `eventName` argument is absent.
    pub fn from_bag(bag: &ArgumentBag) -> Option<Self> {
        Some(Self {
            name: bag.get_string("eventName")?,
            data: bag.get_map("eventData"),
            id: bag.get_string("eventId"),
        })
    }
}

/// Category of a captured payment.  Unknown wire strings fall back to
/// `Default` rather than failing the call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    #[default]
    Default,
    FirstPayment,
    WalletTopup,
    FundsWithdrawal,
    SubscriptionCreated,
    SubscriptionRenewed,
    OneTime,
    Recurring,
}

impl PaymentType {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "FIRST_PAYMENT" => Self::FirstPayment,
            "WALLET_TOPUP" => Self::WalletTopup,
            "FUNDS_WITHDRAWAL" => Self::FundsWithdrawal,
            "SUBSCRIPTION_CREATED" => Self::SubscriptionCreated,
            "SUBSCRIPTION_RENEWED" => Self::SubscriptionRenewed,
            "ONE_TIME" => Self::OneTime,
            "RECURRING" => Self::Recurring,
            _ => Self::Default,
        }
    }
}

/// Lifecycle state of a captured payment.  Unknown wire strings fall back to
/// `PaymentCompleted`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    PaymentInitiated,
    #[default]
    PaymentCompleted,
    PaymentFailed,
    PaymentCancelled,
}

impl PaymentStatus {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "PAYMENT_INITIATED" => Self::PaymentInitiated,
            "PAYMENT_FAILED" => Self::PaymentFailed,
            "PAYMENT_CANCELLED" => Self::PaymentCancelled,
            _ => Self::PaymentCompleted,
        }
    }
}

/// Strongly-typed request for `capturePayment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturePaymentRequest {
    #[serde(default)]
    pub payment_id: String,
    pub user_id: String,
    pub amount: f64,
    #[serde(rename = "type", default)]
    pub payment_type: PaymentType,
    #[serde(default)]
    pub status: PaymentStatus,
}

impl CapturePaymentRequest {
    /// Returns `None` when `userId` or `amount` is absent.
    pub fn from_bag(bag: &ArgumentBag) -> Option<Self> {
        Some(Self {
            payment_id: bag.get_string("paymentId").unwrap_or_default(),
            user_id: bag.get_string("userId")?,
            amount: bag.get_f64("amount")?,
            payment_type: bag
                .get_str("type")
                .map(PaymentType::from_wire)
                .unwrap_or_default(),
            status: bag
                .get_str("status")
                .map(PaymentStatus::from_wire)
                .unwrap_or_default(),
        })
    }
}

/// Request for `removePayment`.  Both fields are optional; the native SDK
/// decides what an empty removal means.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovePaymentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
}

impl RemovePaymentRequest {
    pub fn from_bag(bag: &ArgumentBag) -> Self {
        Self {
            user_id: bag.get_string("userId"),
            payment_id: bag.get_string("paymentId"),
        }
    }
}

/// Campaign attribution details resolved by the native SDK.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignData {
    pub id: Option<String>,
    pub name: Option<String>,
    pub ad_network: Option<String>,
    #[serde(rename = "type")]
    pub campaign_type: Option<String>,
    pub installed_at: Option<DateTime<Utc>>,
    pub store_click_at: Option<DateTime<Utc>>,
    pub group_name: Option<String>,
    pub asset_name: Option<String>,
    pub asset_group_name: Option<String>,
}

/// Attribution result produced by the native SDK.  The bridge only reshapes
/// it into the response payload; it never interprets the contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributionData {
    pub deeplink: Option<String>,
    pub campaign_data: CampaignData,
}

impl AttributionData {
    /// Wire payload for `getAttributionData`.  All keys are always present;
    /// unresolved fields are explicit nulls, matching the channel contract.
    pub fn into_payload(self) -> Value {
        let campaign = self.campaign_data;
        json!({
            "deeplink": self.deeplink,
            "campaign_data": {
                "id": campaign.id,
                "name": campaign.name,
                "ad_network": campaign.ad_network,
                "type": campaign.campaign_type,
                "installed_at": campaign.installed_at.map(|t| t.to_rfc3339()),
                "store_click_at": campaign.store_click_at.map(|t| t.to_rfc3339()),
                "group_name": campaign.group_name,
                "asset_name": campaign.asset_name,
                "asset_group_name": campaign.asset_group_name,
            },
        })
    }
}
