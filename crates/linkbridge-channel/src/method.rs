// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The bridge surface: every method name the channel answers to.
//
// The surface is the union of the two historical platform bindings, which
// never reached feature parity.  Per-method provenance is noted on the
// variants; callers on a platform whose SDK lacks an operation receive a
// `_FAILED` result with the platform-unavailable message rather than
// `NOT_IMPLEMENTED`.

/// One operation of the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Create (or replace) the shared SDK instance.
    Init,
    GetAttributionData,
    Signup,
    SetUserData,
    SetAdditionalData,
    TrackEvent,
    CapturePayment,
    RemovePayment,
    /// Pure local check: has `init` succeeded?
    IsAvailable,
    /// Android binding only.
    EnablePiiHashing,
    SetPushToken,
    /// Android binding only.
    SetDisableAaidCollection,
    /// Android binding only.
    IsAaidCollectionDisabled,
    /// iOS binding only.
    TriggerDeeplink,
    /// iOS binding only.
    GetVersion,
}

impl Method {
    /// Resolve a wire-level method name.  `None` means "not implemented".
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "init" => Some(Self::Init),
            "getAttributionData" => Some(Self::GetAttributionData),
            "signup" => Some(Self::Signup),
            "setUserData" => Some(Self::SetUserData),
            "setAdditionalData" => Some(Self::SetAdditionalData),
            "trackEvent" => Some(Self::TrackEvent),
            "capturePayment" => Some(Self::CapturePayment),
            "removePayment" => Some(Self::RemovePayment),
            "isAvailable" => Some(Self::IsAvailable),
            "enablePIIHashing" => Some(Self::EnablePiiHashing),
            "setPushToken" => Some(Self::SetPushToken),
            "setDisableAaidCollection" => Some(Self::SetDisableAaidCollection),
            "isAaidCollectionDisabled" => Some(Self::IsAaidCollectionDisabled),
            "triggerDeeplink" => Some(Self::TriggerDeeplink),
            "getVersion" => Some(Self::GetVersion),
            _ => None,
        }
    }

    /// Name as it appears on the wire.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::GetAttributionData => "getAttributionData",
            Self::Signup => "signup",
            Self::SetUserData => "setUserData",
            Self::SetAdditionalData => "setAdditionalData",
            Self::TrackEvent => "trackEvent",
            Self::CapturePayment => "capturePayment",
            Self::RemovePayment => "removePayment",
            Self::IsAvailable => "isAvailable",
            Self::EnablePiiHashing => "enablePIIHashing",
            Self::SetPushToken => "setPushToken",
            Self::SetDisableAaidCollection => "setDisableAaidCollection",
            Self::IsAaidCollectionDisabled => "isAaidCollectionDisabled",
            Self::TriggerDeeplink => "triggerDeeplink",
            Self::GetVersion => "getVersion",
        }
    }

    /// Prefix of the `_FAILED` / `_EXCEPTION` error codes for this operation.
    pub fn error_prefix(&self) -> &'static str {
        match self {
            Self::Init => "INIT",
            Self::GetAttributionData => "ATTRIBUTION_DATA",
            Self::Signup => "SIGNUP",
            Self::SetUserData => "SET_USER_DATA",
            Self::SetAdditionalData => "SET_ADDITIONAL_DATA",
            Self::TrackEvent => "TRACK_EVENT",
            Self::CapturePayment => "CAPTURE_PAYMENT",
            Self::RemovePayment => "REMOVE_PAYMENT",
            Self::IsAvailable => "IS_AVAILABLE",
            Self::EnablePiiHashing => "ENABLE_PII_HASHING",
            Self::SetPushToken => "SET_PUSH_TOKEN",
            Self::SetDisableAaidCollection => "SET_DISABLE_AAID",
            Self::IsAaidCollectionDisabled => "IS_AAID_COLLECTION_DISABLED",
            Self::TriggerDeeplink => "TRIGGER_DEEPLINK",
            Self::GetVersion => "GET_VERSION",
        }
    }

    /// Fixed message used when the native SDK fails without saying why.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::Init => "Initialization failed",
            Self::GetAttributionData => "Failed to get attribution data",
            Self::Signup => "Signup failed",
            Self::SetUserData => "Set user data failed",
            Self::SetAdditionalData => "Set additional data failed",
            Self::TrackEvent => "Track event failed",
            Self::CapturePayment => "Capture payment failed",
            Self::RemovePayment => "Remove payment failed",
            Self::IsAvailable => "Availability check failed",
            Self::EnablePiiHashing => "Enable PII hashing failed",
            Self::SetPushToken => "Set push token failed",
            Self::SetDisableAaidCollection => "Set AAID collection failed",
            Self::IsAaidCollectionDisabled => "AAID collection query failed",
            Self::TriggerDeeplink => "Trigger deeplink failed",
            Self::GetVersion => "Version query failed",
        }
    }

    /// Whether the operation needs a live SDK instance.  Everything except
    /// `init` (which creates it) and `isAvailable` (which probes for it).
    pub fn requires_sdk(&self) -> bool {
        !matches!(self, Self::Init | Self::IsAvailable)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Method; 15] = [
        Method::Init,
        Method::GetAttributionData,
        Method::Signup,
        Method::SetUserData,
        Method::SetAdditionalData,
        Method::TrackEvent,
        Method::CapturePayment,
        Method::RemovePayment,
        Method::IsAvailable,
        Method::EnablePiiHashing,
        Method::SetPushToken,
        Method::SetDisableAaidCollection,
        Method::IsAaidCollectionDisabled,
        Method::TriggerDeeplink,
        Method::GetVersion,
    ];

    #[test]
    fn wire_names_round_trip() {
        for method in ALL {
            assert_eq!(Method::parse(method.wire_name()), Some(method));
        }
    }

    #[test]
    fn unknown_names_do_not_parse() {
        assert_eq!(Method::parse("frobnicate"), None);
        // Method names are case-sensitive.
        assert_eq!(Method::parse("Init"), None);
        assert_eq!(Method::parse("getattributiondata"), None);
    }

    #[test]
    fn only_init_and_is_available_skip_the_sdk_guard() {
        for method in ALL {
            let expected = !matches!(method, Method::Init | Method::IsAvailable);
            assert_eq!(method.requires_sdk(), expected, "{method}");
        }
    }
}
