// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Linkbridge SDK boundary.
//
// This crate defines the traits the dispatcher talks through and the shared
// instance handle created by `init`.  The real attribution SDK lives outside
// this repository; the `stub` module provides an in-memory implementation so
// that desktop builds, CI, and the example binary work without it.

pub mod handle;
pub mod stub;
pub mod traits;

pub use handle::SdkHandle;
pub use stub::{StubConnector, StubSdk};
pub use traits::{AttributionSdk, SdkConnector, SdkError};
