// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared SDK instance slot.
//
// `init` installs the instance, every other operation reads it, nothing ever
// tears it down.  `isAvailable` is a pure read of "instance present".  The
// lock guards only the slot — concurrent use of the instance itself is
// delegated to the SDK's own thread-safety guarantees.

use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::traits::AttributionSdk;

/// Cheaply cloneable handle to the process-wide SDK instance.
#[derive(Clone, Default)]
pub struct SdkHandle {
    inner: Arc<RwLock<Option<Arc<dyn AttributionSdk>>>>,
}

impl SdkHandle {
    /// Empty slot — `is_available` reads false until `install` runs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install (or replace) the shared instance.  Repeated `init` calls land
    /// here and simply swap the previous instance out.
    pub fn install(&self, sdk: Arc<dyn AttributionSdk>) {
        let mut slot = self.inner.write().expect("sdk handle lock poisoned");
        let replacing = slot.is_some();
        *slot = Some(sdk);
        debug!(replacing, "native SDK instance installed");
    }

    /// Current instance, if `init` has succeeded.
    pub fn get(&self) -> Option<Arc<dyn AttributionSdk>> {
        self.inner
            .read()
            .expect("sdk handle lock poisoned")
            .clone()
    }

    pub fn is_available(&self) -> bool {
        self.inner
            .read()
            .expect("sdk handle lock poisoned")
            .is_some()
    }
}
