// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Linkbridge — Core types and error definitions shared across all crates.

pub mod args;
pub mod error;
pub mod types;

pub use args::ArgumentBag;
pub use error::{BridgeError, CallFailure, CallResult};
pub use types::*;
