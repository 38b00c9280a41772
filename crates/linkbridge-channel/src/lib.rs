// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Linkbridge Channel — the method channel itself.  This crate bridges
// between the loosely-typed call requests arriving from the host and the
// strongly-typed SDK boundary defined in `linkbridge-sdk`.

pub mod channel;
pub mod dispatch;
pub mod method;

pub use channel::{CHANNEL_NAME, ChannelServer, MethodChannel, method_channel};
pub use dispatch::Dispatcher;
pub use method::Method;
