// SPDX-FileCopyrightText: 2024 blinry <mail@blinry.org>
// SPDX-FileCopyrightText: 2024 zormit <nt4u@kpvn.de>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Host-facing wire types (§6). The Model itself never parses these: a host
//! decodes transport bytes into [`ServerMessage`] and calls
//! [`crate::model::Model::submit`]/[`receive`](crate::model::Model::receive)/
//! [`correct`](crate::model::Model::correct) directly, and serializes an
//! [`OutgoingMessage`] when an [`crate::action::ActionRecord`] asks it to send.
//! These types exist for the fixture-replay test harness and for hosts that
//! want a ready-made decoder rather than writing their own.

use crate::edit::Edit;
use serde::{Deserialize, Serialize};

/// A message the server sends to the host (§6, informative).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "message", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Carries document metadata and the initial version a freshly created
    /// [`crate::model::Model`] should be constructed with.
    Document { version: u64 },
    /// A batch of remote edits, to be handed to `Model::receive`.
    Transforms { transforms: Vec<Edit> },
    /// An acknowledgment of the in-flight edit, to be handed to
    /// `Model::correct`.
    Correction { version: u64 },
    /// A server-side error, unrelated to the Model's own `ActionRecord::Error`.
    Error { message: String },
}

/// A message the host transmits to the server when an [`crate::action::ActionRecord`]
/// carries a `send` edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum OutgoingMessage {
    Submit { transform: Edit },
}

impl OutgoingMessage {
    #[must_use]
    pub const fn submit(transform: Edit) -> Self {
        Self::Submit { transform }
    }
}
