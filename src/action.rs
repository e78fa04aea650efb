// SPDX-FileCopyrightText: 2024 blinry <mail@blinry.org>
// SPDX-FileCopyrightText: 2024 zormit <nt4u@kpvn.de>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::edit::Edit;
use serde::Serialize;

/// What the host should do after a `submit`/`receive`/`correct` call returns
/// (§6, §9).
///
/// The source this core is ported from returns a record with optional
/// `send`/`apply`/`error` keys; only four combinations of those keys are ever
/// actually produced, so the Rust port collapses them into an exhaustive sum
/// type instead of leaving the impossible fifth combination representable.
///
/// `Serialize`-derived so a host can emit it as JSON directly; the Model
/// itself never serializes it, since `submit`/`receive`/`correct` are
/// ordinary Rust calls, not wire messages.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "action", content = "data", rename_all = "camelCase")]
pub enum ActionRecord {
    /// Nothing for the host to do yet (e.g. a local edit was queued behind an
    /// in-flight one, or `resolve` is still waiting on missing server edits).
    #[default]
    Nothing,
    /// Apply these remote edits to the local document, in order.
    Apply(Vec<Edit>),
    /// Transmit this edit to the server.
    Send(Edit),
    /// Apply these remote edits, then transmit this edit.
    ApplyAndSend(Vec<Edit>, Edit),
    /// The call was rejected; state is unchanged.
    Error(String),
}

impl ActionRecord {
    #[must_use]
    pub fn apply(edits: Vec<Edit>) -> Self {
        if edits.is_empty() {
            Self::Nothing
        } else {
            Self::Apply(edits)
        }
    }

    #[must_use]
    pub fn apply_and_send(edits: Vec<Edit>, send: Edit) -> Self {
        if edits.is_empty() {
            Self::Send(send)
        } else {
            Self::ApplyAndSend(edits, send)
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// The edits this action asks the host to apply, if any.
    #[must_use]
    pub fn applied(&self) -> &[Edit] {
        match self {
            Self::Apply(edits) | Self::ApplyAndSend(edits, _) => edits,
            Self::Nothing | Self::Send(_) | Self::Error(_) => &[],
        }
    }

    /// The edit this action asks the host to transmit, if any.
    #[must_use]
    pub fn sent(&self) -> Option<&Edit> {
        match self {
            Self::Send(edit) | Self::ApplyAndSend(_, edit) => Some(edit),
            Self::Nothing | Self::Apply(_) | Self::Error(_) => None,
        }
    }
}
