// SPDX-FileCopyrightText: 2024 blinry <mail@blinry.org>
// SPDX-FileCopyrightText: 2024 zormit <nt4u@kpvn.de>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use thiserror::Error;

/// Errors the core itself can raise (§7).
///
/// Both variants are surfaced to the host as a plain string in
/// [`crate::action::ActionRecord::Error`], never as a thrown control-flow
/// interruption: the Model has no recovery logic of its own, so an error here
/// is data for the host to act on, not an exception to propagate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// An incoming edit failed validation (§4.1).
    #[error("invalid edit: {0}")]
    InvalidEdit(String),

    /// A call arrived in a state that doesn't allow it (§4.4): `correct` while
    /// READY or BUFFERING, most notably.
    #[error("received unexpected {0} action")]
    ProtocolViolation(&'static str),
}
