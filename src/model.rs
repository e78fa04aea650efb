// SPDX-FileCopyrightText: 2024 blinry <mail@blinry.org>
// SPDX-FileCopyrightText: 2024 zormit <nt4u@kpvn.de>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::action::ActionRecord;
use crate::collide::collide;
use crate::edit::Edit;
use crate::error::ModelError;
use crate::merge::merge;
use tracing::{debug, warn};

/// The three states of the Model (§4.4). Carries no payload of its own: the
/// payload (`sending`, `unsent`, `unapplied`, `corrected_version`) lives
/// directly on [`Model`], so the cross-field invariants of §3.2 are ordinary
/// struct invariants rather than ones a state-indexed enum would need to
/// encode in its variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModelState {
    Ready,
    Sending,
    Buffering,
}

/// The client-side operational-transform coordination core (§2-§4).
///
/// A `Model` owns exactly one document session. It never blocks, never
/// spawns, and never touches the network or the document content directly:
/// every public method runs to completion synchronously and returns an
/// [`ActionRecord`] telling the host what to do next (§5).
#[derive(Debug)]
pub struct Model {
    state: ModelState,
    version: u64,
    corrected_version: Option<u64>,
    sending: Option<Edit>,
    unsent: Vec<Edit>,
    unapplied: Vec<Edit>,
    /// Set when a `resolve` call is blocked on missing server edits, so the
    /// following stalled call (and only that one) can warn (§4.5, §9).
    stalled: bool,
}

impl Model {
    /// Creates a Model for a document session starting at `base_version`,
    /// the version number the host received along with the document itself
    /// (§3.3, §6).
    #[must_use]
    pub const fn new(base_version: u64) -> Self {
        Self {
            state: ModelState::Ready,
            version: base_version,
            corrected_version: None,
            sending: None,
            unsent: Vec::new(),
            unapplied: Vec::new(),
            stalled: false,
        }
    }

    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self.state, ModelState::Ready)
    }

    /// Submits a local edit, already applied to the local document by the
    /// host (§4.4).
    pub fn submit(&mut self, edit: Edit) -> ActionRecord {
        if let Err(err) = edit.validate_local() {
            return ActionRecord::Error(err.to_string());
        }
        self.check_invariants();

        let action = match self.state {
            ModelState::Ready => {
                let versioned = edit.with_version(self.version + 1);
                debug!(version = versioned.version, "submitting local edit");
                self.sending = Some(versioned.clone());
                self.state = ModelState::Sending;
                ActionRecord::Send(versioned)
            }
            ModelState::Sending | ModelState::Buffering => {
                self.unsent.push(edit);
                ActionRecord::Nothing
            }
        };

        self.check_invariants();
        action
    }

    /// Delivers a batch of remote edits received from the server (§4.4).
    pub fn receive(&mut self, edits: Vec<Edit>) -> ActionRecord {
        for edit in &edits {
            if let Err(err) = edit.validate_remote() {
                return ActionRecord::Error(err.to_string());
            }
        }
        self.check_invariants();

        let action = match self.state {
            ModelState::Ready => {
                self.version += edits.len() as u64;
                debug!(version = self.version, count = edits.len(), "applied remote edits directly");
                ActionRecord::apply(edits)
            }
            ModelState::Sending => {
                self.unapplied.extend(edits);
                ActionRecord::Nothing
            }
            ModelState::Buffering => {
                self.unapplied.extend(edits);
                self.resolve()
            }
        };

        self.check_invariants();
        action
    }

    /// Delivers the server's acknowledgment of the in-flight edit (§4.4).
    pub fn correct(&mut self, version: u64) -> ActionRecord {
        self.check_invariants();

        let action = match self.state {
            ModelState::Ready | ModelState::Buffering => {
                ActionRecord::Error(ModelError::ProtocolViolation("correct").to_string())
            }
            ModelState::Sending => {
                self.corrected_version = Some(version);
                self.state = ModelState::Buffering;
                self.resolve()
            }
        };

        self.check_invariants();
        action
    }

    /// Resolve a BUFFERING Model once all preceding server edits up to
    /// `corrected_version` have arrived (§4.5).
    fn resolve(&mut self) -> ActionRecord {
        debug_assert_eq!(self.state, ModelState::Buffering);
        let corrected_version = self
            .corrected_version
            .expect("BUFFERING always carries a corrected_version");

        if self.version + self.unapplied.len() as u64 < corrected_version - 1 {
            if self.stalled {
                warn!(
                    version = self.version,
                    corrected_version,
                    unapplied = self.unapplied.len(),
                    "resolve still blocked waiting on missing server edits"
                );
            }
            self.stalled = true;
            return ActionRecord::Nothing;
        }
        self.stalled = false;

        self.version += self.unapplied.len() as u64 + 1;

        // Collide every buffered remote edit against the whole client-side
        // queue (`sending` followed by `unsent`), queue order (§4.5 step 3).
        for remote in &mut self.unapplied {
            if let Some(local) = self.sending.as_mut() {
                collide(remote, local);
            }
            for local in &mut self.unsent {
                collide(remote, local);
            }
        }

        let transformed = std::mem::take(&mut self.unapplied);
        self.sending = None;

        debug!(
            version = self.version,
            delivered = transformed.len(),
            "resolve made progress"
        );

        if self.unsent.is_empty() {
            self.state = ModelState::Ready;
            return ActionRecord::apply(transformed);
        }

        let mut next = self.unsent.remove(0);
        while !self.unsent.is_empty() && merge(&mut next, &self.unsent[0]) {
            self.unsent.remove(0);
        }
        next.version = Some(self.version + 1);
        self.sending = Some(next.clone());
        self.state = ModelState::Sending;

        ActionRecord::apply_and_send(transformed, next)
    }

    /// Re-checks the §3.2 invariants; a no-op in release builds.
    fn check_invariants(&self) {
        match self.state {
            ModelState::Ready => {
                debug_assert!(self.sending.is_none());
                debug_assert!(self.unsent.is_empty());
                debug_assert!(self.unapplied.is_empty());
            }
            ModelState::Sending => {
                debug_assert!(self.sending.is_some());
                if let Some(sending) = &self.sending {
                    debug_assert_eq!(sending.version, Some(self.version + 1));
                }
            }
            ModelState::Buffering => {
                debug_assert!(self.sending.is_some());
                if let Some(corrected) = self.corrected_version {
                    debug_assert!(corrected >= self.version + 1);
                }
            }
        }
        debug_assert!(self.sending.is_some() || self.unsent.is_empty());
    }
}
