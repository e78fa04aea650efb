// SPDX-FileCopyrightText: 2024 blinry <mail@blinry.org>
// SPDX-FileCopyrightText: 2024 zormit <nt4u@kpvn.de>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The six literal end-to-end scenarios (S1-S6), each named after its
//! scenario in the scripted test table. Every scenario starts from
//! `content = "hello world"`, `base_version = 1`, and asserts both the
//! emitted `ActionRecord`s and the document content each side converges on.

use editsync_ot::{ActionRecord, Edit, Model};
use pretty_assertions::assert_eq;
use tracing_test::traced_test;

const CONTENT: &str = "hello world";

#[test]
fn s1_submit_sends_a_versioned_edit() {
    let mut model = Model::new(1);
    let action = model.submit(Edit::new(6, 5, "universe"));
    assert_eq!(
        action,
        ActionRecord::Send(Edit::new(6, 5, "universe").with_version(2))
    );
}

#[test]
fn s2_correct_drains_to_ready() {
    let mut model = Model::new(1);
    model.submit(Edit::new(6, 5, "universe"));
    let action = model.correct(2);
    assert_eq!(action, ActionRecord::Nothing);
    assert!(model.is_ready());
    assert_eq!(model.version(), 2);
}

#[test]
fn s3_receive_in_ready_applies_directly() {
    let mut model = Model::new(1);
    let x = Edit::new(0, 0, "X").with_version(2);
    let action = model.receive(vec![x.clone()]);
    assert_eq!(action, ActionRecord::Apply(vec![x.clone()]));
    assert_eq!(model.version(), 2);
    assert_eq!(x.apply(CONTENT), "Xhello world");
}

#[test]
fn s4_buffered_remote_shifts_past_in_flight_local_insert() {
    let mut model = Model::new(1);
    let a = Edit::new(0, 0, "A");

    let send = model.submit(a.clone());
    assert_eq!(send, ActionRecord::Send(a.clone().with_version(2)));

    let b = Edit::new(5, 0, "B").with_version(2);
    let buffered = model.receive(vec![b]);
    assert_eq!(buffered, ActionRecord::Nothing);

    let resolved = model.correct(3);
    let ActionRecord::Apply(edits) = resolved else {
        panic!("expected Apply, got {resolved:?}");
    };
    assert_eq!(edits, vec![Edit::new(6, 0, "B").with_version(2)]);
    assert_eq!(model.version(), 3);
    assert!(model.is_ready());

    // Both sides converge: local applied A then (shifted) B; a replica that
    // saw B first (at its original position) and then A (an unshifted pure
    // insert is never itself moved by collide) reaches the same text.
    let local_view = edits[0].apply(&a.apply(CONTENT));
    let other_view = a.apply(&Edit::new(5, 0, "B").apply(CONTENT));
    assert_eq!(local_view, other_view);
}

#[test]
fn s5_queued_local_edits_coalesce_into_one_merged_send() {
    let mut model = Model::new(1);
    let a = Edit::new(0, 0, "A");
    let b = Edit::new(1, 0, "B");
    let c = Edit::new(2, 0, "C");

    assert_eq!(model.submit(a), ActionRecord::Send(Edit::new(0, 0, "A").with_version(2)));
    assert_eq!(model.submit(b), ActionRecord::Nothing);
    assert_eq!(model.submit(c), ActionRecord::Nothing);

    let action = model.correct(2);
    assert_eq!(
        action,
        ActionRecord::Send(Edit::new(1, 0, "BC").with_version(3))
    );
}

#[test]
fn s6_overlapping_deletions_collide_to_the_boundary() {
    let mut model = Model::new(1);
    let a = Edit::new(3, 2, "XY");
    model.submit(a.clone());

    let r = Edit::new(4, 3, "Z").with_version(2);
    model.receive(vec![r.clone()]);

    let resolved = model.correct(2);
    let ActionRecord::Apply(edits) = resolved else {
        panic!("expected Apply, got {resolved:?}");
    };
    assert_eq!(edits, vec![Edit::new(5, 2, "Z").with_version(2)]);

    // The boundary-stop rule in `collide` (§4.3) is pinned down precisely in
    // `collide::tests::overlapping_deletion_boundary_case_s6`, including the
    // matching convergence check between both application orders; here we
    // only need the externally observable result of running it through the
    // Model's resolve step.
    let local_view = edits[0].apply(&a.apply(CONTENT));
    assert_eq!(local_view, "helXYZorld");
}

/// Exercises a BUFFERING Model that stalls on a `correct` whose preceding
/// server edits haven't arrived yet, confirming the stall logs a warning
/// (§4.5, §9) before the missing edits unblock it.
#[traced_test]
#[test]
fn resolve_warns_on_repeated_stall() {
    let mut model = Model::new(1);
    model.submit(Edit::new(0, 0, "A"));

    assert_eq!(model.correct(4), ActionRecord::Nothing);
    assert!(!model.is_ready());
    // Second call while still stalled: this is the one that should warn.
    let action = model.receive(vec![]);
    assert_eq!(action, ActionRecord::Nothing);
    assert!(!model.is_ready());

    let action = model.receive(vec![
        Edit::new(10, 0, "p").with_version(2),
        Edit::new(11, 0, "q").with_version(3),
    ]);
    assert!(matches!(action, ActionRecord::Apply(_)));
    assert!(model.is_ready());
    assert_eq!(model.version(), 4);

    assert!(logs_contain("still blocked"));
}
