// SPDX-FileCopyrightText: 2024 blinry <mail@blinry.org>
// SPDX-FileCopyrightText: 2024 zormit <nt4u@kpvn.de>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::edit::Edit;

fn chars_len(s: &str) -> usize {
    s.chars().count()
}

/// Transforms a pair of concurrent edits against each other so each can be
/// applied in its own history without disturbing the other (§4.3). Mutates
/// both in place; neither edit's intent is discarded, though an overlapping
/// deletion already credited to one side is not re-executed on the other
/// (§9, "Collide asymmetry").
///
/// Only ever applied between a remote edit and a client edit (§9, "Merge only
/// within client queue") — never between two local edits, which is what
/// [`crate::merge`] is for.
pub fn collide(remote: &mut Edit, local: &mut Edit) {
    // Ties go to `remote`.
    if remote.position <= local.position {
        collide_ordered(remote, local);
    } else {
        collide_ordered(local, remote);
    }
}

/// `earlier.position <= later.position` is guaranteed by the caller.
fn collide_ordered(earlier: &mut Edit, later: &mut Edit) {
    let earlier_insert_len = chars_len(&earlier.insert);

    if earlier.num_delete == 0 {
        // Pure insert earlier.
        later.position += earlier_insert_len;
        return;
    }

    if earlier.position + earlier.num_delete <= later.position {
        // Disjoint.
        later.position = later.position + earlier_insert_len - earlier.num_delete;
        return;
    }

    // Overlapping deletion regions.
    let gap = later.position - earlier.position;
    let excess = earlier.num_delete.saturating_sub(gap);

    if excess > later.num_delete {
        // Later's deletion fits entirely inside earlier's: earlier absorbs
        // later's insert. The credited amount can exceed what later inserted
        // back, so this delta is signed and may shrink `earlier.num_delete`.
        let delta = chars_len(&later.insert) as i64 - later.num_delete as i64;
        earlier.num_delete = (earlier.num_delete as i64 + delta).max(0) as usize;
        earlier.insert.push_str(&later.insert);
    } else {
        // Earlier stops deleting at the boundary.
        earlier.num_delete = gap;
    }

    later.num_delete = later.num_delete.saturating_sub(excess);
    later.position = earlier.position + chars_len(&earlier.insert);
}
