// SPDX-FileCopyrightText: 2024 blinry <mail@blinry.org>
// SPDX-FileCopyrightText: 2024 zormit <nt4u@kpvn.de>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::edit::Edit;

fn chars_len(s: &str) -> usize {
    s.chars().count()
}

/// `s`, starting from char offset `start` (clamped to `s`'s length).
fn char_tail(s: &str, start: usize) -> String {
    s.chars().skip(start).collect()
}

/// `s`, from char offset `start` up to (not including) char offset `end`, both
/// clamped to `s`'s length.
fn char_mid(s: &str, start: usize, end: usize) -> String {
    s.chars().skip(start).take(end.saturating_sub(start)).collect()
}

/// Combines `b` into `a` in place, iff they form one of the three mergeable
/// geometries (§4.2). Returns `true` on success; on `false` neither edit was
/// touched.
///
/// Only ever applied between adjacent edits on the client's own outbound
/// queue (§9, "Merge only within client queue") — never across the
/// client/server boundary, and never as a substitute for [`crate::collide`].
#[must_use]
pub fn merge(a: &mut Edit, b: &Edit) -> bool {
    let a_insert_len = chars_len(&a.insert);

    if a.position + a_insert_len == b.position {
        // Append.
        a.insert.push_str(&b.insert);
        a.num_delete += b.num_delete;
        return true;
    }

    if b.position == a.position {
        // Coincident.
        let r = b.num_delete.saturating_sub(a_insert_len);
        a.num_delete += r;
        a.insert = format!("{}{}", b.insert, char_tail(&a.insert, b.num_delete));
        return true;
    }

    if a.position < b.position && b.position < a.position + a_insert_len {
        // Interior.
        let o = b.position - a.position;
        let r = b.num_delete.saturating_sub(a_insert_len - o);
        a.num_delete += r;
        a.insert = format!(
            "{}{}{}",
            char_mid(&a.insert, 0, o),
            b.insert,
            char_tail(&a.insert, o + b.num_delete)
        );
        return true;
    }

    false
}
