// SPDX-FileCopyrightText: 2024 blinry <mail@blinry.org>
// SPDX-FileCopyrightText: 2024 zormit <nt4u@kpvn.de>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::error::ModelError;
use serde::{Deserialize, Serialize};

/// A single splice on a linear character buffer: delete `num_delete` characters
/// starting at `position`, then insert `insert`.
///
/// `position` and `num_delete` are counted in `char`s, not bytes, matching the
/// host's offset convention (§3.1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edit {
    pub position: usize,
    #[serde(default)]
    pub num_delete: usize,
    #[serde(default)]
    pub insert: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub version: Option<u64>,
}

impl Edit {
    #[must_use]
    pub fn new(position: usize, num_delete: usize, insert: impl Into<String>) -> Self {
        Self {
            position,
            num_delete,
            insert: insert.into(),
            version: None,
        }
    }

    #[must_use]
    pub const fn with_version(mut self, version: u64) -> Self {
        self.version = Some(version);
        self
    }

    /// Applies this edit to `content`, returning the spliced result.
    ///
    /// This is the trivial string-splice `apply` routine the core's callers own
    /// (§1); it's kept here only so tests can assert on document content without
    /// reimplementing it per test.
    #[must_use]
    pub fn apply(&self, content: &str) -> String {
        let chars: Vec<char> = content.chars().collect();
        let end = (self.position + self.num_delete).min(chars.len());
        let start = self.position.min(chars.len());
        let mut result: String = chars[..start].iter().collect();
        result.push_str(&self.insert);
        result.extend(&chars[end..]);
        result
    }

    /// Validates an edit freshly submitted by the host's local editor.
    ///
    /// A local edit must not already carry a `version`: the Model assigns one the
    /// moment the edit enters the in-flight slot (§3.1, §4.1).
    pub fn validate_local(&self) -> Result<(), ModelError> {
        if self.version.is_some() {
            return Err(ModelError::InvalidEdit(
                "locally submitted edit must not carry a version".to_string(),
            ));
        }
        Ok(())
    }

    /// Validates an edit received from the server.
    ///
    /// A remote edit must carry a positive `version`, assigned by the server
    /// (§3.1, §4.1).
    pub fn validate_remote(&self) -> Result<(), ModelError> {
        match self.version {
            Some(0) | None => Err(ModelError::InvalidEdit(
                "remote edit must carry a positive version".to_string(),
            )),
            Some(_) => Ok(()),
        }
    }
}
