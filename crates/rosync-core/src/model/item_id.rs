// ── Item identifiers ──
//
// RouterOS numbers every row in a menu with an internal identifier such as
// `*1A`. It is the only key a `remove` can safely target, and it is only
// meaningful for the snapshot that returned it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Device-assigned internal identifier (the `.id` field).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}
