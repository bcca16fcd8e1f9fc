use serde::{Deserialize, Serialize};

/// Router system identity (`/system/identity`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
}
