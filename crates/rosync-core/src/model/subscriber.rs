// ── PPP subscriber types ──

use serde::{Deserialize, Serialize};

use super::item_id::ItemId;

/// A configured PPP subscriber (`/ppp/secret`).
///
/// Read-only snapshot: changes are sent back to the router as commands,
/// never written into this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    pub id: Option<ItemId>,
    /// Join key against [`ActiveConnection::name`].
    pub name: String,
    /// Hardware identifier (MAC address for PPPoE).
    pub caller_id: String,
    pub remote_address: String,
    pub profile: Option<String>,
    pub service: Option<String>,
    pub comment: Option<String>,
    pub disabled: Option<String>,

    /// Caller-supplied site labels, copied from the fetch [`Annotation`].
    pub host: Option<String>,
    pub bts: Option<String>,
}

/// A live PPP session (`/ppp/active`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveConnection {
    pub id: Option<ItemId>,
    pub name: String,
    pub caller_id: String,
    /// Address currently assigned to the session.
    pub address: String,
    pub service: Option<String>,
    pub uptime: Option<String>,
}

/// Labels identifying where a secrets snapshot came from.
///
/// The router knows nothing about these; they let callers that poll many
/// routers keep track of which host and base station (BTS) each
/// subscriber belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub host: Option<String>,
    pub bts: Option<String>,
}

impl Annotation {
    pub fn new(host: Option<String>, bts: Option<String>) -> Self {
        Self { host, bts }
    }
}
