// ── Outcome types for write operations ──
//
// Every batch of writes reports what it attempted and which commands the
// router refused, so callers can act on partial failure instead of
// scraping logs.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::item_id::ItemId;
use super::subscriber::{ActiveConnection, Secret};

/// Secret attribute a reconciliation pass corrects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SyncAttribute {
    /// Secret `caller-id` taken from the session's `caller-id`.
    CallerId,
    /// Secret `remote-address` taken from the session's `address`.
    RemoteAddress,
}

impl SyncAttribute {
    /// Field name on `/ppp/secret`, used as the `set` argument key.
    pub fn secret_field(self) -> &'static str {
        match self {
            Self::CallerId => "caller-id",
            Self::RemoteAddress => "remote-address",
        }
    }

    /// The value the router currently observes for the session.
    pub fn observed(self, connection: &ActiveConnection) -> &str {
        match self {
            Self::CallerId => &connection.caller_id,
            Self::RemoteAddress => &connection.address,
        }
    }

    /// The value currently configured on the secret.
    pub fn configured(self, secret: &Secret) -> &str {
        match self {
            Self::CallerId => &secret.caller_id,
            Self::RemoteAddress => &secret.remote_address,
        }
    }
}

/// A single command the router refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandFailure {
    /// What the command was aimed at (secret name or item id).
    pub target: String,
    /// The command as sent, in `path key=value` form.
    pub command: String,
    pub message: String,
}

/// Result of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub attribute: SyncAttribute,
    /// Secrets fetched.
    pub secrets: usize,
    /// Active connections fetched.
    pub active: usize,
    /// (secret, connection) pairs sharing a name; one update each.
    pub matched: usize,
    /// Updates the router accepted.
    pub updated: usize,
    /// Accepted updates whose value already agreed before the write.
    pub unchanged: usize,
    pub failures: Vec<CommandFailure>,
}

impl SyncReport {
    pub fn new(attribute: SyncAttribute, secrets: usize, active: usize) -> Self {
        Self {
            attribute,
            secrets,
            active,
            matched: 0,
            updated: 0,
            unchanged: 0,
            failures: Vec::new(),
        }
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Result of removing an address from address lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalReport {
    pub address: String,
    /// Entries examined.
    pub scanned: usize,
    /// Entries whose address matched; one remove each.
    pub matched: usize,
    /// Identifiers the router removed.
    pub removed: Vec<ItemId>,
    pub failures: Vec<CommandFailure>,
}

impl RemovalReport {
    pub fn new(address: impl Into<String>, scanned: usize) -> Self {
        Self {
            address: address.into(),
            scanned,
            matched: 0,
            removed: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Work a batch finished before a fatal gateway error stopped it.
///
/// The last report is incomplete: it counts only what was attempted, and
/// its final failure is the command that hit the fatal error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PartialOutcome {
    /// One report per reconciliation pass that ran.
    Sync(Vec<SyncReport>),
    Removal(RemovalReport),
}

/// Result of adding an address to a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertOutcome {
    pub list: String,
    pub address: String,
    /// Identifier of the new entry, when the router reports one.
    pub id: Option<ItemId>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn sync_attribute_round_trips_through_strum() {
        assert_eq!(SyncAttribute::CallerId.to_string(), "caller-id");
        assert_eq!(
            "remote-address".parse::<SyncAttribute>().unwrap(),
            SyncAttribute::RemoteAddress
        );
    }

    #[test]
    fn sync_attribute_picks_session_field() {
        let conn = ActiveConnection {
            id: None,
            name: "u1".into(),
            caller_id: "AA:BB".into(),
            address: "10.0.0.5".into(),
            service: None,
            uptime: None,
        };
        assert_eq!(SyncAttribute::CallerId.observed(&conn), "AA:BB");
        assert_eq!(SyncAttribute::RemoteAddress.observed(&conn), "10.0.0.5");
    }
}
