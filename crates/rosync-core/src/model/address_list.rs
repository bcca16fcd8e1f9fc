// ── Firewall address-list types ──

use serde::{Deserialize, Serialize};

use super::item_id::ItemId;

/// One membership row of `/ip/firewall/address-list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressListEntry {
    /// Removal key; valid only for the snapshot it came from.
    pub id: ItemId,
    /// Name of the list this row belongs to.
    pub list: String,
    pub address: String,
    pub comment: Option<String>,
    pub creation_time: Option<String>,
    /// `"true"` for entries the router added itself (e.g. with a timeout).
    pub dynamic: Option<String>,
    pub disabled: Option<String>,
}
