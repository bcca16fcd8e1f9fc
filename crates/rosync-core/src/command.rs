// ── Command surface used by the core ──
//
// The menu paths and argument keys below are the whole protocol surface
// rosync relies on. Builders keep argument order stable so commands are
// easy to compare in logs and tests.

use rosync_api::Command;

use crate::model::{ItemId, SyncAttribute};

pub const IDENTITY_PRINT: &str = "/system/identity/print";
pub const SECRET_PRINT: &str = "/ppp/secret/print";
pub const SECRET_SET: &str = "/ppp/secret/set";
pub const ACTIVE_PRINT: &str = "/ppp/active/print";
pub const ADDRESS_LIST_PRINT: &str = "/ip/firewall/address-list/print";
pub const ADDRESS_LIST_ADD: &str = "/ip/firewall/address-list/add";
pub const ADDRESS_LIST_REMOVE: &str = "/ip/firewall/address-list/remove";
pub const SNMP_SET: &str = "/snmp/set";

/// Argument key selecting the target item of `set` / `remove`.
///
/// Accepts either a name or an internal `.id`.
pub const TARGET: &str = "numbers";

/// Update one attribute of the secret named `name`.
///
/// Addressed by name, not `.id`: secret names are unique on the router
/// and the name is what the join matched on.
pub fn set_secret(name: &str, attribute: SyncAttribute, value: &str) -> Command {
    Command::new(SECRET_SET)
        .arg(TARGET, name)
        .arg(attribute.secret_field(), value)
}

pub fn add_address(list: &str, address: &str, comment: &str) -> Command {
    Command::new(ADDRESS_LIST_ADD)
        .arg("list", list)
        .arg("address", address)
        .arg("comment", comment)
}

pub fn remove_address(id: &ItemId) -> Command {
    Command::new(ADDRESS_LIST_REMOVE).arg(TARGET, id.as_str())
}

pub fn enable_snmp() -> Command {
    Command::new(SNMP_SET)
        .arg("enabled", "yes")
        .arg("trap-version", "2")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_secret_targets_name() {
        let cmd = set_secret("u1", SyncAttribute::RemoteAddress, "10.0.0.5");
        assert_eq!(
            cmd.to_string(),
            "/ppp/secret/set numbers=u1 remote-address=10.0.0.5"
        );
    }

    #[test]
    fn remove_address_targets_item_id() {
        let cmd = remove_address(&ItemId::from("*1"));
        assert_eq!(cmd.get(TARGET), Some("*1"));
        assert_eq!(cmd.path(), ADDRESS_LIST_REMOVE);
    }
}
