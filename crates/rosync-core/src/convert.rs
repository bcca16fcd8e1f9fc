// ── Record → domain conversions ──
//
// RouterOS omits fields that are unset, so only the fields a row cannot
// be used without are required. Everything else defaults to empty/None.

use rosync_api::Record;
use thiserror::Error;

use crate::model::{ActiveConnection, AddressListEntry, Annotation, Identity, ItemId, Secret};

/// A row lacked a field its entity cannot exist without.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} row is missing required field `{field}`")]
pub struct MissingField {
    pub kind: &'static str,
    pub field: &'static str,
}

fn required(
    record: &Record,
    kind: &'static str,
    field: &'static str,
) -> Result<String, MissingField> {
    record
        .get(field)
        .map(str::to_owned)
        .ok_or(MissingField { kind, field })
}

fn text(record: &Record, field: &str) -> String {
    record.get(field).unwrap_or_default().to_owned()
}

fn optional(record: &Record, field: &str) -> Option<String> {
    record
        .get(field)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

fn item_id(record: &Record) -> Option<ItemId> {
    record.id().map(ItemId::from)
}

impl TryFrom<&Record> for Identity {
    type Error = MissingField;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        Ok(Self {
            name: required(record, "identity", "name")?,
        })
    }
}

impl TryFrom<&Record> for Secret {
    type Error = MissingField;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        Ok(Self {
            id: item_id(record),
            name: required(record, "secret", "name")?,
            caller_id: text(record, "caller-id"),
            remote_address: text(record, "remote-address"),
            profile: optional(record, "profile"),
            service: optional(record, "service"),
            comment: optional(record, "comment"),
            disabled: optional(record, "disabled"),
            host: None,
            bts: None,
        })
    }
}

impl Secret {
    /// Copy the caller's site labels onto this secret.
    pub fn annotate(mut self, annotation: &Annotation) -> Self {
        self.host.clone_from(&annotation.host);
        self.bts.clone_from(&annotation.bts);
        self
    }
}

impl TryFrom<&Record> for ActiveConnection {
    type Error = MissingField;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        Ok(Self {
            id: item_id(record),
            name: required(record, "active connection", "name")?,
            caller_id: text(record, "caller-id"),
            address: text(record, "address"),
            service: optional(record, "service"),
            uptime: optional(record, "uptime"),
        })
    }
}

impl TryFrom<&Record> for AddressListEntry {
    type Error = MissingField;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ItemId::from(required(record, "address-list", Record::ID_FIELD)?),
            list: text(record, "list"),
            address: required(record, "address-list", "address")?,
            comment: optional(record, "comment"),
            creation_time: optional(record, "creation-time"),
            dynamic: optional(record, "dynamic"),
            disabled: optional(record, "disabled"),
        })
    }
}
