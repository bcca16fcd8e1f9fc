// ── Domain model ──
//
// Typed views of router rows. Records are converted into these right
// after a fetch, so the rest of the crate never looks fields up by name.

pub mod address_list;
pub mod identity;
pub mod item_id;
pub mod report;
pub mod subscriber;

pub use address_list::AddressListEntry;
pub use identity::Identity;
pub use item_id::ItemId;
pub use report::{
    CommandFailure, InsertOutcome, PartialOutcome, RemovalReport, SyncAttribute, SyncReport,
};
pub use subscriber::{ActiveConnection, Annotation, Secret};
