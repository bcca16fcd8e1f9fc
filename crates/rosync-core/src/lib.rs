//! Subscriber reconciliation and address-list management for RouterOS.
//!
//! This crate owns the business logic on top of `rosync-api`'s
//! [`Gateway`](rosync_api::Gateway):
//!
//! - **[`Router`]**: handle owning one gateway. [`Router::connect`] builds
//!   the REST gateway and verifies credentials; [`Router::with_gateway`]
//!   wraps any other implementation.
//!
//! - **[`Fetcher`]**: identity, PPP secrets, active sessions and
//!   address-list reads, converted to typed entities on arrival.
//!
//! - **[`Reconciler`]**: joins secrets to active sessions by name and
//!   writes the session's `caller-id` / `address` back onto the secret.
//!
//! - **[`AddressListManager`]**: query, insert and remove-by-address on
//!   firewall address lists.
//!
//! Every write returns a report ([`SyncReport`], [`RemovalReport`],
//! [`InsertOutcome`]) listing the commands the router rejected.

pub mod address_list;
pub mod command;
pub mod config;
pub mod convert;
pub mod error;
pub mod fetch;
pub mod model;
pub mod reconcile;
pub mod router;
pub mod snmp;

#[cfg(test)]
mod testing;

// ── Primary re-exports ──────────────────────────────────────────────
pub use address_list::AddressListManager;
pub use config::{DeviceConfig, TlsVerification};
pub use error::CoreError;
pub use fetch::Fetcher;
pub use reconcile::Reconciler;
pub use router::Router;

pub use model::{
    ActiveConnection, AddressListEntry, Annotation, CommandFailure, Identity, InsertOutcome,
    ItemId, PartialOutcome, RemovalReport, Secret, SyncAttribute, SyncReport,
};
