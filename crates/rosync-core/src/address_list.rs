// ── Address-list manager ──
//
// Set-membership operations on `/ip/firewall/address-list`. No cache is
// kept: every query reflects the router at call time, and removals must
// use identifiers from a recent query.

use rosync_api::Gateway;
use tracing::{debug, info, warn};

use crate::command;
use crate::error::CoreError;
use crate::fetch::Fetcher;
use crate::model::{
    AddressListEntry, CommandFailure, InsertOutcome, ItemId, PartialOutcome, RemovalReport,
};

pub struct AddressListManager<'g, G> {
    gateway: &'g G,
}

impl<'g, G: Gateway> AddressListManager<'g, G> {
    pub fn new(gateway: &'g G) -> Self {
        Self { gateway }
    }

    /// Entries belonging to `list`, in router order.
    ///
    /// An unknown list name is not an error; it simply has no entries.
    pub async fn query(&self, list: &str) -> Result<Vec<AddressListEntry>, CoreError> {
        let entries = Fetcher::new(self.gateway).address_list_entries().await?;
        let total = entries.len();
        let matching: Vec<_> = entries.into_iter().filter(|e| e.list == list).collect();
        debug!(list, total, matching = matching.len(), "queried address list");
        Ok(matching)
    }

    /// Add `address` to `list` with `comment`.
    ///
    /// Not idempotent: adding an address twice creates two entries.
    pub async fn insert(
        &self,
        address: &str,
        comment: &str,
        list: &str,
    ) -> Result<InsertOutcome, CoreError> {
        let cmd = command::add_address(list, address, comment);
        debug!(%cmd, "adding address-list entry");

        let rows = self.gateway.execute(&cmd).await?;
        let id = rows
            .first()
            .and_then(|r| r.get("ret"))
            .filter(|v| !v.is_empty())
            .map(ItemId::from);

        info!(list, address, id = ?id, "address added");
        Ok(InsertOutcome {
            list: list.to_owned(),
            address: address.to_owned(),
            id,
        })
    }

    /// Remove every entry in `entries` whose address equals `address`.
    ///
    /// Each removal targets the entry's `.id`, never the address. A failed
    /// removal (usually a stale identifier) is recorded and the scan
    /// continues; an error fatal to the gateway stops it with
    /// [`CoreError::Interrupted`]. No matching entry means nothing is sent.
    pub async fn remove(
        &self,
        entries: &[AddressListEntry],
        address: &str,
    ) -> Result<RemovalReport, CoreError> {
        let mut report = RemovalReport::new(address, entries.len());

        for entry in entries.iter().filter(|e| e.address == address) {
            report.matched += 1;
            let cmd = command::remove_address(&entry.id);
            debug!(%cmd, list = %entry.list, "removing address-list entry");

            match self.gateway.execute(&cmd).await {
                Ok(_) => report.removed.push(entry.id.clone()),
                Err(e) => {
                    warn!(
                        id = %entry.id,
                        address,
                        error = %e,
                        transient = e.is_transient(),
                        "removal failed"
                    );
                    report.failures.push(CommandFailure {
                        target: entry.id.to_string(),
                        command: cmd.to_string(),
                        message: e.to_string(),
                    });
                    if e.is_fatal() {
                        return Err(CoreError::interrupted(PartialOutcome::Removal(report), e));
                    }
                }
            }
        }

        info!(
            address,
            scanned = report.scanned,
            matched = report.matched,
            removed = report.removed.len(),
            failed = report.failed(),
            "address removal complete"
        );
        Ok(report)
    }

    /// Query `list` afresh, then remove `address` from it.
    ///
    /// Scopes removal to a single list and guarantees the identifiers
    /// used come from the current snapshot.
    pub async fn remove_from_list(
        &self,
        list: &str,
        address: &str,
    ) -> Result<RemovalReport, CoreError> {
        let entries = self.query(list).await?;
        self.remove(&entries, address).await
    }
}
