// ── Record fetchers ──
//
// One gateway call each, converted into typed entities immediately.
// Rows missing a required field are skipped and logged rather than
// failing the whole snapshot.

use rosync_api::{Command, Gateway, Record};
use tracing::{debug, warn};

use crate::command;
use crate::convert::MissingField;
use crate::error::CoreError;
use crate::model::{ActiveConnection, AddressListEntry, Annotation, Identity, Secret};

/// Stateless read operations against one gateway.
pub struct Fetcher<'g, G> {
    gateway: &'g G,
}

impl<'g, G: Gateway> Fetcher<'g, G> {
    pub fn new(gateway: &'g G) -> Self {
        Self { gateway }
    }

    /// The router's system identity.
    ///
    /// Fails with [`CoreError::EmptyReply`] if the router returns no rows.
    pub async fn identity(&self) -> Result<Identity, CoreError> {
        let rows = self.run(command::IDENTITY_PRINT).await?;
        let first = rows.first().ok_or_else(|| CoreError::EmptyReply {
            command: command::IDENTITY_PRINT.into(),
        })?;
        Identity::try_from(first).map_err(|e| CoreError::Internal(e.to_string()))
    }

    /// All configured PPP secrets, labelled with `annotation`.
    pub async fn secrets(&self, annotation: &Annotation) -> Result<Vec<Secret>, CoreError> {
        let rows = self.run(command::SECRET_PRINT).await?;
        Ok(convert_rows::<Secret>(&rows)
            .into_iter()
            .map(|s| s.annotate(annotation))
            .collect())
    }

    /// All live PPP sessions.
    pub async fn active_connections(&self) -> Result<Vec<ActiveConnection>, CoreError> {
        let rows = self.run(command::ACTIVE_PRINT).await?;
        Ok(convert_rows(&rows))
    }

    /// Every address-list entry across all lists.
    pub async fn address_list_entries(&self) -> Result<Vec<AddressListEntry>, CoreError> {
        let rows = self.run(command::ADDRESS_LIST_PRINT).await?;
        Ok(convert_rows(&rows))
    }

    async fn run(&self, path: &str) -> Result<Vec<Record>, CoreError> {
        let rows = self.gateway.execute(&Command::new(path)).await?;
        debug!(path, rows = rows.len(), "fetched");
        Ok(rows)
    }
}

/// Convert rows in order, dropping (and logging) malformed ones.
fn convert_rows<T>(rows: &[Record]) -> Vec<T>
where
    T: for<'r> TryFrom<&'r Record, Error = MissingField>,
{
    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| match T::try_from(row) {
            Ok(entity) => Some(entity),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed row");
                None
            }
        })
        .collect()
}
