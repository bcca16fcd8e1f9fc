use std::future::Future;

use crate::command::Command;
use crate::error::Error;
use crate::record::Record;

/// Capability to run commands against one router.
///
/// This is the only seam between device transport and business logic.
/// [`RestGateway`](crate::RestGateway) is the production implementation;
/// tests substitute a scripted one returning canned rows.
///
/// Implementations are not required to serialize concurrent calls.
/// Callers issue one command at a time.
pub trait Gateway: Send + Sync {
    /// Execute `command` and return every reply row.
    ///
    /// Write commands usually return no rows; `add` returns a single row
    /// carrying the new item's identifier under `ret`.
    fn execute(
        &self,
        command: &Command,
    ) -> impl Future<Output = Result<Vec<Record>, Error>> + Send;
}

