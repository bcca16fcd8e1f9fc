//! Command dispatch: bridges CLI args -> core operations -> output formatting.

pub mod active;
pub mod address_list;
pub mod config_cmd;
pub mod identity;
pub mod secrets;
pub mod snmp;
pub mod sync;
pub mod util;

use rosync_core::Router;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a router-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, router: &Router, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Identity => identity::handle(router, global).await,
        Command::Secrets(args) => secrets::handle(router, args, global).await,
        Command::Active(args) => active::handle(router, args, global).await,
        Command::Sync(args) => sync::handle(router, args, global).await,
        Command::AddressList(args) => address_list::handle(router, args, global).await,
        Command::Snmp(args) => snmp::handle(router, args, global).await,
        // Config and Completions are handled before a router is opened
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "local command reached router dispatch".into(),
        )),
    }
}
