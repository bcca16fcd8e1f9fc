//! SNMP command handlers.

use rosync_core::Router;

use crate::cli::{GlobalOpts, SnmpArgs, SnmpCommand};
use crate::error::CliError;
use crate::output;

pub async fn handle(router: &Router, args: SnmpArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        SnmpCommand::Enable => {
            router.enable_snmp().await?;
            output::success("SNMP enabled (trap version 2)", global.quiet);
            Ok(())
        }
    }
}
