//! Active PPP session command handlers.

use tabled::Tabled;

use rosync_core::{ActiveConnection, Router};

use crate::cli::{ActiveArgs, ActiveCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, cell};

#[derive(Tabled)]
struct ActiveRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Caller ID")]
    caller_id: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Uptime")]
    uptime: String,
}

impl From<&ActiveConnection> for ActiveRow {
    fn from(c: &ActiveConnection) -> Self {
        Self {
            name: c.name.clone(),
            caller_id: cell(Some(c.caller_id.as_str())),
            address: cell(Some(c.address.as_str())),
            service: cell(c.service.as_deref()),
            uptime: cell(c.uptime.as_deref()),
        }
    }
}

pub async fn handle(
    router: &Router,
    args: ActiveArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ActiveCommand::List => {
            let sessions = router.fetcher().active_connections().await?;
            let out = output::render_list(
                &global.output,
                &sessions,
                |c| ActiveRow::from(c),
                |c| c.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
