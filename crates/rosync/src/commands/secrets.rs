//! PPP secret command handlers.

use tabled::Tabled;

use rosync_core::{Router, Secret};

use crate::cli::{GlobalOpts, SecretsArgs, SecretsCommand};
use crate::error::CliError;
use crate::output::{self, cell};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SecretRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Caller ID")]
    caller_id: String,
    #[tabled(rename = "Remote Address")]
    remote_address: String,
    #[tabled(rename = "Profile")]
    profile: String,
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Disabled")]
    disabled: String,
    #[tabled(rename = "BTS")]
    bts: String,
}

impl From<&Secret> for SecretRow {
    fn from(s: &Secret) -> Self {
        Self {
            name: s.name.clone(),
            caller_id: cell(Some(s.caller_id.as_str())),
            remote_address: cell(Some(s.remote_address.as_str())),
            profile: cell(s.profile.as_deref()),
            service: cell(s.service.as_deref()),
            disabled: cell(s.disabled.as_deref()),
            bts: cell(s.bts.as_deref()),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    router: &Router,
    args: SecretsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        SecretsCommand::List => {
            let secrets = router.secrets().await?;
            let out = output::render_list(
                &global.output,
                &secrets,
                |s| SecretRow::from(s),
                |s| s.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
