//! Reconciliation command handlers.

use tabled::Tabled;

use rosync_core::{CoreError, PartialOutcome, Router, SyncReport};

use crate::cli::{GlobalOpts, SyncArgs, SyncCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct SyncRow {
    #[tabled(rename = "Attribute")]
    attribute: String,
    #[tabled(rename = "Secrets")]
    secrets: usize,
    #[tabled(rename = "Active")]
    active: usize,
    #[tabled(rename = "Matched")]
    matched: usize,
    #[tabled(rename = "Updated")]
    updated: usize,
    #[tabled(rename = "Unchanged")]
    unchanged: usize,
    #[tabled(rename = "Failed")]
    failed: usize,
}

impl From<&SyncReport> for SyncRow {
    fn from(r: &SyncReport) -> Self {
        Self {
            attribute: r.attribute.to_string(),
            secrets: r.secrets,
            active: r.active,
            matched: r.matched,
            updated: r.updated,
            unchanged: r.unchanged,
            failed: r.failed(),
        }
    }
}

pub async fn handle(router: &Router, args: SyncArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let reconciler = router.reconciler();
    let result = match args.command {
        SyncCommand::CallerId => reconciler.sync_caller_id().await.map(|r| vec![r]),
        SyncCommand::RemoteAddress => reconciler.sync_remote_address().await.map(|r| vec![r]),
        SyncCommand::All => reconciler.sync_all().await,
    };

    let reports = match result {
        Ok(reports) => reports,
        // Show what was written before the router became unusable
        Err(CoreError::Interrupted { partial, source }) => {
            if let PartialOutcome::Sync(reports) = *partial {
                show(&reports, global)?;
                print_failures(&reports);
            }
            return Err(CliError::from(*source));
        }
        Err(e) => return Err(e.into()),
    };

    show(&reports, global)?;
    check_failures(&reports)
}

fn show(reports: &[SyncReport], global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_list(
        &global.output,
        reports,
        |r| SyncRow::from(r),
        |r| format!("{} {}", r.attribute, r.updated),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn print_failures(reports: &[SyncReport]) {
    for failure in reports.iter().flat_map(|r| &r.failures) {
        output::failure(&failure.target, &failure.message);
    }
}

/// Print every failed command and turn a non-clean run into an error.
fn check_failures(reports: &[SyncReport]) -> Result<(), CliError> {
    print_failures(reports);
    let failed: usize = reports.iter().map(SyncReport::failed).sum();
    let attempted: usize = reports.iter().map(|r| r.matched).sum();

    if failed == 0 {
        Ok(())
    } else {
        Err(CliError::PartialFailure {
            operation: "sync".into(),
            failed,
            attempted,
        })
    }
}
