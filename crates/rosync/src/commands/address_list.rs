//! Firewall address-list command handlers.

use tabled::Tabled;

use rosync_core::{
    AddressListEntry, CoreError, InsertOutcome, PartialOutcome, RemovalReport, Router,
};

use crate::cli::{AddressListArgs, AddressListCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, cell};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "List")]
    list: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Comment")]
    comment: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Dynamic")]
    dynamic: String,
}

impl From<&AddressListEntry> for EntryRow {
    fn from(e: &AddressListEntry) -> Self {
        Self {
            id: e.id.to_string(),
            list: e.list.clone(),
            address: e.address.clone(),
            comment: cell(e.comment.as_deref()),
            created: cell(e.creation_time.as_deref()),
            dynamic: cell(e.dynamic.as_deref()),
        }
    }
}

fn inserted_detail(o: &InsertOutcome) -> String {
    let id = o.id.as_ref().map_or_else(|| "-".into(), ToString::to_string);
    [
        format!("ID:      {id}"),
        format!("List:    {}", o.list),
        format!("Address: {}", o.address),
    ]
    .join("\n")
}

fn removal_detail(r: &RemovalReport) -> String {
    let mut lines = vec![
        format!("Address: {}", r.address),
        format!("Scanned: {}", r.scanned),
        format!("Matched: {}", r.matched),
        format!("Removed: {}", r.removed.len()),
    ];
    if !r.removed.is_empty() {
        lines.push(String::new());
        lines.push("Entries:".into());
        for id in &r.removed {
            lines.push(format!("  - {id}"));
        }
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    router: &Router,
    args: AddressListArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let lists = router.address_lists();

    match args.command {
        AddressListCommand::List { list } => {
            let entries = lists.query(&list).await?;
            let out = output::render_list(
                &global.output,
                &entries,
                |e| EntryRow::from(e),
                |e| e.address.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AddressListCommand::Add {
            address,
            list,
            comment,
        } => {
            let outcome = lists.insert(&address, &comment, &list).await?;
            let out = output::render_single(&global.output, &outcome, inserted_detail, |o| {
                o.id.as_ref().map(ToString::to_string).unwrap_or_default()
            })?;
            output::print_output(&out, global.quiet);
            output::success(&format!("Added {address} to '{list}'"), global.quiet);
            Ok(())
        }

        AddressListCommand::Remove { address, list } => {
            if !util::confirm(
                &format!("Remove every '{list}' entry for {address}?"),
                global.yes,
            )? {
                return Ok(());
            }

            let report = match lists.remove_from_list(&list, &address).await {
                Ok(report) => report,
                Err(CoreError::Interrupted { partial, source }) => {
                    if let PartialOutcome::Removal(report) = *partial {
                        show_removal(&report, global)?;
                    }
                    return Err(CliError::from(*source));
                }
                Err(e) => return Err(e.into()),
            };
            if report.matched == 0 {
                output::success(&format!("{address} is not in '{list}'"), global.quiet);
                return Ok(());
            }

            show_removal(&report, global)?;
            if report.is_clean() {
                Ok(())
            } else {
                Err(CliError::PartialFailure {
                    operation: "address-list remove".into(),
                    failed: report.failed(),
                    attempted: report.matched,
                })
            }
        }
    }
}

/// Print the removal summary, then every failed command on stderr.
fn show_removal(report: &RemovalReport, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(&global.output, report, removal_detail, |r| {
        r.removed
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    })?;
    output::print_output(&out, global.quiet);

    for failure in &report.failures {
        output::failure(&failure.target, &failure.message);
    }
    Ok(())
}
