//! Identity command handler.

use rosync_core::{Identity, Router};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn handle(router: &Router, global: &GlobalOpts) -> Result<(), CliError> {
    // `Router::connect` already read it; only re-read if it somehow didn't.
    let identity = match router.identity() {
        Some(identity) => identity.clone(),
        None => router.fetcher().identity().await?,
    };

    let out = output::render_single(
        &global.output,
        &identity,
        |i: &Identity| format!("Name: {}", i.name),
        |i| i.name.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
