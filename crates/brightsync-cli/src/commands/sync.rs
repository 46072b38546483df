use std::path::Path;

use brightsync_core::remote::RemoteSnapshot;
use brightsync_core::sync::sync_snapshot;

use crate::cli::SyncKind;
use crate::commands::common::{format_report_lines, open_database, print_lines, CommandContext};
use crate::error::CliError;

pub fn run_sync(
    context: &CommandContext<'_>,
    input: &Path,
    kind: SyncKind,
    as_json: bool,
) -> Result<(), CliError> {
    let snapshot = RemoteSnapshot::from_path(input)?;
    let db = open_database(context.db_path)?;

    let kinds = kind.entity_kinds();
    tracing::info!(input = %input.display(), ?kinds, "Mirroring snapshot");
    let report = sync_snapshot(&db, &snapshot, &kinds, context.owner())?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_lines(&format_report_lines(&report));
    }

    Ok(())
}
