//! Export command implementation.

use crate::cli::Cli;
use crate::error::Result;
use crate::pipeline::{ExportReport, run_export};
use crate::util::progress::should_show_progress;
use std::io::{self, Write};

/// Execute the export and print the written files.
///
/// With `--json` the full report is printed as one JSON object; otherwise
/// each written path is printed on its own line.
///
/// # Errors
///
/// Returns an error if the export fails or the report cannot be printed.
pub fn execute(cli: &Cli) -> Result<()> {
    let request = cli.export_request(should_show_progress(cli.quiet));
    let report = run_export(&cli.overrides(), request)?;

    let stdout = io::stdout();
    print_report(&mut stdout.lock(), &report, cli.json)
}

fn print_report<W: Write>(out: &mut W, report: &ExportReport, json: bool) -> Result<()> {
    if json {
        let payload = serde_json::to_string(report)?;
        writeln!(out, "{payload}")?;
        return Ok(());
    }

    for path in &report.files {
        writeln!(out, "{}", path.display())?;
    }
    Ok(())
}
