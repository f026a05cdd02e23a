//! Output file writing.
//!
//! In merge mode every list is appended to `<board>.txt`; otherwise each
//! list truncates and rewrites its own `<list>.txt`. One file is open at a
//! time and is flushed and closed before the next list is fetched.

use crate::error::Result;
use crate::format::{FormatOptions, format_card};
use crate::model::ListExport;
use crate::util::progress::create_spinner;
use std::collections::BTreeSet;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Extension of every output file.
const OUTPUT_EXTENSION: &str = "txt";

/// Where and how exported lists are written.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Append every list into one `<board_name>.txt`.
    pub merge: bool,
    /// Board name used for the merged file.
    pub board_name: String,
    /// Directory receiving the files.
    pub output_dir: PathBuf,
    /// Card numbering.
    pub format: FormatOptions,
    /// Show a spinner per list.
    pub show_progress: bool,
}

impl WriteOptions {
    #[must_use]
    pub fn new(board_name: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            merge: false,
            board_name: board_name.into(),
            output_dir: output_dir.into(),
            format: FormatOptions::default(),
            show_progress: false,
        }
    }

    /// Path of the file a list named `list_name` is written to.
    #[must_use]
    pub fn output_path(&self, list_name: &str) -> PathBuf {
        let stem = if self.merge {
            &self.board_name
        } else {
            list_name
        };
        self.output_dir
            .join(format!("{}.{OUTPUT_EXTENSION}", file_stem(stem)))
    }
}

/// Outcome of a write pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    /// Distinct files touched.
    pub files: BTreeSet<PathBuf>,
    /// Lists written.
    pub lists: usize,
    /// Cards written across all lists.
    pub cards: usize,
}

/// Write every exported list, pulling lists and cards lazily.
///
/// Stops at the first error. Files already written, and the file being
/// written when the error occurred, are left as they are.
///
/// # Errors
///
/// Returns the first fetch error from the stream, or any I/O error.
pub fn write_exports<'a, I>(exports: I, options: &WriteOptions) -> Result<WriteReport>
where
    I: IntoIterator<Item = Result<ListExport<'a>>>,
{
    info!("Saving to files");
    let mut report = WriteReport::default();

    for export in exports {
        let export = export?;
        let path = options.output_path(&export.name);
        let spinner = create_spinner(&format!("Exporting {}", export.name), options.show_progress);

        let list_name = export.name.clone();
        let written = write_list(&path, options.merge, export, &options.format)?;
        spinner.finish_and_clear();

        debug!(list = %list_name, cards = written, path = %path.display(), "Wrote list");
        report.lists += 1;
        report.cards += written;
        report.files.insert(path);
    }

    let files = report
        .files
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    info!("Saved to {files}");
    Ok(report)
}

fn write_list(
    path: &Path,
    append: bool,
    export: ListExport<'_>,
    format: &FormatOptions,
) -> Result<usize> {
    let mut writer = BufWriter::new(open_output(path, append)?);
    let mut count = 0;

    for (index, card) in export.cards.enumerate() {
        let card = card?;
        writer.write_all(format_card(&card, index + 1, format).as_bytes())?;
        count += 1;
    }

    writer.flush()?;
    Ok(count)
}

fn open_output(path: &Path, append: bool) -> Result<File> {
    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    Ok(options.open(path)?)
}

/// File stem for a board or list name.
///
/// Path separators are replaced so a name cannot escape the output
/// directory; everything else is kept verbatim.
fn file_stem(name: &str) -> String {
    name.replace(['/', '\\'], "_")
}
