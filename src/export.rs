use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, WriterBuilder};
use eyre::{eyre, Result, WrapErr};

use crate::record::ProductRecord;

/// File name used when no output path is given.
pub const DEFAULT_FILE_NAME: &str = "televisores_plazavea.csv";

/// Writes `records` as `;`-separated text to `path`.
///
/// Missing parent directories are created and an existing file is replaced.
pub fn write_records(path: &Path, records: &[ProductRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let file =
        File::create(path).wrap_err_with(|| format!("Failed to create {}", path.display()))?;
    write_to(file, records).wrap_err_with(|| format!("Failed to write {}", path.display()))
}

/// Writes the header row and one row per record to `writer`.
///
/// Fields are quoted only when they contain the delimiter, a quote or a
/// line break.
pub fn write_to<W: Write>(writer: W, records: &[ProductRecord]) -> Result<()> {
    let mut out = WriterBuilder::new()
        .delimiter(b';')
        .quote_style(QuoteStyle::Necessary)
        .from_writer(writer);
    out.write_record(ProductRecord::HEADER)?;
    for record in records {
        out.write_record(record.to_row())?;
    }
    out.flush()?;
    Ok(())
}

/// Turns the answer to the "where to save" prompt into a path.
///
/// Surrounding whitespace and quotes (as left by drag-and-drop or "copy as
/// path") are stripped. An empty answer means the default file on the
/// desktop.
pub fn resolve_output_path(answer: &str) -> Result<PathBuf> {
    let answer = answer.trim().trim_matches(['"', '\'']).trim();
    if answer.is_empty() {
        default_output_path()
    } else {
        Ok(PathBuf::from(answer))
    }
}

/// `<desktop>/televisores_plazavea.csv`.
pub fn default_output_path() -> Result<PathBuf> {
    output_path_under(dirs::desktop_dir(), dirs::home_dir())
}

fn output_path_under(desktop: Option<PathBuf>, home: Option<PathBuf>) -> Result<PathBuf> {
    let desktop = desktop
        .or_else(|| home.map(|home| home.join("Desktop")))
        .ok_or_else(|| eyre!("Could not determine the desktop directory"))?;
    Ok(desktop.join(DEFAULT_FILE_NAME))
}
