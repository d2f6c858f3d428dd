use anyhow::{bail, Context, Result};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::domain::Expense;

use super::HEADER;

const TMP_SUFFIX: &str = "tmp";

/// Read the ledger file at `path`.
///
/// Returns `Ok(None)` when the file does not exist. Every other failure
/// (unreadable file, wrong header, bad row) is an error.
pub fn read_ledger_file(path: &Path) -> Result<Option<Vec<Expense>>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to open {}", path.display()));
        }
    };

    let expenses =
        read_expenses(file).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(Some(expenses))
}

/// Parse CSV ledger rows from any reader. The header must match exactly.
pub fn read_expenses<R: Read>(reader: R) -> Result<Vec<Expense>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = csv_reader.headers().context("Failed to read header row")?;
    if headers.iter().ne(HEADER.iter().copied()) {
        bail!(
            "Unexpected header '{}', expected '{}'",
            headers.iter().collect::<Vec<_>>().join(","),
            HEADER.join(",")
        );
    }

    let mut expenses = Vec::new();
    for (row_num, row) in csv_reader.deserialize::<Expense>().enumerate() {
        let line = row_num + 2; // header is line 1
        let expense = row.with_context(|| format!("Invalid row at line {}", line))?;
        expenses.push(expense);
    }

    Ok(expenses)
}

/// Write all expenses as CSV, header first. Returns the number of rows written.
pub fn write_expenses<W: Write>(writer: W, expenses: &[Expense]) -> Result<usize> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(HEADER)?;
    for expense in expenses {
        csv_writer.serialize(expense)?;
    }

    csv_writer.flush()?;
    Ok(expenses.len())
}

/// Replace the ledger file at `path` with `expenses`.
///
/// Rows go to a sibling temporary file that is then renamed over the target,
/// so a failed write leaves the previous file intact.
pub fn write_ledger_file(path: &Path, expenses: &[Expense]) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let tmp = tmp_path(path);
    let written = File::create(&tmp)
        .map_err(anyhow::Error::from)
        .and_then(|file| write_expenses(io::BufWriter::new(file), expenses))
        .with_context(|| format!("Failed to write {}", tmp.display()));

    let written = match written {
        Ok(count) => count,
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
    };

    fs::rename(&tmp, path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(written)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
