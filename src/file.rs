// src/file.rs

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::config::{ ExportFormat, ExportOptions };
use crate::core::sanitize::sanitize_file_stem;
use crate::error::ExportError;
use crate::export::{ self, ExportBlob, ExportTables };
use crate::portfolio::OwnerPortfolio;

/// Write the blobs of one export. The first blob goes to `export.out_path()`;
/// siblings land next to it, named `<stem><suffix>.<ext>` after the first
/// blob's own naming. Returns the paths written, in blob order.
pub fn write_export(export: &ExportOptions, blobs: &[ExportBlob]) -> Result<Vec<PathBuf>, ExportError> {
    let Some((first, rest)) = blobs.split_first() else { return Ok(Vec::new()) };

    let path = export.out_path();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    fs::write(&path, &first.bytes)?;
    let mut written = vec![path.clone()];

    // "<default stem>_R1.csv" → "<user stem>_R1.csv"
    let default_stem = Path::new(&first.file_name).file_stem().map(|s| s.to_string_lossy().into_owned());
    let user_stem = path.file_stem().map(|s| s.to_string_lossy().into_owned());
    for blob in rest {
        let name = match (&default_stem, &user_stem) {
            (Some(d), Some(u)) => match blob.file_name.strip_prefix(d.as_str()) {
                Some(tail) => join!(u, tail),
                None => blob.file_name.clone(),
            },
            _ => blob.file_name.clone(),
        };
        let p = path.with_file_name(name);
        fs::write(&p, &blob.bytes)?;
        written.push(p);
    }

    log::info!("Wrote {} file(s) under {}", written.len(), path.parent().unwrap_or(Path::new(".")).display());
    Ok(written)
}

/// Export one owner's rows into `dir` as `<sanitised owner>.<ext>`.
pub fn write_owner_portfolio(
    dir: &Path,
    portfolio: &OwnerPortfolio,
    format: ExportFormat,
) -> Result<PathBuf, ExportError> {
    let mut seen = HashMap::new();
    write_portfolio_in(dir, portfolio, format, &mut seen)
}

/// Export every listed owner into `dir`, one file each. Two names that
/// sanitise to the same stem get `<stem> (2)`, `<stem> (3)`, …
pub fn write_owner_portfolios<'a, I>(
    dir: &Path,
    portfolios: I,
    format: ExportFormat,
) -> Result<Vec<PathBuf>, ExportError>
where
    I: IntoIterator<Item = OwnerPortfolio<'a>>,
{
    let mut seen = HashMap::new();
    let mut written = Vec::new();
    for p in portfolios {
        written.push(write_portfolio_in(dir, &p, format, &mut seen)?);
    }
    Ok(written)
}

fn write_portfolio_in(
    dir: &Path,
    portfolio: &OwnerPortfolio,
    format: ExportFormat,
    seen: &mut HashMap<String, usize>,
) -> Result<PathBuf, ExportError> {
    ensure_directory(dir)?;
    let stem = sanitize_file_stem(&portfolio.owner, "propietario");
    let path = resolve_unique_path(dir, &stem, seen, format.ext());

    let tables = ExportTables::single(&portfolio.to_dataset());
    let blobs = export::render(&tables, &stem, format)?;
    if let Some(b) = blobs.first() {
        fs::write(&path, &b.bytes)?;
    }
    log::debug!("Portfolio '{}' ({} row(s)) → {}", portfolio.owner, portfolio.count(), path.display());
    Ok(path)
}

pub fn ensure_directory(dir: &Path) -> Result<(), ExportError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ExportError::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}

/// Duplicate handling **only within this run**
pub fn resolve_unique_path(
    dir: &Path,
    stem: &str,                        // already sanitized, no extension
    seen_names: &mut HashMap<String, usize>,
    ext: &str,                         // "xlsx" | "csv" | "tsv"
) -> PathBuf {
    let count = seen_names.entry(stem.to_string()).or_insert(0);

    // First occurrence: "<stem>.ext"
    // Subsequent:       "<stem> (N).ext" with N starting at 2
    let filename = if *count == 0 {
        format!("{stem}.{ext}")
    } else {
        format!("{stem} ({}).{ext}", *count + 1)
    };

    *count += 1;
    dir.join(filename)
}
