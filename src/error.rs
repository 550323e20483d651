// src/error.rs
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while selecting or loading an offset profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("unknown format profile '{0}' (expected one of: standard, audit-2024)")]
    Unknown(String),
    #[error("could not read profile file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid profile TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("span for '{field}' is inverted: [{start}, {end})")]
    InvertedSpan { field: &'static str, start: usize, end: usize },
}

/// Failures while rendering or writing an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("spreadsheet writer failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("could not read input {path}: {source}")]
    Input { path: PathBuf, source: io::Error },
}
