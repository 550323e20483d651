// src/config/options.rs
use std::ffi::OsString;
use std::path::{ Path, PathBuf };

use super::consts::*;
use super::profile::FormatProfile;

#[derive(Clone, Debug, PartialEq, Default)]
pub struct AppOptions {
    pub ingest: IngestOptions,
    pub join: JoinOptions,
    pub export: ExportOptions,
}

/* ---------------- Ingestion ---------------- */

/// How raw bytes become text before slicing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Decoding {
    /// Invalid sequences become U+FFFD.
    #[default]
    Utf8Lossy,
    /// One byte, one char (ISO-8859-1 feeds).
    Latin1,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IngestOptions {
    pub profile: FormatProfile,
    pub decoding: Decoding,
    /// Parse files on worker threads; output order is unchanged.
    pub parallel: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            profile: FormatProfile::standard(),
            decoding: Decoding::Utf8Lossy,
            parallel: false,
        }
    }
}

/* ---------------- Join ---------------- */

/// Which identifier ties an R2 row to its R1 row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum JoinKey {
    /// The full original code span. Stable across revisions.
    #[default]
    FullCode,
    /// The derived 20-char reference. Lossy: distinct codes can collapse.
    Reference,
}

impl JoinKey {
    /// Header of the column the key lives in.
    pub fn column(self) -> &'static str {
        match self {
            JoinKey::FullCode  => crate::store::COL_FULL_CODE,
            JoinKey::Reference => crate::store::COL_REFERENCE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct JoinOptions {
    pub key: JoinKey,
}

/* ---------------- Export ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv  => "csv",
            ExportFormat::Tsv  => "tsv",
        }
    }
    pub fn mime(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => XLSX_MIME,
            ExportFormat::Csv  => CSV_MIME,
            ExportFormat::Tsv  => TSV_MIME,
        }
    }
    /// Field separator for delimited formats.
    pub fn delimiter(&self) -> Option<char> {
        match self {
            ExportFormat::Xlsx => None,
            ExportFormat::Csv  => Some(','),
            ExportFormat::Tsv  => Some('\t'),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Also emit the raw R1/R2 tables (extra sheets or sibling files).
    pub include_raw: bool,
    out_path: OutputPath,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Xlsx,
            include_raw: false,
            out_path: OutputPath::default(),
        }
    }
}

impl ExportOptions {
    /// Resolved output file: `<dir>/<stem>.<ext>`, or the user's own file name
    /// (extension included) when one was given.
    pub fn out_path(&self) -> PathBuf {
        let mut path = self.out_path.dir.clone();
        match &self.out_path.file_name {
            Some(name) => path.push(name),
            None => {
                let stem = self.out_path.file_stem.to_string_lossy();
                path.push(join!(&*stem, ".", self.format.ext()));
            }
        }
        path
    }

    /// Parse user text into dir + file. A trailing separator means "directory
    /// only": the default stem is kept and the format picks the extension.
    pub fn set_path(&mut self, text: &str) {
        let s = text.trim();
        if s.is_empty() { return; }

        if s.ends_with('/') || s.ends_with('\\') {
            self.out_path.dir = PathBuf::from(s);
            self.out_path.file_name = None;
            self.out_path.user_stem = false;
            return;
        }

        let p = Path::new(s);
        if let Some(parent) = p.parent() {
            self.out_path.dir = parent.to_path_buf();
        }
        match (p.file_stem(), p.extension()) {
            (Some(_), Some(_)) => self.out_path.file_name = p.file_name().map(|n| n.to_os_string()),
            (Some(stem), None) => {
                self.out_path.file_stem = stem.to_os_string();
                self.out_path.file_name = None;
                self.out_path.user_stem = true;
            }
            _ => {}
        }
    }

    /// Replace the default stem (e.g. with the vintage-stamped report name).
    /// Leaves a user-given stem or file name alone.
    pub fn set_default_stem(&mut self, stem: &str) {
        if !self.out_path.user_stem {
            self.out_path.file_stem = OsString::from(stem);
        }
    }

    pub fn dir(&self) -> &Path { &self.out_path.dir }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct OutputPath {
    dir: PathBuf,
    file_stem: OsString,         // without extension
    file_name: Option<OsString>, // explicit name typed by the user
    user_stem: bool,             // file_stem typed by the user
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(join!(REPORT_STEM, "_", DEFAULT_VINTAGE)),
            file_name: None,
            user_stem: false,
        }
    }
}
