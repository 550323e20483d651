// src/runner.rs
use std::path::{ Path, PathBuf };

use crate::{
    config::AppOptions,
    consolidate::{ consolidate, Consolidated },
    error::{ Error, ExportError },
    export::{ self, ExportBlob },
    file,
    ingest::{ self, Classifier, FileNameClassifier, Notice, SourceFile, Batch },
    progress::{ reborrow, Progress },
};

/// One ingestion-and-join cycle. Nothing in here changes after `run` returns.
#[derive(Clone, Debug)]
pub struct Session {
    pub batch: Batch,
    pub consolidated: Consolidated,
}

impl Session {
    /// Everything the caller should be told, file-level first.
    pub fn notices(&self) -> Vec<Notice> {
        let mut out = self.batch.notices();
        if let Some(n) = self.consolidated.notice() {
            // `NoValidRecords` stays last
            let at = out.iter().position(|x| *x == Notice::NoValidRecords).unwrap_or(out.len());
            out.insert(at, n);
        }
        out
    }

    pub fn export_blobs(&self, opts: &AppOptions) -> Result<Vec<ExportBlob>, ExportError> {
        export::export_report(&self.batch, &self.consolidated, opts.export.format, opts.export.include_raw)
    }

    /// Render and write the report. The vintage-stamped name is used unless
    /// the caller set their own file name.
    pub fn export_to_disk(&self, opts: &AppOptions) -> Result<Vec<PathBuf>, ExportError> {
        let mut export = opts.export.clone();
        export.set_default_stem(&export::report_stem(&self.consolidated));
        let blobs = self.export_blobs(opts)?;
        file::write_export(&export, &blobs)
    }
}

/// Ingest with the default file-name classifier, then join.
pub fn run(files: &[SourceFile], opts: &AppOptions, progress: Option<&mut dyn Progress>) -> Session {
    run_with(files, opts, &FileNameClassifier, progress)
}

/// Same as [`run`] with a caller-supplied classifier.
pub fn run_with(
    files: &[SourceFile],
    opts: &AppOptions,
    classifier: &dyn Classifier,
    mut progress: Option<&mut dyn Progress>,
) -> Session {
    let batch = ingest::ingest(files, &opts.ingest, classifier, reborrow(&mut progress));
    let consolidated = consolidate(&batch, opts.join.key);
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!(
            "{} R1 + {} R2 record(s) → {} consolidated row(s)",
            batch.properties.len(), batch.details.len(), consolidated.len()
        ));
    }
    Session { batch, consolidated }
}

/// Read input files from disk (names come from the path's file name).
pub fn load_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<SourceFile>, Error> {
    paths.iter()
        .map(|p| {
            let p = p.as_ref();
            SourceFile::read(p).map_err(|source| Error::Input { path: p.to_path_buf(), source })
        })
        .collect()
}
