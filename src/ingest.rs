// src/ingest.rs
//! Batch ingestion: named byte buffers in, two record collections out.
//!
//! Each file is classified by name, decoded leniently, split into lines and
//! run through the matching record spec. Records of the same kind are
//! concatenated in batch order, then line order. Nothing here fails: bad
//! lines are counted, unknown files are reported and left out.
use std::{
    borrow::Cow, fmt, fs, io,
    path::Path,
    sync::{ mpsc, atomic::{ AtomicUsize, Ordering }},
    thread,
    time::Instant,
};

use crate::{
    config::{ consts::{ R1_MARKER, R2_MARKER, WORKERS }, Decoding, FormatProfile, IngestOptions },
    progress::{ reborrow, Progress },
    specs::{ self, DetailRecord, ParsedLines, PropertyRecord, RecordKind },
};

/// One uploaded file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self { name: name.into(), bytes: bytes.into() }
    }

    /// Read from disk; the file name (not the full path) is what gets classified.
    pub fn read(path: &Path) -> io::Result<Self> {
        let bytes = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Ok(Self { name, bytes })
    }
}

/* ---------------- Classification ---------------- */

/// Decides which record kind a file holds. `None` = leave it out.
pub trait Classifier: Send + Sync {
    fn classify(&self, file_name: &str) -> Option<RecordKind>;
}

/// Case-insensitive substring match on the file name; "R1" wins over "R2".
#[derive(Clone, Copy, Debug, Default)]
pub struct FileNameClassifier;

impl Classifier for FileNameClassifier {
    fn classify(&self, file_name: &str) -> Option<RecordKind> {
        let upper = file_name.to_uppercase();
        if upper.contains(R1_MARKER) {
            Some(RecordKind::R1)
        } else if upper.contains(R2_MARKER) {
            Some(RecordKind::R2)
        } else {
            None
        }
    }
}

impl<F> Classifier for F
where
    F: Fn(&str) -> Option<RecordKind> + Send + Sync,
{
    fn classify(&self, file_name: &str) -> Option<RecordKind> { self(file_name) }
}

/* ---------------- Decoding ---------------- */

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Bytes → text, never failing. A leading BOM is dropped so it cannot shift offsets.
pub fn decode(bytes: &[u8], decoding: Decoding) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match decoding {
        Decoding::Utf8Lossy => String::from_utf8_lossy(bytes),
        Decoding::Latin1 => Cow::Owned(bytes.iter().map(|&b| b as char).collect()),
    }
}

/* ---------------- Reports ---------------- */

/// What happened to one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileReport {
    pub name: String,
    /// `None` when the classifier rejected the file.
    pub kind: Option<RecordKind>,
    pub lines: usize,
    pub records: usize,
    pub blank: usize,
    /// Lines dropped as too short.
    pub skipped: usize,
}

/// Caller-facing warnings. None of these stop the pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// File name matched neither R1 nor R2.
    Unclassified { file: String },
    /// Lines dropped from one file.
    SkippedLines { file: String, count: usize },
    /// No R2 file in the batch: consolidated table is R1 only.
    PropertyOnly,
    /// R2 files were given but none produced a record.
    EmptyDetail,
    /// Nothing to show.
    NoValidRecords,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Unclassified { file } => write!(f, "{file}: name matches neither R1 nor R2; file ignored"),
            Notice::SkippedLines { file, count } => write!(f, "{file}: {count} malformed line(s) skipped"),
            Notice::PropertyOnly => write!(f, "Only R1 (basic) files were loaded; detail columns are absent"),
            Notice::EmptyDetail => write!(f, "R2 files were loaded but contained no valid records"),
            Notice::NoValidRecords => write!(f, "No valid records found"),
        }
    }
}

/// Output of one ingestion run. Owns both collections until consolidation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Batch {
    pub properties: Vec<PropertyRecord>,
    pub details: Vec<DetailRecord>,
    pub files: Vec<FileReport>,
}

impl Batch {
    /// At least one file was classified as R2 (even if it yielded nothing).
    pub fn has_detail_files(&self) -> bool {
        self.files.iter().any(|f| f.kind == Some(RecordKind::R2))
    }

    pub fn skipped_lines(&self) -> usize {
        self.files.iter().map(|f| f.skipped).sum()
    }

    /// File-level notices, in file order.
    pub fn notices(&self) -> Vec<Notice> {
        let mut out = Vec::new();
        for f in &self.files {
            match f.kind {
                None => out.push(Notice::Unclassified { file: f.name.clone() }),
                Some(_) if f.skipped > 0 => out.push(Notice::SkippedLines { file: f.name.clone(), count: f.skipped }),
                Some(_) => {}
            }
        }
        if self.properties.is_empty() {
            out.push(Notice::NoValidRecords);
        }
        out
    }
}

/* ---------------- Ingestion ---------------- */

enum Parsed {
    R1(ParsedLines<PropertyRecord>),
    R2(ParsedLines<DetailRecord>),
    Unclassified,
}

fn parse_file(file: &SourceFile, kind: Option<RecordKind>, opts: &IngestOptions) -> Parsed {
    let profile: &FormatProfile = &opts.profile;
    match kind {
        None => Parsed::Unclassified,
        Some(kind) => {
            let text = decode(&file.bytes, opts.decoding);
            match kind {
                RecordKind::R1 => Parsed::R1(specs::r1::parse_text(&text, profile)),
                RecordKind::R2 => Parsed::R2(specs::r2::parse_text(&text, profile)),
            }
        }
    }
}

/// Parse every file and concatenate per kind. Honors `opts.parallel`.
pub fn ingest(
    files: &[SourceFile],
    opts: &IngestOptions,
    classifier: &dyn Classifier,
    mut progress: Option<&mut dyn Progress>,
) -> Batch {
    let t = Instant::now();
    if let Some(p) = progress.as_deref_mut() {
        p.begin(files.len());
    }

    let kinds: Vec<Option<RecordKind>> = files.iter().map(|f| classifier.classify(&f.name)).collect();

    let parsed = if opts.parallel && files.len() > 1 {
        parse_parallel(files, &kinds, opts, reborrow(&mut progress))
    } else {
        files.iter().zip(&kinds).map(|(f, &k)| {
            let out = parse_file(f, k, opts);
            report_one(reborrow(&mut progress), f, &out);
            out
        }).collect()
    };

    let batch = merge(files, parsed);
    log::debug!(
        "Ingest: {} file(s) → {} R1, {} R2 in {:?}",
        files.len(), batch.properties.len(), batch.details.len(), t.elapsed()
    );

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    batch
}

/// Worker threads pull file indices from a shared counter; results come back
/// over a channel and are slotted by index, so the merge sees batch order.
fn parse_parallel(
    files: &[SourceFile],
    kinds: &[Option<RecordKind>],
    opts: &IngestOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Vec<Parsed> {
    let counter = AtomicUsize::new(0);
    let (res_tx, res_rx) = mpsc::channel::<(usize, Parsed)>();
    let workers = WORKERS.min(files.len()).max(1);

    let mut slots: Vec<Option<Parsed>> = (0..files.len()).map(|_| None).collect();

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = res_tx.clone();
            let counter = &counter;
            scope.spawn(move || {
                loop {
                    let i = counter.fetch_add(1, Ordering::Relaxed);
                    if i >= files.len() {
                        break;
                    }
                    if tx.send((i, parse_file(&files[i], kinds[i], opts))).is_err() {
                        break;
                    }
                }
            });
        }
        drop(res_tx); // main thread is sole receiver now

        for (i, out) in res_rx.iter() {
            report_one(reborrow(&mut progress), &files[i], &out);
            slots[i] = Some(out);
        }
    });

    slots
        .into_iter()
        .map(|s| s.unwrap_or(Parsed::Unclassified))
        .collect()
}

fn report_one(progress: Option<&mut dyn Progress>, file: &SourceFile, out: &Parsed) {
    match out {
        Parsed::R1(p) => {
            log::info!("{}: R1, {} record(s), {} skipped", file.name, p.records.len(), p.skipped());
            if let Some(pr) = progress { pr.item_done(&file.name, p.records.len()); }
        }
        Parsed::R2(p) => {
            log::info!("{}: R2, {} record(s), {} skipped", file.name, p.records.len(), p.skipped());
            if let Some(pr) = progress { pr.item_done(&file.name, p.records.len()); }
        }
        Parsed::Unclassified => {
            log::warn!("{}: name matches neither R1 nor R2; ignored", file.name);
            if let Some(pr) = progress { pr.item_skipped(&file.name); }
        }
    }
}

fn merge(files: &[SourceFile], parsed: Vec<Parsed>) -> Batch {
    let mut batch = Batch::default();
    for (file, out) in files.iter().zip(parsed) {
        let report = |kind, p: (usize, usize, usize, usize)| FileReport {
            name: file.name.clone(),
            kind,
            lines: p.0,
            records: p.1,
            blank: p.2,
            skipped: p.3,
        };
        match out {
            Parsed::R1(p) => {
                batch.files.push(report(Some(RecordKind::R1), (p.lines, p.records.len(), p.blank, p.skipped())));
                batch.properties.extend(p.records);
            }
            Parsed::R2(p) => {
                batch.files.push(report(Some(RecordKind::R2), (p.lines, p.records.len(), p.blank, p.skipped())));
                batch.details.extend(p.records);
            }
            Parsed::Unclassified => batch.files.push(report(None, (0, 0, 0, 0))),
        }
    }
    batch
}
