// src/consolidate.rs
//! Left join of R2 detail onto R1 properties.
//!
//! Every R1 row survives. An R1 row with `n` matching R2 rows yields `n`
//! consolidated rows (R2 input order); with none it yields one row whose
//! detail is `None`. With no R2 file at all the result is flagged
//! [`JoinMode::PropertyOnly`] so callers can tell the pass-through apart.
use std::collections::HashMap;
use std::time::Instant;

use crate::config::JoinKey;
use crate::ingest::{ Batch, Notice };
use crate::specs::{ DetailRecord, PropertyRecord };

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinMode {
    /// R2 files were part of the batch (possibly with zero records).
    Joined,
    /// No R2 file: the R1 collection passed through unchanged.
    PropertyOnly,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConsolidatedRecord {
    pub property: PropertyRecord,
    pub detail: Option<DetailRecord>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Consolidated {
    pub mode: JoinMode,
    pub key: JoinKey,
    pub records: Vec<ConsolidatedRecord>,
    /// R2 rows given to the join (0 in R1-only mode).
    pub detail_rows: usize,
}

impl Consolidated {
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// R1 rows that found at least one detail row.
    pub fn matched(&self) -> usize {
        self.records.iter().filter(|r| r.detail.is_some()).count()
    }

    /// Degradation signal, if any.
    pub fn notice(&self) -> Option<Notice> {
        match self.mode {
            JoinMode::PropertyOnly => Some(Notice::PropertyOnly),
            JoinMode::Joined if self.detail_rows == 0 => Some(Notice::EmptyDetail),
            JoinMode::Joined => None,
        }
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertyRecord> {
        self.records.iter().map(|r| &r.property)
    }
}

/// Join a batch. The mode is decided by whether any R2 *file* was classified,
/// not by whether it produced records.
pub fn consolidate(batch: &Batch, key: JoinKey) -> Consolidated {
    let mode = if batch.has_detail_files() { JoinMode::Joined } else { JoinMode::PropertyOnly };
    let out = join(&batch.properties, &batch.details, key, mode);
    if let Some(n) = out.notice() {
        log::warn!("{n}");
    }
    out
}

/// Join two collections directly.
pub fn join(
    properties: &[PropertyRecord],
    details: &[DetailRecord],
    key: JoinKey,
    mode: JoinMode,
) -> Consolidated {
    let t = Instant::now();

    if mode == JoinMode::PropertyOnly {
        let records = properties.iter()
            .map(|p| ConsolidatedRecord { property: p.clone(), detail: None })
            .collect();
        return Consolidated { mode, key, records, detail_rows: 0 };
    }

    // key → R2 indices, in input order
    let mut index: HashMap<&str, Vec<usize>> = HashMap::with_capacity(details.len());
    for (i, d) in details.iter().enumerate() {
        index.entry(d.join_key(key)).or_default().push(i);
    }

    let mut records = Vec::with_capacity(properties.len().max(details.len()));
    for p in properties {
        match index.get(p.join_key(key)) {
            Some(hits) => records.extend(hits.iter().map(|&i| ConsolidatedRecord {
                property: p.clone(),
                detail: Some(details[i].clone()),
            })),
            None => records.push(ConsolidatedRecord { property: p.clone(), detail: None }),
        }
    }

    log::debug!(
        "Join on {:?}: {} R1 × {} R2 → {} row(s) in {:?}",
        key, properties.len(), details.len(), records.len(), t.elapsed()
    );
    Consolidated { mode, key, records, detail_rows: details.len() }
}
