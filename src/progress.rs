// src/progress.rs
/// Lightweight progress reporting used by ingestion and export.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of files in the batch.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One file parsed: its name and how many records it produced.
    fn item_done(&mut self, _name: &str, _records: usize) {}

    /// One file left out of the batch (unclassified).
    fn item_skipped(&mut self, _name: &str) {}

    /// Called at the end.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Reborrow an optional sink for a nested call without giving it away.
pub fn reborrow<'a>(progress: &'a mut Option<&mut dyn Progress>) -> Option<&'a mut dyn Progress> {
    match progress {
        Some(p) => Some(&mut **p),
        None => None,
    }
}
