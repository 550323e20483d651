// src/config/mod.rs
pub mod consts;
pub mod options;
pub mod profile;

pub use options::{ AppOptions, Decoding, ExportFormat, ExportOptions, IngestOptions, JoinKey, JoinOptions };
pub use profile::{ FormatProfile, Span };
