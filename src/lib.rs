// src/lib.rs

#[macro_use]
pub mod macros;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod specs;

pub mod consolidate;
pub mod csv;
pub mod export;
pub mod file;
pub mod ingest;
pub mod logger;
pub mod lookup;
pub mod portfolio;
pub mod progress;
pub mod runner;
pub mod store;

pub use config::{ AppOptions, FormatProfile, JoinKey };
pub use consolidate::{ consolidate, Consolidated, ConsolidatedRecord, JoinMode };
pub use error::Error;
pub use ingest::{ ingest, Batch, Notice, SourceFile };
pub use runner::{ run, Session };
pub use specs::{ DetailRecord, PropertyRecord, RecordKind };
