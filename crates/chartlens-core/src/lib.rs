//! # chartlens-core
//!
//! Core types, traits, and shared configuration for the chartlens chart
//! analysis service.
//!
//! This crate provides the error type, default constants, the analysis-log
//! capability, and the startup configuration that the other chartlens
//! crates depend on.

pub mod config;
pub mod defaults;
pub mod error;
pub mod log;

// Re-export commonly used types at crate root
pub use config::AppConfig;
pub use error::{Error, Result};
pub use log::{AnalysisLog, FileAnalysisLog, MemoryAnalysisLog};
