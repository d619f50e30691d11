//! Filesystem, command-line and batch-execution plumbing around the core

/// Command-line parsing and run orchestration
pub mod cli;
/// Constants and configuration defaults
pub mod configuration;
/// Bounded parallel fan-out with per-job error isolation
pub mod driver;
/// Error types
pub mod error;
/// Reconstruction error scoring
pub mod evaluate;
/// Image decoding and atomic encoding
pub mod image;
/// Job discovery and output naming
pub mod jobs;
/// Batch progress display
pub mod progress;
