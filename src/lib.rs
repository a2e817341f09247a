//! # Document Forensics
//!
//! A deterministic forensic scoring pipeline for document images. Four
//! independent pixel-level analyzers (metadata plausibility, noise
//! consistency, Error Level Analysis, copy-move/splice tamper detection) run
//! over a single raw byte buffer and their evidence is fused into one 0-100
//! fraud-risk score.
//!
//! ## Core Philosophy
//! - **Stateless** - every call is a pure function of the input bytes; no
//!   caches, no sessions, no singletons
//! - **Show WHY** - every penalty comes with a human-readable issue, and the
//!   visual analyzers return inspectable artifacts (ELA image, tamper heatmap)
//! - **Fail honestly** - undecodable input is a hard error, never a silent
//!   zero score; individual analyzer hiccups degrade to "no evidence"
//!
//! ## Architecture
//! The library is split into a core engine (UI-agnostic) and presentation layers:
//! - `core` - the forensic analyzers and the fork/join pipeline
//! - `events` - event-driven progress reporting (GUI-ready)
//! - `error` - typed error hierarchy
//! - `cli` - command-line interface (binary only)

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use crate::core::pipeline::{ForensicPipeline, ForensicReport, PipelineBuilder};
pub use error::{ForensicError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point (CLI or service).
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
