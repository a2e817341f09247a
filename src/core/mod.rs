//! # Core Module
//!
//! The UI-agnostic forensic scoring engine.
//!
//! ## Modules
//! - `decoder` - turns opaque byte buffers into raster images
//! - `filters` - shared Laplacian operator
//! - `metadata` - EXIF extraction and plausibility scoring
//! - `noise` - noise-consistency check
//! - `ela` - Error Level Analysis
//! - `tamper` - copy-move and splice detection
//! - `aggregator` - score fusion and the single clamp point
//! - `pipeline` - fork/join orchestration of the above

pub mod aggregator;
pub mod decoder;
pub mod ela;
pub mod filters;
pub mod metadata;
pub mod noise;
pub mod pipeline;
pub mod tamper;

// Re-export commonly used types
pub use ela::{ElaAnalyzer, ElaReport};
pub use metadata::{MetadataRecord, MetadataReport};
pub use noise::NoiseReport;
pub use pipeline::{ForensicPipeline, ForensicReport};
pub use tamper::{TamperDetails, TamperDetector, TamperReport};
