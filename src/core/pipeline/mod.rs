//! # Pipeline Module
//!
//! Orchestrates the full forensic analysis of one document image.
//!
//! ## Pipeline Stages
//! 1. **Decode** - validate the byte buffer as an image (fatal gate)
//! 2. **Analyze** - metadata, noise, ELA and tamper detection run as a
//!    fork/join over the shared immutable raster
//! 3. **Aggregate** - fuse penalties/scores into one clamped fraud score
//!
//! ## Parallelism
//! The four analyzers have no data dependency on one another; they run
//! concurrently via nested `rayon::join` and meet at an explicit join point
//! before aggregation.

mod executor;

pub use executor::{
    ForensicPipeline, ForensicReport, PipelineBuilder, PipelineConfig, RiskBand,
};
