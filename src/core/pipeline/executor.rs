//! Pipeline execution implementation.

use crate::core::ela::{ElaAnalyzer, DEFAULT_ELA_QUALITY};
use crate::core::metadata::MetadataReport;
use crate::core::noise::NoiseReport;
use crate::core::tamper::{TamperDetails, TamperDetector, DEFAULT_BLOCK_SIZE};
use crate::core::{aggregator, decoder, metadata, noise};
use crate::error::{ForensicError, Result};
use crate::events::{
    null_sender, AnalyzerEvent, AnalyzerKind, Event, EventSender, PipelineEvent, PipelineSummary,
};
use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// The final artifact returned to the caller.
///
/// Immutable once produced; the pipeline retains no reference. Serializes to
/// a JSON mapping with the raster artifacts skipped - persisting or encoding
/// those is the transport layer's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForensicReport {
    /// Fused fraud-risk score, 0-100, higher = more suspicious
    pub fraud_score: u8,
    /// Metadata plausibility verdict
    pub metadata: MetadataReport,
    /// Noise-consistency verdict
    pub noise: NoiseReport,
    /// ELA residual score, 0-100
    pub ela_score: u32,
    /// Amplified ELA residual for human inspection
    #[serde(skip)]
    pub ela_image: Option<RgbImage>,
    /// Tamper score, 0-100
    pub tamper_score: u32,
    /// Tamper evidence counts and coverage ratio
    pub tamper_details: TamperDetails,
    /// Fused tamper mask as a false-color heatmap
    #[serde(skip)]
    pub tamper_heatmap: Option<RgbImage>,
    /// Wall-clock duration of the run (diagnostic only, excluded from the
    /// determinism contract)
    pub duration_ms: u64,
}

/// Coarse risk banding for presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskBand {
    Low,
    Elevated,
    High,
}

impl ForensicReport {
    /// Band the fraud score for display purposes
    pub fn risk_band(&self) -> RiskBand {
        match self.fraud_score {
            0..=24 => RiskBand::Low,
            25..=59 => RiskBand::Elevated,
            _ => RiskBand::High,
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskBand::Low => write!(f, "low"),
            RiskBand::Elevated => write!(f, "elevated"),
            RiskBand::High => write!(f, "high"),
        }
    }
}

/// Configuration for the pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// JPEG quality for the ELA re-encode pass (1-100)
    pub ela_quality: u8,
    /// Copy-move block size in pixels (minimum 2)
    pub block_size: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            ela_quality: DEFAULT_ELA_QUALITY,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

/// Builder for pipeline configuration
pub struct PipelineBuilder {
    config: PipelineConfig,
}

impl PipelineBuilder {
    /// Create a new pipeline builder with default tunables
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
        }
    }

    /// Set the ELA re-encode quality (1-100)
    pub fn ela_quality(mut self, quality: u8) -> Self {
        self.config.ela_quality = quality;
        self
    }

    /// Set the copy-move block size in pixels
    pub fn block_size(mut self, block_size: u32) -> Self {
        self.config.block_size = block_size;
        self
    }

    /// Build the pipeline, validating the tunables
    pub fn build(self) -> Result<ForensicPipeline> {
        if !(1..=100).contains(&self.config.ela_quality) {
            return Err(ForensicError::Config(format!(
                "ELA quality must be 1-100, got {}",
                self.config.ela_quality
            )));
        }
        if self.config.block_size < 2 {
            return Err(ForensicError::Config(format!(
                "Tamper block size must be at least 2, got {}",
                self.config.block_size
            )));
        }

        Ok(ForensicPipeline {
            ela: ElaAnalyzer::new(self.config.ela_quality),
            tamper: TamperDetector::new(self.config.block_size),
        })
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The forensic scoring pipeline.
///
/// A plain value carrying its tunables - construct one per caller, no shared
/// process-wide state.
pub struct ForensicPipeline {
    ela: ElaAnalyzer,
    tamper: TamperDetector,
}

impl Default for ForensicPipeline {
    fn default() -> Self {
        Self {
            ela: ElaAnalyzer::default(),
            tamper: TamperDetector::default(),
        }
    }
}

impl ForensicPipeline {
    /// Create a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Run the pipeline without events
    pub fn run(&self, bytes: &[u8]) -> Result<ForensicReport> {
        self.run_with_events(bytes, &null_sender())
    }

    /// Run the pipeline with event reporting.
    ///
    /// Decoding is the fatal gate: undecodable bytes abort the call with
    /// `ForensicError::Decode` and no partial report. After that the four
    /// analyzers fork over the shared immutable raster (metadata reads the
    /// raw bytes, since EXIF lives in the container, not the pixels) and
    /// join before aggregation.
    pub fn run_with_events(&self, bytes: &[u8], events: &EventSender) -> Result<ForensicReport> {
        let start = Instant::now();
        let span = tracing::info_span!("forensic_pipeline", input_len = bytes.len());
        let _guard = span.enter();

        events.send(Event::Pipeline(PipelineEvent::Started));

        let image = decoder::decode(bytes)?;
        events.send(Event::Pipeline(PipelineEvent::Decoded {
            width: image.width(),
            height: image.height(),
        }));

        let ((metadata_report, noise_report), (ela_report, tamper_report)) = rayon::join(
            || {
                rayon::join(
                    || {
                        events.send(Event::Analyzer(AnalyzerEvent::Started {
                            kind: AnalyzerKind::Metadata,
                        }));
                        let report = metadata::analyze_metadata(&metadata::extract_metadata(bytes));
                        events.send(Event::Analyzer(AnalyzerEvent::Completed {
                            kind: AnalyzerKind::Metadata,
                            contribution: report.penalty,
                        }));
                        report
                    },
                    || {
                        events.send(Event::Analyzer(AnalyzerEvent::Started {
                            kind: AnalyzerKind::Noise,
                        }));
                        let report = noise::analyze_image(&image);
                        events.send(Event::Analyzer(AnalyzerEvent::Completed {
                            kind: AnalyzerKind::Noise,
                            contribution: report.penalty,
                        }));
                        report
                    },
                )
            },
            || {
                rayon::join(
                    || {
                        events.send(Event::Analyzer(AnalyzerEvent::Started {
                            kind: AnalyzerKind::Ela,
                        }));
                        let report = self.ela.analyze_image(&image);
                        events.send(Event::Analyzer(AnalyzerEvent::Completed {
                            kind: AnalyzerKind::Ela,
                            contribution: report.score,
                        }));
                        report
                    },
                    || {
                        events.send(Event::Analyzer(AnalyzerEvent::Started {
                            kind: AnalyzerKind::Tamper,
                        }));
                        let report = self.tamper.detect_image(&image);
                        events.send(Event::Analyzer(AnalyzerEvent::Completed {
                            kind: AnalyzerKind::Tamper,
                            contribution: report.score,
                        }));
                        report
                    },
                )
            },
        );

        let fraud_score = aggregator::combine(
            &metadata_report,
            &noise_report,
            ela_report.score,
            tamper_report.score,
        );

        let duration_ms = start.elapsed().as_millis() as u64;
        events.send(Event::Pipeline(PipelineEvent::Completed {
            summary: PipelineSummary {
                fraud_score,
                metadata_penalty: metadata_report.penalty,
                noise_penalty: noise_report.penalty,
                ela_score: ela_report.score,
                tamper_score: tamper_report.score,
                duration_ms,
            },
        }));
        tracing::info!(fraud_score, duration_ms, "forensic analysis complete");

        Ok(ForensicReport {
            fraud_score,
            metadata: metadata_report,
            noise: noise_report,
            ela_score: ela_report.score,
            ela_image: ela_report.image,
            tamper_score: tamper_report.score,
            tamper_details: tamper_report.details,
            tamper_heatmap: tamper_report.heatmap,
            duration_ms,
        })
    }
}
