//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};

/// All events emitted by the forensic pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Pipeline-level events
    Pipeline(PipelineEvent),
    /// Per-analyzer events
    Analyzer(AnalyzerEvent),
}

/// The four independent analyzers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalyzerKind {
    Metadata,
    Noise,
    Ela,
    Tamper,
}

impl std::fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalyzerKind::Metadata => write!(f, "metadata"),
            AnalyzerKind::Noise => write!(f, "noise"),
            AnalyzerKind::Ela => write!(f, "ela"),
            AnalyzerKind::Tamper => write!(f, "tamper"),
        }
    }
}

/// Events from a single analyzer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AnalyzerEvent {
    /// The analyzer started
    Started { kind: AnalyzerKind },
    /// The analyzer finished; contribution is its unweighted penalty or score
    Completed { kind: AnalyzerKind, contribution: u32 },
}

/// Pipeline-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    /// A pipeline run started
    Started,
    /// The input decoded successfully (the fatal gate passed)
    Decoded { width: u32, height: u32 },
    /// The run finished and the report is assembled
    Completed { summary: PipelineSummary },
}

/// Summary attached to [`PipelineEvent::Completed`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Final clamped fraud score
    pub fraud_score: u8,
    /// Unweighted metadata penalty
    pub metadata_penalty: u32,
    /// Unweighted noise penalty
    pub noise_penalty: u32,
    /// Unweighted ELA score
    pub ela_score: u32,
    /// Unweighted tamper score
    pub tamper_score: u32,
    /// Wall-clock duration of the run
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyzer_kind_display() {
        assert_eq!(AnalyzerKind::Metadata.to_string(), "metadata");
        assert_eq!(AnalyzerKind::Ela.to_string(), "ela");
    }

    #[test]
    fn events_serialize_to_json() {
        let event = Event::Analyzer(AnalyzerEvent::Completed {
            kind: AnalyzerKind::Tamper,
            contribution: 42,
        });
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("Tamper"));
        assert!(json.contains("42"));
    }
}
