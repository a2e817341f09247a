//! # Aggregator Module
//!
//! Fuses the four analyzers' penalties and scores into one fraud score.
//!
//! Weights reflect evidentiary confidence: metadata and noise penalties carry
//! full weight, ELA and tamper scores are discounted. This is the single
//! clamp point in the pipeline - upstream penalties are allowed to exceed
//! their nominal ranges individually.

use crate::core::metadata::MetadataReport;
use crate::core::noise::NoiseReport;

/// Weight applied to the metadata penalty
pub const METADATA_WEIGHT: f64 = 1.0;
/// Weight applied to the noise penalty
pub const NOISE_WEIGHT: f64 = 1.0;
/// Weight applied to the ELA score
pub const ELA_WEIGHT: f64 = 0.3;
/// Weight applied to the tamper score
pub const TAMPER_WEIGHT: f64 = 0.5;

/// Combine sub-reports into a fraud score clamped to 0-100.
///
/// Pure numeric fold over already-validated reports; performs no I/O and
/// cannot fail.
pub fn combine(
    metadata: &MetadataReport,
    noise: &NoiseReport,
    ela_score: u32,
    tamper_score: u32,
) -> u8 {
    let total = (metadata.penalty as f64 * METADATA_WEIGHT) as u32
        + (noise.penalty as f64 * NOISE_WEIGHT) as u32
        + (ela_score as f64 * ELA_WEIGHT) as u32
        + (tamper_score as f64 * TAMPER_WEIGHT) as u32;

    total.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata_with_penalty(penalty: u32) -> MetadataReport {
        MetadataReport {
            valid: penalty == 0,
            issues: Vec::new(),
            penalty,
        }
    }

    fn noise_with_penalty(penalty: u32) -> NoiseReport {
        NoiseReport {
            variance: 100.0,
            issue: "Noise levels normal".to_string(),
            penalty,
        }
    }

    #[test]
    fn all_zero_evidence_scores_zero() {
        let score = combine(&metadata_with_penalty(0), &noise_with_penalty(0), 0, 0);
        assert_eq!(score, 0);
    }

    #[test]
    fn ela_and_tamper_are_discounted() {
        let score = combine(&metadata_with_penalty(0), &noise_with_penalty(0), 100, 100);
        assert_eq!(score, 30 + 50);
    }

    #[test]
    fn fractional_contributions_truncate() {
        // 85 * 0.3 = 25.5 truncates to 25; 33 * 0.5 = 16.5 truncates to 16
        let score = combine(&metadata_with_penalty(0), &noise_with_penalty(0), 85, 33);
        assert_eq!(score, 25 + 16);
    }

    #[test]
    fn oversized_penalties_clamp_to_one_hundred() {
        // Unclamped metadata penalties can exceed 100 on their own
        let score = combine(&metadata_with_penalty(120), &noise_with_penalty(20), 100, 100);
        assert_eq!(score, 100);
    }

    #[test]
    fn clean_document_profile_stays_low() {
        let score = combine(&metadata_with_penalty(0), &noise_with_penalty(0), 20, 10);
        assert!(score < 25);
    }
}
