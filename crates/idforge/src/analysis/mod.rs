//! Heuristic identifier analysis.
//!
//! [`analyze`] computes four independent views of a value (structure,
//! security, quality, compatibility) and derives recommendations and warnings
//! from them. The rubric is deterministic: the same `(value, kind)` always
//! yields the same [`Analysis`]. Scores approximate; they are not a security
//! audit.

mod compatibility;
mod quality;
mod security;
mod structure;

pub use compatibility::*;
pub use quality::*;
pub use security::*;
pub use structure::*;

use crate::IdKind;
use serde::Serialize;

const LOW_SECURITY_SCORE: u32 = 70;
const LOW_QUALITY_SCORE: f64 = 80.0;
const SHORT_LENGTH: usize = 16;

/// The full four-way breakdown of one value.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub structure: StructureAnalysis,
    pub security: SecurityAnalysis,
    pub quality: QualityAnalysis,
    pub compatibility: CompatibilityAnalysis,
    pub recommendations: Vec<String>,
    pub warnings: Vec<String>,
}

/// Analyzes `value` as an identifier of `kind`.
///
/// # Example
///
/// ```
/// use idforge::{IdKind, analyze};
///
/// let analysis = analyze("0193abcd-ef01-4a2b-8c3d-0123456789ab", IdKind::UuidV4);
/// assert_eq!(analysis.security.security_score, 100);
/// assert!(analysis.warnings.is_empty());
/// ```
pub fn analyze(value: &str, kind: IdKind) -> Analysis {
    let structure = analyze_structure(value);
    let security = analyze_security(structure.data_length, kind);
    let quality = analyze_quality(value, structure.data_length, kind);
    let compatibility = compatibility(kind);

    let mut recommendations = Vec::new();
    let mut warnings = Vec::new();

    if security.security_score < LOW_SECURITY_SCORE {
        recommendations.push(
            "Use uuid_v4 or nanoid where identifiers must be hard to guess".to_string(),
        );
    }
    if quality.overall_score < LOW_QUALITY_SCORE {
        recommendations.push(
            "Increase the length or use a larger alphabet to improve quality".to_string(),
        );
    }
    if structure.total_length < SHORT_LENGTH {
        warnings.push(
            "Identifiers shorter than 16 characters have a higher collision risk".to_string(),
        );
    }
    if security.predictability == Predictability::High {
        warnings.push("Value is predictable; do not use it as a secret or token".to_string());
    }

    Analysis {
        structure,
        security,
        quality,
        compatibility,
        recommendations,
        warnings,
    }
}
