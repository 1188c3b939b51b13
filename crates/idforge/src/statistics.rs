use crate::{Identifier, SecurityLevel};
use core::time::Duration;
use serde::Serialize;
use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc,
};

/// Batch-wide aggregates, computed once when a job stops.
///
/// `valid_count + invalid_count == total_generated` and
/// `unique_count <= valid_count` always hold.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_generated: usize,
    pub valid_count: usize,
    pub invalid_count: usize,
    /// Distinct formatted values among the valid items.
    pub unique_count: usize,
    pub duplicate_count: usize,
    pub average_entropy: f64,
    pub average_quality: f64,
    pub average_security: f64,
    pub generation_time_ms: u64,
    /// `duplicate_count / total_generated`, zero for an empty batch.
    pub collision_rate: f64,
    pub by_security_level: BTreeMap<SecurityLevel, usize>,
    /// Keyed by the lower bound of the quality decile (0, 10, ..., 90).
    pub by_quality_bucket: BTreeMap<u8, usize>,
    pub by_length: BTreeMap<usize, usize>,
}

/// Label for a quality decile key, e.g. `"70-79"`. The top bucket includes
/// 100.
pub fn quality_bucket_label(lower: u8) -> String {
    if lower >= 90 {
        "90-100".to_string()
    } else {
        format!("{lower}-{}", lower + 9)
    }
}

fn quality_bucket(score: f64) -> u8 {
    let decile = (score.clamp(0.0, 100.0) / 10.0).floor() as u8;
    decile.min(9) * 10
}

fn mean(sum: f64, n: usize) -> f64 {
    if n == 0 { 0.0 } else { sum / n as f64 }
}

impl Statistics {
    /// Aggregates `items` in one pass.
    ///
    /// Averages and histograms only consider valid items, and each average
    /// only those items that carry the block it reads from. With
    /// `track_duplicates` off every valid item counts as unique.
    pub fn compute(items: &[Arc<Identifier>], elapsed: Duration, track_duplicates: bool) -> Self {
        let mut stats = Self {
            total_generated: items.len(),
            generation_time_ms: elapsed.as_millis().try_into().unwrap_or(u64::MAX),
            ..Self::default()
        };

        let mut seen = HashSet::new();
        let (mut entropy_sum, mut entropy_n) = (0.0, 0);
        let (mut quality_sum, mut quality_n) = (0.0, 0);
        let (mut security_sum, mut security_n) = (0.0, 0);

        for item in items.iter().filter(|item| item.is_valid) {
            stats.valid_count += 1;
            if !track_duplicates || seen.insert(item.value.as_str()) {
                stats.unique_count += 1;
            }

            if let Some(entropy) = item.entropy_bits() {
                entropy_sum += entropy;
                entropy_n += 1;
            }
            if let Some(meta) = &item.metadata {
                *stats.by_security_level.entry(meta.security_level).or_default() += 1;
            }
            if let Some(quality) = item.quality_score() {
                quality_sum += quality;
                quality_n += 1;
                *stats.by_quality_bucket.entry(quality_bucket(quality)).or_default() += 1;
            }
            if let Some(security) = item.security_score() {
                security_sum += f64::from(security);
                security_n += 1;
            }
            *stats.by_length.entry(item.length()).or_default() += 1;
        }

        stats.invalid_count = stats.total_generated - stats.valid_count;
        stats.duplicate_count = stats.valid_count - stats.unique_count;
        stats.average_entropy = mean(entropy_sum, entropy_n);
        stats.average_quality = mean(quality_sum, quality_n);
        stats.average_security = mean(security_sum, security_n);
        stats.collision_rate = mean(stats.duplicate_count as f64, stats.total_generated);
        stats
    }
}
