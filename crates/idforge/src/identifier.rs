use crate::{Analysis, IdKind, Metadata};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// One generated item. Built once by the batch worker and never mutated.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    pub id: Uuid,
    /// The formatted value. Empty when generation failed.
    pub value: String,
    pub kind: IdKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u8>,
    pub timestamp: DateTime<Utc>,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Analysis>,
    /// Zero-based position in the requested sequence.
    pub index: usize,
}

impl Identifier {
    /// Derives the item id from the owning job's id and the item index, so the
    /// same position in the same job always has the same id.
    pub fn item_id(job_id: &Uuid, index: usize) -> Uuid {
        Uuid::new_v5(job_id, &(index as u64).to_be_bytes())
    }

    /// A record for an item whose generation failed.
    pub fn failed(
        job_id: &Uuid,
        index: usize,
        kind: IdKind,
        timestamp: DateTime<Utc>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            id: Self::item_id(job_id, index),
            value: String::new(),
            kind,
            version: kind.version(),
            timestamp,
            is_valid: false,
            error: Some(error.into()),
            metadata: None,
            analysis: None,
            index,
        }
    }

    /// Overall quality score, when analysis was collected.
    pub fn quality_score(&self) -> Option<f64> {
        self.analysis.as_ref().map(|a| a.quality.overall_score)
    }

    /// Security score, when analysis was collected.
    pub fn security_score(&self) -> Option<u32> {
        self.analysis.as_ref().map(|a| a.security.security_score)
    }

    /// Entropy estimate from metadata, or from the analysis heuristic when
    /// metadata was not collected.
    pub fn entropy_bits(&self) -> Option<f64> {
        self.metadata
            .as_ref()
            .map(|m| m.entropy_bits)
            .or_else(|| {
                self.analysis
                    .as_ref()
                    .map(|a| f64::from(a.security.entropy_bits))
            })
    }

    /// Length of the formatted value in characters.
    pub fn length(&self) -> usize {
        self.value.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_ids_are_stable_per_position() {
        let job = Uuid::from_u128(7);
        assert_eq!(Identifier::item_id(&job, 3), Identifier::item_id(&job, 3));
        assert_ne!(Identifier::item_id(&job, 3), Identifier::item_id(&job, 4));
    }

    #[test]
    fn failed_item_is_empty_and_invalid() {
        let item = Identifier::failed(
            &Uuid::nil(),
            2,
            IdKind::UuidV5,
            DateTime::<Utc>::UNIX_EPOCH,
            "boom",
        );
        assert!(!item.is_valid);
        assert!(item.value.is_empty());
        assert_eq!(item.version, Some(5));
        assert_eq!(item.error.as_deref(), Some("boom"));
        assert_eq!(item.quality_score(), None);
        assert_eq!(item.entropy_bits(), None);
    }

    #[test]
    fn serializes_camel_case_without_absent_blocks() {
        let item = Identifier::failed(
            &Uuid::nil(),
            0,
            IdKind::NanoId,
            DateTime::<Utc>::UNIX_EPOCH,
            "boom",
        );
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["isValid"], false);
        assert_eq!(json["kind"], "nanoid");
        assert!(json.get("metadata").is_none());
        assert!(json.get("version").is_none());
    }
}
