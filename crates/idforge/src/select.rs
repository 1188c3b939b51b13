use crate::{FilterCriteria, Identifier, SortOrder};
use std::{cmp::Ordering, sync::Arc};

/// Returns `true` if `item` passes every criterion.
///
/// Score thresholds need the analysis block: an item generated without
/// analysis fails any threshold that is set.
pub fn passes_filter(item: &Identifier, criteria: &FilterCriteria) -> bool {
    if criteria.valid_only && !item.is_valid {
        return false;
    }
    if !criteria.kinds.is_empty() && !criteria.kinds.contains(&item.kind) {
        return false;
    }
    if let Some(min) = criteria.min_quality {
        if item.quality_score().is_none_or(|score| score < min) {
            return false;
        }
    }
    if let Some(min) = criteria.min_security {
        if item.security_score().is_none_or(|score| score < min) {
            return false;
        }
    }
    true
}

fn compare(a: &Identifier, b: &Identifier, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Generated => a.index.cmp(&b.index),
        SortOrder::ValueAsc => a.value.cmp(&b.value),
        SortOrder::ValueDesc => b.value.cmp(&a.value),
        // Items without analysis sort last.
        SortOrder::QualityDesc => {
            let score = |i: &Identifier| i.quality_score().unwrap_or(f64::NEG_INFINITY);
            score(b).total_cmp(&score(a))
        }
        SortOrder::SecurityDesc => b
            .security_score()
            .map(i64::from)
            .unwrap_or(-1)
            .cmp(&a.security_score().map(i64::from).unwrap_or(-1)),
        SortOrder::LengthAsc => a.length().cmp(&b.length()),
    }
}

/// Filters then sorts `items` into a new sequence. The sort is stable, so
/// ties keep generation order.
pub fn select(
    items: &[Arc<Identifier>],
    criteria: &FilterCriteria,
    order: SortOrder,
) -> Vec<Arc<Identifier>> {
    let mut selected: Vec<_> = items
        .iter()
        .filter(|item| passes_filter(item, criteria))
        .cloned()
        .collect();
    selected.sort_by(|a, b| compare(a, b, order));
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GenerationSettings, IdKind, IdentifierWorker};
    use uuid::Uuid;

    fn items(kind: IdKind, values: &[&str]) -> Vec<Arc<Identifier>> {
        let worker = IdentifierWorker::new(Uuid::nil(), Arc::new(GenerationSettings::new(kind, 1)));
        values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let mut item = worker.build(index);
                item.value = value.to_string();
                item.analysis = Some(crate::analyze(value, kind));
                Arc::new(item)
            })
            .collect()
    }

    #[test]
    fn empty_criteria_keeps_generation_order() {
        let all = items(IdKind::ShortId, &["b", "a", "c"]);
        let out = select(&all, &FilterCriteria::default(), SortOrder::Generated);
        assert_eq!(out.len(), 3);
        assert!(out.iter().zip(&all).all(|(a, b)| Arc::ptr_eq(a, b)));
    }

    #[test]
    fn value_and_length_orders() {
        let all = items(IdKind::ShortId, &["bb", "a", "ccc"]);
        let values = |order| {
            select(&all, &FilterCriteria::default(), order)
                .iter()
                .map(|i| i.value.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(values(SortOrder::ValueAsc), ["a", "bb", "ccc"]);
        assert_eq!(values(SortOrder::ValueDesc), ["ccc", "bb", "a"]);
        assert_eq!(values(SortOrder::LengthAsc), ["a", "bb", "ccc"]);
    }

    #[test]
    fn quality_threshold_drops_weak_values() {
        let all = items(IdKind::ShortId, &["aaaa", "0193abcd-ef01-4a2b-8c3d-0123456789ab"]);
        let criteria = FilterCriteria {
            min_quality: Some(80.0),
            ..FilterCriteria::default()
        };
        let out = select(&all, &criteria, SortOrder::QualityDesc);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].index, 1);
    }

    #[test]
    fn thresholds_reject_items_without_analysis() {
        let mut item = (*items(IdKind::UuidV4, &["x"])[0]).clone();
        item.analysis = None;
        let criteria = FilterCriteria {
            min_security: Some(0),
            ..FilterCriteria::default()
        };
        assert!(!passes_filter(&item, &criteria));
        assert!(passes_filter(&item, &FilterCriteria::default()));
    }

    #[test]
    fn valid_only_and_kind_filters() {
        let mut all = items(IdKind::NanoId, &["abc", "def"]);
        let mut broken = (*all[1]).clone();
        broken.is_valid = false;
        all[1] = Arc::new(broken);

        let valid_only = FilterCriteria {
            valid_only: true,
            ..FilterCriteria::default()
        };
        assert_eq!(select(&all, &valid_only, SortOrder::Generated).len(), 1);

        let other_kind = FilterCriteria {
            kinds: vec![IdKind::Ulid],
            ..FilterCriteria::default()
        };
        assert!(select(&all, &other_kind, SortOrder::Generated).is_empty());
    }
}
