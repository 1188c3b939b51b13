use crate::{Error, Identifier, Result};
use chrono::SecondsFormat;
use csv::{QuoteStyle, WriterBuilder};
use std::sync::Arc;

const HEADER: [&str; 11] = [
    "index",
    "value",
    "kind",
    "version",
    "isValid",
    "length",
    "securityLevel",
    "qualityScore",
    "securityScore",
    "entropy",
    "timestamp",
];

fn row(item: &Identifier) -> [String; 11] {
    let opt = |value: Option<String>| value.unwrap_or_default();
    [
        item.index.to_string(),
        item.value.clone(),
        item.kind.to_string(),
        opt(item.version.map(|v| v.to_string())),
        item.is_valid.to_string(),
        item.length().to_string(),
        opt(item
            .metadata
            .as_ref()
            .map(|m| m.security_level.to_string())),
        opt(item.quality_score().map(|q| format!("{q:.1}"))),
        opt(item.security_score().map(|s| s.to_string())),
        opt(item.entropy_bits().map(|e| format!("{e:.2}"))),
        item.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
    ]
}

/// One header row, then one row per item. Every field is quoted and
/// embedded quotes are doubled.
pub(super) fn render(items: &[Arc<Identifier>]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for item in items {
        writer.write_record(row(item))?;
    }
    let bytes = writer.into_inner().map_err(Error::export)?;
    String::from_utf8(bytes).map_err(Error::export)
}
