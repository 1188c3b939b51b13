use super::Source;
use crate::{Error, Identifier, Result};
use chrono::SecondsFormat;
use core::fmt::Write;

const CDATA_END: &str = "]]>";

/// Wraps `text` in CDATA, splitting any embedded `]]>` across two sections.
fn cdata(text: &str) -> String {
    format!(
        "<![CDATA[{}]]>",
        text.replace(CDATA_END, "]]]]><![CDATA[>")
    )
}

fn element(out: &mut String, depth: usize, name: &str, text: &str) -> core::fmt::Result {
    writeln!(out, "{:indent$}<{name}>{}</{name}>", "", cdata(text), indent = depth * 2)
}

fn write_item(out: &mut String, item: &Identifier) -> core::fmt::Result {
    writeln!(out, "  <identifier index=\"{}\">", item.index)?;
    element(out, 2, "id", &item.id.to_string())?;
    element(out, 2, "value", &item.value)?;
    element(out, 2, "kind", item.kind.as_str())?;
    if let Some(version) = item.version {
        element(out, 2, "version", &version.to_string())?;
    }
    element(
        out,
        2,
        "timestamp",
        &item.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
    )?;
    element(out, 2, "isValid", &item.is_valid.to_string())?;
    if let Some(error) = &item.error {
        element(out, 2, "error", error)?;
    }

    if let Some(meta) = &item.metadata {
        writeln!(out, "    <metadata>")?;
        element(out, 3, "length", &meta.length.to_string())?;
        element(out, 3, "format", meta.format.as_str())?;
        element(out, 3, "entropyBits", &format!("{:.2}", meta.entropy_bits))?;
        element(out, 3, "securityLevel", meta.security_level.as_str())?;
        element(
            out,
            3,
            "collisionProbability",
            &format!("{:e}", meta.collision_probability),
        )?;
        writeln!(out, "    </metadata>")?;
    }

    if let Some(analysis) = &item.analysis {
        writeln!(out, "    <analysis>")?;
        element(
            out,
            3,
            "securityScore",
            &analysis.security.security_score.to_string(),
        )?;
        element(
            out,
            3,
            "qualityScore",
            &format!("{:.1}", analysis.quality.overall_score),
        )?;
        for recommendation in &analysis.recommendations {
            element(out, 3, "recommendation", recommendation)?;
        }
        for warning in &analysis.warnings {
            element(out, 3, "warning", warning)?;
        }
        writeln!(out, "    </analysis>")?;
    }

    writeln!(out, "  </identifier>")
}

fn write_document(out: &mut String, source: &Source<'_>) -> core::fmt::Result {
    writeln!(out, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
    match source.job {
        Some(job) => writeln!(
            out,
            "<identifiers job=\"{}\" status=\"{}\" count=\"{}\">",
            job.id,
            job.status,
            source.items.len()
        )?,
        None => writeln!(out, "<identifiers count=\"{}\">", source.items.len())?,
    }
    for item in &source.items {
        write_item(out, item)?;
    }
    writeln!(out, "</identifiers>")
}

pub(super) fn render(source: &Source<'_>) -> Result<String> {
    let mut out = String::new();
    write_document(&mut out, source).map_err(Error::export)?;
    Ok(out)
}
