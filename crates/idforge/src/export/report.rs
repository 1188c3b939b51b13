use super::Source;
use crate::{Error, Result, quality_bucket_label};
use chrono::SecondsFormat;
use core::fmt::{Display, Write};
use std::collections::BTreeMap;

fn histogram<K: Display>(
    out: &mut String,
    title: &str,
    buckets: &BTreeMap<K, usize>,
    label: impl Fn(&K) -> String,
) -> core::fmt::Result {
    writeln!(out, "{title}")?;
    let total: usize = buckets.values().sum();
    if total == 0 {
        return writeln!(out, "  (none)");
    }
    for (key, count) in buckets {
        let pct = *count as f64 / total as f64 * 100.0;
        writeln!(out, "  {}: {count} ({pct:.1}%)", label(key))?;
    }
    Ok(())
}

fn write_report(out: &mut String, source: &Source<'_>) -> core::fmt::Result {
    writeln!(out, "Identifier batch report")?;
    writeln!(out, "=======================")?;
    if let Some(job) = source.job {
        writeln!(out, "Job:        {} ({})", job.name, job.id)?;
        writeln!(out, "Kind:       {}", job.settings.kind)?;
        writeln!(out, "Format:     {}", job.settings.format)?;
        writeln!(out, "Status:     {}", job.status)?;
        writeln!(out, "Requested:  {}", job.count)?;
        writeln!(
            out,
            "Created:    {}",
            job.created_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        )?;
        if let Some(at) = job.completed_at {
            writeln!(
                out,
                "Finished:   {}",
                at.to_rfc3339_opts(SecondsFormat::Secs, true)
            )?;
        }
        if let Some(error) = &job.error {
            writeln!(out, "Error:      {error}")?;
        }
    }
    writeln!(out, "Exported:   {}", source.items.len())?;
    writeln!(out)?;

    let stats = &source.statistics;
    writeln!(out, "Statistics")?;
    writeln!(out, "----------")?;
    writeln!(
        out,
        "Generated: {}  Valid: {}  Invalid: {}  Unique: {}  Duplicates: {}",
        stats.total_generated,
        stats.valid_count,
        stats.invalid_count,
        stats.unique_count,
        stats.duplicate_count
    )?;
    writeln!(out, "Collision rate: {:.4}%", stats.collision_rate * 100.0)?;
    writeln!(
        out,
        "Average entropy: {:.1} bits  quality: {:.1}  security: {:.1}",
        stats.average_entropy, stats.average_quality, stats.average_security
    )?;
    writeln!(out, "Generation time: {} ms", stats.generation_time_ms)?;
    writeln!(out)?;

    histogram(out, "Security levels", &stats.by_security_level, |k| {
        k.to_string()
    })?;
    histogram(out, "Quality", &stats.by_quality_bucket, |k| {
        quality_bucket_label(*k)
    })?;
    histogram(out, "Lengths", &stats.by_length, |k| k.to_string())?;
    writeln!(out)?;

    writeln!(out, "Identifiers")?;
    writeln!(out, "-----------")?;
    for item in &source.items {
        write!(out, "[{}] ", item.index)?;
        if item.is_valid {
            write!(out, "{}", item.value)?;
        } else {
            write!(
                out,
                "{} INVALID: {}",
                item.value,
                item.error.as_deref().unwrap_or("unknown error")
            )?;
        }
        if let (Some(quality), Some(security)) = (item.quality_score(), item.security_score()) {
            write!(out, "  (quality {quality:.1}, security {security})")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub(super) fn render(source: &Source<'_>) -> Result<String> {
    let mut out = String::new();
    write_report(&mut out, source).map_err(Error::export)?;
    Ok(out)
}
