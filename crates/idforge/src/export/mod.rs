//! Serialises a batch into one string payload.
//!
//! Nothing here touches the file system. Callers hand the payload to whatever
//! sink they use (a file, stdout, a download) along with its MIME type and
//! suggested filename.

mod markup;
mod report;
mod structured;
mod tabular;

use crate::{
    ExportFormat, FilterCriteria, Identifier, IdentifierJob, Result, SortOrder, Statistics, select,
};
use core::time::Duration;
use serde::Serialize;
use std::sync::Arc;

impl ExportFormat {
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv",
            Self::Xml => "application/xml",
            Self::Text => "text/plain",
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Xml => "xml",
            Self::Text => "txt",
        }
    }
}

/// A serialised batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub content: String,
    pub mime_type: &'static str,
    pub filename: String,
}

/// The parts of a job every format reports on.
struct Source<'a> {
    job: Option<&'a IdentifierJob>,
    items: Vec<Arc<Identifier>>,
    statistics: Statistics,
}

fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        "identifiers".to_string()
    } else {
        trimmed.to_string()
    }
}

fn render(source: &Source<'_>, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => structured::render(source),
        ExportFormat::Csv => tabular::render(&source.items),
        ExportFormat::Xml => markup::render(source),
        ExportFormat::Text => report::render(source),
    }
}

/// Exports a job after applying its own filter and sort settings.
///
/// The statistics block always describes the whole job, not the selection.
///
/// # Errors
///
/// Returns [`crate::Error::Export`] if serialisation fails.
pub fn export_job(job: &IdentifierJob, format: ExportFormat) -> Result<ExportPayload> {
    let items = select(&job.items, &job.settings.filter, job.settings.sort);
    let statistics = job
        .statistics
        .clone()
        .unwrap_or_else(|| Statistics::compute(&job.items, Duration::ZERO, true));
    let source = Source {
        job: Some(job),
        items,
        statistics,
    };

    let id = job.id.simple().to_string();
    Ok(ExportPayload {
        content: render(&source, format)?,
        mime_type: format.mime_type(),
        filename: format!("{}-{}.{}", slug(&job.name), &id[..8], format.extension()),
    })
}

/// Exports a bare item list, filtered and sorted as requested.
///
/// # Errors
///
/// Returns [`crate::Error::Export`] if serialisation fails.
pub fn export_items(
    items: &[Arc<Identifier>],
    criteria: &FilterCriteria,
    order: SortOrder,
    format: ExportFormat,
) -> Result<ExportPayload> {
    let items = select(items, criteria, order);
    let statistics = Statistics::compute(&items, Duration::ZERO, true);
    let source = Source {
        job: None,
        items,
        statistics,
    };
    Ok(ExportPayload {
        content: render(&source, format)?,
        mime_type: format.mime_type(),
        filename: format!("identifiers.{}", format.extension()),
    })
}
