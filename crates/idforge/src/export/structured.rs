use super::Source;
use crate::{IdKind, Identifier, JobStatus, Result, Statistics};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JobSummary<'a> {
    id: Uuid,
    name: &'a str,
    kind: IdKind,
    requested: usize,
    exported: usize,
    status: JobStatus,
    progress: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed_at: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Document<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    job: Option<JobSummary<'a>>,
    statistics: &'a Statistics,
    identifiers: &'a [Arc<Identifier>],
}

pub(super) fn render(source: &Source<'_>) -> Result<String> {
    let job = source.job.map(|job| JobSummary {
        id: job.id,
        name: &job.name,
        kind: job.settings.kind,
        requested: job.count,
        exported: source.items.len(),
        status: job.status,
        progress: job.progress,
        error: job.error.as_deref(),
        created_at: job.created_at,
        completed_at: job.completed_at,
    });
    let document = Document {
        job,
        statistics: &source.statistics,
        identifiers: &source.items,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}
