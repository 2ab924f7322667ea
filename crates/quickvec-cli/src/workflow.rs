//! The quickstart workflow
//!
//! create collection -> read schema -> fetch dataset -> decode -> transform
//! -> batch write. Each step runs to completion before the next starts, and
//! the first unrecoverable error ends the run.

use crate::config::Config;
use crate::decode::{self, Record};
use crate::error::Result;
use crate::fetch::{Fetcher, LocalResource};
use crate::progress;
use crate::store::{CollectionStatus, SchemaSnapshot, StoreClient};
use crate::transform::Transformer;
use colored::Colorize;
use std::io::Write;
use tracing::{info, info_span, Instrument};

/// What a completed run did
#[derive(Debug, Clone)]
pub struct WorkflowReport {
    pub collection: CollectionStatus,
    pub schema: SchemaSnapshot,
    pub dataset: LocalResource,
    pub records: Vec<Record>,
    pub written: usize,
}

/// Run the workflow, printing the schema and records to stdout
pub async fn run(config: &Config) -> Result<WorkflowReport> {
    // Locked per write, not for the whole run
    run_with_output(config, &mut std::io::stdout()).await
}

/// Run the workflow, printing the schema and records to `out`
pub async fn run_with_output<W: Write>(config: &Config, out: &mut W) -> Result<WorkflowReport> {
    config.validate()?;

    let store = StoreClient::from_config(config)?;
    let fetcher = Fetcher::from_config(config)?;
    let transformer = Transformer::from_config(config);

    let collection = store
        .ensure_collection(&config.class_name, &config.vectorizer)
        .instrument(info_span!("ensure_collection", class = %config.class_name))
        .await?;
    writeln!(out, "{} Collection '{}' {}", "✓".green(), config.class_name, collection)?;

    let schema = store.fetch_schema().await?;
    writeln!(out, "{}", "schema".bold())?;
    writeln!(out, "{}", schema)?;

    let dataset = fetcher
        .ensure(&config.dataset_url, &config.cache_path)
        .instrument(info_span!("fetch", url = %config.dataset_url))
        .await?;
    let origin = if dataset.from_cache() { "cached" } else { "downloaded" };
    writeln!(
        out,
        "{} Dataset {} ({}, {})",
        "✓".green(),
        dataset.path().display(),
        origin,
        progress::format_bytes(dataset.size())
    )?;

    let records = decode::decode(&dataset)?;
    writeln!(out, "{}", "items".bold())?;
    for record in &records {
        writeln!(out, "{}", record)?;
    }

    let objects = transformer.apply_all(&records)?;

    let spinner = progress::create_spinner(&format!("Writing {} objects", objects.len()));
    let written = store
        .ingest_all(&objects, config.batch_size)
        .instrument(info_span!("ingest", count = objects.len()))
        .await;
    spinner.finish_and_clear();
    let written = written?;

    writeln!(
        out,
        "{} Wrote {} objects to '{}'",
        "✓".green(),
        written,
        config.class_name
    )?;
    info!(written, class = %config.class_name, "Workflow complete");

    Ok(WorkflowReport {
        collection,
        schema,
        dataset,
        records,
        written,
    })
}
