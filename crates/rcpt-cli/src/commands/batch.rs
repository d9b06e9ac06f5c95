//! Batch processing command for multiple receipt files.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::error;

use rcpt_core::ledger::{self, LedgerStats, SortKey};
use rcpt_core::{
    BatchReport, DocumentLoader, DocumentOutcome, RcptError, ReceiptPipeline, SourceKind,
    ValidatedRecord,
};

use super::OutputFormat;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Stop at the first document that cannot be processed
    #[arg(long)]
    fail_fast: bool,

    /// Only list accepted records whose vendor contains this text
    #[arg(long)]
    search: Option<String>,

    /// Order of accepted records
    #[arg(long, value_enum)]
    sort: Option<SortArg>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum SortArg {
    /// Largest amount first
    Amount,
    /// Most recent first
    Date,
    /// Alphabetical by vendor
    Vendor,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Amount => SortKey::Amount,
            SortArg::Date => SortKey::Date,
            SortArg::Vendor => SortKey::Vendor,
        }
    }
}

#[derive(Serialize)]
struct DocumentEntry<'a> {
    file: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    record: Option<&'a ValidatedRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct BatchSummary<'a> {
    documents: Vec<DocumentEntry<'a>>,
    records: &'a [ValidatedRecord],
    statistics: LedgerStats,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::config::load(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| SourceKind::from_path(p).is_some())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let loader = DocumentLoader::new();
    let pipeline = ReceiptPipeline::from_config(&config);
    let mut outcomes = Vec::with_capacity(files.len());

    for path in &files {
        let outcome = pipeline.process_path(&loader, path);

        if args.fail_fast {
            if let Err(e) = &outcome.result {
                progress.abandon();
                error!("Failed to process {}: {}", path.display(), e);
                anyhow::bail!("Processing failed for {}: {}", outcome.name, e);
            }
        }

        outcomes.push(outcome);
        progress.inc(1);
    }

    progress.finish_and_clear();

    let report = BatchReport {
        outcomes,
        processing_time_ms: start.elapsed().as_millis() as u64,
    };

    let mut records = report.records();
    if let Some(query) = &args.search {
        records = ledger::search(&records, query).into_iter().cloned().collect();
    }
    if let Some(sort) = args.sort {
        ledger::sort(&mut records, sort.into());
    }
    let statistics = ledger::statistics(&records);

    match args.format {
        OutputFormat::Json => {
            let summary = BatchSummary {
                documents: report.outcomes.iter().map(document_entry).collect(),
                records: &records,
                statistics,
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Text => print_text(&report, &records, &statistics),
    }

    Ok(())
}

fn document_entry(outcome: &DocumentOutcome) -> DocumentEntry<'_> {
    match &outcome.result {
        Ok(record) => DocumentEntry {
            file: &outcome.name,
            status: "accepted",
            record: Some(record),
            field: None,
            error: None,
        },
        Err(e) => DocumentEntry {
            file: &outcome.name,
            status: "rejected",
            record: None,
            field: rejected_field(e),
            error: Some(e.to_string()),
        },
    }
}

fn rejected_field(error: &RcptError) -> Option<&'static str> {
    match error {
        RcptError::Validation(e) => Some(e.field()),
        _ => None,
    }
}

fn print_text(report: &BatchReport, records: &[ValidatedRecord], stats: &LedgerStats) {
    println!(
        "{} Processed {} files in {}ms",
        style("✓").green(),
        report.outcomes.len(),
        report.processing_time_ms
    );
    println!(
        "   {} accepted, {} rejected",
        style(report.accepted_count()).green(),
        style(report.rejected_count()).red()
    );

    if !records.is_empty() {
        println!();
        println!("{:<24} {:<12} {:>12}  {}", "Vendor", "Date", "Amount", "Category");
        for record in records {
            println!(
                "{:<24} {:<12} {:>12.2}  {}",
                record.vendor(),
                record.date(),
                record.amount(),
                record.category()
            );
        }

        println!();
        println!("Total spend:   ₹{:.2}", stats.total);
        println!("Average spend: ₹{:.2}", stats.mean);
        println!(
            "Top vendor:    {}",
            stats.top_vendor.as_deref().unwrap_or("N/A")
        );
    }

    if report.rejected_count() > 0 {
        println!();
        println!("{}", style("Could not be processed:").red());
        for outcome in report.rejected() {
            if let Some(e) = outcome.error() {
                println!("  - {}: {}", outcome.name, e);
            }
        }
    }
}
