//! Process command - extract a record from a single receipt file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use rust_decimal::Decimal;
use tracing::{debug, info};

use rcpt_core::{CandidateFields, DocumentLoader, ReceiptPipeline, ValidatedRecord};

use super::OutputFormat;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (txt, pdf, jpg, png)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Use this vendor instead of the detected one
    #[arg(long)]
    vendor: Option<String>,

    /// Use this date (DD-MM-YYYY or DD/MM/YYYY) instead of the detected one
    #[arg(long)]
    date: Option<String>,

    /// Use this amount instead of the detected one
    #[arg(long)]
    amount: Option<Decimal>,

    /// Use this category instead of the detected one
    #[arg(long)]
    category: Option<String>,

    /// Print the extracted fields before validation
    #[arg(long)]
    show_candidate: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::config::load(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let document = DocumentLoader::new().load(&args.input)?;
    let pipeline = ReceiptPipeline::from_config(&config);

    let candidate = apply_overrides(pipeline.extract(&document.text), &args);

    if args.show_candidate {
        eprintln!("{} Extracted fields:", style("ℹ").blue());
        eprintln!("{}", serde_json::to_string_pretty(&candidate)?);
    }

    let record = match pipeline.validator().validate(candidate) {
        Ok(record) => record,
        Err(e) => {
            eprintln!(
                "{} {} could not be processed: {}",
                style("✗").red(),
                document.name,
                e
            );
            eprintln!(
                "  Correct the {} with --{} and try again.",
                e.field(),
                e.field()
            );
            anyhow::bail!("Validation failed for {}", e.field());
        }
    };

    let output = format_record(&record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn apply_overrides(mut candidate: CandidateFields, args: &ProcessArgs) -> CandidateFields {
    if let Some(vendor) = &args.vendor {
        candidate = candidate.with_vendor(vendor.as_str());
    }
    if let Some(date) = &args.date {
        candidate = candidate.with_date(date.as_str());
    }
    if let Some(amount) = args.amount {
        candidate = candidate.with_amount(amount);
    }
    if let Some(category) = &args.category {
        candidate = candidate.with_category(category.as_str());
    }
    candidate
}

fn format_record(record: &ValidatedRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Text => Ok(format_record_text(record)),
    }
}

fn format_record_text(record: &ValidatedRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Vendor:   {}\n", record.vendor()));
    output.push_str(&format!("Date:     {}\n", record.date()));
    output.push_str(&format!("Amount:   ₹{:.2}\n", record.amount()));
    output.push_str(&format!("Category: {}", record.category()));

    output
}
