//! Extract command - recover licence fields from a single OCR output file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use licr_core::models::config::LicrConfig;
use licr_core::{ExtractionResult, LicenceParser, LicenceRecord, OcrResult};

use super::config::default_config_path;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PaddleOCR JSON, or plain text with one OCR line per line)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// List fields that could not be extracted
    #[arg(long)]
    show_warnings: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for written outputs.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let parser = LicenceParser::from_config(&config.extraction);
    let result = extract_file(&args.input, &parser)?;

    let output = format_record(&result.record, args.format, config.output.pretty)?;

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

    if args.show_warnings && !result.warnings.is_empty() {
        eprintln!("{}", style("Extraction warnings:").yellow());
        for warning in &result.warnings {
            eprintln!("  - {}", warning);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Load the config given on the command line, else the default file, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<LicrConfig> {
    if let Some(path) = config_path {
        return Ok(LicrConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(LicrConfig::from_file(&default_path)?)
    } else {
        Ok(LicrConfig::default())
    }
}

/// Load OCR output from `path` and run the extraction pipeline on it.
pub fn extract_file(path: &Path, parser: &LicenceParser) -> anyhow::Result<ExtractionResult> {
    let ocr = OcrResult::from_path(path)?;
    debug!("Loaded {} OCR lines from {}", ocr.boxes.len(), path.display());
    Ok(parser.parse_ocr(&ocr))
}

pub fn format_record(
    record: &LicenceRecord,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Json => Ok(serde_json::to_string(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_csv(record: &LicenceRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(LicenceRecord::FIELD_NAMES)?;
    wtr.write_record(record.to_row())?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &LicenceRecord) -> String {
    let opt = |v: &Option<String>| v.as_deref().unwrap_or("-").to_string();
    let text = |v: &str| if v.is_empty() { "-".to_string() } else { v.to_string() };

    let fields = [
        ("Name", text(&record.name)),
        ("Licence number", text(&record.id)),
        ("Licence type", text(&record.license_type)),
        ("Date of birth", opt(&record.dob)),
        ("Issue date", opt(&record.issue_date)),
        ("Expiry date", opt(&record.expiry_date)),
        ("Gender", text(&record.gender)),
        ("Height", text(&record.height)),
        ("Eye colour", text(&record.eyes_color)),
        ("Issuing state", opt(&record.issuing_state)),
        ("Postcode", opt(&record.post_code)),
    ];

    let mut output = String::new();
    for (label, value) in fields {
        output.push_str(&format!("{:<15} {}\n", format!("{}:", label), value));
    }

    output.push_str("\nAddress:\n");
    if record.address.is_empty() {
        output.push_str("  -\n");
    } else {
        for line in record.address.lines() {
            output.push_str(&format!("  {}\n", line));
        }
    }

    output
}
