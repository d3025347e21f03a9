use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use common::{config::Config, logger};
use exporter::{ExportFormat, ExportManager, RecordParser, SummaryStatistics};
use std::fs::{self, create_dir_all};
use std::path::{Path, PathBuf};

#[derive(ClapParser, Debug)]
#[command(version, about = "Export graded assignments to CSV, Excel and PDF")]
struct Args {
    /// JSON file holding an array of graded assignment records
    input: PathBuf,
    /// Formats to write: csv, excel or pdf. Repeat for several; defaults to all three
    #[arg(long = "format", short = 'f')]
    formats: Vec<ExportFormat>,
    /// Output directory. Defaults to EXPORT_DIR from the environment
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// File name (without extension) of the written documents
    #[arg(long, default_value = "grading_results")]
    stem: String,
    /// Path of the .env file to load
    #[arg(long, default_value = ".env")]
    env_file: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::init(&args.env_file);

    if let Err(e) = logger::init_logger(&config.log_level, &config.log_file) {
        eprintln!("Logging to {} disabled: {e}", config.log_file);
    }

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("Cannot read {}", args.input.display()))?;
    let records = RecordParser
        .parse_str(&raw)
        .with_context(|| format!("Invalid records in {}", args.input.display()))?;

    let stats = SummaryStatistics::from_records(&records);
    log::info!(
        "{}: loaded {} records from {} ({} successful, average {})",
        config.project_name,
        stats.total,
        args.input.display(),
        stats.success_ratio_label(),
        stats.average_label()
    );

    let out_dir = args
        .out_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.export_dir));
    create_dir_all(&out_dir)
        .with_context(|| format!("Cannot create output directory {}", out_dir.display()))?;

    let formats = if args.formats.is_empty() {
        ExportFormat::ALL.to_vec()
    } else {
        args.formats.clone()
    };

    let manager = ExportManager::default();
    for format in formats {
        let bytes = manager
            .export(format, &records)
            .with_context(|| format!("Failed to export {format}"))?;
        let path = write_document(&out_dir, &args.stem, format, &bytes)?;
        log::info!("Wrote {} ({}, {} bytes)", path.display(), format.mime_type(), bytes.len());
    }

    Ok(())
}

fn write_document(dir: &Path, stem: &str, format: ExportFormat, bytes: &[u8]) -> Result<PathBuf> {
    let path = dir.join(format!("{stem}.{}", format.extension()));
    fs::write(&path, bytes).with_context(|| format!("Cannot write {}", path.display()))?;
    Ok(path)
}
