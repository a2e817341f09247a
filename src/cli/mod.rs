//! # CLI Module
//!
//! Command-line interface for the forensic scoring pipeline.
//!
//! ## Usage
//! ```bash
//! # Analyze a document image
//! doc-forensics analyze invoice.jpg
//!
//! # Custom tunables
//! doc-forensics analyze invoice.jpg --ela-quality 70 --block-size 8
//!
//! # JSON output for scripting
//! doc-forensics analyze invoice.jpg --output json
//!
//! # Write the ELA image and tamper heatmap next to the report
//! doc-forensics analyze invoice.jpg --artifacts ./out
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use document_forensics::core::pipeline::RiskBand;
use document_forensics::error::{ArtifactError, ForensicError, Result};
use document_forensics::events::{AnalyzerEvent, Event, EventChannel, PipelineEvent};
use document_forensics::{ForensicPipeline, ForensicReport};
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

/// Document Forensics - score document images for tampering evidence
#[derive(Parser, Debug)]
#[command(name = "doc-forensics")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a document image and print its forensic report
    Analyze {
        /// Image file to analyze
        path: PathBuf,

        /// JPEG quality for the ELA re-encode pass (1-100)
        #[arg(long, default_value = "85")]
        ela_quality: u8,

        /// Copy-move block size in pixels
        #[arg(long, default_value = "16")]
        block_size: u32,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Directory to write the ELA image and tamper heatmap into
        #[arg(long)]
        artifacts: Option<PathBuf>,

        /// Stream per-analyzer progress to stderr
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            ela_quality,
            block_size,
            output,
            artifacts,
            verbose,
        } => run_analyze(path, ela_quality, block_size, output, artifacts, verbose),
    }
}

fn run_analyze(
    path: PathBuf,
    ela_quality: u8,
    block_size: u32,
    output: OutputFormat,
    artifacts: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    let bytes = fs::read(&path).map_err(|source| ForensicError::Io {
        path: path.clone(),
        source,
    })?;

    let pipeline = ForensicPipeline::builder()
        .ela_quality(ela_quality)
        .block_size(block_size)
        .build()?;

    let (sender, receiver) = EventChannel::new();
    let listener = verbose.then(|| {
        thread::spawn(move || {
            for event in receiver.iter() {
                match event {
                    Event::Pipeline(PipelineEvent::Decoded { width, height }) => {
                        eprintln!("decoded {}x{}", width, height);
                    }
                    Event::Analyzer(AnalyzerEvent::Completed { kind, contribution }) => {
                        eprintln!("{} done ({})", kind, contribution);
                    }
                    _ => {}
                }
            }
        })
    });

    let report = pipeline.run_with_events(&bytes, &sender);
    drop(sender);
    if let Some(handle) = listener {
        let _ = handle.join();
    }
    let report = report?;

    if let Some(dir) = &artifacts {
        write_artifacts(&report, dir)?;
    }

    match output {
        OutputFormat::Pretty => print_pretty(&path, &report),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .expect("report serialization cannot fail");
            println!("{}", json);
        }
    }

    Ok(())
}

fn print_pretty(path: &Path, report: &ForensicReport) {
    let score = match report.risk_band() {
        RiskBand::Low => style(report.fraud_score).green().bold(),
        RiskBand::Elevated => style(report.fraud_score).yellow().bold(),
        RiskBand::High => style(report.fraud_score).red().bold(),
    };

    println!();
    println!("  {}", style(path.display()).bold());
    println!(
        "  Fraud score: {}/100 ({} risk)",
        score,
        report.risk_band()
    );
    println!();

    println!(
        "  Metadata    penalty {:>3}  {}",
        report.metadata.penalty,
        if report.metadata.valid {
            "no issues".to_string()
        } else {
            report.metadata.issues.join("; ")
        }
    );
    println!(
        "  Noise       penalty {:>3}  {} (variance {:.1})",
        report.noise.penalty, report.noise.issue, report.noise.variance
    );
    println!("  ELA         score   {:>3}", report.ela_score);
    println!(
        "  Tamper      score   {:>3}  copy-move {} px, splice {} px, ratio {:.3}",
        report.tamper_score,
        report.tamper_details.copy_move_pixels,
        report.tamper_details.splice_pixels,
        report.tamper_details.tamper_ratio
    );
    println!();
    println!(
        "  Analyzed in {}",
        style(format!("{}ms", report.duration_ms)).dim()
    );
}

fn write_artifacts(report: &ForensicReport, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| {
        ForensicError::Artifact(ArtifactError::WriteFailed {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })
    })?;

    if let Some(ela) = &report.ela_image {
        save_png(ela, &dir.join("ela.png"))?;
    }
    if let Some(heatmap) = &report.tamper_heatmap {
        save_png(heatmap, &dir.join("tamper_heatmap.png"))?;
    }

    Ok(())
}

fn save_png(image: &image::RgbImage, path: &Path) -> Result<()> {
    image.save(path).map_err(|e| {
        ForensicError::Artifact(ArtifactError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    })
}
