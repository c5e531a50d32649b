//! docrank CLI - PDF outlines and persona-driven section ranking

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docrank::collection::{self, CollectionProcessor};
use docrank::outline::batch::{output_path_for, pdf_files_in, process_directory_with};
use docrank::outline::OutlineOutcome;
use docrank::{
    CollectionOutput, CollectionRanker, ExtractOptions, JsonFormat, OutlineOptions, RankOptions,
};

#[derive(Parser)]
#[command(name = "docrank")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract PDF heading outlines and rank sections for a persona", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a heading outline JSON for every PDF in a directory
    Outline {
        /// Directory containing PDF files
        #[arg(value_name = "DIR", default_value = "./input", env = "DOCRANK_INPUT")]
        input: PathBuf,

        /// Directory receiving one JSON file per PDF
        #[arg(
            short,
            long,
            value_name = "DIR",
            default_value = "./output",
            env = "DOCRANK_OUTPUT"
        )]
        output: PathBuf,

        /// Skip documents with more pages than this (0 = no limit)
        #[arg(long, default_value = "50", env = "DOCRANK_MAX_PAGES")]
        max_pages: u32,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Rank the sections of one or more collection directories
    Collection {
        /// Collection directories
        #[arg(
            value_name = "DIR",
            default_values = ["Collection 1", "Collection 2", "Collection 3"]
        )]
        dirs: Vec<PathBuf>,

        /// Skip documents with more pages than this (0 = no limit)
        #[arg(long, default_value = "50", env = "DOCRANK_MAX_PAGES")]
        max_pages: u32,

        /// Number of sections to select per collection
        #[arg(long, default_value = "15")]
        top_k: usize,

        /// Process documents one at a time
        #[arg(long)]
        sequential: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print the outline of a single PDF
    Show {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Outline {
            input,
            output,
            max_pages,
            compact,
        }) => cmd_outline(&input, &output, max_pages, compact),
        Some(Commands::Collection {
            dirs,
            max_pages,
            top_k,
            sequential,
            compact,
        }) => cmd_collection(&dirs, max_pages, top_k, sequential, compact),
        Some(Commands::Show {
            input,
            output,
            compact,
        }) => cmd_show(&input, output.as_deref(), compact),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: docrank <outline|collection|show> ...".yellow());
            println!("       docrank --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn cmd_outline(
    input: &Path,
    output: &Path,
    max_pages: u32,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let files = pdf_files_in(input)?;

    if files.is_empty() {
        println!("{} {}", "No PDF files found in".yellow(), input.display());
        return Ok(());
    }

    let options = OutlineOptions::new()
        .with_extract_options(ExtractOptions::new().with_max_pages(max_pages))
        .with_format(json_format(compact));

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = process_directory_with(input, output, &options, |pdf, outcome| {
        let name = pdf.file_name().unwrap_or_default().to_string_lossy();
        pb.set_message(name.to_string());

        match outcome {
            OutlineOutcome::Extracted(_) => {
                pb.println(format!("{} {}", "Processed".green(), pdf.display()));
            }
            OutlineOutcome::Oversized { pages, limit } => {
                pb.println(format!(
                    "{} {}: {} pages (limit {})",
                    "Skipping".yellow(),
                    pdf.display(),
                    pages,
                    limit
                ));
            }
            OutlineOutcome::Failed(e) => {
                pb.println(format!(
                    "{} {}: {} (wrote empty outline to {})",
                    "Error processing".red(),
                    pdf.display(),
                    e,
                    output_path_for(pdf, output).display()
                ));
            }
        }
        pb.inc(1);
    })?;
    pb.finish_with_message("Done!");

    println!("\n{}", "Summary:".green().bold());
    println!("  {} extracted: {}", "├─".dimmed(), report.extracted.len());
    println!("  {} skipped:   {}", "├─".dimmed(), report.oversized.len());
    println!("  {} failed:    {}", "└─".dimmed(), report.failed.len());
    println!(
        "\n{}",
        format!("Completed in {:.2} seconds", start.elapsed().as_secs_f64()).green()
    );

    Ok(())
}

fn cmd_collection(
    dirs: &[PathBuf],
    max_pages: u32,
    top_k: usize,
    sequential: bool,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();

    let ranker = CollectionRanker::new().with_rank_options(RankOptions::new().with_top_k(top_k));
    let processor = CollectionProcessor::new(ranker)
        .with_extract_options(
            ExtractOptions::new()
                .with_max_pages(max_pages)
                .with_parallel(!sequential),
        )
        .with_format(json_format(compact));

    println!("{}", "Starting persona-driven document ranking".blue());
    println!("{}", "=".repeat(60).blue());

    for dir in dirs {
        if !collection::input_path(dir).is_file() {
            log::debug!("No {} in {}", collection::INPUT_FILE, dir.display());
            println!(
                "{}",
                format!("Skipping {}: no input JSON found", dir.display()).yellow()
            );
            continue;
        }

        println!("\n{} {}", "Processing collection:".blue(), dir.display());
        match processor.run(dir) {
            Ok(output) => {
                log::info!(
                    "Ranked {} sections from {} documents in {}",
                    output.metadata.total_sections_analyzed,
                    output.metadata.input_documents.len(),
                    dir.display()
                );
                println!(
                    "{} {}",
                    "Output saved to:".green(),
                    collection::output_path(dir).display()
                );
                print_summary(dir, &output);
            }
            Err(e) => {
                println!(
                    "{}",
                    format!("Error processing {}: {}", dir.display(), e).red()
                );
            }
        }
    }

    println!(
        "\n{}",
        format!(
            "Processing completed in {:.2} seconds",
            start.elapsed().as_secs_f64()
        )
        .green()
    );

    Ok(())
}

fn print_summary(dir: &Path, output: &CollectionOutput) {
    let meta = &output.metadata;
    let insights = &output.subsection_analysis.persona_insights;
    let job: String = meta.job_context.chars().take(60).collect();

    println!("{}", format!("Summary for {}:", dir.display()).magenta());
    println!("   • Documents processed: {}", meta.total_documents_processed);
    println!("   • Sections analyzed: {}", meta.total_sections_analyzed);
    println!("   • Top sections selected: {}", meta.top_sections_selected);
    println!("   • Persona: {}", insights.identified_persona);
    println!("   • Job context: {}...", job);
}

fn cmd_show(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let outline = docrank::outline_file(input)?;
    let json = docrank::render::to_json(&outline, json_format(compact))?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docrank".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF outline extraction and persona-driven section ranking");
    println!();
    println!("License: MIT");
}
