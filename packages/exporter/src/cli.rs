//! Command-line interface for the exporter.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use qanun_parser::DocumentParser;

use crate::config::{load_grammar, validate_input, validate_output_dir};
use crate::error::Result;
use crate::export::{write_document, OutputFormat};
use crate::pipeline::{export_batch, parse_file};

/// Qanun - Structure and export Arabic legislation.
#[derive(Parser)]
#[command(name = "qanun")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse one extracted law text into a structured document.
    Parse {
        /// Extracted law text
        input: PathBuf,

        /// Output file (default: input path with the format's extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Grammar YAML file (default: built-in Arabic grammar)
        #[arg(short, long)]
        grammar: Option<PathBuf>,

        /// Skip cleaning; the input is already normalized
        #[arg(long)]
        raw: bool,
    },

    /// Export laws as enriched documents, graph records and article records.
    Export {
        /// Extracted law texts
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short = 'o', long)]
        out_dir: PathBuf,

        /// Grammar YAML file (default: built-in Arabic grammar)
        #[arg(short, long)]
        grammar: Option<PathBuf>,

        /// Skip cleaning; the inputs are already normalized
        #[arg(long)]
        raw: bool,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            input,
            output,
            format,
            grammar,
            raw,
        } => parse_command(&input, output.as_deref(), format, grammar.as_deref(), raw),
        Commands::Export {
            inputs,
            out_dir,
            grammar,
            raw,
        } => export_command(&inputs, &out_dir, grammar.as_deref(), raw),
    }
}

fn build_parser(grammar: Option<&Path>) -> Result<DocumentParser> {
    Ok(DocumentParser::new(load_grammar(grammar)?)?)
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Execute the parse command.
fn parse_command(
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    grammar: Option<&Path>,
    raw: bool,
) -> Result<()> {
    // Validate inputs before doing any work
    validate_input(input)?;
    if let Some(parent) = output.and_then(Path::parent) {
        if !parent.as_os_str().is_empty() {
            validate_output_dir(parent)?;
        }
    }
    let parser = build_parser(grammar)?;

    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.with_extension(format.extension()));

    println!(
        "{} {}",
        style("Parsing").bold(),
        style(input.display()).cyan()
    );
    println!();

    let pb = spinner();
    pb.set_message("Parsing document...");

    let document = match parse_file(&parser, input, raw) {
        Ok(document) => document,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Writing document...");

    if let Err(e) = write_document(&document, &output_path, format) {
        pb.finish_and_clear();
        return Err(e);
    }

    pb.finish_and_clear();

    println!("  Metadata fields: {}", document.metadata.len());
    println!("  Chapters: {}", document.sections.len());
    println!("  Articles: {}", document.article_count());
    if document.article_count() == 0 {
        println!("  {}", style("No articles found").yellow().bold());
    }

    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        output_path.display()
    );

    Ok(())
}

/// Execute the export command.
fn export_command(
    inputs: &[PathBuf],
    out_dir: &Path,
    grammar: Option<&Path>,
    raw: bool,
) -> Result<()> {
    // Validate every input and the output directory before writing anything
    for input in inputs {
        validate_input(input)?;
    }
    validate_output_dir(out_dir)?;
    let parser = build_parser(grammar)?;

    println!(
        "{} {} law(s) to {}",
        style("Exporting").bold(),
        style(inputs.len()).cyan(),
        style(out_dir.display()).green()
    );
    println!();

    let pb = spinner();
    pb.set_message("Parsing and exporting...");

    let batch = match export_batch(&parser, inputs, out_dir, raw) {
        Ok(batch) => batch,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    for export in &batch.laws {
        println!(
            "  {} {}",
            style(&export.law.law_id).green(),
            style(format!("({})", export.stem)).dim()
        );
        println!("    Type: {}", export.law.law_type.as_str());
        println!("    Chapters: {}", export.law.chapters.len());
        println!("    Articles: {}", export.law.articles.len());
        println!("    Cypher statements: {}", export.statements);
        if !export.law.references.is_empty() {
            println!(
                "    References: {}",
                style(export.law.references.references.len()).yellow()
            );
        }
    }

    println!();
    println!(
        "{} {} ({} article records)",
        style("Saved to:").green().bold(),
        out_dir.display(),
        batch.records
    );
    println!(
        "  Combined Cypher: {} ({} statements)",
        batch.cypher_file.display(),
        batch.cypher_statements
    );

    Ok(())
}
