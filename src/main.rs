//! @ai:module:intent CLI entry point for the logbook generator
//! @ai:module:layer presentation
//! @ai:module:public_api main
//! @ai:module:depends_on files, config, context, render, scanner, task, output

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use logbook_generator::{
    build_coursework_context, build_logbook_context, build_task_contexts, files, load_config,
    output, read_input_directory, save_file, CodeScanner, CommentGrammar, MarkdownRenderer,
    OutputFormat, Renderer,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "logbook")]
#[command(author, version, about = "Generate lab logbooks from answer comments in source files")]
struct Cli {
    /// Log debug output
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the logbook (and coursework, if present) from an input directory
    Generate {
        /// Directory containing week folders and references.yaml
        #[arg(long, short, default_value = "input")]
        input: PathBuf,

        /// Path to the YAML configuration file
        #[arg(long, short, default_value = "config.yaml")]
        config: PathBuf,

        /// Path of the generated logbook
        #[arg(long, short, default_value = "logbook.md")]
        output: PathBuf,

        /// Path of the generated coursework document
        #[arg(long, default_value = "coursework.md")]
        coursework_output: PathBuf,
    },

    /// Scan one source file and show its answer comments
    Scan {
        /// Path to file
        path: PathBuf,

        /// Also print the source with comments removed
        #[arg(long)]
        strip: bool,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },

    /// Build task contexts for every source file in a directory
    Tasks {
        /// Directory of task files named <code><number>-<topic>-<name>.cpp
        path: PathBuf,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    JsonPretty,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let directive = if verbose {
        "logbook_generator=debug"
    } else {
        "logbook_generator=info"
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env();
    let filter = match directive.parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<()> {
    let grammar = CommentGrammar::default();

    match command {
        Commands::Generate {
            input,
            config,
            output,
            coursework_output,
        } => generate(&grammar, &input, &config, &output, &coursework_output),

        Commands::Scan {
            path,
            strip,
            format,
        } => {
            let source = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let scanned = CodeScanner::new(&grammar)
                .scan_source(&source, strip)
                .with_context(|| format!("Failed to scan {}", path.display()))?;

            println!("{}", output::format_scan_output(&scanned, format.into()));
            Ok(())
        }

        Commands::Tasks { path, format } => {
            let sources = files::read_source_files(&path)?;
            let contexts = build_task_contexts(
                &grammar,
                sources.iter().map(|(name, text)| (name.as_str(), text.as_str())),
            )?;

            println!("{}", output::format_task_contexts(&contexts, format.into()));
            Ok(())
        }
    }
}

fn generate(
    grammar: &CommentGrammar,
    input: &Path,
    config: &Path,
    output: &Path,
    coursework_output: &Path,
) -> Result<()> {
    let config = load_config(config)?;
    let input_dir = read_input_directory(input)
        .with_context(|| format!("Failed to read input directory {}", input.display()))?;
    let renderer = MarkdownRenderer::new();

    let logbook = build_logbook_context(grammar, &config, &input_dir);
    save_file(output, &renderer.render_logbook(&logbook)?)?;
    tracing::info!(
        "Wrote logbook with {} weeks to {}",
        logbook.weeks.len(),
        output.display()
    );

    if let Some(coursework_files) = &input_dir.coursework {
        let coursework = build_coursework_context(grammar, coursework_files)?;
        save_file(coursework_output, &renderer.render_coursework(&coursework)?)?;
        tracing::info!(
            "Wrote coursework with {} files to {}",
            coursework.files.len(),
            coursework_output.display()
        );
    }

    Ok(())
}
