//! unoutline CLI - multilingual document outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unoutline::batch::{BatchOptions, BatchRunner, DocumentOutcome, EXIT_FATAL};
use unoutline::{detect_script, JsonFormat, OutlineConfig, Unoutline};

#[derive(Parser)]
#[command(name = "unoutline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract multilingual document outlines to JSON", long_about = None)]
struct Cli {
    /// Input directory
    #[arg(value_name = "INPUT_DIR")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT_DIR")]
    output: Option<PathBuf>,

    #[command(flatten)]
    thresholds: Thresholds,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Tunable thresholds shared by all commands.
#[derive(Args, Clone, Debug)]
struct Thresholds {
    /// Repeated lines must appear on at least page_count / N pages
    #[arg(long, global = true, value_name = "N")]
    repeated_divisor: Option<usize>,

    /// Documents below this distinct-line ratio get no headings
    #[arg(long, global = true, value_name = "RATIO")]
    degenerate_ratio: Option<f64>,

    /// Degenerate check only applies below this many lines
    #[arg(long, global = true, value_name = "LINES")]
    degenerate_lines: Option<usize>,
}

impl Thresholds {
    fn config(&self) -> OutlineConfig {
        let defaults = OutlineConfig::default();
        let divisor = self.repeated_divisor.unwrap_or(defaults.repeated_page_divisor);
        let ratio = self.degenerate_ratio.unwrap_or(defaults.degenerate_unique_ratio);
        let lines = self.degenerate_lines.unwrap_or(defaults.degenerate_max_lines);

        let min_pages = defaults.repeated_min_pages;
        defaults
            .with_repeated_threshold(min_pages, divisor)
            .with_degenerate_threshold(ratio, lines)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract outlines for every document in a directory
    Batch {
        /// Input directory
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Output directory
        #[arg(value_name = "OUTPUT_DIR")]
        output: PathBuf,

        /// Process one document at a time
        #[arg(long)]
        sequential: bool,

        /// Per-document timeout in seconds (0 disables it)
        #[arg(long, default_value = "60", value_name = "SECS")]
        timeout: u64,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Also write the batch report as JSON
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },

    /// Extract the outline of a single document
    Outline {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Split a document into heading sections
    Sections {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print the detected script of a text
    Script {
        /// Text to inspect
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Show version information
    Version,
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.thresholds.config();

    let result = match cli.command {
        Some(Commands::Batch {
            input,
            output,
            sequential,
            timeout,
            compact,
            report,
        }) => {
            let options = BatchOptions::new()
                .with_parallel(!sequential)
                .with_timeout((timeout > 0).then(|| Duration::from_secs(timeout)))
                .with_json_format(json_format(compact));
            cmd_batch(&input, &output, config, options, report.as_deref())
        }
        Some(Commands::Outline {
            input,
            output,
            compact,
        }) => cmd_outline(&input, output.as_deref(), config, compact).map(|_| 0),
        Some(Commands::Sections {
            input,
            output,
            compact,
        }) => cmd_sections(&input, output.as_deref(), config, compact).map(|_| 0),
        Some(Commands::Script { text }) => {
            println!("{}", detect_script(&text));
            Ok(0)
        }
        Some(Commands::Version) => {
            cmd_version();
            Ok(0)
        }
        None => match (cli.input, cli.output) {
            // Default behavior: batch if both directories are provided
            (Some(input), Some(output)) => {
                cmd_batch(&input, &output, config, BatchOptions::default(), None)
            }
            _ => {
                println!("{}", "Usage: unoutline <INPUT_DIR> <OUTPUT_DIR>".yellow());
                println!("       unoutline --help for more information");
                Ok(0)
            }
        },
    };

    match result {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            ExitCode::from(EXIT_FATAL as u8)
        }
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

/// Run a batch and return the process exit code.
fn cmd_batch(
    input: &Path,
    output: &Path,
    config: OutlineConfig,
    options: BatchOptions,
    report_path: Option<&Path>,
) -> CliResult<i32> {
    let runner = BatchRunner::new(config, options);
    let plan = runner.plan(input, output)?;

    let pb = ProgressBar::new(plan.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = runner.execute(&plan, |outcome: &DocumentOutcome| {
        match outcome {
            Ok(success) => pb.set_message(success.document.clone()),
            Err(failure) => pb.println(format!(
                "{} {} - {}",
                "✗".red().bold(),
                failure.document.bright_white(),
                failure.message.red()
            )),
        }
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    if let Some(path) = report_path {
        fs::write(path, serde_json::to_string_pretty(&report)?)?;
        log::debug!("batch report written to {}", path.display());
    }

    println!("{}", "Batch Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Documents".bold(), report.total);
    println!(
        "{}: {}",
        "Succeeded".bold(),
        report.succeeded.len().to_string().green()
    );
    let failed = report.failed.len().to_string();
    println!(
        "{}: {}",
        "Failed".bold(),
        if report.is_success() {
            failed.normal()
        } else {
            failed.red()
        }
    );
    println!("{}: {}", "Output".bold(), output.display());

    Ok(report.exit_code())
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    config: OutlineConfig,
    compact: bool,
) -> CliResult<()> {
    let json = Unoutline::new()
        .with_config(config)
        .load(input)?
        .to_json(json_format(compact))?;
    write_or_print(output, &json)
}

fn cmd_sections(
    input: &Path,
    output: Option<&Path>,
    config: OutlineConfig,
    compact: bool,
) -> CliResult<()> {
    let json = Unoutline::new()
        .with_config(config)
        .load(input)?
        .sections_json(json_format(compact))?;
    write_or_print(output, &json)
}

fn write_or_print(output: Option<&Path>, content: &str) -> CliResult<()> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Multilingual document outline extraction tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/unoutline".dimmed());
    println!("License: MIT");
}
