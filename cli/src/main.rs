//! pdfoutline CLI - title and heading outline extraction

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::batch::{self, BatchOptions, DocumentResult};
use pdfoutline::render::{self, JsonFormat};
use pdfoutline::{OutlineConfig, OutlineExtractor, ParseOptions, PdfParser};

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(version)]
#[command(about = "Extract a title and heading outline from PDF documents as JSON", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output JSON file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Keep going when individual pages fail to decode
    #[arg(long, global = true)]
    lenient: bool,

    #[command(flatten)]
    tuning: TuningArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Inference thresholds shared by all commands.
#[derive(Args, Debug, Clone)]
struct TuningArgs {
    /// Fraction of pages a line must repeat on to count as header/footer
    #[arg(long, global = true, value_name = "FRACTION")]
    repetition_fraction: Option<f32>,

    /// Minimum page count before header/footer filtering applies
    #[arg(long, global = true, value_name = "PAGES")]
    min_pages: Option<usize>,

    /// Size margin over body text for unnumbered headings (0.2 = 20%)
    #[arg(long, global = true, value_name = "MARGIN")]
    size_margin: Option<f32>,

    /// Unnumbered headings must have fewer words than this
    #[arg(long, global = true, value_name = "WORDS")]
    max_words: Option<usize>,

    /// Treat "Page 1" and "Page 2" footers as the same line
    #[arg(long, global = true)]
    fold_digits: bool,

    /// Drop first-page headings that repeat the title
    #[arg(long, global = true)]
    skip_title_echo: bool,
}

impl TuningArgs {
    fn to_config(&self) -> OutlineConfig {
        let mut config = OutlineConfig::new()
            .with_fold_digits(self.fold_digits)
            .with_skip_title_echo(self.skip_title_echo);

        if let Some(fraction) = self.repetition_fraction {
            config = config.with_repetition_fraction(fraction);
        }
        if let Some(pages) = self.min_pages {
            config = config.with_min_boilerplate_pages(pages);
        }
        if let Some(margin) = self.size_margin {
            config = config.with_size_margin(margin);
        }
        if let Some(words) = self.max_words {
            config = config.with_max_heading_words(words);
        }
        config
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the outline of one PDF
    Extract {
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

    /// Extract outlines for every PDF in a directory
    Batch {
        /// Directory containing PDF files
        #[arg(long, value_name = "DIR", default_value = batch::DEFAULT_INPUT_DIR)]
        input_dir: PathBuf,

        /// Directory for JSON outlines
        #[arg(long, value_name = "DIR", default_value = batch::DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Process one document at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Show how a document is profiled
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut parse_options = ParseOptions::new();
    if cli.lenient {
        parse_options = parse_options.lenient();
    }
    let extractor = OutlineExtractor::new()
        .with_parse_options(parse_options)
        .with_config(cli.tuning.to_config());
    log::debug!("Outline config: {:?}", extractor.engine().config());

    let result = match cli.command {
        Some(Commands::Extract {
            input,
            output,
            compact,
        }) => cmd_extract(&extractor, &input, output.as_deref(), compact),
        Some(Commands::Batch {
            input_dir,
            output_dir,
            compact,
            sequential,
        }) => cmd_batch(&extractor, input_dir, output_dir, compact, sequential),
        Some(Commands::Info { input }) => cmd_info(&extractor, &input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: extract if input is provided
            if let Some(input) = cli.input {
                cmd_extract(&extractor, &input, cli.output.as_deref(), false)
            } else {
                println!("{}", "Usage: pdfoutline <FILE> [-o OUTPUT]".yellow());
                println!("       pdfoutline batch --input-dir DIR --output-dir DIR");
                println!("       pdfoutline --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn cmd_extract(
    extractor: &OutlineExtractor,
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let outline = extractor.extract_file(input)?;
    let format = json_format(compact);

    match output {
        Some(path) => {
            render::write_json(&outline, path, format)?;
            println!(
                "{} {} ({} headings)",
                "Saved to".green(),
                path.display(),
                outline.len()
            );
        }
        None => println!("{}", render::to_json(&outline, format)?),
    }

    Ok(())
}

fn cmd_batch(
    extractor: &OutlineExtractor,
    input_dir: PathBuf,
    output_dir: PathBuf,
    compact: bool,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = BatchOptions::new(input_dir, output_dir)
        .with_format(json_format(compact))
        .with_parallel(!sequential);

    let total = batch::list_pdfs(&options.input_dir)?.len();
    if total == 0 {
        println!(
            "{} {}",
            "No PDF files found in".yellow(),
            options.input_dir.display()
        );
        return Ok(());
    }

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = batch::process_directory_with_progress(&options, extractor, |result| {
        let name = file_name(result.input());
        match result {
            DocumentResult::Ok { output, .. } => {
                pb.println(format!("{} {} -> {}", "✓".green(), name, file_name(output)));
            }
            DocumentResult::Failed { error, .. } => {
                pb.println(format!("{} {}: {}", "✗".red(), name, error));
            }
        }
        pb.inc(1);
    })?;

    pb.finish_with_message("Done!");

    let failed = report.len() - report.succeeded();
    println!(
        "\n{} {} processed, {} failed",
        "Summary:".green().bold(),
        report.succeeded(),
        failed
    );
    println!("{} {}", "Output:".bold(), options.output_dir.display());

    Ok(())
}

fn cmd_info(extractor: &OutlineExtractor, input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    // Show whatever decodes, even for text-less documents
    let options = extractor.parse_options().clone().with_require_text(false);
    let parser = PdfParser::open_with_options(input, options)?;
    let document = parser.parse()?;

    let engine = extractor.engine();
    let profile = engine.profile(&document);
    let boilerplate: Vec<String> = profile
        .boilerplate
        .texts()
        .into_iter()
        .map(String::from)
        .collect();
    let body_size = profile.body_size;
    let line_count = profile.line_count();
    let outline = engine.build_from_profile(profile);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), parser.version());
    println!("{}: {}", "Pages".bold(), document.page_count());
    println!("{}: {}", "Fragments".bold(), document.fragment_count());
    println!("{}: {}", "Lines".bold(), line_count);

    println!();
    println!("{}", "Outline Profile".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    match body_size {
        Some(size) => println!("{}: {:.1}pt", "Body size".bold(), size),
        None => println!("{}: {}", "Body size".bold(), "unknown".dimmed()),
    }
    println!("{}: {}", "Title".bold(), outline.title);
    println!("{}: {}", "Headings".bold(), outline.len());
    println!("{}: {}", "Headers/footers".bold(), boilerplate.len());
    for text in &boilerplate {
        println!("  {} {}", "─".dimmed(), text);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF title and heading outline extraction");
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
