//! unwiki CLI - DeepWiki documentation exporter

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unwiki::export::{DEFAULT_SITE, DEFAULT_SOURCE};
use unwiki::model::{discover_pages, load_page_list};
use unwiki::{
    generate_index, DirectoryRenderer, Error, ExportOptions, ExportProgress, ExportSummary,
    Exporter, FsSink, JsonFormat, PageRenderer, PageSpec, Unwiki,
};

const DEFAULT_OUTPUT: &str = "deepwiki-docs";

#[derive(Parser)]
#[command(name = "unwiki")]
#[command(version)]
#[command(about = "Export DeepWiki documentation to Markdown", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(flatten)]
    export: ExportArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Export every page of a source, then write the index
    Export(ExportArgs),

    /// Convert one saved HTML page to Markdown
    Convert {
        /// Saved HTML page
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Source identifier used for link rewriting
        #[arg(long, default_value = DEFAULT_SOURCE)]
        source: String,

        /// Documentation site used for link rewriting
        #[arg(long, env = "UNWIKI_SITE", default_value = DEFAULT_SITE)]
        site: String,

        /// Append the source footer for this page URL
        #[arg(long, value_name = "URL")]
        footer: Option<String>,
    },

    /// Generate the table of contents for a page list
    Index {
        /// Page list (JSON array of {"id", "title"})
        #[arg(long, value_name = "JSON")]
        pages: PathBuf,

        /// Source identifier (owner/repo)
        #[arg(value_name = "SOURCE", default_value = DEFAULT_SOURCE)]
        source: String,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Dump the parsed content tree of a saved page as JSON
    Tree {
        /// Saved HTML page
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone)]
struct ExportArgs {
    /// Source identifier (owner/repo)
    #[arg(value_name = "SOURCE", default_value = DEFAULT_SOURCE)]
    source: String,

    /// Output directory
    #[arg(value_name = "OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Page list (JSON array of {"id", "title"})
    #[arg(long, value_name = "JSON")]
    pages: Option<PathBuf>,

    /// Read saved pages (<page-id>.html) instead of fetching them
    #[arg(long, value_name = "DIR")]
    html_dir: Option<PathBuf>,

    /// Documentation site
    #[arg(long, env = "UNWIKI_SITE", default_value = DEFAULT_SITE)]
    site: String,

    /// Pause between pages in milliseconds
    #[arg(long, env = "UNWIKI_DELAY_MS", default_value_t = 1000)]
    delay_ms: u64,

    /// Minimum length of a converted page
    #[arg(long, default_value_t = 100)]
    min_length: usize,

    /// Write a JSON run report
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Export(args)) => cmd_export(&args),
        Some(Commands::Convert {
            input,
            output,
            source,
            site,
            footer,
        }) => cmd_convert(&input, output.as_deref(), &source, &site, footer.as_deref()),
        Some(Commands::Index {
            pages,
            source,
            output,
        }) => cmd_index(&pages, &source, output.as_deref()),
        Some(Commands::Tree { input, compact }) => cmd_tree(&input, compact),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            if cli.export.pages.is_some() || cli.export.html_dir.is_some() {
                cmd_export(&cli.export)
            } else {
                println!(
                    "{}",
                    "Usage: unwiki [SOURCE] [OUTPUT] --pages <JSON> | --html-dir <DIR>".yellow()
                );
                println!("       unwiki --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Progress bar reporting for export runs.
struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );
        Ok(Self { bar })
    }
}

impl ExportProgress for BarProgress {
    fn begin(&mut self, total: usize) {
        self.bar.set_length(total as u64);
    }

    fn page_started(&mut self, _index: usize, page: &PageSpec) {
        self.bar.set_message(page.id.clone());
    }

    fn page_done(&mut self, _page: &PageSpec, _path: &Path) {
        self.bar.inc(1);
    }

    fn page_failed(&mut self, page: &PageSpec, error: &Error) {
        self.bar
            .println(format!("{} {}: {}", "Skipped".yellow(), page.id, error));
        self.bar.inc(1);
    }

    fn finish(&mut self, _summary: &ExportSummary) {
        self.bar.finish_with_message("Done!");
    }
}

fn cmd_export(args: &ExportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let pages = match (&args.pages, &args.html_dir) {
        (Some(list), _) => load_page_list(list)?,
        (None, Some(dir)) => discover_pages(dir)?,
        (None, None) => return Err("either --pages or --html-dir is required".into()),
    };
    log::debug!("loaded {} page(s)", pages.len());

    let options = ExportOptions::new(&args.source)
        .with_site(&args.site)
        .with_delay(Duration::from_millis(args.delay_ms))
        .with_min_content_length(args.min_length);

    println!(
        "{} {} ({} pages) -> {}",
        "Exporting".cyan().bold(),
        args.source,
        pages.len(),
        args.output.display()
    );

    let summary = match &args.html_dir {
        Some(dir) => run_export(DirectoryRenderer::new(dir), args, options, &pages)?,
        None => run_export(unwiki::HttpRenderer::new()?, args, options, &pages)?,
    };

    println!(
        "\n{} {}/{} pages",
        "Exported".green().bold(),
        summary.succeeded,
        summary.attempted
    );
    for failure in &summary.failures {
        println!("  {} {}: {}", "├─".dimmed(), failure.id.yellow(), failure.error);
    }
    println!("  {} {}", "└─".dimmed(), args.output.join("index.md").display());

    if let Some(path) = &args.report {
        fs::write(path, serde_json::to_string_pretty(&summary)?)?;
        println!("{} {}", "Report saved to".green(), path.display());
    }

    Ok(())
}

fn run_export<R: PageRenderer>(
    renderer: R,
    args: &ExportArgs,
    options: ExportOptions,
    pages: &[PageSpec],
) -> Result<ExportSummary, Box<dyn std::error::Error>> {
    let mut progress = BarProgress::new()?;
    let mut exporter = Exporter::new(renderer, FsSink::new(&args.output), options);
    Ok(exporter.run(pages, &mut progress)?)
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    source: &str,
    site: &str,
    footer: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let html = fs::read_to_string(input)?;

    let result = Unwiki::new()
        .with_source(source)
        .with_site(site)
        .lenient()
        .parse(&html)?;
    let markdown = match footer {
        Some(url) => result.to_markdown_with_footer(url)?,
        None => result.to_markdown()?,
    };

    if let Some(path) = output {
        fs::write(path, &markdown)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", markdown);
    }

    Ok(())
}

fn cmd_index(
    pages: &Path,
    source: &str,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let pages = load_page_list(pages)?;
    let index = generate_index(source, &pages);

    if let Some(path) = output {
        fs::write(path, &index)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", index);
    }

    Ok(())
}

fn cmd_tree(input: &Path, compact: bool) -> Result<(), Box<dyn std::error::Error>> {
    let html = fs::read_to_string(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = Unwiki::new().lenient().parse(&html)?.to_json(format)?;
    println!("{}", json);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unwiki".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("DeepWiki documentation exporter");
    println!();
    println!("License: MIT");
}
