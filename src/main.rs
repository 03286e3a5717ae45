use clap::{Parser, Subcommand};
use toc_relink::config;
use toc_relink::output;
use toc_relink::pipeline::{self, PipelineReport, Steps};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "toc-relink")]
#[command(about = "Keep a Markdown doc tree's internal links valid and generate its toc")]
#[command(long_about = "\
Keep a Markdown doc tree's internal links valid and generate its toc

Every .md file below the document root is addressed by its file name without
extension. Links written against that name are rewritten to the correct
relative path, so documents can move between folders freely:

  source/
  ├── relink.toml                  # Optional remap tables and ignore list
  ├── index.md                     # [Objects](Objects) -> [Objects](Components/Objects)
  ├── Setup/
  │   └── Setup-Quickstart.md
  └── Components/
      └── Objects.md               # [Setup](Setup-Quickstart) -> [Setup](../Setup/Setup-Quickstart)

File names must be unique across the whole tree, even in different folders.

Run 'toc-relink gen-config' to generate a documented relink.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Document root
    #[arg(long, default_value = "source", global = true)]
    source: PathBuf,

    /// Show debug diagnostics
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show warnings and errors on stderr
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Relink all documents and write the toc
    Build,
    /// Relink all documents without touching the toc
    Relink,
    /// Write the toc only
    Toc,
    /// Report stale and unresolved links without writing anything
    Check,
    /// List cataloged documents and their reference paths
    Catalog,
    /// Print a stock relink.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let steps = match cli.command {
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            return Ok(());
        }
        Command::Build => Steps::BUILD,
        Command::Relink => Steps::RELINK,
        Command::Toc => Steps::TOC,
        Command::Check => Steps::CHECK,
        Command::Catalog => Steps::CATALOG,
    };

    let config = config::load_config(&cli.source)?;
    println!("==> Scanning {}", cli.source.display());
    let report = pipeline::run(&cli.source, &config, steps)?;

    match cli.command {
        Command::Catalog => output::print_catalog_output(&report.catalog),
        Command::Check => return finish_check(&report),
        _ => print_report(&report),
    }
    Ok(())
}

fn print_report(report: &PipelineReport) {
    if let Some(relink) = &report.relink {
        output::print_relink_output(relink);
    }
    if let Some((path, entries)) = &report.toc {
        output::print_toc_output(path, *entries);
    }
}

/// Print the check report; stale links make the command fail.
fn finish_check(report: &PipelineReport) -> Result<(), Box<dyn std::error::Error>> {
    let Some(relink) = &report.relink else {
        return Ok(());
    };
    output::print_check_output(relink);
    match relink.modified_count() {
        0 => {
            println!("==> Links are up to date");
            Ok(())
        }
        n => Err(format!("{n} documents have links that need relinking").into()),
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}
