//! # wiki-audit CLI
//!
//! The `wiki-audit` binary scans a Markdown wiki and prints a report on its
//! structure, editorial quality, SEO readiness and internal links.
//!
//! ## Usage
//!
//! ```bash
//! wiki-audit [--config ./wiki-audit.toml] <command> <ROOT>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `wiki-audit report <ROOT>` | Statistics, quality, SEO and link sections |
//! | `wiki-audit stats <ROOT>` | Corpus statistics only |
//! | `wiki-audit quality <ROOT>` | Quality flags only |
//! | `wiki-audit seo <ROOT>` | SEO flags only |
//! | `wiki-audit links <ROOT>` | Broken links and orphan documents |
//! | `wiki-audit style <ROOT>` | Stock-phrase and uniformity findings |
//!
//! ## Examples
//!
//! ```bash
//! # Full report on the docs directory
//! wiki-audit report docs
//!
//! # Include the style section and cap each list at five entries
//! wiki-audit report docs --style --limit 5
//!
//! # Machine-readable link check for CI
//! wiki-audit links docs --format json
//! ```
//!
//! Findings never change the exit status. The process exits non-zero only
//! when the root cannot be read or the config file is invalid.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use wiki_audit::audit::{self, OutputOptions, Section};
use wiki_audit::config;
use wiki_audit::progress::ProgressMode;
use wiki_audit::render::OutputFormat;

/// wiki-audit — structure, quality, SEO and link analysis for Markdown wikis.
#[derive(Parser)]
#[command(
    name = "wiki-audit",
    about = "wiki-audit — structure, quality, SEO and link analysis for Markdown wikis",
    version,
    long_about = "wiki-audit scans a directory tree of Markdown documents with YAML front matter, \
    parses headings, links and images, and reports corpus statistics, quality and SEO issues, \
    broken internal links and orphan documents."
)]
struct Cli {
    /// Path to an optional configuration file (TOML).
    ///
    /// Without it, built-in thresholds and exclusion rules are used.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log scanner decisions at debug level (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output flags shared by every report command.
#[derive(Args, Clone, Debug)]
struct OutputArgs {
    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Maximum per-document entries printed in each section (0 = all).
    /// Overrides `report.list_limit` from the config file.
    #[arg(long)]
    limit: Option<usize>,

    /// Progress on stderr. Defaults to `human` on a terminal, else `off`.
    #[arg(long, value_enum)]
    progress: Option<ProgressMode>,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Full report: statistics, quality, SEO and links.
    Report {
        /// Corpus root directory.
        root: PathBuf,

        /// Also run the stock-phrase style check.
        #[arg(long)]
        style: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Document counts per directory, size and heading statistics.
    Stats {
        root: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Missing front matter, title, description, keywords; short content.
    Quality {
        root: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Title/description length, keyword count, H1 count, internal links.
    Seo {
        root: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Link totals, broken internal links and orphan documents.
    Links {
        root: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Stock phrasing and suspiciously uniform structure.
    Style {
        root: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "wiki_audit=debug"
    } else {
        "wiki_audit=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cfg = config::load_or_default(cli.config.as_deref())?;

    let (root, sections, output): (PathBuf, Vec<Section>, OutputArgs) = match cli.command {
        Commands::Report {
            root,
            style,
            output,
        } => {
            let mut sections = Section::CORE.to_vec();
            if style {
                sections.push(Section::Style);
            }
            (root, sections, output)
        }
        Commands::Stats { root, output } => (root, vec![Section::Stats], output),
        Commands::Quality { root, output } => (root, vec![Section::Quality], output),
        Commands::Seo { root, output } => (root, vec![Section::Seo], output),
        Commands::Links { root, output } => (root, vec![Section::Links], output),
        Commands::Style { root, output } => (root, vec![Section::Style], output),
    };

    let progress = output
        .progress
        .unwrap_or_else(ProgressMode::default_for_tty)
        .reporter();

    audit::run_audit(
        &root,
        &cfg,
        &sections,
        OutputOptions {
            format: output.format,
            limit: output.limit,
        },
        progress.as_ref(),
    )
}
