mod config;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use config::{CharsetName, Config, OutputFormat};
use gitlane_graph::{Commit, GitWalker, HistoryIndex, LaneLayout, Row, TextRenderer};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gitlane")]
#[command(about = "Lays out commit history as branch and merge lanes", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./gitlane.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log more (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the lane graph of a repository
    Graph {
        /// Path to the repository
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Number of commits to lay out
        #[arg(short = 'n', long)]
        count: Option<usize>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Lay out commits read from a JSON file
    Layout {
        /// JSON array of {"hash": ..., "parents": [...]}, children first
        file: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show statistics about a history window
    Stats {
        /// Path to the repository
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Number of commits to inspect
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Maximum number of lanes per row
    #[arg(long)]
    max_lanes: Option<usize>,
    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
    /// Glyphs used by the text format
    #[arg(long, value_enum)]
    charset: Option<CharsetName>,
    /// Color lanes in the text format
    #[arg(long)]
    color: bool,
}

impl OutputArgs {
    /// Command line values win over the configuration file
    fn apply(&self, config: &mut Config) {
        if let Some(max_lanes) = self.max_lanes {
            config.layout.max_lanes = max_lanes;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(charset) = self.charset {
            config.output.charset = charset;
        }
        if self.color {
            config.output.color = true;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Graph {
            path,
            count,
            output,
        } => {
            output.apply(&mut config);
            let count = count.unwrap_or(config.layout.count);
            let commits = walk(&path, count)?;
            print_layout(&commits, &config)?;
        }
        Commands::Layout { file, output } => {
            output.apply(&mut config);
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let commits: Vec<Commit> = serde_json::from_str(&content)
                .with_context(|| format!("Invalid commit list in {}", file.display()))?;
            print_layout(&commits, &config)?;
        }
        Commands::Stats { path, count } => {
            let count = count.unwrap_or(config.layout.count);
            let commits = walk(&path, count)?;
            let stats = HistoryIndex::new(&commits)
                .context("Failed to index history")?
                .stats();

            println!("History window:");
            println!("  Commits: {}", stats.commits);
            println!("  Edges: {}", stats.edges);
            println!("  Merge commits: {}", stats.merges);
            println!("  Root commits: {}", stats.roots);
            println!("  Parents outside window: {}", stats.truncated_parents);
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn walk(path: &Path, count: usize) -> Result<Vec<Commit>> {
    let walker = GitWalker::new(Some(path))?;
    let commits = walker.commits(Some(count))?;
    info!(path = %path.display(), commits = commits.len(), "loaded history");
    Ok(commits)
}

fn print_layout(commits: &[Commit], config: &Config) -> Result<()> {
    let layout = LaneLayout::new(commits, config.layout.max_lanes)
        .context("Failed to prepare lane layout")?;
    let rows: Vec<Row> = layout.build().context("Failed to lay out lanes")?;
    info!(
        commits = layout.history().len(),
        max_lanes = layout.max_lanes(),
        widest = rows.iter().map(Row::lane_count).max().unwrap_or(0),
        "laid out lanes"
    );

    match config.output.format {
        OutputFormat::Text => {
            let renderer =
                TextRenderer::new(config.output.charset.into()).with_colors(config.output.color);
            print!("{}", renderer.render_rows(&rows, commits));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }

    Ok(())
}
