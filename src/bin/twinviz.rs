//! twinviz: twin prime explorer
//!
//! - `generate`: list twin pairs up to a limit
//! - `stats`: gap statistics and density report
//! - `plot`: render the visualizations
//! - `export`: write the pairs as CSV
//! - `compare`: time trial division against the sieve
//!
//! Run: `twinviz stats 100000`

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use twinviz::config::Config;
use twinviz::export::export_csv;
use twinviz::performance::{compare_all, DEFAULT_COMPARISON_LIMITS};
use twinviz::report::{render_listing, render_report};
use twinviz::sieve::{generate_with_max, parse_limit};
use twinviz::visualize::{
    terminal_text, try_render, write_plot, Analysis, OutputFormat, PlotKind, PlotSettings,
};
use twinviz::{reference, stats::StatSummary};

/// Twin prime generation, statistics and plots
#[derive(Parser, Debug)]
#[command(name = "twinviz")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Twin prime sieve, gap statistics and plots", long_about = None)]
struct Cli {
    /// Config file path (default: <config dir>/twinviz/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the twin pairs up to LIMIT
    Generate {
        /// Upper limit (default from config)
        #[arg(value_parser = limit_arg)]
        limit: Option<u64>,

        /// Generator to use
        #[arg(short, long, value_enum, default_value_t = Method::Sieve)]
        method: Method,

        /// Print at most this many pairs
        #[arg(long)]
        max_rows: Option<usize>,
    },

    /// Gap statistics and density report
    Stats {
        #[arg(value_parser = limit_arg)]
        limit: Option<u64>,

        /// Print the summary as YAML
        #[arg(long)]
        yaml: bool,
    },

    /// Render plots
    Plot {
        #[arg(value_parser = limit_arg)]
        limit: Option<u64>,

        /// Plot to draw; repeat for several (default: all)
        #[arg(short, long, value_enum)]
        kind: Vec<PlotKind>,

        /// Output format (default from config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Directory for image files (default from config)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Image width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Image height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Terminal output width in characters
        #[arg(long, default_value_t = 100)]
        columns: u32,
    },

    /// Write the pairs as CSV
    Export {
        #[arg(value_parser = limit_arg)]
        limit: Option<u64>,

        /// Destination file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Time trial division against the sieve
    Compare {
        /// Limits to compare at
        #[arg(value_parser = limit_arg)]
        limits: Vec<u64>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Method {
    /// Sieve of Eratosthenes
    Sieve,
    /// Trial division
    Basic,
}

fn limit_arg(text: &str) -> std::result::Result<u64, String> {
    parse_limit(text).map_err(|e| e.to_string())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::resolve(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Command::Generate {
            limit,
            method,
            max_rows,
        } => generate(&config, limit.unwrap_or(config.limit), method, max_rows),
        Command::Stats { limit, yaml } => stats(&config, limit.unwrap_or(config.limit), yaml),
        Command::Plot {
            limit,
            kind,
            format,
            output_dir,
            width,
            height,
            columns,
        } => {
            let format = match format {
                Some(format) => format,
                None => config
                    .plot
                    .format
                    .parse()
                    .context("plot.format in configuration")?,
            };
            let mut settings = PlotSettings::from_config(&config);
            settings.width = width.unwrap_or(settings.width);
            settings.height = height.unwrap_or(settings.height);
            let dir = output_dir.unwrap_or_else(|| config.plot.output_dir.clone());
            let kinds = if kind.is_empty() {
                PlotKind::ALL.to_vec()
            } else {
                kind
            };
            plot(
                &config,
                limit.unwrap_or(config.limit),
                &kinds,
                format,
                &settings,
                &dir,
                columns,
            )
        }
        Command::Export { limit, output } => {
            let limit = limit.unwrap_or(config.limit);
            let generation = generate_with_max(limit, config.max_limit)?;
            let rows = export_csv(&output, generation.pairs())
                .with_context(|| format!("writing {}", output.display()))?;
            println!("Exported {rows} twin pairs to {}", output.display());
            Ok(())
        }
        Command::Compare { limits } => compare(&limits),
    }
}

fn generate(config: &Config, limit: u64, method: Method, max_rows: Option<usize>) -> Result<()> {
    let start = Instant::now();
    let generation = match method {
        Method::Sieve => generate_with_max(limit, config.max_limit)?,
        Method::Basic => {
            let max = config.max_limit;
            anyhow::ensure!(limit <= max, twinviz::Error::ResourceExhausted { limit, max });
            reference::generate(limit)
        }
    };
    let elapsed = start.elapsed();
    let name = match method {
        Method::Sieve => "sieve",
        Method::Basic => "basic",
    };
    tracing::info!(limit, method = name, pairs = generation.pair_count(), "generated");
    print!("{}", render_listing(&generation, name, elapsed, max_rows));
    Ok(())
}

fn stats(config: &Config, limit: u64, yaml: bool) -> Result<()> {
    let analysis = Analysis::run(limit, config.max_limit)?;
    if yaml {
        let summary: &StatSummary = analysis.require_summary()?;
        print!("{}", serde_yaml_ng::to_string(summary)?);
    } else {
        print!("{}", render_report(analysis.generation(), analysis.summary()));
    }
    Ok(())
}

fn plot(
    config: &Config,
    limit: u64,
    kinds: &[PlotKind],
    format: OutputFormat,
    settings: &PlotSettings,
    dir: &Path,
    columns: u32,
) -> Result<()> {
    let analysis = Analysis::run(limit, config.max_limit)?;

    for &kind in kinds {
        let Some(fb) =
            try_render(kind, &analysis, settings).with_context(|| format!("rendering {kind}"))?
        else {
            continue;
        };
        match write_plot(kind, &fb, format, dir)? {
            Some(path) => println!("{}", path.display()),
            None => {
                println!("{}", kind.title());
                print!("{}", terminal_text(&fb, columns));
            }
        }
    }
    Ok(())
}

fn compare(limits: &[u64]) -> Result<()> {
    let limits = if limits.is_empty() {
        DEFAULT_COMPARISON_LIMITS.as_slice()
    } else {
        limits
    };
    println!(
        "{:>10} {:>12} {:>12} {:>9} {:>7}",
        "limit", "basic (s)", "sieve (s)", "speedup", "pairs"
    );
    for row in compare_all(limits)? {
        println!(
            "{:>10} {:>12.6} {:>12.6} {:>8.1}x {:>7}",
            row.limit,
            row.basic.as_secs_f64(),
            row.sieve.as_secs_f64(),
            row.speedup(),
            row.pair_count
        );
    }
    Ok(())
}
