//! Sentry PDU - command-line harness
//!
//! Feeds raw SNMP tables captured from a Sentry4 PDU through the evaluation
//! engine and prints the discovered services and check results.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use sentry_pdu::plugin::{ItemOutcome, TEMPERATURE_GRAPH, TEMPERATURE_METRIC};
use sentry_pdu::{CheckOutput, CheckParams, RawRow, SectionKind, DEFAULT_INTERVAL_MS};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "sentry_pdu")]
#[command(about = "Sentry4 PDU SNMP telemetry evaluation")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Austin Couch")]
#[command(
    long_about = "Discovers and checks humidity, temperature, input cord, outlet and unit status sections from raw SNMP tables"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print registration metadata for every section
    Sections,

    /// List the services found in a raw table
    Discover(DiscoverArgs),

    /// Evaluate one item, or every discovered item
    Check(CheckArgs),

    /// Re-read a table on an interval and evaluate every item
    Watch(WatchArgs),
}

#[derive(Args)]
struct TableArgs {
    /// Section to interpret the table as (e.g. humidity, sentry4_pdu_outlet)
    #[arg(short, long)]
    section: SectionKind,

    /// JSON file holding the raw rows as an array of string arrays
    #[arg(short, long)]
    table: PathBuf,
}

#[derive(Args)]
struct DiscoverArgs {
    #[command(flatten)]
    table: TableArgs,

    /// Output format: json or pretty
    #[arg(short, long, default_value = "pretty")]
    format: String,
}

#[derive(Args)]
struct CheckArgs {
    #[command(flatten)]
    table: TableArgs,

    /// Item to evaluate; all discovered items when omitted
    #[arg(short, long)]
    item: Option<String>,

    /// JSON file holding check parameters
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Output format: json or pretty
    #[arg(short, long, default_value = "pretty")]
    format: String,
}

#[derive(Args)]
struct WatchArgs {
    #[command(flatten)]
    table: TableArgs,

    /// JSON file holding check parameters
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Re-evaluation interval in milliseconds
    #[arg(short, long, default_value_t = DEFAULT_INTERVAL_MS)]
    interval: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging
    init_logging(&cli)?;

    match &cli.command {
        Commands::Sections => sections_command()?,
        Commands::Discover(args) => discover_command(args).await?,
        Commands::Check(args) => check_command(args).await?,
        Commands::Watch(args) => watch_command(args).await?,
    }

    Ok(())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

async fn load_table(path: &Path) -> anyhow::Result<Vec<RawRow>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading table {}", path.display()))?;
    let rows: Vec<RawRow> = serde_json::from_str(&raw)
        .with_context(|| format!("decoding table {}", path.display()))?;
    debug!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

async fn load_params(path: Option<&Path>) -> anyhow::Result<CheckParams> {
    let Some(path) = path else {
        return Ok(CheckParams::default());
    };
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading params {}", path.display()))?;
    let params = CheckParams::from_json(&raw)
        .with_context(|| format!("decoding params {}", path.display()))?;
    info!("Using check parameters from {}", path.display());
    Ok(params)
}

fn check_format(format: &str) -> anyhow::Result<()> {
    match format {
        "json" | "pretty" => Ok(()),
        other => bail!("Unsupported format: {}. Use 'json' or 'pretty'", other),
    }
}

fn sections_command() -> anyhow::Result<()> {
    for kind in SectionKind::ALL {
        let info = kind.info();
        println!("{}", info.name);
        println!("  Detect: exists({})", info.detect);
        println!("  Base: {}", info.tree.base);
        for (column, oid) in info.tree.columns.iter().zip(info.tree.column_oids()) {
            println!("    {:<10} {:<28} {}", column.suffix, column.mib_name, oid);
        }
        if let Some(ruleset) = info.ruleset {
            println!("  Ruleset: {}", ruleset);
        }
        println!();
    }

    println!(
        "Metric {}: {} [{}] color {}",
        TEMPERATURE_METRIC.name, TEMPERATURE_METRIC.title, TEMPERATURE_METRIC.unit, TEMPERATURE_METRIC.color
    );
    println!(
        "Graph {}: {:?} scalars {:?}",
        TEMPERATURE_GRAPH.name, TEMPERATURE_GRAPH.metrics, TEMPERATURE_GRAPH.scalars
    );

    Ok(())
}

async fn discover_command(args: &DiscoverArgs) -> anyhow::Result<()> {
    check_format(&args.format)?;
    let rows = load_table(&args.table.table).await?;
    let services = args.table.section.discover(rows)?;
    info!("Discovered {} {} services", services.len(), args.table.section);

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&services)?);
    } else {
        for service in &services {
            println!("{}", service.item);
        }
    }

    Ok(())
}

async fn check_command(args: &CheckArgs) -> anyhow::Result<()> {
    check_format(&args.format)?;
    let rows = load_table(&args.table.table).await?;
    let params = load_params(args.params.as_deref()).await?;
    let section = args.table.section;

    let outcomes = match &args.item {
        Some(item) => vec![ItemOutcome {
            item: item.clone(),
            outputs: section.check(rows, item, &params),
        }],
        None => section.check_all(rows, &params)?,
    };

    if args.format == "json" {
        print_json(&outcomes)?;
    } else {
        print_pretty(&outcomes, None);
    }

    if outcomes.iter().any(|outcome| outcome.outputs.is_err()) {
        bail!("one or more items could not be evaluated");
    }

    Ok(())
}

async fn watch_command(args: &WatchArgs) -> anyhow::Result<()> {
    if args.interval == 0 {
        bail!("interval must be greater than zero");
    }
    let params = load_params(args.params.as_deref()).await?;
    let section = args.table.section;
    info!(
        "Watching {} as {} every {}ms",
        args.table.table.display(),
        section,
        args.interval
    );

    let cycles = watch_loop(args, &params, tokio::signal::ctrl_c()).await;
    info!("Stopped after {} cycles", cycles);

    Ok(())
}

/// Evaluate the table on every tick until `shutdown` resolves. Returns the
/// number of cycles run.
async fn watch_loop<F>(args: &WatchArgs, params: &CheckParams, shutdown: F) -> u64
where
    F: Future<Output = std::io::Result<()>>,
{
    let section = args.table.section;
    let mut ticker = tokio::time::interval(Duration::from_millis(args.interval));
    tokio::pin!(shutdown);
    let mut cycles = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                cycles += 1;
                let timestamp = chrono::Utc::now();
                // Each cycle stands alone; a bad table is reported and retried.
                match load_table(&args.table.table).await {
                    Ok(rows) => match section.check_all(rows, params) {
                        Ok(outcomes) => print_pretty(&outcomes, Some(timestamp)),
                        Err(e) => error!("Failed to parse {} table: {}", section, e),
                    },
                    Err(e) => error!("{:#}", e),
                }
            }
            signal = &mut shutdown => {
                match signal {
                    Ok(()) => info!("Received Ctrl-C, stopping"),
                    Err(e) => warn!("Failed to listen for Ctrl-C, stopping: {}", e),
                }
                break;
            }
        }
    }

    cycles
}

fn print_json(outcomes: &[ItemOutcome]) -> anyhow::Result<()> {
    let report: Vec<_> = outcomes
        .iter()
        .map(|outcome| match &outcome.outputs {
            Ok(outputs) => serde_json::json!({ "item": outcome.item, "outputs": outputs }),
            Err(e) => serde_json::json!({ "item": outcome.item, "error": e.to_string() }),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_pretty(outcomes: &[ItemOutcome], timestamp: Option<chrono::DateTime<chrono::Utc>>) {
    if let Some(timestamp) = timestamp {
        println!("[{}]", timestamp.format("%Y-%m-%d %H:%M:%S UTC"));
    }

    for outcome in outcomes {
        println!("{}", outcome.item);
        match &outcome.outputs {
            Ok(outputs) if outputs.is_empty() => println!("  (item not found)"),
            Ok(outputs) => {
                for output in outputs {
                    print_output(output);
                }
            }
            Err(e) => {
                warn!("{}: {}", outcome.item, e);
                println!("  ERROR {}", e);
            }
        }
    }
    println!();
}

fn print_output(output: &CheckOutput) {
    match output {
        CheckOutput::Metric(metric) => match metric.levels {
            Some((warn, crit)) => {
                println!("  {} = {} (warn {}, crit {})", metric.name, metric.value, warn, crit)
            }
            None => println!("  {} = {}", metric.name, metric.value),
        },
        CheckOutput::Result(result) => {
            println!("  {} {}", result.state, result.summary);
            if let Some(details) = &result.details {
                println!("    {}", details);
            }
        }
    }
}
