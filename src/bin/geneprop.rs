//! geneprop CLI - rank candidate disease genes around a seed set
//!
//! # Examples
//!
//! ```bash
//! # RWR top-5 and a 30-gene DIAMOnD-style module
//! geneprop --network data/string_network_filtered_hugo-400.tsv --seeds data/genes_seed.txt
//!
//! # Tighter walk, bigger module, and keep a Parquet copy of the network
//! geneprop -n net.tsv -s seeds.txt --restart 0.7 --module-size 100 --export net
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use geneprop::io::{load_network, load_seeds};
use geneprop::report::{module_members, top_scores};
use geneprop::{expand_module, propagate_run, ExpansionConfig, RwrConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Network propagation (RWR) and module expansion from seed genes
#[derive(Parser, Debug)]
#[command(name = "geneprop")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Interaction network (tab/whitespace edge list or STRING HUGO export)
    #[arg(short, long, env = "GENEPROP_NETWORK")]
    network: PathBuf,

    /// Seed genes, one per line
    #[arg(short, long, env = "GENEPROP_SEEDS")]
    seeds: PathBuf,

    /// Restart probability for the random walk, in (0, 1)
    #[arg(long, default_value_t = geneprop::config::DEFAULT_RESTART)]
    restart: f64,

    /// Maximum RWR iterations
    #[arg(long, default_value_t = geneprop::config::DEFAULT_MAX_ITER)]
    max_iter: usize,

    /// RWR convergence tolerance (L1)
    #[arg(long, default_value_t = geneprop::config::DEFAULT_TOL)]
    tol: f64,

    /// Target module size, seeds included
    #[arg(short = 'k', long, default_value_t = 30)]
    module_size: usize,

    /// Number of top RWR genes to print
    #[arg(long, default_value_t = 5)]
    top: usize,

    /// Number of module members to print
    #[arg(long, default_value_t = 10)]
    show: usize,

    /// Also write the parsed network to `<BASE>_nodes.parquet` / `<BASE>_edges.parquet`
    #[arg(long, value_name = "BASE")]
    export: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn setup_logging(verbose: bool, quiet: bool) {
    let fallback = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

async fn run(cli: &Cli) -> Result<()> {
    let rwr = RwrConfig {
        restart: cli.restart,
        max_iter: cli.max_iter,
        tol: cli.tol,
    };
    let expansion = ExpansionConfig { k: cli.module_size };
    rwr.validate()?;
    expansion.validate()?;

    let graph = load_network(&cli.network)
        .with_context(|| format!("Could not load network {}", cli.network.display()))?;
    info!(path = %cli.network.display(), "network loaded");
    info!(
        nodes = graph.num_nodes(),
        edges = graph.num_edges(),
        weighted = graph.is_weighted(),
        "network size"
    );

    if let Some(base) = &cli.export {
        graph
            .write_parquet(base)
            .await
            .with_context(|| format!("Could not export network to {}", base.display()))?;
        info!(base = %base.display(), "network exported to Parquet");
    }

    let raw_seeds = load_seeds(&cli.seeds)
        .with_context(|| format!("Could not load seeds {}", cli.seeds.display()))?;
    info!(path = %cli.seeds.display(), count = raw_seeds.len(), "seeds loaded");

    let split = graph.resolve_seeds(&raw_seeds);
    info!(
        present = split.present.len(),
        total = raw_seeds.len(),
        "seeds present in network"
    );
    if !split.missing.is_empty() {
        warn!(missing = ?split.missing, "seeds not found in network");
    }

    let run = propagate_run(&graph, &split.present, &rwr)?;
    info!(
        iterations = run.iterations,
        converged = run.converged,
        "propagation completed (RWR)"
    );

    println!("Top {} genes by RWR score:", cli.top);
    for (gene, score) in top_scores(&graph, &run.scores, cli.top) {
        println!("   {gene}: {score:.6}");
    }

    let module = expand_module(&graph, &split.present, expansion.k)?;
    info!(size = module.len(), target = expansion.k, "module expansion completed");

    println!("\nFirst module genes:");
    for (rank, gene) in module_members(&graph, &module).into_iter().take(cli.show) {
        println!("  {rank:02}. {gene}");
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
