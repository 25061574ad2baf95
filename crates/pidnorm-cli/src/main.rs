//! Pathway network normalization CLI.
//!
//! Provides the `pidnorm` binary. `normalize` reads one or more networks
//! stored as JSON, runs the standard pass pipeline over each, writes the
//! normalized networks to an output directory and prints the issue report.
//! `passes` lists the pass order a given set of flags would produce.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info, Level};

use pidnorm_core::PathwayGraph;
use pidnorm_passes::{
    CachingResolver, LookupTables, PassError, Pipeline, PipelineConfig, SymbolResolver,
    SymbolTable, TableResolver,
};

/// Pathway network normalization tools.
#[derive(Parser)]
#[command(name = "pidnorm", about = "Pathway network normalization tools")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Normalize networks and write them to an output directory.
    Normalize {
        /// Network JSON files to normalize.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (default: ./normalized/).
        #[arg(short = 'O', long, default_value = "./normalized")]
        output_dir: PathBuf,

        /// Write the rendered issue report to this file as well.
        #[arg(long)]
        report: Option<PathBuf>,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },
    /// Print the pass order for the given options.
    Passes {
        #[command(flatten)]
        pipeline: PipelineArgs,
    },
}

/// Options shared by every subcommand that builds a pipeline.
#[derive(Args)]
struct PipelineArgs {
    /// JSON object mapping participant names (SMAD1_HUMAN) to gene symbols.
    #[arg(long)]
    gene_symbol_mapping: Option<PathBuf>,

    /// JSON object mapping gene family names to comma-joined member symbols.
    #[arg(long)]
    gene_families: Option<PathBuf>,

    /// JSON object mapping accessions to gene symbols, used to validate names.
    #[arg(long)]
    symbol_table: Option<PathBuf>,

    /// Node names to remove along with their edges.
    #[arg(long = "exclude", value_name = "NAME")]
    excluded_nodes: Vec<String>,

    /// Leave family member nodes in place.
    #[arg(long)]
    skip_protein_family_cleanup: bool,

    /// Leave primary-source edges unmerged.
    #[arg(long)]
    skip_cross_source_merge: bool,

    /// Keep protein nodes whose names are not gene symbols.
    #[arg(long)]
    skip_checker: bool,
}

impl PipelineArgs {
    fn config(&self) -> PipelineConfig {
        PipelineConfig {
            skip_protein_family_cleanup: self.skip_protein_family_cleanup,
            skip_cross_source_merge: self.skip_cross_source_merge,
            skip_checker: self.skip_checker,
            excluded_nodes: self.excluded_nodes.clone(),
        }
    }

    /// Loads the lookup tables and builds the standard pipeline.
    fn build(&self) -> Result<Pipeline, PassError> {
        let tables = LookupTables {
            gene_symbols: Arc::new(load_table(self.gene_symbol_mapping.as_deref())?),
            gene_families: Arc::new(load_table(self.gene_families.as_deref())?),
        };
        let symbols = load_table(self.symbol_table.as_deref())?;
        let resolver: Arc<dyn SymbolResolver> =
            Arc::new(CachingResolver::new(TableResolver::new(symbols)));
        Ok(Pipeline::standard(&self.config(), &tables, resolver))
    }
}

fn load_table(path: Option<&Path>) -> Result<SymbolTable, PassError> {
    match path {
        Some(path) => SymbolTable::from_path(path),
        None => Ok(SymbolTable::new()),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match cli.command {
        Commands::Normalize {
            inputs,
            output_dir,
            report,
            pipeline,
        } => run_normalize(&inputs, &output_dir, report.as_deref(), &pipeline),
        Commands::Passes { pipeline } => run_passes(&pipeline),
    };
    process::exit(exit_code);
}

/// Execute the passes subcommand.
fn run_passes(args: &PipelineArgs) -> i32 {
    let pipeline = match args.build() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 2;
        }
    };
    for (i, description) in pipeline.descriptions().iter().enumerate() {
        println!("{:>2}. {}", i + 1, description);
    }
    0
}

/// Execute the normalize subcommand.
///
/// Returns exit code: 0 = success, 1 = at least one network failed,
/// 2 = configuration error, 3 = I/O error.
fn run_normalize(
    inputs: &[PathBuf],
    output_dir: &Path,
    report_path: Option<&Path>,
    args: &PipelineArgs,
) -> i32 {
    let pipeline = match args.build() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 2;
        }
    };

    if let Err(e) = fs::create_dir_all(output_dir) {
        eprintln!(
            "Error: failed to create output directory '{}': {}",
            output_dir.display(),
            e
        );
        return 3;
    }

    let mut failures = 0usize;
    let mut rendered = String::new();
    for input in inputs {
        let mut graph = match read_graph(input) {
            Ok(g) => g,
            Err(e) => {
                error!(path = %input.display(), error = %e, "unable to read network");
                failures += 1;
                continue;
            }
        };
        // Each network gets a fresh run; a failing pass only costs this one.
        let report = match pipeline.run(&mut graph) {
            Ok(report) => report,
            Err(e) => {
                error!(path = %input.display(), error = %e, "normalization failed");
                failures += 1;
                continue;
            }
        };
        let output = output_path(output_dir, input);
        if let Err(e) = write_graph(&output, &graph) {
            eprintln!("Error: failed to write '{}': {}", output.display(), e);
            return 3;
        }
        info!(
            network = graph.name(),
            output = %output.display(),
            types = ?report.node_types,
            "wrote normalized network"
        );
        rendered.push_str(&report.render());
    }

    print!("{}", rendered);
    if let Some(path) = report_path {
        if let Err(e) = fs::write(path, &rendered) {
            eprintln!("Error: failed to write report '{}': {}", path.display(), e);
            return 3;
        }
    }

    if failures > 0 {
        eprintln!("{} of {} network(s) failed", failures, inputs.len());
        1
    } else {
        0
    }
}

fn read_graph(path: &Path) -> Result<PathwayGraph, PassError> {
    let text = fs::read_to_string(path)?;
    let mut graph: PathwayGraph = serde_json::from_str(&text)?;
    if graph.name().is_empty() {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        graph.set_name(stem);
    }
    Ok(graph)
}

fn write_graph(path: &Path, graph: &PathwayGraph) -> Result<(), PassError> {
    let json = serde_json::to_string_pretty(graph)?;
    fs::write(path, json)?;
    Ok(())
}

/// `<output_dir>/<input file name>`, defaulting to `network.json`.
fn output_path(output_dir: &Path, input: &Path) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "network.json".into());
    output_dir.join(file_name)
}
