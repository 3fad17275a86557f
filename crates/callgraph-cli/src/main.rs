//! `callgraph`: build the call graph of a C/C++ project, then answer
//! `<file>:<line>:<column>` queries read from stdin.

use std::io;
use std::path::Path;

use callgraph_analysis::call_graph::{ingest, merge};
use callgraph_analysis::compdb;
use callgraph_analysis::parsers::CppAnalyzer;
use callgraph_analysis::query::{QueryOptions, QuerySession};
use callgraph_core::config::{CallgraphConfig, CliOverrides};
use callgraph_core::constants::EXIT_FAILURE;
use callgraph_core::errors::PipelineError;
use callgraph_core::tracing::{init_tracing, metrics};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "callgraph",
    version,
    about = "Print every call path reaching a function and the call graph below it"
)]
struct Cli {
    /// Directory holding compile_commands.json
    project_root: String,

    /// Also print functions outside the filter prefix
    #[arg(long)]
    show_all: bool,

    /// Ingestion worker count
    #[arg(long, value_name = "N")]
    workers: Option<usize>,

    /// Fail a query once it finds more than N call paths
    #[arg(long = "max-paths", value_name = "N")]
    max_paths: Option<usize>,

    /// Display-name substring required for printing (default: project root)
    #[arg(long, value_name = "PREFIX")]
    filter: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            workers: self.workers,
            max_call_paths: self.max_paths,
            show_all: self.show_all.then_some(true),
            filter: self.filter.clone(),
        }
    }
}

fn main() {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { EXIT_FAILURE } else { 0 };
            // Nothing useful to do if stderr is gone.
            let _ = err.print();
            std::process::exit(code);
        }
    };
    if let Err(err) = run(&cli) {
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}

fn run(cli: &Cli) -> Result<(), PipelineError> {
    let root = Path::new(&cli.project_root);
    let config = CallgraphConfig::load(root, Some(&cli.overrides()))?;
    let db = compdb::load(root)?;

    let analyzer = CppAnalyzer::new((&config.ingest).into());
    let results = ingest(&analyzer, &db.commands, config.ingest.effective_workers())?;
    let mut graph = merge(results);
    graph.store.verify_integrity()?;
    tracing::info!(
        project = %cli.project_root,
        functions = graph.store.len(),
        { metrics::UNITS_FAILED } = graph.failures.len(),
        "call graph ready"
    );

    let options = QueryOptions::from_config(&config.query, &cli.project_root);
    let mut session = QuerySession::new(&analyzer, &graph.store, &mut graph.units, options);
    let stdin = io::stdin();
    let stdout = io::stdout();
    session.run(stdin.lock(), &mut stdout.lock())
}
