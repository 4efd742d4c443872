mod cli;
mod report;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use searchbot_core::SessionStats;
use searchbot_engine::{
    DuckDuckGoProvider, FileResultSink, PacedSearchExecutor, Pacer, PacingSettings, QuerySource,
    SearchSettings, SessionError, SessionRunner, TokioSleeper,
};
use searchbot_logging::{bot_error, bot_info};

use cli::Args;
use report::ConsoleReporter;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    searchbot_logging::initialize(args.log_destination(), args.log_level());
    println!(
        "SearchBot v{} - automated web search tool",
        env!("CARGO_PKG_VERSION")
    );

    // Queries run strictly one after another; a single-threaded runtime is enough.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(run(args))
}

async fn run(args: Args) -> anyhow::Result<()> {
    let source = QuerySource::new(&args.queries);
    let queries = source
        .load()
        .with_context(|| format!("failed to load queries from {:?}", args.queries))?;
    println!("Loaded {} queries from {}", queries.len(), args.queries.display());

    let provider =
        DuckDuckGoProvider::new(SearchSettings::default()).context("failed to build search client")?;
    let pacer = Pacer::new(PacingSettings::default(), Arc::new(TokioSleeper));
    let executor = PacedSearchExecutor::new(Arc::new(provider), pacer.clone());
    let sink = FileResultSink::new(&args.output);
    let runner = SessionRunner::new(executor, Box::new(sink), pacer, SessionStats::new());

    let reporter = ConsoleReporter::stdout();
    match runner.run(&queries, args.num_results, &reporter).await {
        Ok(report) => {
            bot_info!("Session finished, results in {:?}", report.results_path);
            Ok(())
        }
        Err(err) => {
            let SessionError::Persist { stats, .. } = &err;
            bot_error!("Session aborted after {} queries", stats.queries_processed());
            reporter.aborted(stats, &args.output);
            Err(err.into())
        }
    }
}
