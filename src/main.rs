mod executor;
mod node;
mod os;
mod suite;
mod testsuites;
mod tool;

use clap::Parser;
use executor::{ExecutorConfig, LocalRunner};
use node::Node;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use suite::{RunConfig, RunSummary, SuiteRunner};
use tool::Registry;
use tracing::{Level, info};
use tracing_subscriber::fmt;

/// CLI arguments
#[derive(Debug, Parser)]
#[command(name = "nodecheck")]
#[command(about = "Run node checks against this machine")]
struct Args {
    /// Run config file (defaults to ~/.nodecheck/run.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only run cases with this priority or lower
    #[arg(short = 'p', long)]
    max_priority: Option<u8>,

    /// Only run these suites or cases (repeatable)
    #[arg(short, long)]
    include: Vec<String>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// List selected cases without running them
    #[arg(long)]
    list: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config_path = args.config.unwrap_or_else(RunConfig::default_path);
    let mut run_config = RunConfig::load(&config_path)?;
    if args.max_priority.is_some() {
        run_config.max_priority = args.max_priority;
    }
    if !args.include.is_empty() {
        run_config.include = args.include;
    }

    let runner = SuiteRunner::new(testsuites::all(), run_config);

    if args.list {
        for (suite, case) in runner.case_names() {
            println!("{}.{}", suite, case);
        }
        return Ok(());
    }

    let executor_config = ExecutorConfig::from_env();
    info!(
        timeout_secs = executor_config.constraints.timeout_secs,
        shell = %executor_config.shell,
        cases = runner.case_count(),
        "Configuration loaded"
    );

    let registry = Arc::new(Registry::builtin());
    let mut node = Node::new(
        "localhost",
        Arc::new(LocalRunner::new(&executor_config)),
        registry,
    );

    let results = runner.run_node(&node).await;
    node.close().await;

    let summary = RunSummary::from_results(&results);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for result in &results {
            match &result.message {
                Some(message) => println!(
                    "{:<8} {}.{}: {}",
                    result.state, result.suite, result.case, message
                ),
                None => println!("{:<8} {}.{}", result.state, result.suite, result.case),
            }
        }
        println!("{}", summary);
    }

    if !summary.is_success() {
        process::exit(1);
    }
    Ok(())
}
