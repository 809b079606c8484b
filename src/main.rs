use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_forest::{util::LevelFilter, ForestLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use spmat::{args::Args, load_matrix, save_matrix, SparseResult};

fn run(args: &Args) -> SparseResult<()> {
    let first = load_matrix(&args.first)?;
    let second = load_matrix(&args.second)?;

    let result = args.operation.apply(&first, &second)?;

    println!("\nResult of {}:", args.operation.name());
    print!("{}", result);

    if let Some(output) = &args.output {
        save_matrix(output, &result)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    Registry::default()
        .with(env_filter)
        .with(ForestLayer::default())
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
