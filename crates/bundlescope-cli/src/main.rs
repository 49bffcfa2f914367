use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[cfg(target_env = "msvc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use bundlescope_cli::{BundlescopeOptions, FormatArg, GraphArgs, SizeArg, run_main, write_output};
use bundlescope_core::Result;

#[derive(Parser, Debug)]
#[command(
    name = "bundlescope",
    about = "bundlescope: see what your bundle is made of",
    version
)]
pub struct Cli {
    /// Bundle stats dump (JSON) written by the bundler's output hook
    #[arg(value_name = "STATS")]
    input: PathBuf,

    /// Report format
    #[arg(long, value_enum, default_value_t = FormatArg::Html)]
    format: FormatArg,

    /// Size shown in the chart centre
    #[arg(long, value_enum, default_value_t = SizeArg::Gzip)]
    size: SizeArg,

    #[command(flatten)]
    graph: GraphArgs,

    /// Output file path (writes to file instead of stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,
}

pub fn run(args: Cli) -> Result<()> {
    let total_start = Instant::now();

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let opts = BundlescopeOptions {
        input: args.input,
        output: args.output,
        format: args.format,
        size: args.size,
        graph: args.graph,
    };

    let result = run_main(&opts).and_then(|report| write_output(opts.output.as_deref(), &report));
    if let Err(e) = &result {
        tracing::error!(error = %e, "execution failed");
    }

    let total_secs = total_start.elapsed().as_secs_f64();
    tracing::info!(total_secs, "complete");
    if opts.output.is_some() {
        eprintln!("Total time: {total_secs:.2}s");
    }
    result
}

pub fn main() -> Result<()> {
    let args = Cli::parse();
    run(args)
}
