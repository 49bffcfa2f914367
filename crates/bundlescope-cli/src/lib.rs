//! bundlescope command-line interface.
//!
pub mod input;
pub mod options;
pub mod output;
pub mod pipeline;
pub mod profile;

use std::path::PathBuf;

use tracing::info;

use bundlescope_core::Result;

pub use input::{BundleStats, ChunkSource, OutputItem};
pub use options::{FormatArg, GraphArgs, SizeArg};
pub use output::write_output;
pub use pipeline::{build_bundle_graph, process_stats};
pub use profile::profile_phase;

/// Options for running bundlescope.
#[derive(Debug, Clone, Default)]
pub struct BundlescopeOptions {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub format: FormatArg,
    pub size: SizeArg,
    pub graph: GraphArgs,
}

/// Main entry point: read the stats dump and render the report.
pub fn run_main(opts: &BundlescopeOptions) -> Result<String> {
    info!(input = %opts.input.display(), "Loading bundle stats");
    let stats = BundleStats::load(&opts.input)?;
    process_stats(opts, &stats)
}
