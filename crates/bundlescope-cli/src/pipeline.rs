//! Core processing pipeline: load stats → build entry graphs → merge → render.

use std::time::Instant;

use tracing::{debug, info, warn};

use bundlescope_core::{
    Error, GraphOption, ModuleNode, Result, build_entry_graph, merge_roots,
};
use bundlescope_report::{ReportOptions, render_report};

use crate::BundlescopeOptions;
use crate::input::{BundleStats, ChunkSource, OutputItem};
use crate::profile::profile_phase;

/// Build one graph per entry chunk and merge them.
///
/// Entries whose facade module has no record are skipped with a warning.
/// Fails with [`ErrorKind::MissingGraphData`](bundlescope_core::ErrorKind::MissingGraphData)
/// when no entry chunk yields a graph.
pub fn build_bundle_graph(stats: &BundleStats, option: &GraphOption) -> Result<ModuleNode> {
    let mut roots = Vec::new();

    for item in &stats.output {
        let chunk = match item {
            OutputItem::Chunk(chunk) if chunk.is_entry => chunk,
            OutputItem::Chunk(chunk) => {
                debug!(chunk = %chunk.file_name, "skipping non-entry chunk");
                continue;
            }
            OutputItem::Asset(asset) => {
                debug!(asset = %asset.file_name, "skipping asset");
                continue;
            }
        };

        let Some(facade) = chunk.facade_module_id.as_deref() else {
            warn!(chunk = %chunk.file_name, "entry chunk has no facade module");
            continue;
        };

        let source = ChunkSource::new(chunk, &stats.module_info);
        match build_entry_graph(facade, &source, option) {
            Ok(root) => roots.push(root),
            Err(e) if e.is_skippable() => {
                warn!(chunk = %chunk.file_name, error = %e, "skipping entry chunk");
            }
            Err(e) => return Err(e),
        }
    }

    info!("Built {} entry graph(s)", roots.len());
    merge_roots(roots, option).ok_or_else(|| {
        Error::missing_graph_data("no entry chunk produced a module graph")
            .with_operation("pipeline::build_bundle_graph")
    })
}

/// Run the full pipeline for one stats dump and return the rendered report.
pub fn process_stats(opts: &BundlescopeOptions, stats: &BundleStats) -> Result<String> {
    let config = opts.graph.resolve()?;

    let graph_start = Instant::now();
    let root = profile_phase("graph", || build_bundle_graph(stats, &config.graph))?;
    info!(
        nodes = root.node_count(),
        total = root.total(),
        "Graph building: {:.2}s",
        graph_start.elapsed().as_secs_f64()
    );

    let render_start = Instant::now();
    let report_options = ReportOptions {
        format: opts.format.into(),
        rings: config.rings,
        size_kind: opts.size.into(),
    };
    let output = profile_phase("render", || render_report(&root, &report_options))?;
    info!(
        "Report rendering: {:.2}s",
        render_start.elapsed().as_secs_f64()
    );

    Ok(output)
}
