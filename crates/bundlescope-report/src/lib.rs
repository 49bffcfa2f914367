//! Report rendering for bundlescope.
//!
//! Consumes a module tree, derives its rings and turns them into one of the
//! output formats.
//!
//! # Module Structure
//!
//! - [`layout`]: arc amount/offset per ring entry
//! - [`palette`]: precomputed segment colours
//! - [`size`]: size selection and unit formatting
//! - [`svg`]: static chart rendering
//! - [`html`]: self-contained `stats.html` page
//! - [`json`]: tree and ring snapshot serialization

pub mod html;
pub mod json;
pub mod layout;
pub mod palette;
pub mod size;
pub mod svg;

use std::time::Instant;

use tracing::info;

use bundlescope_core::{ModuleNode, Result, RingOption, get_rings_with};

pub use layout::{Segment, layout, layout_ring};
pub use palette::ColorMap;
pub use size::{FormattedSize, SizeKind, format_size};
pub use svg::{ChartOptions, render_svg};

// ============================================================================
// Public API
// ============================================================================

/// Output format of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// `stats.html` with the graph embedded and the chart inline
    #[default]
    Html,
    /// The module tree as JSON
    Json,
    /// The ring snapshot as JSON
    Rings,
    /// The chart alone
    Svg,
}

/// Options for report rendering.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub format: ReportFormat,
    pub rings: RingOption,
    pub size_kind: SizeKind,
}

/// Render `root` in the requested format.
pub fn render_report(root: &ModuleNode, options: &ReportOptions) -> Result<String> {
    if options.format == ReportFormat::Json {
        return json::graph_json(root);
    }

    let rings_start = Instant::now();
    let rings = get_rings_with(root, &options.rings);
    info!(
        rings = rings.len(),
        root = rings.root().id(),
        "Ring normalization: {:.2}s",
        rings_start.elapsed().as_secs_f64()
    );

    if options.format == ReportFormat::Rings {
        return json::rings_json(&rings);
    }

    let colors = ColorMap::new(&rings);
    let chart = ChartOptions {
        size_kind: options.size_kind,
        selected: None,
    };
    let svg = render_svg(&rings, &colors, &chart);

    if options.format == ReportFormat::Svg {
        return Ok(svg);
    }

    let size = format_size(options.size_kind.of(rings.root()));
    let size_label = format!("{} {}", options.size_kind.label(), size);
    Ok(html::build_template(
        &json::graph_json(root)?,
        &svg,
        "Full Build",
        &size_label,
    ))
}
