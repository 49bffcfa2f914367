//! Static SVG rendering of a ring set.

use std::f64::consts::PI;
use std::fmt::Write;

use bundlescope_core::{RingNodeId, Rings};

use crate::layout::{Segment, layout};
use crate::palette::ColorMap;
use crate::size::{SizeKind, format_size};

/// Ring radius by depth below the selected ring.
pub const RADII: [f64; 9] = [15.0, 23.0, 27.5, 30.0, 31.5, 33.0, 34.5, 36.0, 37.5];

/// Stroke width by depth below the selected ring.
pub const WIDTHS: [f64; 10] = [10.0, 5.0, 3.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0];

const FALLBACK_RADIUS: f64 = 7.0;
const FALLBACK_WIDTH: f64 = 5.0;
const CENTER: f64 = 50.0;

/// Gap left between neighbouring arcs, as a fraction of a turn.
const ARC_GAP: f64 = 0.001;

/// Options for chart rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartOptions {
    pub size_kind: SizeKind,
    /// Zoom onto this entry's chain.
    pub selected: Option<RingNodeId>,
}

/// Escape text for XML content and attribute values.
pub fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn write_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push_str("  ");
    }
}

/// Builder for the chart's SVG markup.
pub struct SvgBuilder {
    output: String,
    indent: usize,
}

impl SvgBuilder {
    /// Open an `<svg>` element with the given view box.
    pub fn new(class: &str, view_box: &str) -> Self {
        let mut output = String::with_capacity(4096);
        let _ = writeln!(
            output,
            r#"<svg xmlns="http://www.w3.org/2000/svg" class="{}" viewBox="{}">"#,
            escape_xml(class),
            escape_xml(view_box)
        );
        Self { output, indent: 1 }
    }

    pub fn start_group(&mut self, class: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, r#"<g class="{}">"#, escape_xml(class));
        self.indent += 1;
        self
    }

    pub fn end_group(&mut self) -> &mut Self {
        self.indent -= 1;
        write_indent(&mut self.output, self.indent);
        self.output.push_str("</g>\n");
        self
    }

    /// Add a stroked, unfilled path with a hover title.
    pub fn arc(&mut self, d: &str, stroke: &str, stroke_width: f64, title: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(
            self.output,
            r#"<path d="{}" stroke="{}" stroke-width="{}" fill="none"><title>{}</title></path>"#,
            d,
            escape_xml(stroke),
            stroke_width,
            escape_xml(title)
        );
        self
    }

    /// Add the two-line centre label (value above, unit below).
    pub fn center_label(&mut self, value: &str, unit: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(
            self.output,
            r##"<text x="50%" y="50%" fill="#fff" text-anchor="middle" font-weight="100" letter-spacing="-0.03em" dominant-baseline="middle"><tspan x="50%" dy="-0.2em" font-size="6">{}</tspan><tspan x="50%" dy="1.3em" font-size="4">{}</tspan></text>"##,
            escape_xml(value),
            escape_xml(unit)
        );
        self
    }

    /// Finish building and return the SVG string.
    pub fn build(mut self) -> String {
        self.output.push_str("</svg>\n");
        self.output
    }
}

/// Render the ring chart.
pub fn render_svg(rings: &Rings<'_>, colors: &ColorMap, options: &ChartOptions) -> String {
    let selected_depth = options
        .selected
        .and_then(|id| rings.depth_of(id))
        .unwrap_or(0);

    let mut svg = SvgBuilder::new("chart", "0 0 100 100");
    for segments in layout(rings, options.selected) {
        let Some(depth) = segments.first().map(|s| s.depth) else {
            continue;
        };
        let level = depth.checked_sub(selected_depth);
        let radius = level.and_then(|i| RADII.get(i)).copied().unwrap_or(FALLBACK_RADIUS);
        let width = level.and_then(|i| WIDTHS.get(i)).copied().unwrap_or(FALLBACK_WIDTH);

        svg.start_group("package");
        for segment in segments.iter().filter(|s| is_drawn(s)) {
            let stroke = colors.get(segment.node).unwrap_or("#888");
            let title = rings.represented(segment.node).name();
            svg.arc(
                &arc_path(segment.amount - ARC_GAP, segment.offset, radius),
                stroke,
                width,
                title,
            );
        }
        svg.end_group();
    }

    let current = options
        .selected
        .map(|id| rings.represented(id))
        .unwrap_or_else(|| rings.root());
    let size = format_size(options.size_kind.of(current));
    svg.center_label(&size.value.to_string(), size.unit);

    svg.build()
}

fn is_drawn(segment: &Segment) -> bool {
    !segment.filler && segment.amount > 0.0
}

/// SVG arc path for a segment starting at the top of the chart.
///
/// `width` and `offset` are fractions of a full turn, clamped to `[0, 1]`.
pub fn arc_path(width: f64, offset: f64, radius: f64) -> String {
    let width = width.clamp(0.0, 1.0);
    let offset = offset.clamp(0.0, 1.0);

    let start_angle = offset * 360.0 - 90.0;
    let sweep_angle = width * 360.0;
    let end_angle = start_angle + sweep_angle;

    let (start_x, start_y) = polar_to_cartesian(radius, start_angle);
    let (end_x, end_y) = polar_to_cartesian(radius, end_angle);
    let large_arc = if sweep_angle > 180.0 { 1 } else { 0 };

    format!("M {start_x} {start_y} A {radius} {radius} 0 {large_arc} 1 {end_x} {end_y}")
}

fn polar_to_cartesian(radius: f64, degrees: f64) -> (f64, f64) {
    let radians = degrees * PI / 180.0;
    (
        round3(CENTER + radius * radians.cos()),
        round3(CENTER + radius * radians.sin()),
    )
}

fn round3(value: f64) -> f64 {
    let rounded = (value * 1000.0).round() / 1000.0;
    // avoid "-0" in path data
    if rounded == 0.0 { 0.0 } else { rounded }
}
