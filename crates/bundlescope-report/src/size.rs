//! Byte-size selection and formatting.

use std::fmt;

use bundlescope_core::ModuleNode;

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Which total a chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeKind {
    Raw,
    #[default]
    Gzip,
    Brotli,
}

impl SizeKind {
    pub fn of(&self, node: &ModuleNode) -> u64 {
        match self {
            SizeKind::Raw => node.total(),
            SizeKind::Gzip => node.total_gzip(),
            SizeKind::Brotli => node.total_brotli(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SizeKind::Raw => "Raw",
            SizeKind::Gzip => "Gzip",
            SizeKind::Brotli => "Brotli",
        }
    }
}

/// A size scaled to its largest fitting unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattedSize {
    pub value: u64,
    pub unit: &'static str,
}

impl fmt::Display for FormattedSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Scale `size` to the largest binary unit it reaches, rounding the value.
pub fn format_size(size: u64) -> FormattedSize {
    for (i, unit) in UNITS.iter().enumerate().rev() {
        let scale = 1u64 << (i * 10);
        if size >= scale {
            let value = (size as f64 / scale as f64).round() as u64;
            return FormattedSize { value, unit: *unit };
        }
    }
    FormattedSize {
        value: size,
        unit: UNITS[0],
    }
}
