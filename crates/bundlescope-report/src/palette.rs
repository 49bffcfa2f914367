//! Segment colours, fixed once per ring set.

use std::collections::HashMap;

use bundlescope_core::{RingNodeId, Rings};

use crate::layout::{Segment, layout, lerp};

/// Colours keyed by ring entry. Fillers have none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorMap {
    colors: HashMap<RingNodeId, String>,
}

impl ColorMap {
    /// Colour every drawn entry by the hue at its unselected arc midpoint.
    pub fn new(rings: &Rings<'_>) -> Self {
        let colors = layout(rings, None)
            .iter()
            .flatten()
            .filter(|segment| !segment.filler)
            .map(|segment| (segment.node, segment_color(segment)))
            .collect();
        Self { colors }
    }

    pub fn get(&self, id: RingNodeId) -> Option<&str> {
        self.colors.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

fn segment_color(segment: &Segment) -> String {
    let hue = lerp(0.0, 360.0, segment.midpoint()).floor() as u32;
    format!("hsl({hue} 50% 50%)")
}
