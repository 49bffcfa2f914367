//! Arc layout for ring entries.
//!
//! Each entry gets an `amount` (fraction of a full turn) and an `offset` (where
//! the arc starts, also as a fraction). Offsets accumulate across the whole ring
//! including fillers, so entries stay aligned with their ancestors.

use bundlescope_core::{Ring, RingNodeId, Rings};

/// Placement of one ring entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub node: RingNodeId,
    pub depth: usize,
    pub amount: f64,
    pub offset: f64,
    /// Fillers reserve space but are not drawn.
    pub filler: bool,
}

impl Segment {
    /// Midpoint of the arc as a fraction of a full turn.
    pub fn midpoint(&self) -> f64 {
        lerp(self.offset, self.offset + self.amount, 0.5)
    }
}

/// Lay out every ring.
///
/// Without a selection each entry spans `total / root total`. With a selection,
/// entries in the selected chain span `total / selected total` and everything
/// else collapses to zero.
pub fn layout(rings: &Rings<'_>, selected: Option<RingNodeId>) -> Vec<Vec<Segment>> {
    rings
        .iter()
        .map(|ring| layout_ring(rings, ring, selected))
        .collect()
}

/// Lay out a single ring.
pub fn layout_ring(
    rings: &Rings<'_>,
    ring: &Ring<'_>,
    selected: Option<RingNodeId>,
) -> Vec<Segment> {
    let selected_total = selected.map(|id| rings.node(id).total());
    let mut offset = 0.0;

    ring.children()
        .iter()
        .map(|&id| {
            let node = rings.node(id);
            let amount = match (selected, selected_total) {
                (Some(sel), Some(sel_total)) if rings.is_in_chain(id, sel) => {
                    share(node.total(), sel_total)
                }
                (Some(_), _) => 0.0,
                _ => share(node.total(), ring.total()),
            };

            let segment = Segment {
                node: id,
                depth: ring.depth(),
                amount,
                offset,
                filler: node.is_filler(),
            };
            offset += amount;
            segment
        })
        .collect()
}

fn share(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
