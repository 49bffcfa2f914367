//! Dependency-size graph construction and ring normalization.
//!
//! - [`graph`]: builds a [`ModuleNode`] tree from raw module/import records,
//!   aggregating sizes bottom-up
//! - [`ring`]: flattens a tree into per-depth [`Ring`]s for a radial chart
//! - [`option`]: compression ratios, ignore-list and promotion threshold

pub mod graph;
pub mod node;
pub mod option;
pub mod ring;
pub mod source;

pub use bundlescope_error::{Error, ErrorKind, Result};
pub use graph::{build_entry_graph, build_graph, merge_roots};
pub use node::{Descendants, ModuleNode};
pub use option::{
    BROTLI_RATIO, Config, GZIP_RATIO, GraphOption, IGNORED, MAIN_NODE_THRESHOLD, RingOption,
};
pub use ring::{
    Ring, RingNode, RingNodeId, Rings, exclude_top, get_rings, get_rings_with, main_node,
    ring_depth,
};
pub use source::{MemorySource, ModuleSource, RawModule};
