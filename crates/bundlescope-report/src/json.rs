//! JSON output: the module tree and the flattened ring snapshot.

use serde::Serialize;

use bundlescope_core::{Error, ModuleNode, Result, RingNodeId, Rings};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RingView<'a> {
    id: &'a str,
    name: &'a str,
    size: u64,
    total: u64,
    total_gzip: u64,
    total_brotli: u64,
    children: Vec<EntryView<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EntryView<'a> {
    id: &'a str,
    name: &'a str,
    size: u64,
    total: u64,
    total_gzip: u64,
    total_brotli: u64,
    /// Id of the module behind the parent entry.
    parent: &'a str,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    filler: bool,
}

fn entry_view<'a>(rings: &Rings<'a>, id: RingNodeId) -> EntryView<'a> {
    let node = rings.node(id);
    let module = rings.represented(id);
    let parent = node
        .parent()
        .map(|parent| rings.represented(parent).id())
        .unwrap_or_default();

    EntryView {
        id: module.id(),
        name: module.name(),
        size: module.size(),
        total: node.total(),
        total_gzip: module.total_gzip(),
        total_brotli: module.total_brotli(),
        parent,
        filler: node.is_filler(),
    }
}

/// Serialize the module tree as pretty JSON.
pub fn graph_json(root: &ModuleNode) -> Result<String> {
    serde_json::to_string_pretty(root).map_err(|e| {
        Error::serialization_failed(e.to_string())
            .with_operation("json::graph_json")
            .set_source(e)
    })
}

/// Serialize the ring sequence as pretty JSON.
///
/// Fillers repeat the fields of the module they pad and carry `"filler": true`.
pub fn rings_json(rings: &Rings<'_>) -> Result<String> {
    let views: Vec<RingView<'_>> = rings
        .iter()
        .map(|ring| RingView {
            id: ring.id(),
            name: ring.name(),
            size: ring.size(),
            total: ring.total(),
            total_gzip: ring.total_gzip(),
            total_brotli: ring.total_brotli(),
            children: ring
                .children()
                .iter()
                .map(|id| entry_view(rings, *id))
                .collect(),
        })
        .collect();

    serde_json::to_string_pretty(&views).map_err(|e| {
        Error::serialization_failed(e.to_string())
            .with_operation("json::rings_json")
            .set_source(e)
    })
}
