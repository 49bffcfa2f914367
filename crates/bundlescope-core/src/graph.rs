//! Module graph construction.
//!
//! Walks the import relation depth-first from an entry module and realizes it
//! as a strict tree: a module imported along N different paths becomes N
//! independent nodes, and each copy counts toward its own ancestors' totals.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::node::ModuleNode;
use crate::option::GraphOption;
use crate::source::ModuleSource;
use crate::{Error, Result};

/// Prefix bundlers put on virtual (plugin-generated) module ids.
pub const VIRTUAL_MODULE_MARKER: char = '\0';

/// Id of the synthetic root that joins several entry graphs.
pub const MERGED_ROOT_ID: &str = "<bundle>";

/// Build the tree rooted at `module_id`.
///
/// Returns `None` when the module has no record in `source` or hits the
/// ignore-list; callers drop such subtrees.
pub fn build_graph<S>(module_id: &str, source: &S, option: &GraphOption) -> Option<ModuleNode>
where
    S: ModuleSource + ?Sized,
{
    let id = normalize_id(module_id);

    let Some(module) = source.module(id) else {
        trace!(id, "no module record, omitting subtree");
        return None;
    };

    if option.is_ignored(id) {
        debug!(id, "ignored module");
        return None;
    }

    let children: Vec<ModuleNode> = source
        .imported_ids(id)
        .iter()
        .filter_map(|imported| build_graph(imported, source, option))
        .collect();

    let name = display_name(id, option.base_dir.as_deref());
    Some(ModuleNode::new(
        id,
        name,
        module.rendered_length,
        children,
        option,
    ))
}

/// Build the tree for an entry chunk's facade module.
///
/// Fails with [`ErrorKind::MissingGraphRoot`](crate::ErrorKind::MissingGraphRoot)
/// when the entry itself is omitted.
pub fn build_entry_graph<S>(entry_id: &str, source: &S, option: &GraphOption) -> Result<ModuleNode>
where
    S: ModuleSource + ?Sized,
{
    let root = build_graph(entry_id, source, option).ok_or_else(|| {
        Error::missing_graph_root(normalize_id(entry_id))
            .with_operation("graph::build_entry_graph")
    })?;

    debug!(
        entry = root.id(),
        nodes = root.node_count(),
        total = root.total(),
        "entry graph built"
    );
    Ok(root)
}

/// Join entry graphs under one synthetic root.
///
/// A single root is returned unchanged; no roots yields `None`.
pub fn merge_roots(mut roots: Vec<ModuleNode>, option: &GraphOption) -> Option<ModuleNode> {
    match roots.len() {
        0 => None,
        1 => roots.pop(),
        _ => Some(ModuleNode::new(
            MERGED_ROOT_ID,
            MERGED_ROOT_ID,
            0,
            roots,
            option,
        )),
    }
}

/// Strip the virtual-module marker prefix.
pub fn normalize_id(id: &str) -> &str {
    id.strip_prefix(VIRTUAL_MODULE_MARKER).unwrap_or(id)
}

/// Drop a trailing `?query` (a lone trailing `?` is kept).
fn strip_query(id: &str) -> &str {
    match id.find('?') {
        Some(pos) if pos + 1 < id.len() => &id[..pos],
        _ => id,
    }
}

/// Display path for a module id, relative to `base_dir` when both are absolute.
pub fn display_name(id: &str, base_dir: Option<&Path>) -> String {
    let path = Path::new(strip_query(id));
    match base_dir {
        Some(base) if path.is_absolute() && base.is_absolute() => {
            relative_to(path, base).to_string_lossy().into_owned()
        }
        _ => path.to_string_lossy().into_owned(),
    }
}

fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path_parts: Vec<_> = path.components().collect();
    let base_parts: Vec<_> = base.components().collect();
    let common = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &path_parts[common..] {
        relative.push(part.as_os_str());
    }
    relative
}
