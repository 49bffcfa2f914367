use serde::Serialize;

use crate::option::GraphOption;

/// One resolved module (or a merged synthetic root) with its aggregated sizes.
///
/// Only [`ModuleNode::new`] builds one, and it is never mutated afterwards.
/// `total` is the module's own `size` plus the size of every transitive
/// descendant, and the compressed totals are `total` scaled by the configured
/// ratios.
///
/// Serializes to the shape the chart consumes:
/// `{ id, name, size, total, totalGzip, totalBrotli, children }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleNode {
    id: String,
    name: String,
    size: u64,
    total: u64,
    total_gzip: u64,
    total_brotli: u64,
    children: Vec<ModuleNode>,
}

impl ModuleNode {
    /// Create a node, computing its totals from `size` and `children`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        size: u64,
        children: Vec<ModuleNode>,
        option: &GraphOption,
    ) -> Self {
        let total = size + flat_deps(&children).map(ModuleNode::size).sum::<u64>();
        Self {
            id: id.into(),
            name: name.into(),
            size,
            total,
            total_gzip: scale(total, option.gzip_ratio),
            total_brotli: scale(total, option.brotli_ratio),
            children,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn total_gzip(&self) -> u64 {
        self.total_gzip
    }

    pub fn total_brotli(&self) -> u64 {
        self.total_brotli
    }

    pub fn children(&self) -> &[ModuleNode] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Pre-order walk over every transitive descendant, excluding `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        flat_deps(&self.children)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.descendants().count()
    }
}

/// Pre-order iterator returned by [`ModuleNode::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a ModuleNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a ModuleNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Flatten a children list into `[child, ...descendants(child)]` for each child.
fn flat_deps(children: &[ModuleNode]) -> Descendants<'_> {
    Descendants {
        stack: children.iter().rev().collect(),
    }
}

/// `round(total * ratio)`, rounding halves up.
fn scale(total: u64, ratio: f64) -> u64 {
    (total as f64 * ratio).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: &str, size: u64) -> ModuleNode {
        ModuleNode::new(id, id, size, Vec::new(), &GraphOption::default())
    }

    #[test]
    fn test_totals_cover_transitive_sizes() {
        let option = GraphOption::default();
        let c = leaf("c", 30);
        let b = ModuleNode::new("b", "b", 20, vec![c], &option);
        let a = ModuleNode::new("a", "a", 10, vec![b], &option);

        assert_eq!(a.total(), 60);
        assert_eq!(a.children()[0].total(), 50);
        assert_eq!(a.children()[0].children()[0].total(), 30);
    }

    #[test]
    fn test_compressed_totals_round() {
        let option = GraphOption::new().with_gzip_ratio(0.5).with_brotli_ratio(0.25);
        let node = ModuleNode::new("x", "x", 7, Vec::new(), &option);

        // 3.5 rounds up, 1.75 rounds to 2
        assert_eq!(node.total_gzip(), 4);
        assert_eq!(node.total_brotli(), 2);
    }

    #[test]
    fn test_descendants_preorder() {
        let option = GraphOption::default();
        let a = ModuleNode::new(
            "a",
            "a",
            1,
            vec![
                ModuleNode::new("b", "b", 1, vec![leaf("c", 1)], &option),
                leaf("d", 1),
            ],
            &option,
        );

        let ids: Vec<&str> = a.descendants().map(ModuleNode::id).collect();
        assert_eq!(ids, vec!["b", "c", "d"]);
        assert_eq!(a.node_count(), 4);
        assert!(!a.is_leaf());
        assert!(a.children()[1].is_leaf());
    }

    #[test]
    fn test_serialized_shape() {
        let node = leaf("/app/src/a.js", 100);
        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(json["id"], "/app/src/a.js");
        assert_eq!(json["total"], 100);
        assert_eq!(json["totalGzip"], 38);
        assert_eq!(json["totalBrotli"], 30);
        assert!(json["children"].as_array().unwrap().is_empty());
        assert!(json.get("total_gzip").is_none());
    }
}
