//! Ring normalization.
//!
//! Turns a module tree into one [`Ring`] per depth level. Ring `k` lists every
//! node `k + 1` edges below the effective root, sorted by descending total
//! within each parent. Leaves that end above the deepest level are carried
//! down as [`RingNode::Filler`] entries so their angular share stays reserved
//! in every deeper ring.
//!
//! Ring nodes live in an arena owned by [`Rings`]; parent links are
//! [`RingNodeId`] indices into it.

use tracing::trace;

use crate::node::ModuleNode;
use crate::option::RingOption;

/// Index of a node in the [`Rings`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RingNodeId(u32);

impl RingNodeId {
    /// The effective root. It belongs to no ring but ends every parent chain.
    pub const ROOT: RingNodeId = RingNodeId(0);

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Entry in a ring layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingNode<'g> {
    /// A real module. Only the root has no parent.
    Module {
        node: &'g ModuleNode,
        parent: Option<RingNodeId>,
    },
    /// Placeholder spanning the full share of the node it pads.
    Filler { span: u64, parent: RingNodeId },
}

impl<'g> RingNode<'g> {
    pub fn parent(&self) -> Option<RingNodeId> {
        match self {
            RingNode::Module { parent, .. } => *parent,
            RingNode::Filler { parent, .. } => Some(*parent),
        }
    }

    /// Size this entry spans: the module total, or the padded node's total.
    pub fn total(&self) -> u64 {
        match self {
            RingNode::Module { node, .. } => node.total(),
            RingNode::Filler { span, .. } => *span,
        }
    }

    pub fn module(&self) -> Option<&'g ModuleNode> {
        match self {
            RingNode::Module { node, .. } => Some(node),
            RingNode::Filler { .. } => None,
        }
    }

    pub fn is_filler(&self) -> bool {
        matches!(self, RingNode::Filler { .. })
    }
}

/// One depth level of the chart.
///
/// The scalar accessors report the effective root's values, identical across
/// every ring of a [`Rings`].
#[derive(Debug, Clone)]
pub struct Ring<'g> {
    root: &'g ModuleNode,
    depth: usize,
    children: Vec<RingNodeId>,
}

impl<'g> Ring<'g> {
    pub fn root(&self) -> &'g ModuleNode {
        self.root
    }

    /// Zero-based ring index.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn children(&self) -> &[RingNodeId] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn id(&self) -> &'g str {
        self.root.id()
    }

    pub fn name(&self) -> &'g str {
        self.root.name()
    }

    pub fn size(&self) -> u64 {
        self.root.size()
    }

    pub fn total(&self) -> u64 {
        self.root.total()
    }

    pub fn total_gzip(&self) -> u64 {
        self.root.total_gzip()
    }

    pub fn total_brotli(&self) -> u64 {
        self.root.total_brotli()
    }
}

/// The ring sequence plus the arena its entries index into.
#[derive(Debug, Clone)]
pub struct Rings<'g> {
    root: &'g ModuleNode,
    nodes: Vec<RingNode<'g>>,
    rings: Vec<Ring<'g>>,
}

impl<'g> Rings<'g> {
    fn new(root: &'g ModuleNode) -> Self {
        Self {
            root,
            nodes: vec![RingNode::Module { node: root, parent: None }],
            rings: Vec::new(),
        }
    }

    fn alloc(&mut self, node: RingNode<'g>) -> RingNodeId {
        let id = RingNodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Children of `node` sorted by descending total, tagged with `parent`.
    fn map_children(&mut self, parent: RingNodeId, node: &'g ModuleNode) -> Vec<RingNodeId> {
        let mut children: Vec<&'g ModuleNode> = node.children().iter().collect();
        children.sort_by(|a, b| b.total().cmp(&a.total()));
        children
            .into_iter()
            .map(|child| {
                self.alloc(RingNode::Module {
                    node: child,
                    parent: Some(parent),
                })
            })
            .collect()
    }

    /// The effective root after prefix simplification.
    pub fn root(&self) -> &'g ModuleNode {
        self.root
    }

    pub fn rings(&self) -> &[Ring<'g>] {
        &self.rings
    }

    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ring<'g>> {
        self.rings.iter()
    }

    /// Look up an arena entry. Panics on an id from another `Rings`.
    pub fn node(&self, id: RingNodeId) -> &RingNode<'g> {
        &self.nodes[id.index()]
    }

    pub fn parent(&self, id: RingNodeId) -> Option<RingNodeId> {
        self.node(id).parent()
    }

    /// Parent chain of `id`, nearest first, ending at [`RingNodeId::ROOT`].
    pub fn ancestors(&self, id: RingNodeId) -> impl Iterator<Item = RingNodeId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    /// The module an entry stands for: itself, or the module a filler pads.
    pub fn represented(&self, id: RingNodeId) -> &'g ModuleNode {
        let mut current = id;
        loop {
            match self.node(current) {
                RingNode::Module { node, .. } => return node,
                RingNode::Filler { parent, .. } => current = *parent,
            }
        }
    }

    /// Ring index of an entry; `None` for the root.
    pub fn depth_of(&self, id: RingNodeId) -> Option<usize> {
        self.ancestors(id).count().checked_sub(1)
    }

    /// Whether `selected` is `id` or one of its ancestors.
    pub fn is_in_chain(&self, id: RingNodeId, selected: RingNodeId) -> bool {
        id == selected || self.ancestors(id).any(|ancestor| ancestor == selected)
    }
}

impl<'a, 'g> IntoIterator for &'a Rings<'g> {
    type Item = &'a Ring<'g>;
    type IntoIter = std::slice::Iter<'a, Ring<'g>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rings.iter()
    }
}

/// Flatten `root` into rings using the default options.
pub fn get_rings(root: &ModuleNode) -> Rings<'_> {
    get_rings_with(root, &RingOption::default())
}

/// Flatten `root` into rings.
///
/// Produces `max(ring_depth, 1)` rings: a root without children still yields
/// one (empty) ring.
pub fn get_rings_with<'g>(root: &'g ModuleNode, option: &RingOption) -> Rings<'g> {
    let root = exclude_top(root, option);
    let depth = ring_depth(root);

    let mut rings = Rings::new(root);
    let mut layer = rings.map_children(RingNodeId::ROOT, root);
    rings.rings.push(Ring {
        root,
        depth: 0,
        children: layer.clone(),
    });

    for level in 1..depth {
        let mut next = Vec::with_capacity(layer.len());
        for id in layer {
            let entry = *rings.node(id);
            match entry {
                RingNode::Module { node, .. } if !node.is_leaf() => {
                    next.extend(rings.map_children(id, node));
                }
                other => next.push(rings.alloc(RingNode::Filler {
                    span: other.total(),
                    parent: id,
                })),
            }
        }

        trace!(level, nodes = next.len(), "ring built");
        layer = next;
        rings.rings.push(Ring {
            root,
            depth: level,
            children: layer.clone(),
        });
    }

    rings
}

/// Repeatedly promote the main child until none qualifies.
pub fn exclude_top<'g>(mut node: &'g ModuleNode, option: &RingOption) -> &'g ModuleNode {
    while let Some(top) = main_node(node, option) {
        trace!(from = node.id(), to = top.id(), "promoting main node");
        node = top;
    }
    node
}

/// The child that should replace `node` as root, if any.
///
/// A sole child always qualifies. Among several children, one qualifies when it
/// is the only one whose total exceeds `main_node_threshold` of the children's
/// combined total.
pub fn main_node<'g>(node: &'g ModuleNode, option: &RingOption) -> Option<&'g ModuleNode> {
    match node.children() {
        [] => None,
        [only] => Some(only),
        children => {
            let sum: u64 = children.iter().map(ModuleNode::total).sum();
            if sum == 0 {
                return None;
            }

            let mut prime = children
                .iter()
                .filter(|child| child.total() as f64 / sum as f64 > option.main_node_threshold);
            match (prime.next(), prime.next()) {
                (Some(child), None) => Some(child),
                _ => None,
            }
        }
    }
}

/// Longest edge count from `node` down to a leaf.
pub fn ring_depth(node: &ModuleNode) -> usize {
    node.children()
        .iter()
        .map(|child| ring_depth(child) + 1)
        .max()
        .unwrap_or(0)
}
