use std::collections::HashMap;

use bundlescope_core::{
    GraphOption, MemorySource, ModuleNode, RingNode, RingNodeId, RingOption, Rings, build_graph,
    exclude_top, get_rings, ring_depth,
};
use pretty_assertions::assert_eq;

fn option() -> GraphOption {
    GraphOption::new()
        .with_gzip_ratio(0.5)
        .with_brotli_ratio(0.25)
        .with_ignored(Vec::<String>::new())
}

fn worked_example() -> ModuleNode {
    let source = MemorySource::new()
        .with_module("entry", 0, ["a", "c"])
        .with_module("a", 100, ["b"])
        .with_module("b", 50, Vec::<String>::new())
        .with_module("c", 200, Vec::<String>::new());
    build_graph("entry", &source, &option()).unwrap()
}

/// entry -> { app -> { big -> { x, y }, small }, vendor -> { lib -> { deep } }, tiny }
fn uneven_tree() -> ModuleNode {
    let source = MemorySource::new()
        .with_module("entry", 2, ["app", "vendor", "tiny"])
        .with_module("app", 40, ["big", "small"])
        .with_module("big", 30, ["x", "y"])
        .with_module("x", 12, Vec::<String>::new())
        .with_module("y", 12, Vec::<String>::new())
        .with_module("small", 8, Vec::<String>::new())
        .with_module("vendor", 20, ["lib"])
        .with_module("lib", 25, ["deep"])
        .with_module("deep", 33, Vec::<String>::new())
        .with_module("tiny", 1, Vec::<String>::new());
    build_graph("entry", &source, &option()).unwrap()
}

fn label(rings: &Rings<'_>, id: RingNodeId) -> String {
    match rings.node(id) {
        RingNode::Module { node, .. } => node.id().to_string(),
        RingNode::Filler { parent, .. } => format!("filler({})", label(rings, *parent)),
    }
}

fn labels(rings: &Rings<'_>, depth: usize) -> Vec<String> {
    rings.rings()[depth]
        .children()
        .iter()
        .map(|id| label(rings, *id))
        .collect()
}

#[test]
fn worked_example_rings() {
    let root = worked_example();
    let rings = get_rings(&root);

    assert_eq!(rings.len(), 2);
    assert_eq!(labels(&rings, 0), vec!["c", "a"]);
    assert_eq!(labels(&rings, 1), vec!["filler(c)", "b"]);

    let filler = rings.rings()[1].children()[0];
    assert!(rings.node(filler).is_filler());
    assert_eq!(rings.node(filler).total(), 200);
    assert!(rings.node(filler).module().is_none());
}

#[test]
fn ring_count_matches_depth_and_scalars_match_root() {
    let root = uneven_tree();
    let rings = get_rings(&root);
    let effective = rings.root();

    assert_eq!(rings.len(), ring_depth(effective));
    for (depth, ring) in rings.iter().enumerate() {
        assert_eq!(ring.depth(), depth);
        assert_eq!(ring.id(), effective.id());
        assert_eq!(ring.name(), effective.name());
        assert_eq!(ring.size(), effective.size());
        assert_eq!(ring.total(), effective.total());
        assert_eq!(ring.total_gzip(), effective.total_gzip());
        assert_eq!(ring.total_brotli(), effective.total_brotli());
    }
}

#[test]
fn deeper_rings_pad_leaves_with_fillers() {
    let root = uneven_tree();
    let rings = get_rings(&root);

    assert_eq!(rings.len(), 3);
    assert_eq!(labels(&rings, 0), vec!["app", "vendor", "tiny"]);
    assert_eq!(labels(&rings, 1), vec!["big", "small", "lib", "filler(tiny)"]);
    assert_eq!(
        labels(&rings, 2),
        vec![
            "x",
            "y",
            "filler(small)",
            "deep",
            "filler(filler(tiny))"
        ]
    );
}

#[test]
fn layers_are_sorted_within_each_parent() {
    let root = uneven_tree();
    let rings = get_rings(&root);

    for ring in &rings {
        let mut by_parent: HashMap<Option<RingNodeId>, Vec<u64>> = HashMap::new();
        for id in ring.children() {
            let node = rings.node(*id);
            by_parent.entry(node.parent()).or_default().push(node.total());
        }
        for totals in by_parent.values() {
            assert!(totals.windows(2).all(|w| w[0] >= w[1]), "unsorted: {totals:?}");
        }
    }

    // ring 0 has one parent, so the whole layer is non-increasing
    let first: Vec<u64> = rings.rings()[0]
        .children()
        .iter()
        .map(|id| rings.node(*id).total())
        .collect();
    assert!(first.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn ties_keep_import_order() {
    let source = MemorySource::new()
        .with_module("entry", 0, ["first", "second", "third"])
        .with_module("first", 10, Vec::<String>::new())
        .with_module("second", 10, Vec::<String>::new())
        .with_module("third", 10, Vec::<String>::new());
    let root = build_graph("entry", &source, &option()).unwrap();
    let rings = get_rings(&root);

    assert_eq!(labels(&rings, 0), vec!["first", "second", "third"]);
}

#[test]
fn coverage_is_conserved_across_rings() {
    let root = uneven_tree();
    let rings = get_rings(&root);

    // Every node's share is the sum of its ring-children's shares plus its own
    // size; fillers keep the whole share.
    for pair in rings.rings().windows(2) {
        let (upper, lower) = (&pair[0], &pair[1]);
        for parent in upper.children() {
            let parent_node = rings.node(*parent);
            let below: u64 = lower
                .children()
                .iter()
                .filter(|id| rings.parent(**id) == Some(*parent))
                .map(|id| rings.node(*id).total())
                .sum();
            let own = match parent_node {
                RingNode::Module { node, .. } if !node.is_leaf() => node.size(),
                _ => 0,
            };
            assert_eq!(below + own, parent_node.total(), "parent {}", label(&rings, *parent));
        }
    }

    // and the represented totals never grow with depth
    let sums: Vec<u64> = rings
        .iter()
        .map(|ring| ring.children().iter().map(|id| rings.node(*id).total()).sum())
        .collect();
    assert!(sums.windows(2).all(|w| w[0] >= w[1]), "{sums:?}");
}

#[test]
fn every_ring_entry_has_exactly_one_parent_in_previous_layer() {
    let root = uneven_tree();
    let rings = get_rings(&root);

    for id in rings.rings()[0].children() {
        assert_eq!(rings.parent(*id), Some(RingNodeId::ROOT));
    }
    for pair in rings.rings().windows(2) {
        for id in pair[1].children() {
            let parent = rings.parent(*id).unwrap();
            assert!(pair[0].children().contains(&parent));
        }
    }
}

#[test]
fn single_path_prefix_is_removed() {
    let source = MemorySource::new()
        .with_module("bootstrap", 1, ["runtime"])
        .with_module("runtime", 1, ["app"])
        .with_module("app", 10, ["a", "b"])
        .with_module("a", 50, Vec::<String>::new())
        .with_module("b", 40, Vec::<String>::new());
    let root = build_graph("bootstrap", &source, &option()).unwrap();
    let rings = get_rings(&root);

    assert_eq!(rings.root().id(), "app");
    assert_eq!(rings.len(), 1);
    assert_eq!(labels(&rings, 0), vec!["a", "b"]);
    // the promoted root keeps its own aggregated total
    assert_eq!(rings.rings()[0].total(), 100);
}

#[test]
fn root_simplification_is_idempotent() {
    let trees = [worked_example(), uneven_tree()];
    let ring_option = RingOption::default();
    for tree in &trees {
        let once = exclude_top(tree, &ring_option);
        let twice = exclude_top(once, &ring_option);
        assert!(std::ptr::eq(once, twice));
    }
}

#[test]
fn dominant_child_chain_is_promoted() {
    let source = MemorySource::new()
        .with_module("entry", 0, ["noise", "app"])
        .with_module("noise", 1, Vec::<String>::new())
        .with_module("app", 500, ["x", "y"])
        .with_module("x", 300, Vec::<String>::new())
        .with_module("y", 200, Vec::<String>::new());
    let root = build_graph("entry", &source, &option()).unwrap();

    let rings = get_rings(&root);
    assert_eq!(rings.root().id(), "app");
    assert_eq!(labels(&rings, 0), vec!["x", "y"]);
}
