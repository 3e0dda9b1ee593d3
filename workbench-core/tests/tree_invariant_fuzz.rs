//! Property/fuzz-style invariants for the pane tree algebra.
//!
//! Random operation streams are applied to a starting layout; after each
//! step the tree must stay structurally valid and every leaf must still be
//! accounted for.

use proptest::prelude::*;
use std::sync::Arc;
use workbench_core::ids::SequentialIdGenerator;
use workbench_core::size::{self, FULL_PERCENT};
use workbench_core::tree::{self, PaneNode};
use workbench_core::{DropPosition, Error, IdGenerator, PaneId, SizeSpec, SplitDirection};

#[derive(Debug, Clone)]
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self {
            state: seed ^ 0x9E37_79B9_7F4A_7C15,
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state
    }

    fn choose_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        (self.next_u64() % len as u64) as usize
    }

    fn next_weight(&mut self) -> f64 {
        1.0 + (self.next_u64() % 99) as f64
    }
}

fn starting_layout() -> Arc<PaneNode> {
    PaneNode::split(
        "root",
        SplitDirection::Horizontal,
        vec![SizeSpec::Pixels(240), SizeSpec::Percentage(100.0)],
        vec![
            PaneNode::leaf("nav", "navigator"),
            PaneNode::split(
                "work",
                SplitDirection::Vertical,
                SizeSpec::percentages(&[60.0, 40.0]),
                vec![PaneNode::leaf("editor", "query"), PaneNode::leaf("results", "table")],
            ),
        ],
    )
}

fn all_ids(tree: &PaneNode) -> Vec<PaneId> {
    tree.collect_ids()
}

fn leaf_ids(tree: &PaneNode) -> Vec<PaneId> {
    tree.leaves().map(|leaf| leaf.id.clone()).collect()
}

fn split_ids(tree: &PaneNode) -> Vec<PaneId> {
    all_ids(tree)
        .into_iter()
        .filter(|id| !leaf_ids(tree).contains(id))
        .collect()
}

fn random_position(rng: &mut Lcg) -> DropPosition {
    let positions = DropPosition::all();
    positions[rng.choose_index(positions.len())]
}

fn assert_tree_invariants(tree: &PaneNode) {
    tree::validate(tree).expect("tree should remain structurally valid");

    let ids = all_ids(tree);
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids.len(), "duplicate ids in {:?}", ids);

    let mut stack = vec![tree];
    while let Some(node) = stack.pop() {
        if let Some(split) = node.as_split() {
            assert!(split.children.len() >= 2);
            assert_eq!(split.children.len(), split.sizes.len());
            if split.sizes.iter().any(SizeSpec::is_percentage) {
                let sum = size::percentage_sum(&split.sizes);
                assert!((sum - FULL_PERCENT).abs() < 1e-6, "percentages sum to {}", sum);
            }
            stack.extend(split.children.iter().map(|c| c.as_ref()));
        }
    }
}

/// Apply one random operation, returning the next tree.
///
/// An emptied tree restarts from a single leaf.
fn random_step(tree: &Arc<PaneNode>, rng: &mut Lcg, ids: &mut SequentialIdGenerator) -> Arc<PaneNode> {
    let nodes = all_ids(tree);
    let leaves = leaf_ids(tree);
    let leaves_before = leaves.len();

    match rng.choose_index(4) {
        0 => {
            let target = &nodes[rng.choose_index(nodes.len())];
            let position = random_position(rng);
            match tree::insert_tile(tree, target.as_str(), position, "fuzz", ids) {
                Ok(next) => {
                    let expected = if position.is_edge() {
                        leaves_before + 1
                    } else {
                        leaves_before
                    };
                    assert_eq!(next.leaf_count(), expected);
                    next
                }
                Err(Error::CenterDropOnSplit { id }) => {
                    assert_eq!(position, DropPosition::Center);
                    assert_eq!(&id, target.as_str());
                    Arc::clone(tree)
                }
                Err(e) => panic!("unexpected insert error: {}", e),
            }
        }
        1 => {
            let target = &nodes[rng.choose_index(nodes.len())];
            match tree::remove_pane(tree, target.as_str()) {
                Some(next) => {
                    assert!(tree::find_pane(&next, target.as_str()).is_none());
                    next
                }
                None => PaneNode::leaf(ids.next_id(), "fresh"),
            }
        }
        2 => {
            let source = &leaves[rng.choose_index(leaves.len())];
            let target = &nodes[rng.choose_index(nodes.len())];
            let position = random_position(rng);
            match tree::move_pane(tree, source.as_str(), target.as_str(), position, ids) {
                Ok(next) => {
                    assert!(next.leaf_count() <= leaves_before);
                    next
                }
                Err(e) => {
                    assert!(e.is_rejected_edit());
                    Arc::clone(tree)
                }
            }
        }
        _ => {
            let splits = split_ids(tree);
            if splits.is_empty() {
                return Arc::clone(tree);
            }
            let split_id = &splits[rng.choose_index(splits.len())];
            let split = tree::find_pane(tree, split_id.as_str())
                .and_then(|node| node.as_split())
                .expect("split id should resolve");
            let mut sizes = split.sizes.clone();
            for size in sizes.iter_mut() {
                if size.is_percentage() {
                    *size = SizeSpec::Percentage(rng.next_weight());
                }
            }
            size::normalize_percentages(&mut sizes);
            tree::update_sizes(tree, split_id.as_str(), sizes)
        }
    }
}

fn run_sequence(seed: u64, steps: usize) -> Arc<PaneNode> {
    let mut tree = starting_layout();
    let mut rng = Lcg::new(seed);
    let mut ids = SequentialIdGenerator::new("fz");

    for _ in 0..steps {
        tree = random_step(&tree, &mut rng, &mut ids);
        assert_tree_invariants(&tree);
    }
    tree
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn random_operation_sequences_preserve_invariants(
        seed in any::<u64>(),
        steps in 20usize..120,
    ) {
        let tree = run_sequence(seed, steps);
        assert_tree_invariants(&tree);
    }

    #[test]
    fn move_onto_self_is_identity(seed in any::<u64>(), steps in 0usize..40) {
        let tree = run_sequence(seed, steps);
        let mut rng = Lcg::new(seed);
        let mut ids = SequentialIdGenerator::new("self");
        let leaves = leaf_ids(&tree);
        let id = &leaves[rng.choose_index(leaves.len())];

        for position in DropPosition::all() {
            let result = tree::move_pane(&tree, id.as_str(), id.as_str(), position, &mut ids).unwrap();
            prop_assert!(Arc::ptr_eq(&result, &tree));
        }
    }

    #[test]
    fn unknown_ids_are_identity(seed in any::<u64>(), steps in 0usize..40) {
        let tree = run_sequence(seed, steps);
        let mut ids = SequentialIdGenerator::new("ghost");

        let inserted = tree::insert_tile(&tree, "no-such-pane", DropPosition::Left, "x", &mut ids).unwrap();
        prop_assert!(Arc::ptr_eq(&inserted, &tree));

        let removed = tree::remove_pane(&tree, "no-such-pane").unwrap();
        prop_assert!(Arc::ptr_eq(&removed, &tree));

        let resized = tree::update_sizes(&tree, "no-such-pane", SizeSpec::percentages(&[1.0, 99.0]));
        prop_assert!(Arc::ptr_eq(&resized, &tree));
    }

    #[test]
    fn resolved_lengths_fill_container(
        weights in prop::collection::vec(0.0f64..100.0, 1..6),
        pixels in prop::collection::vec(0i64..300, 0..3),
        available in 1.0f64..4000.0,
    ) {
        let mut sizes: Vec<SizeSpec> = pixels.iter().copied().map(SizeSpec::Pixels).collect();
        sizes.extend(weights.iter().copied().map(SizeSpec::Percentage));

        let lengths = size::resolve_lengths(&sizes, available);
        let total: f64 = lengths.iter().sum();

        prop_assert_eq!(lengths.len(), sizes.len());
        prop_assert!(lengths.iter().all(|l| *l >= 0.0));
        prop_assert!((total - available).abs() < 1e-6 * available.max(1.0));
    }
}

#[test]
fn fuzz_seed_corpus_preserves_invariants() {
    let seeds = [0_u64, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144, u64::MAX - 1, u64::MAX];

    for seed in seeds {
        let tree = run_sequence(seed, 180);
        assert_tree_invariants(&tree);
    }
}
