//! # Pane tree algebra
//!
//! The workbench layout is a tree of panes: leaves show a tile, splits divide
//! their area between two or more children along one axis. This module holds
//! the tree types and the pure functions that edit them.
//!
//! Trees are never mutated in place. Every edit returns a new root and copies
//! only the nodes on the path to the edited node; untouched subtrees are
//! shared with the previous tree through [`Arc`]. An edit that changes
//! nothing returns the very same `Arc`, so callers can detect no-ops with
//! [`Arc::ptr_eq`].
//!
//! Invariants kept by every edit:
//! - every split has at least two children;
//! - a split has exactly one size entry per child;
//! - the percentage entries of a split that lost a child sum to 100 again;
//! - pane ids are unique within the tree.
//!
//! # Example
//!
//! ```rust
//! use workbench_core::tree::{self, PaneNode};
//! use workbench_core::ids::SequentialIdGenerator;
//! use workbench_core::DropPosition;
//!
//! let mut ids = SequentialIdGenerator::new("n");
//! let root = PaneNode::leaf("editor", "query");
//!
//! let root = tree::insert_tile(&root, "editor", DropPosition::Right, "table", &mut ids)?;
//! assert_eq!(root.leaf_count(), 2);
//!
//! let root = tree::remove_pane(&root, "editor").expect("one pane left");
//! assert!(root.is_leaf());
//! # Ok::<(), workbench_core::Error>(())
//! ```

use crate::ids::{IdGenerator, PaneId};
use crate::size::{self, SizeSpec, FULL_PERCENT, PERCENT_TOLERANCE};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, trace};
use workbench_tile_api::{DropPosition, SplitDirection};

/// A node of the layout tree.
///
/// Serialized with a `type` tag, matching the layout literals embedding
/// applications write by hand:
///
/// ```rust
/// use workbench_core::tree::PaneNode;
///
/// let root = PaneNode::from_json(r#"{
///     "type": "split", "id": "root", "dir": "h", "sizes": [{"px": 240}, 100],
///     "children": [
///         {"type": "leaf", "id": "nav", "specId": "navigator"},
///         {"type": "leaf", "id": "main", "specId": "query"}
///     ]
/// }"#)?;
/// assert_eq!(root.leaf_count(), 2);
/// # Ok::<(), workbench_core::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PaneNode {
    /// Content slot showing one tile
    Leaf(LeafPane),
    /// Container dividing its area between children
    Split(SplitPane),
}

/// A pane showing the tile named by `spec_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeafPane {
    pub id: PaneId,
    /// Opaque tile identifier, resolved by the tile registry
    pub spec_id: String,
}

/// A pane dividing its area between its children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitPane {
    pub id: PaneId,
    pub dir: SplitDirection,
    pub children: Vec<Arc<PaneNode>>,
    /// One entry per child, positionally aligned with `children`
    pub sizes: Vec<SizeSpec>,
}

impl SplitPane {
    /// Whether the split can be resized by dragging its handles.
    ///
    /// Splits with fixed pixel tracks are laid out as is.
    pub fn is_resizable(&self) -> bool {
        !size::has_pixel_sizes(&self.sizes)
    }

    /// Resolve child lengths for a container of `available` pixels.
    pub fn resolve_lengths(&self, available: f64) -> Vec<f64> {
        size::resolve_lengths(&self.sizes, available)
    }
}

impl PaneNode {
    /// Create a shared leaf node.
    pub fn leaf<I: Into<PaneId>, S: Into<String>>(id: I, spec_id: S) -> Arc<PaneNode> {
        Arc::new(PaneNode::Leaf(LeafPane {
            id: id.into(),
            spec_id: spec_id.into(),
        }))
    }

    /// Create a shared split node.
    ///
    /// No invariant is checked; see [`validate`].
    pub fn split<I: Into<PaneId>>(
        id: I,
        dir: SplitDirection,
        sizes: Vec<SizeSpec>,
        children: Vec<Arc<PaneNode>>,
    ) -> Arc<PaneNode> {
        Arc::new(PaneNode::Split(SplitPane {
            id: id.into(),
            dir,
            children,
            sizes,
        }))
    }

    /// Parse a layout literal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the literal is not a well-formed pane tree.
    /// Structural invariants are not checked.
    pub fn from_json(json: &str) -> Result<Arc<PaneNode>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Id of this node.
    pub fn id(&self) -> &PaneId {
        match self {
            PaneNode::Leaf(leaf) => &leaf.id,
            PaneNode::Split(split) => &split.id,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, PaneNode::Leaf(_))
    }

    pub fn is_split(&self) -> bool {
        matches!(self, PaneNode::Split(_))
    }

    pub fn as_leaf(&self) -> Option<&LeafPane> {
        match self {
            PaneNode::Leaf(leaf) => Some(leaf),
            PaneNode::Split(_) => None,
        }
    }

    pub fn as_split(&self) -> Option<&SplitPane> {
        match self {
            PaneNode::Split(split) => Some(split),
            PaneNode::Leaf(_) => None,
        }
    }

    /// Direct children; empty for a leaf.
    pub fn children(&self) -> &[Arc<PaneNode>] {
        match self {
            PaneNode::Split(split) => &split.children,
            PaneNode::Leaf(_) => &[],
        }
    }

    /// Iterate over the leaves of this subtree, depth first, left to right.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves { stack: vec![self] }
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// Tile ids shown by the leaves of this subtree, in layout order.
    pub fn spec_ids(&self) -> Vec<&str> {
        self.leaves().map(|leaf| leaf.spec_id.as_str()).collect()
    }

    /// Ids of every node in this subtree, parents before children.
    pub fn collect_ids(&self) -> Vec<PaneId> {
        let mut ids = Vec::new();
        self.collect_ids_into(&mut ids);
        ids
    }

    fn collect_ids_into(&self, ids: &mut Vec<PaneId>) {
        ids.push(self.id().clone());
        for child in self.children() {
            child.collect_ids_into(ids);
        }
    }

    /// Number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(|c| c.node_count()).sum::<usize>()
    }

    /// Number of levels; a lone leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(|c| c.depth()).max().unwrap_or(0)
    }
}

/// Depth-first iterator over leaf panes.
pub struct Leaves<'a> {
    stack: Vec<&'a PaneNode>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a LeafPane;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                PaneNode::Leaf(leaf) => return Some(leaf),
                PaneNode::Split(split) => {
                    self.stack.extend(split.children.iter().rev().map(|c| c.as_ref()));
                }
            }
        }
        None
    }
}

/// Result of placing a tile into a tree.
#[derive(Debug, Clone)]
pub struct Placement {
    /// The new tree
    pub tree: Arc<PaneNode>,
    /// Pane now showing the tile, or `None` if the target was not found
    pub pane_id: Option<PaneId>,
}

/// Find the node with the given id.
///
/// Returns the node inside the tree itself, not a copy.
///
/// # Example
///
/// ```rust
/// use workbench_core::tree::{self, PaneNode};
/// use workbench_core::{SizeSpec, SplitDirection};
/// use std::sync::Arc;
///
/// let b = PaneNode::leaf("b", "table");
/// let root = PaneNode::split(
///     "root",
///     SplitDirection::Horizontal,
///     SizeSpec::percentages(&[50.0, 50.0]),
///     vec![PaneNode::leaf("a", "query"), Arc::clone(&b)],
/// );
///
/// assert!(Arc::ptr_eq(tree::find_pane(&root, "b").unwrap(), &b));
/// assert!(tree::find_pane(&root, "missing").is_none());
/// ```
pub fn find_pane<'a>(tree: &'a Arc<PaneNode>, id: &str) -> Option<&'a Arc<PaneNode>> {
    if tree.id().as_str() == id {
        return Some(tree);
    }
    tree.children().iter().find_map(|child| find_pane(child, id))
}

/// Find the split whose direct children include `id`.
///
/// Returns `None` for the root and for unknown ids.
pub fn find_parent<'a>(tree: &'a PaneNode, id: &str) -> Option<&'a SplitPane> {
    let split = tree.as_split()?;
    for child in &split.children {
        if child.id().as_str() == id {
            return Some(split);
        }
        if let Some(found) = find_parent(child, id) {
            return Some(found);
        }
    }
    None
}

/// Locate a node and the child indices leading to it from the root.
fn locate<'a>(tree: &'a Arc<PaneNode>, id: &str) -> Option<(Vec<usize>, &'a Arc<PaneNode>)> {
    let mut path = Vec::new();
    let node = locate_into(tree, id, &mut path)?;
    path.reverse();
    Some((path, node))
}

fn locate_into<'a>(
    tree: &'a Arc<PaneNode>,
    id: &str,
    path: &mut Vec<usize>,
) -> Option<&'a Arc<PaneNode>> {
    if tree.id().as_str() == id {
        return Some(tree);
    }
    for (index, child) in tree.children().iter().enumerate() {
        if let Some(found) = locate_into(child, id, path) {
            path.push(index);
            return Some(found);
        }
    }
    None
}

/// Copy the nodes along `path`, putting `replacement` at its end.
///
/// Siblings off the path are shared with the old tree.
fn rebuild(tree: &Arc<PaneNode>, path: &[usize], replacement: Arc<PaneNode>) -> Arc<PaneNode> {
    let Some((&index, rest)) = path.split_first() else {
        return replacement;
    };
    let PaneNode::Split(split) = tree.as_ref() else {
        return Arc::clone(tree);
    };
    let mut children = split.children.clone();
    if let Some(slot) = children.get_mut(index) {
        *slot = rebuild(&split.children[index], rest, replacement);
    }
    Arc::new(PaneNode::Split(SplitPane {
        id: split.id.clone(),
        dir: split.dir,
        children,
        sizes: split.sizes.clone(),
    }))
}

/// Insert a tile relative to the pane `target_id`.
///
/// An edge position replaces the target with a new two-child split holding
/// the target and a fresh leaf, sized 50/50; `Left` and `Top` put the new
/// leaf first. `Center` keeps the target leaf and its id, and only swaps its
/// `spec_id`. An unknown target leaves the tree unchanged.
///
/// # Errors
///
/// Returns [`Error::CenterDropOnSplit`] for a center drop onto a split: only
/// leaves show a tile that can be replaced.
///
/// # Example
///
/// ```rust
/// use workbench_core::tree::{self, PaneNode};
/// use workbench_core::ids::SequentialIdGenerator;
/// use workbench_core::{DropPosition, SplitDirection};
///
/// let mut ids = SequentialIdGenerator::new("n");
/// let root = PaneNode::leaf("target", "old");
///
/// let root = tree::insert_tile(&root, "target", DropPosition::Left, "new", &mut ids)?;
/// let split = root.as_split().unwrap();
/// assert_eq!(split.dir, SplitDirection::Horizontal);
/// assert_eq!(root.spec_ids(), vec!["new", "old"]);
/// # Ok::<(), workbench_core::Error>(())
/// ```
pub fn insert_tile(
    tree: &Arc<PaneNode>,
    target_id: &str,
    position: DropPosition,
    new_spec_id: &str,
    ids: &mut dyn IdGenerator,
) -> Result<Arc<PaneNode>> {
    place_tile(tree, target_id, position, new_spec_id, ids).map(|placement| placement.tree)
}

/// Same as [`insert_tile`], also reporting which pane shows the tile.
pub fn place_tile(
    tree: &Arc<PaneNode>,
    target_id: &str,
    position: DropPosition,
    new_spec_id: &str,
    ids: &mut dyn IdGenerator,
) -> Result<Placement> {
    let Some((path, target)) = locate(tree, target_id) else {
        debug!("Insert target '{}' not found, layout unchanged", target_id);
        return Ok(Placement {
            tree: Arc::clone(tree),
            pane_id: None,
        });
    };

    let (replacement, pane_id) = match position.split_direction() {
        None => match target.as_ref() {
            PaneNode::Leaf(leaf) => {
                let replaced = Arc::new(PaneNode::Leaf(LeafPane {
                    id: leaf.id.clone(),
                    spec_id: new_spec_id.to_string(),
                }));
                (replaced, leaf.id.clone())
            }
            PaneNode::Split(split) => {
                return Err(Error::center_drop_on_split(split.id.as_str()));
            }
        },
        Some(dir) => {
            let leaf_id = ids.next_id();
            let new_leaf = PaneNode::leaf(leaf_id.clone(), new_spec_id);
            let children = if position.inserts_first() {
                vec![new_leaf, Arc::clone(target)]
            } else {
                vec![Arc::clone(target), new_leaf]
            };
            let split = Arc::new(PaneNode::Split(SplitPane {
                id: ids.next_id(),
                dir,
                children,
                sizes: size::even_split(2),
            }));
            (split, leaf_id)
        }
    };

    trace!(
        "Placed '{}' {} of '{}' as pane '{}'",
        new_spec_id,
        position.display_name(),
        target_id,
        pane_id
    );
    Ok(Placement {
        tree: rebuild(tree, &path, replacement),
        pane_id: Some(pane_id),
    })
}

/// Outcome of removing a node from a subtree.
enum Removal {
    /// The id is not in this subtree
    Unchanged,
    /// The whole subtree is gone
    Removed,
    /// The subtree must be replaced by this node
    Replaced(Arc<PaneNode>),
}

/// Remove the pane `pane_id` and everything below it.
///
/// Removing the root empties the workbench and returns `None`. Otherwise the
/// pane is dropped from its parent together with its size entry. A parent
/// left with a single child collapses and that child takes its place; a
/// parent left with two or more children has its percentage sizes rescaled
/// to sum to 100, pixel sizes untouched. An unknown id returns the tree
/// unchanged.
///
/// # Example
///
/// ```rust
/// use workbench_core::tree::{self, PaneNode};
/// use workbench_core::{SizeSpec, SplitDirection};
///
/// let root = PaneNode::split(
///     "root",
///     SplitDirection::Horizontal,
///     vec![SizeSpec::Pixels(100), SizeSpec::Percentage(50.0), SizeSpec::Percentage(50.0)],
///     vec![PaneNode::leaf("a", "x"), PaneNode::leaf("b", "y"), PaneNode::leaf("c", "z")],
/// );
///
/// let root = tree::remove_pane(&root, "b").unwrap();
/// let split = root.as_split().unwrap();
/// assert_eq!(split.sizes, vec![SizeSpec::Pixels(100), SizeSpec::Percentage(100.0)]);
/// ```
pub fn remove_pane(tree: &Arc<PaneNode>, pane_id: &str) -> Option<Arc<PaneNode>> {
    if tree.id().as_str() == pane_id {
        debug!("Removed root pane '{}', layout is empty", pane_id);
        return None;
    }

    match remove_from(tree, pane_id) {
        Removal::Unchanged => {
            debug!("Pane '{}' not found, layout unchanged", pane_id);
            Some(Arc::clone(tree))
        }
        Removal::Removed => None,
        Removal::Replaced(node) => Some(node),
    }
}

fn remove_from(node: &Arc<PaneNode>, id: &str) -> Removal {
    let split = match node.as_ref() {
        PaneNode::Leaf(leaf) if leaf.id.as_str() == id => return Removal::Removed,
        PaneNode::Leaf(_) => return Removal::Unchanged,
        PaneNode::Split(split) if split.id.as_str() == id => return Removal::Removed,
        PaneNode::Split(split) => split,
    };

    let mut children = Vec::with_capacity(split.children.len());
    let mut sizes = Vec::with_capacity(split.sizes.len());
    let mut changed = false;
    let mut lost_child = false;

    for (index, child) in split.children.iter().enumerate() {
        let size = split.sizes.get(index).copied();
        // Ids are unique, so nothing after the first change can match.
        let outcome = if changed {
            Removal::Unchanged
        } else {
            remove_from(child, id)
        };
        match outcome {
            Removal::Unchanged => {
                children.push(Arc::clone(child));
                sizes.extend(size);
            }
            Removal::Removed => {
                changed = true;
                lost_child = true;
            }
            Removal::Replaced(replacement) => {
                changed = true;
                children.push(replacement);
                sizes.extend(size);
            }
        }
    }

    if !changed {
        return Removal::Unchanged;
    }

    if children.len() <= 1 {
        return match children.pop() {
            Some(survivor) => {
                trace!("Split '{}' collapsed into '{}'", split.id, survivor.id());
                Removal::Replaced(survivor)
            }
            None => Removal::Removed,
        };
    }

    if lost_child {
        size::normalize_percentages(&mut sizes);
    }

    Removal::Replaced(Arc::new(PaneNode::Split(SplitPane {
        id: split.id.clone(),
        dir: split.dir,
        children,
        sizes,
    })))
}

/// Move the leaf `source_id` next to (or onto) the pane `target_id`.
///
/// The source leaf is removed, with the usual collapsing, and its tile is
/// inserted at the target under a freshly minted id. The tree is returned
/// unchanged when source and target are the same, when the source is missing
/// or is a split, or when the source is the only pane. If the target cannot be
/// found once the source is gone (it was never in the tree, or it was the
/// source's collapsed parent), the tree without the source is returned.
///
/// # Errors
///
/// Returns [`Error::CenterDropOnSplit`] for a center drop onto a split,
/// before anything is removed.
///
/// # Example
///
/// ```rust
/// use workbench_core::tree::{self, PaneNode};
/// use workbench_core::ids::SequentialIdGenerator;
/// use workbench_core::{DropPosition, SizeSpec, SplitDirection};
/// use std::sync::Arc;
///
/// let mut ids = SequentialIdGenerator::new("n");
/// let root = PaneNode::split(
///     "root",
///     SplitDirection::Horizontal,
///     SizeSpec::percentages(&[50.0, 50.0]),
///     vec![PaneNode::leaf("a", "query"), PaneNode::leaf("b", "table")],
/// );
///
/// let same = tree::move_pane(&root, "a", "a", DropPosition::Right, &mut ids)?;
/// assert!(Arc::ptr_eq(&same, &root));
///
/// let moved = tree::move_pane(&root, "a", "b", DropPosition::Bottom, &mut ids)?;
/// assert!(tree::find_pane(&moved, "a").is_none());
/// assert_eq!(moved.spec_ids(), vec!["table", "query"]);
/// # Ok::<(), workbench_core::Error>(())
/// ```
pub fn move_pane(
    tree: &Arc<PaneNode>,
    source_id: &str,
    target_id: &str,
    position: DropPosition,
    ids: &mut dyn IdGenerator,
) -> Result<Arc<PaneNode>> {
    relocate_tile(tree, source_id, target_id, position, ids).map(|placement| placement.tree)
}

/// Same as [`move_pane`], also reporting which pane now shows the tile.
///
/// `pane_id` is `None` whenever the tile was not re-inserted.
pub fn relocate_tile(
    tree: &Arc<PaneNode>,
    source_id: &str,
    target_id: &str,
    position: DropPosition,
    ids: &mut dyn IdGenerator,
) -> Result<Placement> {
    let unchanged = || Placement {
        tree: Arc::clone(tree),
        pane_id: None,
    };

    if source_id == target_id {
        return Ok(unchanged());
    }

    let Some(spec_id) = find_pane(tree, source_id)
        .and_then(|node| node.as_leaf())
        .map(|leaf| leaf.spec_id.clone())
    else {
        debug!("Move source '{}' is not a leaf in the layout", source_id);
        return Ok(unchanged());
    };

    if let Some(target) = find_pane(tree, target_id) {
        if position == DropPosition::Center && target.is_split() {
            return Err(Error::center_drop_on_split(target_id));
        }
    }

    let Some(without_source) = remove_pane(tree, source_id) else {
        return Ok(unchanged());
    };

    if find_pane(&without_source, target_id).is_none() {
        debug!(
            "Move target '{}' not found after removing '{}'",
            target_id, source_id
        );
        return Ok(Placement {
            tree: without_source,
            pane_id: None,
        });
    }

    place_tile(&without_source, target_id, position, &spec_id, ids)
}

/// Replace the sizes of the split `split_id`.
///
/// The values are stored as given; matching them to the number of children
/// is up to the caller. Unknown ids and leaf ids leave the tree unchanged.
///
/// # Example
///
/// ```rust
/// use workbench_core::tree::{self, PaneNode};
/// use workbench_core::{SizeSpec, SplitDirection};
/// use std::sync::Arc;
///
/// let root = PaneNode::split(
///     "root",
///     SplitDirection::Vertical,
///     SizeSpec::percentages(&[50.0, 50.0]),
///     vec![PaneNode::leaf("a", "x"), PaneNode::leaf("b", "y")],
/// );
///
/// let resized = tree::update_sizes(&root, "root", SizeSpec::percentages(&[30.0, 70.0]));
/// assert_eq!(resized.as_split().unwrap().sizes, SizeSpec::percentages(&[30.0, 70.0]));
///
/// let untouched = tree::update_sizes(&root, "a", SizeSpec::percentages(&[30.0, 70.0]));
/// assert!(Arc::ptr_eq(&untouched, &root));
/// ```
pub fn update_sizes(tree: &Arc<PaneNode>, split_id: &str, new_sizes: Vec<SizeSpec>) -> Arc<PaneNode> {
    let Some((path, node)) = locate(tree, split_id) else {
        return Arc::clone(tree);
    };
    let PaneNode::Split(split) = node.as_ref() else {
        return Arc::clone(tree);
    };

    let resized = Arc::new(PaneNode::Split(SplitPane {
        id: split.id.clone(),
        dir: split.dir,
        children: split.children.clone(),
        sizes: new_sizes,
    }));
    rebuild(tree, &path, resized)
}

/// Check the structural invariants of a tree.
///
/// # Errors
///
/// Returns [`Error::InvalidLayout`] naming the first offending pane.
pub fn validate(tree: &PaneNode) -> Result<()> {
    validate_with_tolerance(tree, PERCENT_TOLERANCE)
}

/// [`validate`] with an explicit tolerance for percentage sums.
pub fn validate_with_tolerance(tree: &PaneNode, tolerance: f64) -> Result<()> {
    let mut seen = HashSet::new();
    validate_node(tree, tolerance, &mut seen)
}

fn validate_node<'a>(
    node: &'a PaneNode,
    tolerance: f64,
    seen: &mut HashSet<&'a str>,
) -> Result<()> {
    let id = node.id().as_str();
    if !seen.insert(id) {
        return Err(Error::invalid_layout(id, "duplicate pane id"));
    }

    let Some(split) = node.as_split() else {
        return Ok(());
    };

    if split.children.len() < 2 {
        return Err(Error::invalid_layout(
            id,
            format!("split has {} children, expected at least 2", split.children.len()),
        ));
    }
    if split.sizes.len() != split.children.len() {
        return Err(Error::invalid_layout(
            id,
            format!(
                "split has {} sizes for {} children",
                split.sizes.len(),
                split.children.len()
            ),
        ));
    }
    if split.sizes.iter().any(SizeSpec::is_percentage) {
        let sum = size::percentage_sum(&split.sizes);
        if (sum - FULL_PERCENT).abs() > tolerance {
            return Err(Error::invalid_layout(
                id,
                format!("percentage sizes sum to {}, expected {}", sum, FULL_PERCENT),
            ));
        }
    }

    for child in &split.children {
        validate_node(child, tolerance, seen)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIdGenerator;

    fn pct(values: &[f64]) -> Vec<SizeSpec> {
        SizeSpec::percentages(values)
    }

    fn two_up() -> Arc<PaneNode> {
        PaneNode::split(
            "root",
            SplitDirection::Horizontal,
            pct(&[50.0, 50.0]),
            vec![PaneNode::leaf("a", "spec-a"), PaneNode::leaf("b", "spec-b")],
        )
    }

    fn nested() -> Arc<PaneNode> {
        PaneNode::split(
            "root",
            SplitDirection::Horizontal,
            pct(&[50.0, 50.0]),
            vec![
                PaneNode::split(
                    "left",
                    SplitDirection::Vertical,
                    pct(&[50.0, 50.0]),
                    vec![PaneNode::leaf("a", "spec-a"), PaneNode::leaf("b", "spec-b")],
                ),
                PaneNode::leaf("right", "spec-right"),
            ],
        )
    }

    #[test]
    fn test_find_pane_returns_node_in_tree() {
        let tree = nested();
        let left = &tree.children()[0];
        assert!(Arc::ptr_eq(find_pane(&tree, "left").unwrap(), left));
        assert!(Arc::ptr_eq(find_pane(&tree, "root").unwrap(), &tree));
        assert!(find_pane(&tree, "nope").is_none());
    }

    #[test]
    fn test_find_parent() {
        let tree = nested();
        assert_eq!(find_parent(&tree, "a").unwrap().id, "left");
        assert_eq!(find_parent(&tree, "left").unwrap().id, "root");
        assert!(find_parent(&tree, "root").is_none());
        assert!(find_parent(&tree, "nope").is_none());
    }

    #[test]
    fn test_locate_path() {
        let tree = nested();
        let (path, node) = locate(&tree, "b").unwrap();
        assert_eq!(path, vec![0, 1]);
        assert_eq!(node.id(), "b");
    }

    #[test]
    fn test_edit_shares_untouched_siblings() {
        let tree = nested();
        let mut ids = SequentialIdGenerator::new("n");
        let edited = insert_tile(&tree, "a", DropPosition::Top, "new", &mut ids).unwrap();

        assert!(Arc::ptr_eq(&edited.children()[1], &tree.children()[1]));
        assert!(!Arc::ptr_eq(&edited.children()[0], &tree.children()[0]));
    }

    #[test]
    fn test_insert_unknown_target_is_identity() {
        let tree = two_up();
        let mut ids = SequentialIdGenerator::new("n");
        let result = place_tile(&tree, "ghost", DropPosition::Left, "x", &mut ids).unwrap();
        assert!(Arc::ptr_eq(&result.tree, &tree));
        assert!(result.pane_id.is_none());
        assert_eq!(ids.issued(), 0);
    }

    #[test]
    fn test_center_on_split_is_rejected() {
        let tree = nested();
        let mut ids = SequentialIdGenerator::new("n");
        let err = insert_tile(&tree, "left", DropPosition::Center, "x", &mut ids).unwrap_err();
        assert!(matches!(err, Error::CenterDropOnSplit { ref id } if id == "left"));
    }

    #[test]
    fn test_center_keeps_id_and_reports_it() {
        let tree = two_up();
        let mut ids = SequentialIdGenerator::new("n");
        let placed = place_tile(&tree, "b", DropPosition::Center, "fresh", &mut ids).unwrap();
        assert_eq!(placed.pane_id.as_ref().unwrap(), "b");
        assert_eq!(placed.tree.spec_ids(), vec!["spec-a", "fresh"]);
        assert_eq!(ids.issued(), 0);
    }

    #[test]
    fn test_remove_unknown_is_identity() {
        let tree = nested();
        let result = remove_pane(&tree, "ghost").unwrap();
        assert!(Arc::ptr_eq(&result, &tree));
    }

    #[test]
    fn test_remove_inner_split_removes_subtree() {
        let tree = nested();
        let result = remove_pane(&tree, "left").unwrap();
        assert_eq!(result.id(), "right");
    }

    #[test]
    fn test_remove_keeps_sizes_above_collapse() {
        let tree = PaneNode::split(
            "root",
            SplitDirection::Horizontal,
            pct(&[20.0, 80.0]),
            vec![
                PaneNode::leaf("x", "spec-x"),
                PaneNode::split(
                    "inner",
                    SplitDirection::Vertical,
                    pct(&[50.0, 50.0]),
                    vec![PaneNode::leaf("a", "spec-a"), PaneNode::leaf("b", "spec-b")],
                ),
            ],
        );

        let result = remove_pane(&tree, "b").unwrap();
        let split = result.as_split().unwrap();
        assert_eq!(split.sizes, pct(&[20.0, 80.0]));
        assert_eq!(split.children[1].id(), "a");
    }

    #[test]
    fn test_move_split_source_is_identity() {
        let tree = nested();
        let mut ids = SequentialIdGenerator::new("n");
        let result = move_pane(&tree, "left", "right", DropPosition::Left, &mut ids).unwrap();
        assert!(Arc::ptr_eq(&result, &tree));
    }

    #[test]
    fn test_move_to_missing_target_drops_source() {
        let tree = nested();
        let mut ids = SequentialIdGenerator::new("n");
        let placement = relocate_tile(&tree, "a", "ghost", DropPosition::Left, &mut ids).unwrap();

        assert!(placement.pane_id.is_none());
        assert!(find_pane(&placement.tree, "a").is_none());
        assert_eq!(placement.tree.spec_ids(), vec!["spec-b", "spec-right"]);
        assert!(validate(&placement.tree).is_ok());
    }

    #[test]
    fn test_center_move_to_missing_target_drops_source() {
        let tree = nested();
        let mut ids = SequentialIdGenerator::new("n");
        let result = move_pane(&tree, "b", "ghost", DropPosition::Center, &mut ids).unwrap();

        assert!(find_pane(&result, "b").is_none());
        assert_eq!(result.spec_ids(), vec!["spec-a", "spec-right"]);
    }

    #[test]
    fn test_move_into_collapsing_parent_drops_source() {
        let tree = nested();
        let mut ids = SequentialIdGenerator::new("n");
        let placement = relocate_tile(&tree, "a", "left", DropPosition::Top, &mut ids).unwrap();

        assert!(placement.pane_id.is_none());
        assert_eq!(placement.tree.spec_ids(), vec!["spec-b", "spec-right"]);
        assert!(validate(&placement.tree).is_ok());
    }

    #[test]
    fn test_move_center_onto_leaf_replaces_tile() {
        let tree = nested();
        let mut ids = SequentialIdGenerator::new("n");
        let result = move_pane(&tree, "a", "right", DropPosition::Center, &mut ids).unwrap();

        assert_eq!(result.spec_ids(), vec!["spec-b", "spec-a"]);
        assert_eq!(find_pane(&result, "right").unwrap().as_leaf().unwrap().spec_id, "spec-a");
    }

    #[test]
    fn test_move_center_onto_split_is_rejected() {
        let tree = nested();
        let mut ids = SequentialIdGenerator::new("n");
        let err = move_pane(&tree, "right", "left", DropPosition::Center, &mut ids).unwrap_err();
        assert!(err.is_rejected_edit());
    }

    #[test]
    fn test_update_sizes_unknown_is_identity() {
        let tree = nested();
        let result = update_sizes(&tree, "ghost", pct(&[10.0, 90.0]));
        assert!(Arc::ptr_eq(&result, &tree));
    }

    #[test]
    fn test_tree_queries() {
        let tree = nested();
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.spec_ids(), vec!["spec-a", "spec-b", "spec-right"]);
        let ids: Vec<String> = tree.collect_ids().into_iter().map(|id| id.to_string()).collect();
        assert_eq!(ids, vec!["root", "left", "a", "b", "right"]);
    }

    #[test]
    fn test_split_resizable() {
        let fixed = PaneNode::split(
            "s",
            SplitDirection::Horizontal,
            vec![SizeSpec::Pixels(200), SizeSpec::Percentage(100.0)],
            vec![PaneNode::leaf("a", "x"), PaneNode::leaf("b", "y")],
        );
        assert!(!fixed.as_split().unwrap().is_resizable());
        assert!(two_up().as_split().unwrap().is_resizable());
        assert_eq!(fixed.as_split().unwrap().resolve_lengths(1000.0), vec![200.0, 800.0]);
    }

    #[test]
    fn test_validate_catches_violations() {
        let single = PaneNode::split(
            "s",
            SplitDirection::Horizontal,
            pct(&[100.0]),
            vec![PaneNode::leaf("a", "x")],
        );
        assert!(validate(&single).unwrap_err().is_invalid_layout());

        let mismatched = PaneNode::split(
            "s",
            SplitDirection::Horizontal,
            pct(&[100.0]),
            vec![PaneNode::leaf("a", "x"), PaneNode::leaf("b", "y")],
        );
        assert!(validate(&mismatched).is_err());

        let off_sum = PaneNode::split(
            "s",
            SplitDirection::Horizontal,
            pct(&[40.0, 40.0]),
            vec![PaneNode::leaf("a", "x"), PaneNode::leaf("b", "y")],
        );
        assert!(validate(&off_sum).is_err());

        let duplicate = PaneNode::split(
            "s",
            SplitDirection::Horizontal,
            pct(&[50.0, 50.0]),
            vec![PaneNode::leaf("a", "x"), PaneNode::leaf("a", "y")],
        );
        assert!(validate(&duplicate).is_err());

        assert!(validate(&nested()).is_ok());
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(two_up().as_ref()).unwrap();
        assert_eq!(json["type"], "split");
        assert_eq!(json["dir"], "h");
        assert_eq!(json["children"][0]["type"], "leaf");
        assert_eq!(json["children"][0]["specId"], "spec-a");

        let parsed = PaneNode::from_json(&json.to_string()).unwrap();
        assert_eq!(parsed, two_up());
    }
}
