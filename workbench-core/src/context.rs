//! # Workbench context
//!
//! [`WorkbenchContext`] owns the authoritative layout tree and the transient
//! state that sits on top of it while the user resizes panes.
//!
//! Resize handles report new sizes on every pointer move. Rewriting the tree
//! that often would invalidate every consumer holding the layout, so those
//! sizes go into an override map keyed by split id instead. Renderers read
//! sizes through [`get_sizes`](WorkbenchContext::get_sizes), which prefers an
//! override. On pointer-up the overrides are committed into the tree in one
//! go. Structural actions (add, remove, move) always flush pending overrides
//! first, so a drag in progress is never lost by a concurrent edit.
//!
//! ```text
//!            update_sizes             commit_sizes
//!   Idle ───────────────▶ Dragging ────────────────▶ Idle (tree updated)
//!                            │
//!                            └──── cancel_resize ──▶ Idle (overrides dropped)
//! ```

use crate::config::WorkbenchConfig;
use crate::events::{LayoutEvent, LayoutObserver, ObserverList};
use crate::ids::{IdGenerator, PaneId, UuidIdGenerator};
use crate::registry::TileRegistry;
use crate::size::{SizeSpec, PERCENT_TOLERANCE};
use crate::tree::{self, PaneNode};
use crate::{DropPosition, Error, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};
use uuid::Uuid;
use workbench_tile_api::TileSpec;

/// Progress of a resize gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeState {
    /// No size overrides are pending
    #[default]
    Idle,
    /// A handle is being dragged; overrides are pending
    Dragging,
}

/// Layout state shared by every pane of a workbench.
///
/// # Example
///
/// ```rust
/// use workbench_core::{DropPosition, PaneNode, SizeSpec, TileRegistry, WorkbenchContext};
/// use workbench_core::ids::SequentialIdGenerator;
///
/// let mut ctx = WorkbenchContext::with_id_generator(
///     Some(PaneNode::leaf("main", "query")),
///     TileRegistry::new(),
///     Box::new(SequentialIdGenerator::new("n")),
/// );
///
/// let added = ctx.add_tile("table", "main", DropPosition::Right)?;
/// assert_eq!(added.unwrap().as_str(), "n-1");
///
/// let split_id = ctx.layout().unwrap().id().clone();
/// ctx.update_sizes(split_id.as_str(), SizeSpec::percentages(&[30.0, 70.0]));
/// assert!(ctx.has_pending_sizes());
///
/// ctx.commit_sizes();
/// let split = ctx.layout().unwrap().as_split().unwrap().clone();
/// assert_eq!(split.sizes, SizeSpec::percentages(&[30.0, 70.0]));
/// # Ok::<(), workbench_core::Error>(())
/// ```
pub struct WorkbenchContext {
    /// Authoritative tree; `None` is an empty workbench
    layout: Option<Arc<PaneNode>>,
    /// Sizes written during a resize gesture, keyed by split id
    size_overrides: HashMap<PaneId, Vec<SizeSpec>>,
    registry: TileRegistry,
    ids: Box<dyn IdGenerator>,
    observers: ObserverList,
    resize_state: ResizeState,
    percent_tolerance: f64,
}

impl WorkbenchContext {
    /// Create a context minting random UUID pane ids.
    pub fn new(initial_layout: Option<Arc<PaneNode>>, registry: TileRegistry) -> Self {
        Self::with_id_generator(initial_layout, registry, Box::new(UuidIdGenerator::new()))
    }

    /// Create a context with a custom id generator.
    pub fn with_id_generator(
        initial_layout: Option<Arc<PaneNode>>,
        registry: TileRegistry,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        Self {
            layout: initial_layout,
            size_overrides: HashMap::new(),
            registry,
            ids,
            observers: ObserverList::new(),
            resize_state: ResizeState::Idle,
            percent_tolerance: PERCENT_TOLERANCE,
        }
    }

    /// Create a context from configuration.
    ///
    /// The id generator and validation tolerance come from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLayout`] when `layout.validate_initial` is set
    /// and the initial layout breaks a structural invariant.
    pub fn from_config(
        initial_layout: Option<Arc<PaneNode>>,
        registry: TileRegistry,
        config: &WorkbenchConfig,
    ) -> Result<Self> {
        let mut ctx = Self::with_id_generator(initial_layout, registry, config.id_generator());
        ctx.percent_tolerance = config.layout.percent_tolerance;
        if config.layout.validate_initial {
            ctx.validate()?;
        }
        Ok(ctx)
    }

    /// The authoritative layout tree, without pending overrides.
    pub fn layout(&self) -> Option<&Arc<PaneNode>> {
        self.layout.as_ref()
    }

    /// Check the layout against its structural invariants.
    ///
    /// An empty workbench is valid.
    pub fn validate(&self) -> Result<()> {
        match &self.layout {
            Some(layout) => tree::validate_with_tolerance(layout, self.percent_tolerance),
            None => Ok(()),
        }
    }

    /// Replace the whole layout, dropping pending overrides.
    pub fn replace_layout(&mut self, layout: Option<Arc<PaneNode>>) {
        info!(
            "Layout replaced ({} panes)",
            layout.as_ref().map_or(0, |l| l.leaf_count())
        );
        self.layout = layout;
        self.size_overrides.clear();
        self.resize_state = ResizeState::Idle;
    }

    /// Sizes to render for a split.
    ///
    /// Returns the pending override for `split_id` if there is one, else
    /// `default`, normally the split's own `sizes`.
    pub fn get_sizes<'a>(&'a self, split_id: &str, default: &'a [SizeSpec]) -> &'a [SizeSpec] {
        self.size_overrides
            .get(split_id)
            .map_or(default, |sizes| sizes.as_slice())
    }

    /// Record sizes reported by a resize handle.
    ///
    /// Only the override map is written; the tree is untouched until
    /// [`commit_sizes`](Self::commit_sizes) or the next structural action.
    pub fn update_sizes(&mut self, split_id: &str, sizes: Vec<SizeSpec>) {
        trace!("Size override for '{}': {:?}", split_id, sizes);
        self.size_overrides.insert(PaneId::from(split_id), sizes);
        self.resize_state = ResizeState::Dragging;
    }

    /// Write pending overrides into the tree and clear them.
    ///
    /// Returns the ids of the splits whose sizes changed.
    pub fn commit_sizes(&mut self) -> Vec<PaneId> {
        let (layout, split_ids) = self.flushed_layout();
        self.layout = layout;
        self.size_overrides.clear();
        self.resize_state = ResizeState::Idle;

        if !split_ids.is_empty() {
            debug!("Committed sizes of {} splits", split_ids.len());
            self.observers.notify(&LayoutEvent::SizesCommitted {
                split_ids: split_ids.clone(),
            });
        }
        split_ids
    }

    /// Drop pending overrides without touching the tree.
    pub fn cancel_resize(&mut self) {
        if self.size_overrides.is_empty() && self.resize_state == ResizeState::Idle {
            return;
        }
        debug!("Resize cancelled, {} overrides dropped", self.size_overrides.len());
        self.size_overrides.clear();
        self.resize_state = ResizeState::Idle;
        self.observers.notify(&LayoutEvent::ResizeCancelled);
    }

    pub fn has_pending_sizes(&self) -> bool {
        !self.size_overrides.is_empty()
    }

    pub fn resize_state(&self) -> ResizeState {
        self.resize_state
    }

    /// Place the tile `spec_id` relative to the pane `target_id`.
    ///
    /// Returns the id of the pane now showing the tile, or `None` when the
    /// workbench is empty or the target does not exist.
    ///
    /// # Errors
    ///
    /// - [`Error::NotClosable`] for a center drop onto a leaf whose tile
    ///   cannot be replaced;
    /// - [`Error::CenterDropOnSplit`] for a center drop onto a split.
    ///
    /// A rejected edit leaves the layout and pending overrides untouched.
    pub fn add_tile(
        &mut self,
        spec_id: &str,
        target_id: &str,
        position: DropPosition,
    ) -> Result<Option<PaneId>> {
        if self.layout.is_none() {
            debug!("Ignoring add of '{}' to an empty workbench", spec_id);
            return Ok(None);
        }
        self.ensure_replaceable(target_id, position)?;
        if !self.registry.has_tile(spec_id) {
            warn!("Adding unregistered tile '{}'", spec_id);
        }

        let (base, _) = self.flushed_layout();
        let Some(base) = base else {
            return Ok(None);
        };
        let placement = tree::place_tile(&base, target_id, position, spec_id, self.ids.as_mut())?;
        self.apply(Some(placement.tree));

        if let Some(pane_id) = &placement.pane_id {
            debug!(
                "Added tile '{}' as pane '{}' ({} of '{}')",
                spec_id,
                pane_id,
                position.display_name(),
                target_id
            );
            self.observers.notify(&LayoutEvent::TileAdded {
                pane_id: pane_id.clone(),
                spec_id: spec_id.to_string(),
            });
        }
        Ok(placement.pane_id)
    }

    /// Remove a pane and its subtree.
    ///
    /// Returns whether anything was removed. Removing the root empties the
    /// workbench.
    pub fn remove_pane(&mut self, pane_id: &str) -> bool {
        let (base, _) = self.flushed_layout();
        let Some(base) = base else {
            debug!("Ignoring removal of '{}' from an empty workbench", pane_id);
            return false;
        };

        let next = tree::remove_pane(&base, pane_id);
        let removed = next.as_ref().map_or(true, |next| !Arc::ptr_eq(next, &base));
        self.apply(next);

        if removed {
            debug!("Removed pane '{}'", pane_id);
            self.observers.notify(&LayoutEvent::PaneRemoved {
                pane_id: PaneId::from(pane_id),
            });
        }
        removed
    }

    /// Move the leaf `source_id` relative to the pane `target_id`.
    ///
    /// # Errors
    ///
    /// Same as [`add_tile`](Self::add_tile) for center drops.
    pub fn move_pane(
        &mut self,
        source_id: &str,
        target_id: &str,
        position: DropPosition,
    ) -> Result<()> {
        if self.layout.is_none() {
            return Ok(());
        }
        if source_id != target_id {
            self.ensure_replaceable(target_id, position)?;
        }

        let (base, _) = self.flushed_layout();
        let Some(base) = base else {
            return Ok(());
        };
        let placement =
            tree::relocate_tile(&base, source_id, target_id, position, self.ids.as_mut())?;
        let moved = !Arc::ptr_eq(&placement.tree, &base);
        self.apply(Some(placement.tree));

        if moved {
            debug!(
                "Moved pane '{}' {} of '{}'",
                source_id,
                position.display_name(),
                target_id
            );
            self.observers.notify(&LayoutEvent::PaneMoved {
                source_id: PaneId::from(source_id),
                target_id: PaneId::from(target_id),
                pane_id: placement.pane_id,
            });
        }
        Ok(())
    }

    /// Look up a tile spec in the registry.
    pub fn get_spec(&self, spec_id: &str) -> Option<&TileSpec> {
        self.registry.spec(spec_id)
    }

    pub fn registry(&self) -> &TileRegistry {
        &self.registry
    }

    /// Whether the pane `pane_id` offers a close action.
    ///
    /// Only leaves can be closed; splits and unknown ids are not closable.
    pub fn is_closable(&self, pane_id: &str) -> bool {
        self.leaf_spec(pane_id)
            .map_or(false, |spec_id| self.registry.is_closable(spec_id))
    }

    /// Describe the content of a leaf through its tile.
    pub fn describe_pane(&self, pane_id: &str) -> Option<String> {
        let layout = self.layout.as_ref()?;
        let leaf = tree::find_pane(layout, pane_id)?.as_leaf()?;
        Some(self.registry.describe(leaf))
    }

    /// Subscribe to layout events.
    pub fn subscribe<O: LayoutObserver + 'static>(&mut self, observer: O) -> Uuid {
        self.observers.subscribe(Box::new(observer))
    }

    /// Remove an observer; returns whether it was subscribed.
    pub fn unsubscribe(&mut self, id: Uuid) -> bool {
        self.observers.unsubscribe(id)
    }

    fn leaf_spec(&self, pane_id: &str) -> Option<&str> {
        let layout = self.layout.as_ref()?;
        tree::find_pane(layout, pane_id)?
            .as_leaf()
            .map(|leaf| leaf.spec_id.as_str())
    }

    /// Reject a center drop that would replace a pinned tile.
    fn ensure_replaceable(&self, target_id: &str, position: DropPosition) -> Result<()> {
        if position != DropPosition::Center {
            return Ok(());
        }
        match self.leaf_spec(target_id) {
            Some(spec_id) if !self.registry.is_closable(spec_id) => {
                debug!("Rejected center drop onto pinned pane '{}'", target_id);
                Err(Error::not_closable(target_id))
            }
            _ => Ok(()),
        }
    }

    /// The layout with pending overrides written in, without storing it.
    ///
    /// Also returns the splits whose sizes the overrides changed, in id
    /// order. Overrides for splits that no longer exist are skipped.
    fn flushed_layout(&self) -> (Option<Arc<PaneNode>>, Vec<PaneId>) {
        let Some(mut layout) = self.layout.clone() else {
            return (None, Vec::new());
        };

        let mut overrides: Vec<_> = self.size_overrides.iter().collect();
        overrides.sort_by(|a, b| a.0.cmp(b.0));

        let mut changed = Vec::new();
        for (split_id, sizes) in overrides {
            let next = tree::update_sizes(&layout, split_id.as_str(), sizes.clone());
            if !Arc::ptr_eq(&next, &layout) {
                changed.push(split_id.clone());
            }
            layout = next;
        }
        (Some(layout), changed)
    }

    /// Store a new tree after a structural action.
    fn apply(&mut self, layout: Option<Arc<PaneNode>>) {
        self.layout = layout;
        self.size_overrides.clear();
        self.resize_state = ResizeState::Idle;
    }
}

impl std::fmt::Debug for WorkbenchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkbenchContext")
            .field("layout", &self.layout)
            .field("size_overrides", &self.size_overrides)
            .field("registry", &self.registry)
            .field("observers", &self.observers)
            .field("resize_state", &self.resize_state)
            .finish()
    }
}
