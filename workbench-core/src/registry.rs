//! # Tile registry
//!
//! Layout leaves only name the tile they show through a `spec_id`. The
//! [`TileRegistry`] maps those ids to the [`Tile`] implementations supplied
//! by the embedding application. The tree algebra never consults it; the
//! [`WorkbenchContext`](crate::WorkbenchContext) does, for closability and
//! for describing leaves.

use crate::tree::LeafPane;
use std::collections::HashMap;
use tracing::{debug, warn};
use workbench_tile_api::{Tile, TileContext, TileSpec};

/// Text shown for a leaf whose `spec_id` has no registered tile.
pub const TILE_NOT_FOUND: &str = "Tile not found";

/// Registry of the tiles available to a workbench.
///
/// # Example
///
/// ```rust
/// use workbench_core::TileRegistry;
/// use workbench_tile_api::{Tile, TileContext, TileSpec};
///
/// struct Notes {
///     spec: TileSpec,
/// }
///
/// impl Tile for Notes {
///     fn spec(&self) -> &TileSpec {
///         &self.spec
///     }
///
///     fn describe(&self, ctx: &TileContext) -> String {
///         format!("notes in {}", ctx.pane_id())
///     }
/// }
///
/// let mut registry = TileRegistry::new();
/// registry.register(Notes { spec: TileSpec::new("notes", "Notes") });
/// assert!(registry.has_tile("notes"));
/// assert_eq!(registry.count(), 1);
/// ```
pub struct TileRegistry {
    tiles: HashMap<String, Box<dyn Tile>>,
}

impl TileRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tiles: HashMap::new(),
        }
    }

    /// Register a tile under the id of its spec.
    ///
    /// A tile registered under an id that is already taken replaces the
    /// previous one.
    pub fn register<T: Tile + 'static>(&mut self, tile: T) {
        self.register_boxed(Box::new(tile));
    }

    /// Register an already boxed tile.
    pub fn register_boxed(&mut self, tile: Box<dyn Tile>) {
        let id = tile.spec().id.clone();
        if self.tiles.insert(id.clone(), tile).is_some() {
            warn!("Tile '{}' registered twice, keeping the latest", id);
        } else {
            debug!("Registered tile '{}'", id);
        }
    }

    /// Get a tile by spec id.
    pub fn get(&self, spec_id: &str) -> Option<&dyn Tile> {
        self.tiles.get(spec_id).map(|tile| tile.as_ref())
    }

    /// Get the static spec of a tile.
    ///
    /// # Example
    ///
    /// ```rust
    /// use workbench_core::TileRegistry;
    ///
    /// let registry = TileRegistry::new();
    /// assert!(registry.spec("missing").is_none());
    /// ```
    pub fn spec(&self, spec_id: &str) -> Option<&TileSpec> {
        self.tiles.get(spec_id).map(|tile| tile.spec())
    }

    /// Check if a tile is registered.
    pub fn has_tile(&self, spec_id: &str) -> bool {
        self.tiles.contains_key(spec_id)
    }

    /// List the ids of all registered tiles, sorted.
    pub fn list_tiles(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.tiles.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of registered tiles.
    pub fn count(&self) -> usize {
        self.tiles.len()
    }

    /// Describe the content of a leaf.
    ///
    /// Leaves naming an unregistered tile are described as
    /// [`TILE_NOT_FOUND`] instead of failing.
    pub fn describe(&self, leaf: &LeafPane) -> String {
        match self.tiles.get(&leaf.spec_id) {
            Some(tile) => {
                let ctx = TileContext::new(leaf.id.as_str()).with_title(tile.title());
                tile.describe(&ctx)
            }
            None => TILE_NOT_FOUND.to_string(),
        }
    }

    /// Whether panes showing `spec_id` may be closed or replaced.
    ///
    /// Unknown tiles are closable, so a stale leaf can always be cleaned up.
    pub fn is_closable(&self, spec_id: &str) -> bool {
        self.tiles
            .get(spec_id)
            .map_or(true, |tile| tile.is_closable())
    }
}

impl Default for TileRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TileRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileRegistry")
            .field("tiles", &self.list_tiles())
            .finish()
    }
}
