//! Tile definitions for workbench panes.
//!
//! A tile is the content a leaf pane shows. Layout leaves only store the
//! tile's `spec_id`; the embedding application resolves that id to an
//! implementation of [`Tile`] through a registry.
//!
//! # Example
//!
//! ```rust
//! use workbench_tile_api::{Tile, TileContext, TileSpec};
//!
//! struct ClockTile {
//!     spec: TileSpec,
//! }
//!
//! impl Tile for ClockTile {
//!     fn spec(&self) -> &TileSpec {
//!         &self.spec
//!     }
//!
//!     fn describe(&self, _ctx: &TileContext) -> String {
//!         "12:00".to_string()
//!     }
//! }
//! ```

use crate::TileContext;
use serde::{Deserialize, Serialize};

/// Trait for content that can be placed in a leaf pane.
///
/// Implementations are looked up by `spec_id` and asked to describe
/// themselves for a particular pane. Drawing is left to the embedding
/// application; `describe` is the one hook the engine needs.
pub trait Tile: Send + Sync {
    /// Get the static description of this tile kind.
    fn spec(&self) -> &TileSpec;

    /// Get the display title for this tile.
    ///
    /// This title is shown in the pane's title bar.
    fn title(&self) -> &str {
        &self.spec().title
    }

    /// Check if panes showing this tile can be closed by the user.
    ///
    /// Non-closable tiles also cannot be replaced by a center drop.
    ///
    /// # Example
    ///
    /// ```rust
    /// use workbench_tile_api::{Tile, TileContext, TileSpec};
    /// # struct Pinned { spec: TileSpec }
    /// # impl Tile for Pinned {
    /// #     fn spec(&self) -> &TileSpec { &self.spec }
    /// #     fn describe(&self, _: &TileContext) -> String { String::new() }
    /// # }
    ///
    /// let tile = Pinned { spec: TileSpec::new("nav", "Navigator").with_closable(false) };
    /// assert!(!tile.is_closable());
    /// ```
    fn is_closable(&self) -> bool {
        self.spec().closable
    }

    /// Describe the content this tile shows in the given pane.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Information about the pane hosting the tile
    fn describe(&self, ctx: &TileContext) -> String;
}

/// Static description of a tile kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSpec {
    /// Identifier stored as `spec_id` in layout leaves
    pub id: String,
    /// Title shown in the pane title bar
    pub title: String,
    /// Whether the pane can be closed or replaced
    #[serde(default = "default_closable")]
    pub closable: bool,
}

fn default_closable() -> bool {
    true
}

impl TileSpec {
    /// Create a new closable tile spec.
    ///
    /// # Example
    ///
    /// ```rust
    /// use workbench_tile_api::TileSpec;
    ///
    /// let spec = TileSpec::new("query", "Query");
    /// assert!(spec.closable);
    /// ```
    pub fn new<S: Into<String>>(id: S, title: S) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            closable: true,
        }
    }

    /// Set whether the tile can be closed.
    pub fn with_closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }
}
