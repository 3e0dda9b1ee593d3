//! Per-pane context handed to tiles.
//!
//! A tile kind can be shown in several panes at once; the [`TileContext`]
//! tells an implementation which pane it is currently describing.

use serde::{Deserialize, Serialize};

/// Information about the pane hosting a tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileContext {
    pane_id: String,
    title: Option<String>,
}

impl TileContext {
    /// Create a context for the given pane.
    ///
    /// # Example
    ///
    /// ```rust
    /// use workbench_tile_api::TileContext;
    ///
    /// let ctx = TileContext::new("pane-1");
    /// assert_eq!(ctx.pane_id(), "pane-1");
    /// ```
    pub fn new<S: Into<String>>(pane_id: S) -> Self {
        Self {
            pane_id: pane_id.into(),
            title: None,
        }
    }

    /// Attach the title the host resolved for this pane.
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Id of the leaf pane hosting the tile.
    pub fn pane_id(&self) -> &str {
        &self.pane_id
    }

    /// Title resolved by the host, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}
