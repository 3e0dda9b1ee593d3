//! # Workbench Tile API
//!
//! This crate provides the types and traits an embedding application
//! implements to put content into workbench panes. The pane-tree engine in
//! `workbench-core` only ever sees a leaf's opaque `spec_id`; everything about
//! what that id renders to lives behind the [`Tile`] trait defined here.
//!
//! ## Tile Kinds
//!
//! Each tile kind is described by a [`TileSpec`]:
//! - **id**: the `spec_id` stored in layout leaves
//! - **title**: the label shown in the pane's title bar
//! - **closable**: whether the user may close the pane or replace it with a
//!   center drop
//!
//! ## Example Tile
//!
//! ```rust
//! use workbench_tile_api::{Tile, TileContext, TileSpec};
//!
//! struct QueryTile {
//!     spec: TileSpec,
//! }
//!
//! impl Tile for QueryTile {
//!     fn spec(&self) -> &TileSpec {
//!         &self.spec
//!     }
//!
//!     fn describe(&self, ctx: &TileContext) -> String {
//!         format!("query editor in pane {}", ctx.pane_id())
//!     }
//! }
//!
//! let tile = QueryTile { spec: TileSpec::new("query", "Query") };
//! assert_eq!(tile.title(), "Query");
//! assert!(tile.is_closable());
//! ```

pub mod context;
pub mod position;
pub mod tile;

pub use context::TileContext;
pub use position::{DropPosition, SplitDirection};
pub use tile::{Tile, TileSpec};
