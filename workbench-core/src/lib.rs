//! # Workbench Core
//!
//! Layout engine for a tiling workbench. The screen is a tree of panes:
//! leaves show a tile, splits divide their area between children
//! horizontally or vertically. This crate provides the pure tree algebra
//! that edits such layouts, and the context that owns the live layout while
//! the user drags tiles around and resizes panes.
//!
//! ## Architecture
//!
//! - [`tree`] holds the immutable [`PaneNode`] tree and the functions that
//!   insert, remove, move and resize panes by path copying;
//! - [`size`] normalizes and resolves split sizes;
//! - [`context`] keeps transient size overrides on top of the tree and
//!   flushes them before every structural action;
//! - [`registry`] maps the `spec_id` of a leaf to its [`Tile`](workbench_tile_api::Tile).
//!
//! ## Example
//!
//! ```rust
//! use workbench_core::{DropPosition, PaneNode, TileRegistry, WorkbenchContext};
//!
//! let mut ctx = WorkbenchContext::new(Some(PaneNode::leaf("main", "query")), TileRegistry::new());
//! let pane = ctx.add_tile("results", "main", DropPosition::Bottom)?;
//! assert!(pane.is_some());
//! assert_eq!(ctx.layout().unwrap().leaf_count(), 2);
//! # Ok::<(), workbench_core::Error>(())
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod ids;
pub mod registry;
pub mod size;
pub mod tree;

pub use config::WorkbenchConfig;
pub use context::{ResizeState, WorkbenchContext};
pub use error::{Error, Result};
pub use events::{LayoutEvent, LayoutObserver};
pub use ids::{IdGenerator, PaneId};
pub use registry::TileRegistry;
pub use size::SizeSpec;
pub use tree::{LeafPane, PaneNode, SplitPane};
pub use workbench_tile_api::{DropPosition, SplitDirection};

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the application
///
/// Installs a `fmt` subscriber honouring `RUST_LOG`. Does nothing if a
/// global subscriber is already set.
///
/// # Example
///
/// ```rust
/// workbench_core::init_tracing();
/// tracing::info!("Workbench started");
/// ```
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt::try_init();
}

/// Initialize tracing with an explicit level, such as `logging.level` from
/// [`WorkbenchConfig`].
///
/// `RUST_LOG` still wins when it is set.
pub fn init_tracing_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
