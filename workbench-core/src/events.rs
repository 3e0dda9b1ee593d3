//! # Layout events
//!
//! The [`WorkbenchContext`](crate::WorkbenchContext) tells interested parties
//! about every change it makes to the layout. Observers are called
//! synchronously, in subscription order, after the new tree is in place, so
//! an observer reading the context sees the updated layout.

use crate::ids::PaneId;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// A change applied to the workbench layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutEvent {
    /// A tile was placed; `pane_id` is the pane now showing it
    TileAdded { pane_id: PaneId, spec_id: String },
    /// A pane and its subtree were removed
    PaneRemoved { pane_id: PaneId },
    /// A leaf was moved; `pane_id` is its new id, `None` if its tile was dropped
    PaneMoved {
        source_id: PaneId,
        target_id: PaneId,
        pane_id: Option<PaneId>,
    },
    /// Pending size overrides were written into the tree
    SizesCommitted { split_ids: Vec<PaneId> },
    /// Pending size overrides were discarded
    ResizeCancelled,
}

impl LayoutEvent {
    /// Short name of the event kind, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            LayoutEvent::TileAdded { .. } => "tile_added",
            LayoutEvent::PaneRemoved { .. } => "pane_removed",
            LayoutEvent::PaneMoved { .. } => "pane_moved",
            LayoutEvent::SizesCommitted { .. } => "sizes_committed",
            LayoutEvent::ResizeCancelled => "resize_cancelled",
        }
    }

    /// Whether the event changed the shape of the tree.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            LayoutEvent::TileAdded { .. }
                | LayoutEvent::PaneRemoved { .. }
                | LayoutEvent::PaneMoved { .. }
        )
    }
}

/// Receiver of layout events.
///
/// Any `FnMut(&LayoutEvent)` closure is an observer.
///
/// # Example
///
/// ```rust
/// use workbench_core::events::{LayoutEvent, LayoutObserver};
///
/// struct Counter(usize);
///
/// impl LayoutObserver for Counter {
///     fn on_layout_event(&mut self, _event: &LayoutEvent) {
///         self.0 += 1;
///     }
/// }
///
/// let mut counter = Counter(0);
/// counter.on_layout_event(&LayoutEvent::ResizeCancelled);
/// assert_eq!(counter.0, 1);
/// ```
pub trait LayoutObserver {
    fn on_layout_event(&mut self, event: &LayoutEvent);
}

impl<F> LayoutObserver for F
where
    F: FnMut(&LayoutEvent),
{
    fn on_layout_event(&mut self, event: &LayoutEvent) {
        self(event)
    }
}

/// Subscribed observers, notified in subscription order.
#[derive(Default)]
pub struct ObserverList {
    entries: Vec<(Uuid, Box<dyn LayoutObserver>)>,
}

impl ObserverList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an observer.
    ///
    /// Returns a subscription id that can be passed to
    /// [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe(&mut self, observer: Box<dyn LayoutObserver>) -> Uuid {
        let id = Uuid::new_v4();
        self.entries.push((id, observer));
        debug!("Layout observer {} subscribed", id);
        id
    }

    /// Remove an observer; returns whether it was subscribed.
    pub fn unsubscribe(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        before != self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deliver an event to every observer.
    pub fn notify(&mut self, event: &LayoutEvent) {
        for (_, observer) in self.entries.iter_mut() {
            observer.on_layout_event(event);
        }
    }
}

impl std::fmt::Debug for ObserverList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverList")
            .field("observers", &self.entries.len())
            .finish()
    }
}
