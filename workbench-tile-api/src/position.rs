//! Drop positions and split directions.

use serde::{Deserialize, Serialize};

/// Axis along which a split divides its area.
///
/// `Horizontal` places children side by side, `Vertical` stacks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SplitDirection {
    #[serde(rename = "h")]
    Horizontal,
    #[serde(rename = "v")]
    Vertical,
}

impl SplitDirection {
    /// Short form used in layout literals.
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitDirection::Horizontal => "h",
            SplitDirection::Vertical => "v",
        }
    }
}

/// Where a tile is dropped relative to a target pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropPosition {
    Left,
    Right,
    Top,
    Bottom,
    Center,
}

impl DropPosition {
    /// Get the display name for this position.
    pub fn display_name(&self) -> &'static str {
        match self {
            DropPosition::Left => "Left",
            DropPosition::Right => "Right",
            DropPosition::Top => "Top",
            DropPosition::Bottom => "Bottom",
            DropPosition::Center => "Center",
        }
    }

    /// Get all drop positions.
    pub fn all() -> Vec<DropPosition> {
        vec![
            DropPosition::Left,
            DropPosition::Right,
            DropPosition::Top,
            DropPosition::Bottom,
            DropPosition::Center,
        ]
    }

    /// Direction of the split created by an edge drop.
    ///
    /// Returns `None` for [`DropPosition::Center`], which replaces the target
    /// instead of splitting it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use workbench_tile_api::{DropPosition, SplitDirection};
    ///
    /// assert_eq!(DropPosition::Left.split_direction(), Some(SplitDirection::Horizontal));
    /// assert_eq!(DropPosition::Bottom.split_direction(), Some(SplitDirection::Vertical));
    /// assert_eq!(DropPosition::Center.split_direction(), None);
    /// ```
    pub fn split_direction(&self) -> Option<SplitDirection> {
        match self {
            DropPosition::Left | DropPosition::Right => Some(SplitDirection::Horizontal),
            DropPosition::Top | DropPosition::Bottom => Some(SplitDirection::Vertical),
            DropPosition::Center => None,
        }
    }

    /// Whether the dropped tile becomes the first child of the new split.
    pub fn inserts_first(&self) -> bool {
        matches!(self, DropPosition::Left | DropPosition::Top)
    }

    /// Whether this position splits the target rather than replacing it.
    pub fn is_edge(&self) -> bool {
        !matches!(self, DropPosition::Center)
    }
}
