//! # Split sizing
//!
//! Every child of a split carries a [`SizeSpec`]: either a percentage of the
//! space left over once fixed tracks are placed, or a fixed pixel length.
//! Percentages within one split are kept summing to 100 whenever a child is
//! removed; pixel entries are never rescaled.
//!
//! The helpers here also convert between the two forms when a container of
//! known dimension is laid out, and turn fractions reported by resize
//! handles back into percentages.

use serde::{Deserialize, Serialize};

/// Total that the percentage entries of a split are normalized to.
pub const FULL_PERCENT: f64 = 100.0;

/// Default tolerance when comparing percentage sums against [`FULL_PERCENT`].
pub const PERCENT_TOLERANCE: f64 = 0.01;

/// A child's share of a split.
///
/// In layout literals a percentage is written as a bare number and a pixel
/// length as `{"px": n}`.
///
/// # Example
///
/// ```rust
/// use workbench_core::SizeSpec;
///
/// let sizes: Vec<SizeSpec> = serde_json::from_str(r#"[{"px": 240}, 100]"#)?;
/// assert_eq!(sizes, vec![SizeSpec::Pixels(240), SizeSpec::Percentage(100.0)]);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "SizeSpecRepr", into = "SizeSpecRepr")]
pub enum SizeSpec {
    /// Share of the proportional space, in percent
    Percentage(f64),
    /// Fixed length in pixels
    Pixels(i64),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum SizeSpecRepr {
    Percentage(f64),
    Pixels { px: i64 },
}

impl From<SizeSpecRepr> for SizeSpec {
    fn from(repr: SizeSpecRepr) -> Self {
        match repr {
            SizeSpecRepr::Percentage(value) => SizeSpec::Percentage(value),
            SizeSpecRepr::Pixels { px } => SizeSpec::Pixels(px),
        }
    }
}

impl From<SizeSpec> for SizeSpecRepr {
    fn from(size: SizeSpec) -> Self {
        match size {
            SizeSpec::Percentage(value) => SizeSpecRepr::Percentage(value),
            SizeSpec::Pixels(px) => SizeSpecRepr::Pixels { px },
        }
    }
}

impl SizeSpec {
    /// Check whether this entry is proportional.
    pub fn is_percentage(&self) -> bool {
        matches!(self, SizeSpec::Percentage(_))
    }

    /// Check whether this entry is a fixed pixel length.
    pub fn is_pixels(&self) -> bool {
        matches!(self, SizeSpec::Pixels(_))
    }

    /// Percentage value, if proportional.
    pub fn as_percentage(&self) -> Option<f64> {
        match self {
            SizeSpec::Percentage(value) => Some(*value),
            SizeSpec::Pixels(_) => None,
        }
    }

    /// Pixel length, if fixed.
    pub fn as_pixels(&self) -> Option<i64> {
        match self {
            SizeSpec::Pixels(px) => Some(*px),
            SizeSpec::Percentage(_) => None,
        }
    }

    /// Build a list of percentage entries.
    pub fn percentages(values: &[f64]) -> Vec<SizeSpec> {
        values.iter().copied().map(SizeSpec::Percentage).collect()
    }
}

impl From<f64> for SizeSpec {
    fn from(value: f64) -> Self {
        SizeSpec::Percentage(value)
    }
}

/// Sum of the percentage entries, ignoring pixel entries.
pub fn percentage_sum(sizes: &[SizeSpec]) -> f64 {
    sizes.iter().filter_map(SizeSpec::as_percentage).sum()
}

/// Rescale the percentage entries so that they sum to [`FULL_PERCENT`].
///
/// Pixel entries are left untouched. If every percentage entry is zero the
/// proportional space is split evenly between them; a slice without
/// percentage entries is left as is.
///
/// # Example
///
/// ```rust
/// use workbench_core::size::{normalize_percentages, SizeSpec};
///
/// let mut sizes = vec![SizeSpec::Pixels(100), SizeSpec::Percentage(50.0)];
/// normalize_percentages(&mut sizes);
/// assert_eq!(sizes, vec![SizeSpec::Pixels(100), SizeSpec::Percentage(100.0)]);
/// ```
pub fn normalize_percentages(sizes: &mut [SizeSpec]) {
    let count = sizes.iter().filter(|s| s.is_percentage()).count();
    if count == 0 {
        return;
    }

    let sum = percentage_sum(sizes);
    for size in sizes.iter_mut() {
        if let SizeSpec::Percentage(value) = size {
            *value = if sum > 0.0 {
                *value / sum * FULL_PERCENT
            } else {
                FULL_PERCENT / count as f64
            };
        }
    }
}

/// Whether any entry is a fixed pixel length.
///
/// Splits with pixel tracks are laid out with fixed lengths and are not
/// resizable by dragging.
pub fn has_pixel_sizes(sizes: &[SizeSpec]) -> bool {
    sizes.iter().any(SizeSpec::is_pixels)
}

/// Equal percentage shares for `count` children.
pub fn even_split(count: usize) -> Vec<SizeSpec> {
    if count == 0 {
        return Vec::new();
    }
    vec![SizeSpec::Percentage(FULL_PERCENT / count as f64); count]
}

/// Resolve sizes into lengths along a container of `available` pixels.
///
/// Pixel tracks take their fixed length first; the rest of the container is
/// shared between percentage tracks in proportion to their values. When the
/// pixel tracks alone overflow the container they are scaled down to fit and
/// percentage tracks get nothing.
///
/// # Example
///
/// ```rust
/// use workbench_core::size::{resolve_lengths, SizeSpec};
///
/// let sizes = [SizeSpec::Pixels(200), SizeSpec::Percentage(25.0), SizeSpec::Percentage(75.0)];
/// assert_eq!(resolve_lengths(&sizes, 1000.0), vec![200.0, 200.0, 600.0]);
/// ```
pub fn resolve_lengths(sizes: &[SizeSpec], available: f64) -> Vec<f64> {
    let available = available.max(0.0);
    let fixed_total: f64 = sizes
        .iter()
        .filter_map(SizeSpec::as_pixels)
        .map(|px| px.max(0) as f64)
        .sum();

    if fixed_total > available {
        let scale = if fixed_total > 0.0 { available / fixed_total } else { 0.0 };
        return sizes
            .iter()
            .map(|size| match size {
                SizeSpec::Pixels(px) => (*px).max(0) as f64 * scale,
                SizeSpec::Percentage(_) => 0.0,
            })
            .collect();
    }

    let remaining = available - fixed_total;
    let weight_total: f64 = sizes
        .iter()
        .filter_map(SizeSpec::as_percentage)
        .map(|value| value.max(0.0))
        .sum();
    let flexible = sizes.iter().filter(|s| s.is_percentage()).count();

    sizes
        .iter()
        .map(|size| match size {
            SizeSpec::Pixels(px) => (*px).max(0) as f64,
            SizeSpec::Percentage(value) if weight_total > 0.0 => {
                remaining * value.max(0.0) / weight_total
            }
            SizeSpec::Percentage(_) => remaining / flexible as f64,
        })
        .collect()
}

/// Convert fractional shares (0.0 to 1.0) into percentages.
///
/// Resize handles report panel sizes as fractions of their container.
pub fn from_fractions(fractions: &[f64]) -> Vec<SizeSpec> {
    fractions
        .iter()
        .map(|fraction| SizeSpec::Percentage(fraction * FULL_PERCENT))
        .collect()
}

/// Convert measured track lengths into percentages of their total.
///
/// A zero total yields an even split.
pub fn from_lengths(lengths: &[f64]) -> Vec<SizeSpec> {
    let total: f64 = lengths.iter().map(|l| l.max(0.0)).sum();
    if total <= 0.0 {
        return even_split(lengths.len());
    }
    lengths
        .iter()
        .map(|length| SizeSpec::Percentage(length.max(0.0) / total * FULL_PERCENT))
        .collect()
}
