//! Planner configuration.

/// Knobs for [`IndexBoundPlanner`](crate::IndexBoundPlanner).
///
/// ```
/// use index_bound::BoundOptions;
///
/// let options = BoundOptions::default().max_ranges(Some(16));
/// assert!(options.is_fallback_to_full_scan());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundOptions {
    pub(crate) apply_type_bounds: bool,
    pub(crate) fallback_to_full_scan: bool,
    pub(crate) max_ranges: Option<usize>,
}

impl Default for BoundOptions {
    fn default() -> Self {
        BoundOptions {
            apply_type_bounds: true,
            fallback_to_full_scan: true,
            max_ranges: None,
        }
    }
}

impl BoundOptions {
    /// Intersect planned ranges with the range of the column's storage type.
    #[must_use]
    pub fn apply_type_bounds(self, apply_type_bounds: bool) -> Self {
        BoundOptions {
            apply_type_bounds,
            ..self
        }
    }

    /// Plan a full scan instead of returning planning errors.
    #[must_use]
    pub fn fallback_to_full_scan(self, fallback_to_full_scan: bool) -> Self {
        BoundOptions {
            fallback_to_full_scan,
            ..self
        }
    }

    /// Upper limit on emitted ranges. Extra segments are merged into wider
    /// ones; `Some(0)` behaves like `Some(1)`.
    #[must_use]
    pub fn max_ranges(self, max_ranges: Option<usize>) -> Self {
        BoundOptions { max_ranges, ..self }
    }

    /// Whether type bounding is applied.
    #[must_use]
    pub fn is_apply_type_bounds(&self) -> bool {
        self.apply_type_bounds
    }

    /// Whether planning errors fall back to a full scan.
    #[must_use]
    pub fn is_fallback_to_full_scan(&self) -> bool {
        self.fallback_to_full_scan
    }

    /// Configured range cap.
    #[must_use]
    pub fn range_limit(&self) -> Option<usize> {
        self.max_ranges
    }
}
