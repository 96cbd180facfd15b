//! Logging conventions for bound planning.
//!
//! All events go through `tracing` with target "index_bound" and carry an
//! `event` field for filtering. The crate never installs a global subscriber;
//! applications configure one via `tracing_subscriber` or similar.
//!
//! ## Conventions
//!
//! - `event`: snake_case event name (required)
//! - `component`: subsystem (e.g., "bound", "planner")
//! - Use `%` for Display, `?` for Debug formatting

/// Target for all log events emitted by this crate.
pub(crate) const INDEX_BOUND_TARGET: &str = "index_bound";

/// Debug-level event.
///
/// # Example
/// ```ignore
/// log_debug!(
///     component = "planner",
///     event = "bounds_planned",
///     column = column.name(),
///     ranges = bounds.ranges.len(),
/// );
/// ```
macro_rules! log_debug {
    ($($field:tt)*) => {
        ::tracing::debug!(target: $crate::observability::INDEX_BOUND_TARGET, $($field)*)
    };
}

/// Warn-level event.
macro_rules! log_warn {
    ($($field:tt)*) => {
        ::tracing::warn!(target: $crate::observability::INDEX_BOUND_TARGET, $($field)*)
    };
}

pub(crate) use log_debug;
pub(crate) use log_warn;
