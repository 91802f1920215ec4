//! Conditional tracing macros (zero-cost when the feature is disabled).

/// Emit a debug-level event for pipeline measurements.
///
/// Calls `tracing::debug!` when the `tracing` feature is enabled and
/// compiles to nothing otherwise (values are still evaluated to avoid
/// unused warnings).
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::debug!(name: $name, $($key = $value),+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
}

pub(crate) use trace_event;
