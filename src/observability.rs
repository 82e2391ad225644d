//! Structured `tracing` events for relation validation and predicate evaluation.
//!
//! Every event goes to target "relsift" with `component` and `event` fields. Evaluation events
//! carry row counts, never row contents. No subscriber is installed here.
//!
//! | event | level | component |
//! |-------|-------|-----------|
//! | `relation_rejected` | warn | relation |
//! | `predicate_rejected` | debug | predicate |
//! | `leaf_eval`, `combined_eval` | trace | predicate |
//! | `complement_toggled` | trace | predicate |

/// Target for all relsift log events.
pub(crate) const RELSIFT_TARGET: &str = "relsift";

/// Debug-level event under the crate target.
macro_rules! log_debug {
    ($($field:tt)*) => {
        ::tracing::debug!(target: $crate::observability::RELSIFT_TARGET, $($field)*)
    };
}

/// Trace-level event; used on the evaluation path.
macro_rules! log_trace {
    ($($field:tt)*) => {
        ::tracing::trace!(target: $crate::observability::RELSIFT_TARGET, $($field)*)
    };
}

/// Warn-level event for rejected input.
macro_rules! log_warn {
    ($($field:tt)*) => {
        ::tracing::warn!(target: $crate::observability::RELSIFT_TARGET, $($field)*)
    };
}

pub(crate) use log_debug;
pub(crate) use log_trace;
pub(crate) use log_warn;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macros_expand_without_a_subscriber() {
        assert_eq!(RELSIFT_TARGET, "relsift");
        log_debug!(component = "test", event = "noop", rows = 0usize);
        log_trace!(component = "test", event = "noop", complement = true);
        log_warn!(component = "test", event = "noop", reason = %"none");
    }
}
