//! Debug assertion macros for history and device invariants.
//!
//! These macros provide runtime checks for the structural invariants of the
//! circular history and the handle position. They are only active in debug
//! builds (`debug_assert!`), so there is zero overhead in release builds.

// =============================================================================
// INV-HIST-01: Bounded Count
// =============================================================================

/// Assert that the number of live slots does not exceed capacity.
///
/// **Invariant**: `0 ≤ count ≤ capacity`
///
/// Used in: `CommandHistory::push()` after the insert
macro_rules! debug_assert_count_bounded {
    ($count:expr, $capacity:expr) => {
        debug_assert!(
            $count <= $capacity,
            "INV-HIST-01 violated: count {} exceeds capacity {}",
            $count,
            $capacity
        )
    };
}

// =============================================================================
// INV-HIST-02: Full Means Wrapped
// =============================================================================

/// Assert that a full history has its write index on top of its read index.
///
/// **Invariant**: `full ⇒ in_offs == out_offs`
///
/// Used in: `CommandHistory::push()` after the insert
macro_rules! debug_assert_full_wrapped {
    ($full:expr, $in_offs:expr, $out_offs:expr) => {
        debug_assert!(
            !$full || $in_offs == $out_offs,
            "INV-HIST-02 violated: full history with in {} != out {}",
            $in_offs,
            $out_offs
        )
    };
}

// =============================================================================
// INV-POS-01: Position In Range
// =============================================================================

/// Assert that a logical position stays within the virtual concatenation.
///
/// **Invariant**: `0 ≤ pos ≤ total_size` (`pos == total_size` is end-of-data)
///
/// Used in: `Handle::seek()` and `Handle::seek_to_command()` after updating
macro_rules! debug_assert_pos_in_range {
    ($pos:expr, $total:expr) => {
        debug_assert!(
            $pos <= $total,
            "INV-POS-01 violated: position {} past total size {}",
            $pos,
            $total
        )
    };
}

// =============================================================================
// Re-exports for crate-internal use
// =============================================================================

pub(crate) use debug_assert_count_bounded;
pub(crate) use debug_assert_full_wrapped;
pub(crate) use debug_assert_pos_in_range;
