//! Codec limits and tuning parameters.

// ============================================================================
// Parsing
// ============================================================================

/// Default maximum nesting of lists and dictionaries accepted by the parser.
///
/// Each nested container costs one level of recursion, so this bounds stack
/// usage on adversarial input.
pub const DEFAULT_MAX_DEPTH: usize = 64;
