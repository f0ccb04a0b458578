//! Centralized substitution limits and defaults.
//!
//! Collected here so the engine, the primitives and the CLI agree on them.

// ===== Captures =====

/// Number of capture slots a match reports: group 0 (whole match)
/// plus the nine groups reachable from a template as `\1`..`\9`.
pub const MAX_GROUPS: usize = 10;

// ===== Output buffer =====

/// Default starting capacity of the output buffer.
pub const DEFAULT_BUFFER_CAPACITY: usize = 64;

/// Largest output a single substitution may produce.
/// Matches the allocation ceiling Rust imposes on a `Vec<u8>`.
pub const MAX_OUTPUT_SIZE: usize = isize::MAX as usize;

// ===== Host =====

/// Sentinel accepted by `regexp-replace-range` for "until the last match".
pub const OPEN_RANGE_SENTINEL: i64 = -1;
