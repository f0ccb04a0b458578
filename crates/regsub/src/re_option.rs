use crate::re_limits::{DEFAULT_BUFFER_CAPACITY, MAX_OUTPUT_SIZE};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReOption {
    /// Capacity the output buffer starts with before the first append.
    pub initial_buffer_capacity: usize,
    /// Upper bound on the size of one substitution result, in bytes.
    /// Growth past it fails with `ReError::OutOfMemory`.
    pub max_output_size: usize,
}

impl Default for ReOption {
    fn default() -> Self {
        Self {
            initial_buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            max_output_size: MAX_OUTPUT_SIZE,
        }
    }
}
