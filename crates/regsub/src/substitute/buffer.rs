use crate::re_error::{ReError, ReResult};
use crate::re_option::ReOption;

/// Append-only byte accumulator for one substitution result.
///
/// Capacity at least doubles on growth and never shrinks. Growth past the
/// configured ceiling, or an allocator refusal, is reported as
/// `ReError::OutOfMemory` instead of aborting.
#[derive(Debug, Clone)]
pub struct OutputBuffer {
    data: Vec<u8>,
    limit: usize,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            limit: ReOption::default().max_output_size,
        }
    }

    pub fn with_option(option: &ReOption) -> ReResult<Self> {
        let mut buffer = Self {
            data: Vec::new(),
            limit: option.max_output_size,
        };
        buffer.reserve_total(option.initial_buffer_capacity.min(option.max_output_size))?;
        Ok(buffer)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Copy `bytes` onto the end, growing as needed.
    #[inline]
    pub fn append(&mut self, bytes: &[u8]) -> ReResult<()> {
        if bytes.is_empty() {
            return Ok(());
        }
        let required = self
            .data
            .len()
            .checked_add(bytes.len())
            .ok_or(ReError::OutOfMemory {
                requested: usize::MAX,
            })?;
        if required > self.data.capacity() {
            self.grow(required)?;
        }
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    #[inline]
    pub fn push(&mut self, byte: u8) -> ReResult<()> {
        self.append(std::slice::from_ref(&byte))
    }

    /// Consume the buffer, yielding exactly the appended bytes.
    pub fn finalize(self) -> Vec<u8> {
        self.data
    }

    fn grow(&mut self, required: usize) -> ReResult<()> {
        if required > self.limit {
            return Err(ReError::OutOfMemory {
                requested: required,
            });
        }
        let doubled = self.data.capacity().saturating_mul(2);
        let target = doubled.clamp(required, self.limit);
        self.reserve_total(target)
    }

    fn reserve_total(&mut self, total: usize) -> ReResult<()> {
        let additional = total.saturating_sub(self.data.len());
        self.data
            .try_reserve_exact(additional)
            .map_err(|_| ReError::OutOfMemory { requested: total })
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}
