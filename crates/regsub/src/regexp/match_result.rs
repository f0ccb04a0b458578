use crate::re_limits::MAX_GROUPS;

/// Byte offsets `start..end` of one group, relative to the text matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[inline(always)]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline(always)]
    pub fn shifted(self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }
}

/// Group spans of one successful match attempt.
///
/// Slot 0 is the whole match; slots 1..=9 are numbered groups. A `None`
/// slot is a group that did not participate.
/// Fixed-size so a match never allocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    groups: [Option<Span>; MAX_GROUPS],
}

impl MatchResult {
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            groups: [None; MAX_GROUPS],
        }
    }

    /// Set group `index`. Indices past `MAX_GROUPS` are ignored.
    #[inline]
    pub fn set(&mut self, index: usize, span: Span) {
        if let Some(slot) = self.groups.get_mut(index) {
            *slot = Some(span);
        }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Span> {
        self.groups.get(index).copied().flatten()
    }

    #[inline(always)]
    pub fn whole(&self) -> Option<Span> {
        self.groups[0]
    }

    /// Translate every participating span by `offset`.
    pub fn shifted(mut self, offset: usize) -> Self {
        for span in self.groups.iter_mut().flatten() {
            *span = span.shifted(offset);
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<Span>> + '_ {
        self.groups.iter().copied()
    }
}

impl Default for MatchResult {
    fn default() -> Self {
        Self::new()
    }
}
