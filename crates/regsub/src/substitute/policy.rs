// Replacement policies and the convenience entry points built on them
//
// Each adapter only picks a policy; the substitution loop lives in `driver`.

use super::driver::replace_with;
use crate::re_error::{ReError, ReResult};
use crate::re_option::ReOption;
use crate::regexp::Matcher;

/// Which of the 1-based numbered matches get substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReplacementPolicy {
    First,
    FirstN(usize),
    All,
    /// Matches `start..=end`; `end: None` runs to the last match.
    Range { start: usize, end: Option<usize> },
}

impl ReplacementPolicy {
    /// Reject ranges that are empty or not 1-based.
    pub fn validate(&self) -> ReResult<()> {
        if let ReplacementPolicy::Range { start, end } = *self {
            if start == 0 {
                return Err(ReError::Argument(
                    "range start must be a positive match index".to_string(),
                ));
            }
            if let Some(end) = end
                && (end == 0 || start > end)
            {
                return Err(ReError::Argument(format!("range {}..{} is invalid", start, end)));
            }
        }
        Ok(())
    }

    /// Whether match number `counter` (1-based) is substituted.
    #[inline]
    pub fn selects(&self, counter: usize) -> bool {
        match *self {
            ReplacementPolicy::First => counter == 1,
            ReplacementPolicy::FirstN(n) => counter <= n,
            ReplacementPolicy::All => true,
            ReplacementPolicy::Range { start, end } => {
                counter >= start && end.is_none_or(|end| counter <= end)
            }
        }
    }

    /// Last match number that can still be selected, if bounded.
    #[inline]
    pub fn upper_bound(&self) -> Option<usize> {
        match *self {
            ReplacementPolicy::First => Some(1),
            ReplacementPolicy::FirstN(n) => Some(n),
            ReplacementPolicy::All => None,
            ReplacementPolicy::Range { end, .. } => end,
        }
    }
}

/// A count-or-all argument, as taken by the older `regexp-replace` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceCount {
    Count(usize),
    All,
}

impl From<ReplaceCount> for ReplacementPolicy {
    fn from(count: ReplaceCount) -> Self {
        match count {
            ReplaceCount::Count(n) => ReplacementPolicy::FirstN(n),
            ReplaceCount::All => ReplacementPolicy::All,
        }
    }
}

impl From<usize> for ReplaceCount {
    fn from(n: usize) -> Self {
        ReplaceCount::Count(n)
    }
}

impl From<bool> for ReplaceCount {
    fn from(all: bool) -> Self {
        if all {
            ReplaceCount::All
        } else {
            ReplaceCount::Count(1)
        }
    }
}

/// Substitute under `policy` with default options, returning the output bytes.
pub fn replace<M: Matcher + ?Sized>(
    matcher: &M,
    subject: &[u8],
    template: &[u8],
    policy: ReplacementPolicy,
) -> ReResult<Vec<u8>> {
    replace_with(matcher, subject, template, policy, &ReOption::default()).map(|r| r.output)
}

pub fn replace_first<M: Matcher + ?Sized>(
    matcher: &M,
    subject: &[u8],
    template: &[u8],
) -> ReResult<Vec<u8>> {
    replace(matcher, subject, template, ReplacementPolicy::First)
}

pub fn replace_all<M: Matcher + ?Sized>(
    matcher: &M,
    subject: &[u8],
    template: &[u8],
) -> ReResult<Vec<u8>> {
    replace(matcher, subject, template, ReplacementPolicy::All)
}

pub fn replace_first_n<M: Matcher + ?Sized>(
    matcher: &M,
    subject: &[u8],
    template: &[u8],
    count: impl Into<ReplaceCount>,
) -> ReResult<Vec<u8>> {
    let count: ReplaceCount = count.into();
    replace(matcher, subject, template, count.into())
}

/// Substitute matches `start..=end`; `end: None` means through the last match.
pub fn replace_range<M: Matcher + ?Sized>(
    matcher: &M,
    subject: &[u8],
    template: &[u8],
    start: usize,
    end: Option<usize>,
) -> ReResult<Vec<u8>> {
    replace(
        matcher,
        subject,
        template,
        ReplacementPolicy::Range { start, end },
    )
}
