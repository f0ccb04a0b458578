// Matcher seam for the substitution engine
//
// The engine never inspects a pattern. It only asks a `Matcher` for the first
// match in a byte slice and receives the capture spans back as a value, so a
// compiled pattern holds no per-match state and can be shared freely.

mod match_result;

pub use match_result::{MatchResult, Span};

use log::debug;
use regex::bytes::{Regex, RegexBuilder};
use smol_str::SmolStr;

use crate::re_error::{ReError, ReResult};
use crate::re_limits::MAX_GROUPS;

/// Anything able to locate the leftmost match of some pattern in a byte slice.
///
/// Offsets in the returned `MatchResult` are relative to `text`.
pub trait Matcher {
    fn try_match(&self, text: &[u8]) -> Option<MatchResult>;
}

impl<M: Matcher + ?Sized> Matcher for &M {
    #[inline]
    fn try_match(&self, text: &[u8]) -> Option<MatchResult> {
        (**self).try_match(text)
    }
}

/// A compiled regular expression.
///
/// Matching is byte-oriented: Unicode classes are disabled, `.` matches any
/// byte except `\n`, and subjects need not be valid UTF-8.
#[derive(Debug, Clone)]
pub struct Regexp {
    source: SmolStr,
    regex: Regex,
}

impl Regexp {
    /// Compile `source` into a pattern.
    pub fn new(source: &str) -> ReResult<Self> {
        let regex = RegexBuilder::new(source)
            .unicode(false)
            .build()
            .map_err(|e| ReError::PatternCompile(e.to_string()))?;
        debug!(
            "compiled pattern {:?} with {} groups",
            source,
            regex.captures_len()
        );
        Ok(Self {
            source: SmolStr::new(source),
            regex,
        })
    }

    /// Compile a pattern given as raw bytes, as host strings are.
    pub fn from_bytes(source: &[u8]) -> ReResult<Self> {
        let source = std::str::from_utf8(source)
            .map_err(|_| ReError::PatternCompile("pattern is not valid UTF-8".to_string()))?;
        Self::new(source)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Number of groups the pattern defines, group 0 included.
    pub fn group_count(&self) -> usize {
        self.regex.captures_len()
    }

    pub fn is_match(&self, text: &[u8]) -> bool {
        self.regex.is_match(text)
    }
}

impl Matcher for Regexp {
    fn try_match(&self, text: &[u8]) -> Option<MatchResult> {
        let caps = self.regex.captures(text)?;
        let mut result = MatchResult::new();
        for (i, group) in caps.iter().take(MAX_GROUPS).enumerate() {
            if let Some(m) = group {
                result.set(i, Span::new(m.start(), m.end()));
            }
        }
        Some(result)
    }
}
