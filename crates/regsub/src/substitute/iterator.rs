use crate::re_error::{ReError, ReResult};
use crate::regexp::{MatchResult, Matcher};

/// Ask `matcher` for the first match in `remainder`.
///
/// Offsets stay relative to `remainder`; translating them is the caller's job.
#[inline]
pub fn next_match<M: Matcher + ?Sized>(matcher: &M, remainder: &[u8]) -> Option<MatchResult> {
    matcher.try_match(remainder)
}

/// Successive matches of a pattern over a subject, with absolute offsets.
///
/// Each search runs on the unconsumed suffix, so anchors see the cursor as the
/// start of text. After any empty match the next search starts one byte past
/// it, so a pattern that matches the empty string still
/// terminates after at most `subject.len() + 1` matcher calls.
pub struct Matches<'a, M: ?Sized> {
    matcher: &'a M,
    subject: &'a [u8],
    cursor: usize,
    done: bool,
}

impl<'a, M: Matcher + ?Sized> Matches<'a, M> {
    pub fn new(matcher: &'a M, subject: &'a [u8]) -> Self {
        Self {
            matcher,
            subject,
            cursor: 0,
            done: false,
        }
    }

    fn advance(&mut self) -> ReResult<Option<MatchResult>> {
        let remainder = &self.subject[self.cursor..];
        let Some(m) = next_match(self.matcher, remainder) else {
            return Ok(None);
        };
        let Some(whole) = m.whole() else {
            return Err(ReError::MalformedMatch(
                "match reported without a whole-match span".to_string(),
            ));
        };
        if whole.end < whole.start || whole.end > remainder.len() {
            return Err(ReError::MalformedMatch(format!(
                "whole match spans {}..{} in a remainder of {} bytes",
                whole.start,
                whole.end,
                remainder.len()
            )));
        }

        let m = m.shifted(self.cursor);
        let end = whole.end + self.cursor;
        if whole.is_empty() {
            // Step past the empty match or stop at end of subject
            if end == self.subject.len() {
                self.done = true;
            } else {
                self.cursor = end + 1;
            }
        } else {
            self.cursor = end;
        }
        Ok(Some(m))
    }
}

impl<M: Matcher + ?Sized> Iterator for Matches<'_, M> {
    type Item = ReResult<MatchResult>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.advance() {
            Ok(Some(m)) => Some(Ok(m)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<M: Matcher + ?Sized> std::iter::FusedIterator for Matches<'_, M> {}
