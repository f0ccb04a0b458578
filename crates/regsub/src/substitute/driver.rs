use log::{debug, trace};

use super::buffer::OutputBuffer;
use super::iterator::Matches;
use super::policy::ReplacementPolicy;
use super::template::{expand_into, is_literal_template};
use crate::re_error::ReResult;
use crate::re_option::ReOption;
use crate::regexp::Matcher;

/// Result of one substitution run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub output: Vec<u8>,
    /// Matches replaced by the expanded template
    pub substitutions: usize,
    /// Matches found before the loop stopped, replaced or not
    pub matches: usize,
}

/// The substitution loop.
///
/// Walks the matches of `matcher` over `subject` in order, numbering them from
/// 1. Text between matches and the text of unselected matches is copied
/// verbatim; selected matches are replaced by `template` expanded against
/// their groups. Once the policy cannot select any later match the rest of
/// the subject is copied without further searching.
pub fn replace_with<M: Matcher + ?Sized>(
    matcher: &M,
    subject: &[u8],
    template: &[u8],
    policy: ReplacementPolicy,
    option: &ReOption,
) -> ReResult<Replacement> {
    policy.validate()?;

    let mut out = OutputBuffer::with_option(option)?;
    let literal = is_literal_template(template);
    let upper = policy.upper_bound();
    let mut copied = 0usize;
    let mut counter = 0usize;
    let mut substitutions = 0usize;

    if upper != Some(0) {
        for m in Matches::new(matcher, subject) {
            let m = m?;
            // Matches validated the whole-match span already
            let Some(whole) = m.whole() else { break };
            counter += 1;

            out.append(&subject[copied..whole.start])?;
            if policy.selects(counter) {
                trace!("match {} at {}..{} replaced", counter, whole.start, whole.end);
                if literal {
                    out.append(template)?;
                } else {
                    expand_into(template, subject, &m, &mut out)?;
                }
                substitutions += 1;
            } else {
                trace!("match {} at {}..{} kept", counter, whole.start, whole.end);
                out.append(&subject[whole.start..whole.end])?;
            }
            copied = whole.end;

            if upper.is_some_and(|n| counter >= n) {
                break;
            }
        }
    }

    out.append(&subject[copied..])?;
    debug!(
        "substituted {} of {} matches ({} -> {} bytes)",
        substitutions,
        counter,
        subject.len(),
        out.len()
    );
    Ok(Replacement {
        output: out.finalize(),
        substitutions,
        matches: counter,
    })
}
