// Replacement template expansion
//
// Syntax, scanned left to right in one pass:
//   &  \0    whole match
//   \1..\9   numbered group; a non-participating or empty group adds nothing
//   \\  \&   literal backslash / ampersand
// Every other byte, including a `\` not followed by one of the above, is
// copied as is.

use super::buffer::OutputBuffer;
use crate::re_error::{ReError, ReResult};
use crate::regexp::{MatchResult, Span};

/// True when `template` contains no `&` or `\` and can be copied verbatim.
#[inline]
pub fn is_literal_template(template: &[u8]) -> bool {
    !template.iter().any(|&c| c == b'&' || c == b'\\')
}

/// Expand `template` for one match and append the result to `out`.
///
/// Spans in `m` are offsets into `subject`.
pub fn expand_into(
    template: &[u8],
    subject: &[u8],
    m: &MatchResult,
    out: &mut OutputBuffer,
) -> ReResult<()> {
    let mut i = 0;
    while i < template.len() {
        match template[i] {
            b'&' => {
                append_group(subject, m, 0, out)?;
                i += 1;
            }
            b'\\' => match template.get(i + 1) {
                Some(&d @ b'0'..=b'9') => {
                    append_group(subject, m, (d - b'0') as usize, out)?;
                    i += 2;
                }
                Some(&c @ (b'\\' | b'&')) => {
                    out.push(c)?;
                    i += 2;
                }
                _ => {
                    out.push(b'\\')?;
                    i += 1;
                }
            },
            _ => {
                // Copy the run up to the next special byte in one go
                let start = i;
                while i < template.len() && template[i] != b'&' && template[i] != b'\\' {
                    i += 1;
                }
                out.append(&template[start..i])?;
            }
        }
    }
    Ok(())
}

/// Expand `template` for one match into a fresh byte vector.
pub fn expand(template: &[u8], subject: &[u8], m: &MatchResult) -> ReResult<Vec<u8>> {
    let mut out = OutputBuffer::new();
    expand_into(template, subject, m, &mut out)?;
    Ok(out.finalize())
}

#[inline]
fn append_group(
    subject: &[u8],
    m: &MatchResult,
    index: usize,
    out: &mut OutputBuffer,
) -> ReResult<()> {
    let Some(span) = m.get(index) else {
        return Ok(());
    };
    let bytes = group_bytes(subject, span, index)?;
    out.append(bytes)
}

fn group_bytes(subject: &[u8], span: Span, index: usize) -> ReResult<&[u8]> {
    if span.end < span.start || span.end > subject.len() {
        return Err(ReError::MalformedMatch(format!(
            "group {} spans {}..{} in a subject of {} bytes",
            index,
            span.start,
            span.end,
            subject.len()
        )));
    }
    Ok(&subject[span.start..span.end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn match_of(spans: &[Option<(usize, usize)>]) -> MatchResult {
        let mut m = MatchResult::new();
        for (i, span) in spans.iter().enumerate() {
            if let Some((s, e)) = span {
                m.set(i, Span::new(*s, *e));
            }
        }
        m
    }

    #[test]
    fn test_whole_match() {
        let m = match_of(&[Some((1, 4))]);
        assert_eq!(expand(b"[&]", b"xabcx", &m).unwrap(), b"[abc]");
    }

    #[test]
    fn test_backrefs_swap() {
        let m = match_of(&[Some((0, 2)), Some((0, 1)), Some((1, 2))]);
        assert_eq!(expand(br"\2\1", b"ab", &m).unwrap(), b"ba");
    }

    #[test]
    fn test_escapes() {
        let m = match_of(&[Some((0, 3))]);
        assert_eq!(expand(br"\&", b"abc", &m).unwrap(), b"&");
        assert_eq!(expand(br"a\\b", b"abc", &m).unwrap(), br"a\b");
    }

    #[test]
    fn test_unknown_escape_kept() {
        let m = match_of(&[Some((0, 3))]);
        assert_eq!(expand(br"\n\x\", b"abc", &m).unwrap(), br"\n\x\");
    }

    #[test]
    fn test_backslash_zero_is_whole_match() {
        let m = match_of(&[Some((1, 3))]);
        assert_eq!(expand(br"[\0|&]", b"abbc", &m).unwrap(), b"[bb|bb]");
    }

    #[test]
    fn test_missing_and_empty_groups() {
        let m = match_of(&[Some((0, 2)), None, Some((1, 1))]);
        assert_eq!(expand(br"<\1|\2|\7>", b"ab", &m).unwrap(), b"<||>");
    }

    #[test]
    fn test_literal_template_detection() {
        assert!(is_literal_template(b"plain text"));
        assert!(!is_literal_template(b"a&b"));
        assert!(!is_literal_template(br"a\1"));
    }

    #[test]
    fn test_inverted_span_is_malformed() {
        let m = match_of(&[Some((0, 2)), Some((2, 1))]);
        let err = expand(br"\1", b"abc", &m).unwrap_err();
        assert!(matches!(err, ReError::MalformedMatch(_)));
    }

    #[test]
    fn test_span_past_subject_is_malformed() {
        let m = match_of(&[Some((0, 9))]);
        let err = expand(b"&", b"abc", &m).unwrap_err();
        assert!(matches!(err, ReError::MalformedMatch(_)));
    }
}
