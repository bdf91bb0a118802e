//! Line tokenizer.
//!
//! A legacy line is `key = value`. Only the first character decides whether a
//! line is a comment. Anything that is not exactly one key/value pair is a
//! recoverable [`SkipReason`], never an error.

use super::metrics::SkipReason;

/// A key/value pair with its 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawLine<'a> {
    pub line: usize,
    pub key: &'a str,
    pub value: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind<'a> {
    Comment,
    Blank,
    Pair(RawLine<'a>),
    Malformed(SkipReason),
}

pub(crate) fn tokenize_line(line: usize, text: &str) -> LineKind<'_> {
    if text.starts_with('#') {
        return LineKind::Comment;
    }
    if text.trim().is_empty() {
        return LineKind::Blank;
    }

    let Some((key, value)) = text.split_once('=') else {
        return LineKind::Malformed(SkipReason::NoSeparator);
    };
    if value.contains('=') {
        return LineKind::Malformed(SkipReason::ExtraSeparator);
    }

    let key = key.trim();
    if key.is_empty() {
        return LineKind::Malformed(SkipReason::EmptyKey);
    }

    LineKind::Pair(RawLine { line, key, value: value.trim() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_key_and_value() {
        let kind = tokenize_line(7, "phoebe_ecc.VAL   =  0.125\n");
        assert_eq!(kind, LineKind::Pair(RawLine { line: 7, key: "phoebe_ecc.VAL", value: "0.125" }));
    }

    #[test]
    fn hash_in_first_column_is_a_comment() {
        assert_eq!(tokenize_line(1, "# phoebe_ecc.VAL = 0.1"), LineKind::Comment);
        // Only the first character counts.
        assert!(matches!(tokenize_line(1, " # x = 1"), LineKind::Pair(_)));
    }

    #[test]
    fn blank_lines_are_not_malformed() {
        assert_eq!(tokenize_line(3, ""), LineKind::Blank);
        assert_eq!(tokenize_line(3, "   \t"), LineKind::Blank);
    }

    #[test]
    fn malformed_lines() {
        assert_eq!(tokenize_line(1, "phoebe_ecc.VAL 0.1"), LineKind::Malformed(SkipReason::NoSeparator));
        assert_eq!(tokenize_line(1, "a = b = c"), LineKind::Malformed(SkipReason::ExtraSeparator));
        assert_eq!(tokenize_line(1, "  = 3"), LineKind::Malformed(SkipReason::EmptyKey));
    }

    #[test]
    fn quoted_values_keep_their_quotes() {
        let LineKind::Pair(pair) = tokenize_line(2, "phoebe_lc_filter[1] = \"Johnson:V\"") else {
            panic!("expected a pair");
        };
        assert_eq!(pair.value, "\"Johnson:V\"");
    }
}
