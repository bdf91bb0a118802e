use std::borrow::Cow;

/// A key with its bracketed dataset index removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IndexedKey<'a> {
    pub bare: Cow<'a, str>,
    /// Zero-based dataset index.
    pub index: Option<usize>,
}

/// The bracketed index was `[0]` or did not fit in `usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InvalidIndex;

/// Strip the first `[n]` from `key` and return `n - 1`.
///
/// `phoebe_ld_lcx1[2].VAL` becomes `phoebe_ld_lcx1.VAL` with index `1`.
/// Legacy indices are 1-based, so `[0]` is rejected.
pub(crate) fn resolve_index(key: &str) -> Result<IndexedKey<'_>, InvalidIndex> {
    let Some(caps) = regex!(r"\[(\d+)\]").captures(key) else {
        return Ok(IndexedKey { bare: Cow::Borrowed(key), index: None });
    };

    let (Some(whole), Some(digits)) = (caps.get(0), caps.get(1)) else {
        return Ok(IndexedKey { bare: Cow::Borrowed(key), index: None });
    };

    let n: usize = digits.as_str().parse().map_err(|_| InvalidIndex)?;
    let index = n.checked_sub(1).ok_or(InvalidIndex)?;

    let bare = format!("{}{}", &key[..whole.start()], &key[whole.end()..]);
    Ok(IndexedKey { bare: Cow::Owned(bare), index: Some(index) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_key_is_borrowed() {
        let k = resolve_index("phoebe_ecc.VAL").unwrap();
        assert!(matches!(k.bare, Cow::Borrowed("phoebe_ecc.VAL")));
        assert_eq!(k.index, None);
    }

    #[test]
    fn index_is_zero_based_and_removed() {
        let k = resolve_index("phoebe_ld_lcx1[2].VAL").unwrap();
        assert_eq!(k.bare, "phoebe_ld_lcx1.VAL");
        assert_eq!(k.index, Some(1));
    }

    #[test]
    fn multi_digit_index() {
        let k = resolve_index("phoebe_lc_filter[12]").unwrap();
        assert_eq!(k.bare, "phoebe_lc_filter");
        assert_eq!(k.index, Some(11));
    }

    #[test]
    fn zero_index_is_invalid() {
        assert_eq!(resolve_index("phoebe_lc_filter[0]"), Err(InvalidIndex));
    }

    #[test]
    fn huge_index_is_invalid() {
        assert_eq!(resolve_index("phoebe_rv_dep[99999999999999999999999]"), Err(InvalidIndex));
    }

    #[test]
    fn non_numeric_brackets_are_left_alone() {
        let k = resolve_index("phoebe_lc_filter[a]").unwrap();
        assert_eq!(k.bare, "phoebe_lc_filter[a]");
        assert_eq!(k.index, None);
    }
}
