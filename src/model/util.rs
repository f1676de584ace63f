use std::ops::{Bound, RangeBounds};

pub fn from<R: RangeBounds<usize>>(range: &R) -> usize {
    match range.start_bound() {
        Bound::Unbounded => 0,
        Bound::Included(x) => *x,
        Bound::Excluded(x) => x + 1,
    }
}

pub fn to<R: RangeBounds<usize>>(range: &R, max: usize) -> usize {
    match range.end_bound() {
        Bound::Unbounded => max,
        Bound::Included(x) => x + 1,
        Bound::Excluded(x) => *x,
    }
}

/// Split `text` after `index` UTF-16 code units.
///
/// An index in the middle of a surrogate pair splits before that character.
pub fn split_at_utf16(text: &str, index: usize) -> (&str, &str) {
    let mut seen = 0;
    for (byte, c) in text.char_indices() {
        if seen >= index {
            return text.split_at(byte);
        }
        seen += c.len_utf16();
        if seen > index {
            return text.split_at(byte);
        }
    }
    (text, "")
}

#[cfg(test)]
mod tests {
    use super::split_at_utf16;

    #[test]
    fn split_counts_utf16_units() {
        assert_eq!(split_at_utf16("abc", 1), ("a", "bc"));
        assert_eq!(split_at_utf16("\u{1F375}tea", 2), ("\u{1F375}", "tea"));
        assert_eq!(split_at_utf16("차와 뉴스", 2), ("차와", " 뉴스"));
        assert_eq!(split_at_utf16("abc", 10), ("abc", ""));
    }
}
