//! Character-offset string helpers.
//!
//! Every index in this module counts Unicode scalar values, never bytes, so
//! callers can slice multi-byte text without landing inside a character.

use std::iter;
use std::ops::Range;
use std::str::FromStr;

/// The empty string, for call sites that want a named constant.
pub const EMPTY: &str = "";

/// Returns true when `value` is absent or nothing remains after trimming `trim`
/// from both ends.
///
/// An empty `trim` set means only the empty string counts as blank.
#[must_use]
pub fn is_blank(value: Option<&str>, trim: &[char]) -> bool {
    match value {
        None => true,
        Some(s) => s.trim_matches(trim).is_empty(),
    }
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Byte offset of the `index`-th character, or `s.len()` when `index` is the
/// character count. `None` past the end.
fn byte_offset(s: &str, index: usize) -> Option<usize> {
    s.char_indices()
        .map(|(offset, _)| offset)
        .chain(iter::once(s.len()))
        .nth(index)
}

pub trait TextExt {
    fn char_len(&self) -> usize;

    /// Trim spaces and tabs, keeping line breaks.
    fn trim_spaces(&self) -> &str;

    /// Trim all whitespace including line breaks.
    fn trim_whitespace(&self) -> &str;

    /// The character at `index` as a string, or an empty string when out of bounds.
    fn char_at(&self, index: usize) -> String;

    /// Character offset of the first occurrence of `target`. An empty target never matches.
    fn index_of(&self, target: &str) -> Option<usize>;

    /// Characters from `from` to the end. `None` when `from` is past the end.
    fn substring_from(&self, from: usize) -> Option<String>;

    /// The first `to` characters. `None` unless `to` is strictly inside the string.
    fn substring_to(&self, to: usize) -> Option<String>;

    /// Characters in `from..to`. `None` unless `from < to <= char_len`.
    fn substring(&self, from: usize, to: usize) -> Option<String>;

    fn strip_prefix_opt(&self, prefix: Option<&str>) -> &str;

    fn strip_suffix_opt(&self, suffix: Option<&str>) -> &str;

    /// Drop the last `n` characters. Unchanged when `n` covers the whole string.
    fn drop_last_chars(&self, n: usize) -> &str;

    fn delete_all(&self, needle: &str) -> String;

    /// Right-pad with spaces up to `width` characters.
    fn pad_end(&self, width: usize) -> String;

    /// Parse an integer written with `,` group separators (`"1,234"`).
    fn grouped_int<N: FromStr>(&self) -> Option<N>;

    fn grouped_int_or_zero<N: FromStr + Default>(&self) -> N {
        self.grouped_int().unwrap_or_default()
    }
}

impl TextExt for str {
    fn char_len(&self) -> usize {
        self.chars().count()
    }

    fn trim_spaces(&self) -> &str {
        self.trim_matches(|c: char| c.is_whitespace() && !is_line_break(c))
    }

    fn trim_whitespace(&self) -> &str {
        self.trim()
    }

    fn char_at(&self, index: usize) -> String {
        self.chars()
            .nth(index)
            .map(String::from)
            .unwrap_or_default()
    }

    fn index_of(&self, target: &str) -> Option<usize> {
        if target.is_empty() {
            return None;
        }
        let byte = self.find(target)?;
        Some(self[..byte].chars().count())
    }

    fn substring_from(&self, from: usize) -> Option<String> {
        let start = byte_offset(self, from)?;
        Some(self[start..].to_string())
    }

    fn substring_to(&self, to: usize) -> Option<String> {
        if to >= self.char_len() {
            return None;
        }
        let end = byte_offset(self, to)?;
        Some(self[..end].to_string())
    }

    fn substring(&self, from: usize, to: usize) -> Option<String> {
        if from >= to {
            return None;
        }
        let start = byte_offset(self, from)?;
        let end = byte_offset(self, to)?;
        Some(self[start..end].to_string())
    }

    fn strip_prefix_opt(&self, prefix: Option<&str>) -> &str {
        prefix
            .and_then(|prefix| self.strip_prefix(prefix))
            .unwrap_or(self)
    }

    fn strip_suffix_opt(&self, suffix: Option<&str>) -> &str {
        suffix
            .and_then(|suffix| self.strip_suffix(suffix))
            .unwrap_or(self)
    }

    fn drop_last_chars(&self, n: usize) -> &str {
        let len = self.char_len();
        if n >= len {
            return self;
        }
        match byte_offset(self, len - n) {
            Some(end) => &self[..end],
            None => self,
        }
    }

    fn delete_all(&self, needle: &str) -> String {
        if needle.is_empty() {
            return self.to_string();
        }
        self.replace(needle, "")
    }

    fn pad_end(&self, width: usize) -> String {
        let len = self.char_len();
        let mut out = String::with_capacity(self.len() + width.saturating_sub(len));
        out.push_str(self);
        out.extend(iter::repeat_n(' ', width.saturating_sub(len)));
        out
    }

    fn grouped_int<N: FromStr>(&self) -> Option<N> {
        self.delete_all(",").parse().ok()
    }
}

pub trait TextMutExt {
    /// Remove the characters in `range`, clamped to the string.
    fn delete_char_range(&mut self, range: Range<usize>);
}

impl TextMutExt for String {
    fn delete_char_range(&mut self, range: Range<usize>) {
        let len = self.chars().count();
        let start = range.start.min(len);
        let end = range.end.clamp(start, len);
        if start == end {
            return;
        }
        let (Some(start), Some(end)) = (byte_offset(self, start), byte_offset(self, end)) else {
            return;
        };
        self.replace_range(start..end, "");
    }
}
