//! Occurrence search that reports byte ranges.
//!
//! Ranges always fall on char boundaries, so `&haystack[range]` is valid.

use std::ops::Range;

use regex::{Regex, RegexBuilder};

use crate::text::is_blank;

/// Options for [`ranges_of`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub case_insensitive: bool,
    /// Restrict the search to this byte range of the haystack.
    pub within: Option<Range<usize>>,
}

impl SearchOptions {
    #[must_use]
    pub fn case_insensitive() -> Self {
        Self {
            case_insensitive: true,
            within: None,
        }
    }

    #[must_use]
    pub fn within(mut self, range: Range<usize>) -> Self {
        self.within = Some(range);
        self
    }
}

/// Ranges matched by `pattern` in `haystack`.
///
/// A pattern that compiles as a regex yields every match, possibly none. A
/// pattern that does not compile is searched for literally, and `None` is
/// returned when it never occurs. A missing or empty pattern is `None`.
#[must_use]
pub fn match_ranges(haystack: &str, pattern: Option<&str>) -> Option<Vec<Range<usize>>> {
    if is_blank(pattern, &[]) {
        return None;
    }
    let pattern = pattern?;

    match Regex::new(pattern) {
        Ok(regex) => Some(regex.find_iter(haystack).map(|m| m.range()).collect()),
        Err(_) => {
            let ranges = ranges_of(haystack, pattern, &SearchOptions::default());
            (!ranges.is_empty()).then_some(ranges)
        }
    }
}

/// All non-overlapping literal occurrences of `needle`.
///
/// An empty needle, or a `within` range that is out of bounds or splits a
/// character, yields no ranges.
#[must_use]
pub fn ranges_of(haystack: &str, needle: &str, options: &SearchOptions) -> Vec<Range<usize>> {
    if needle.is_empty() {
        return Vec::new();
    }

    let (offset, region) = match &options.within {
        Some(range) => match haystack.get(range.clone()) {
            Some(region) => (range.start, region),
            None => return Vec::new(),
        },
        None => (0, haystack),
    };

    if options.case_insensitive {
        // Case folding can change byte lengths; let the regex engine map
        // matches back onto the original text.
        let Ok(regex) = RegexBuilder::new(&regex::escape(needle))
            .case_insensitive(true)
            .build()
        else {
            return Vec::new();
        };
        return regex
            .find_iter(region)
            .map(|m| offset + m.start()..offset + m.end())
            .collect();
    }

    region
        .match_indices(needle)
        .map(|(start, matched)| offset + start..offset + start + matched.len())
        .collect()
}
