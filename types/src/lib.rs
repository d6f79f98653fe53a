//! Pure helpers for tackle.
//!
//! This crate has no IO, no threads, and no global mutable state. Everything
//! here operates on caller-owned strings, slices and byte buffers and can be
//! used from any layer:
//!
//! - **`text`**: character-offset substring, trimming and numeric helpers
//! - **`ranges`**: regex and literal occurrence search reporting byte ranges
//! - **`collection`**: index-safe vector and slice accessors
//! - **`path`**, **`query`**: slash-path and query-string manipulation
//! - **`validate`**, **`date`**: format checks and timestamp parsing

pub mod bytes;
pub mod collection;
pub mod date;
pub mod path;
pub mod query;
pub mod ranges;
pub mod text;
pub mod validate;

pub use bytes::{hex_token, utf8_string};
pub use collection::{SafeIndex, VecExt};
pub use date::{parse_iso8601, parse_rfc3339_millis, parse_with_format};
pub use path::{
    appending_path_component, appending_path_extension, deleting_last_path_component,
    deleting_path_extension, is_absolute_path, last_path_component, path_components,
    path_extension, path_with_components,
};
pub use query::{UrlCharset, encode_url, encode_url_query, parse_query};
pub use ranges::{SearchOptions, match_ranges, ranges_of};
pub use text::{EMPTY, TextExt, TextMutExt, is_blank};
pub use validate::{is_valid_email, is_valid_phone, is_valid_url};
