//! Format checks for user-entered contact details and links.

use std::sync::OnceLock;

use regex::Regex;
use url::Url;

const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[A-Z0-9a-z._%+-]+@([A-Za-z0-9-]+\.)+[A-Za-z]{2,4}$")
            .expect("email pattern is valid")
    })
}

fn phone_regex() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| {
        Regex::new(r"^\+?(?:[0-9]{1,3}[ .-]?)?(?:\([0-9]{1,4}\)[ .-]?)?[0-9]+(?:[ .-]?[0-9]+)*$")
            .expect("phone pattern is valid")
    })
}

#[must_use]
pub fn is_valid_email(candidate: &str) -> bool {
    email_regex().is_match(candidate)
}

/// The whole string must be a single phone number with 7 to 15 digits.
#[must_use]
pub fn is_valid_phone(candidate: &str) -> bool {
    if !phone_regex().is_match(candidate) {
        return false;
    }
    let digits = candidate.chars().filter(char::is_ascii_digit).count();
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}

/// A URL needs both a scheme and a host.
#[must_use]
pub fn is_valid_url(candidate: &str) -> bool {
    Url::parse(candidate).is_ok_and(|url| {
        !url.scheme().is_empty() && url.host_str().is_some_and(|host| !host.is_empty())
    })
}
