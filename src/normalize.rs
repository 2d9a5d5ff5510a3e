use once_cell::sync::Lazy;
use regex::Regex;

/// Zero width space, non-joiner, joiner and the byte order mark.
static ZERO_WIDTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{200B}-\u{200D}\u{FEFF}]").expect("valid zero-width regex"));

static HTTPS_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https://").expect("valid https regex"));

static HTTP_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^http://").expect("valid http regex"));

/// Remove zero width characters, surrounding whitespace, trailing slashes and
/// a leading `https://` or `http://` (any case) from a URL.
///
/// The steps are repeated until the string stops changing, so
/// `clean_url(&clean_url(u)) == clean_url(u)` holds even for inputs such as
/// `"http://https://host"` or `"http:// host"`.
pub fn clean_url(url: &str) -> String {
    let mut current = clean_once(url);
    loop {
        let next = clean_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_once(url: &str) -> String {
    let without_zero_width = ZERO_WIDTH.replace_all(url, "");
    let trimmed = without_zero_width.trim().trim_end_matches('/');
    let without_https = HTTPS_PREFIX.replace(trimmed, "");
    HTTP_PREFIX.replace(&without_https, "").into_owned()
}
