use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static MEDIA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<(img|video)\b").expect("valid media regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Escapes text for use inside element content or a quoted attribute.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Strips tags from an HTML fragment and collapses whitespace.
///
/// Used to decide whether saved editor markup carries any visible text.
pub fn plain_text_of_html(html: &str) -> String {
    let stripped = TAG_RE.replace_all(html, " ");
    WHITESPACE_RE.replace_all(&stripped, " ").trim().to_string()
}

/// True when an HTML fragment embeds an image or a video.
pub fn has_media_markup(html: &str) -> bool {
    MEDIA_RE.is_match(html)
}

/// Accepts `data:` URLs of the expected media family, `http(s)` URLs and
/// scheme-less relative paths.
pub(crate) fn is_allowed_source(src: &str, data_prefix: &str) -> bool {
    let trimmed = src.trim();
    if trimmed.is_empty() {
        return false;
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("data:") {
        return lower.starts_with(data_prefix);
    }
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return true;
    }
    match (lower.find(':'), lower.find('/')) {
        (None, _) => true,
        (Some(colon), Some(slash)) => slash < colon,
        (Some(_), None) => false,
    }
}
