//! Plain-text formatting of scalar field values

use chrono::DateTime;
use once_cell::sync::Lazy;
use regex::Regex;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag regex is valid"));

static BLOCK_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(p|div|li|h[1-6])>").expect("block regex is valid")
});

static BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("blank line regex is valid"));

const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&amp;", "&"),
];

/// Strip markup from rich text
///
/// Block ends become line breaks, tags are dropped and the common entities
/// are decoded. `&amp;` is decoded last so `&amp;lt;` stays `&lt;`.
#[must_use]
pub fn strip_html(html: &str) -> String {
    let text = BLOCK_END.replace_all(html, "\n");
    let text = TAG.replace_all(&text, "");
    let mut text = text.into_owned();
    for (entity, plain) in ENTITIES {
        text = text.replace(entity, plain);
    }
    BLANK_LINES.replace_all(text.trim(), "\n\n").into_owned()
}

/// Human-readable byte count, e.g. `1.5 MB`
#[must_use]
pub fn format_file_size(raw: &str) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let Ok(bytes) = raw.trim().parse::<u64>() else {
        return raw.to_string();
    };
    if bytes < 1024 {
        return format!("{bytes} B");
    }

    #[allow(clippy::cast_precision_loss)]
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.1} {}", UNITS[unit])
}

/// RFC 3339 timestamp as `YYYY-MM-DD HH:MM` in its own offset
///
/// Unparseable input is returned unchanged.
#[must_use]
pub fn format_date_time(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Last path segment of a stored file path or URL
#[must_use]
pub fn file_name(raw: &str) -> String {
    let path = raw.split(['?', '#']).next().unwrap_or(raw);
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(path)
        .to_string()
}
