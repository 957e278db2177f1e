/*!
 * Utility functions for tidyfs
 */

use once_cell::sync::Lazy;

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Date-bucket wildcards and their strftime translations, longest first so
/// "month"/"Month" win over the single-letter forms
static DATE_WILDCARDS: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    vec![
        // Abbreviated and full month names
        ("month", "%b"),
        ("Month", "%B"),
        // Zero-padded day and month
        ("D", "%d"),
        ("M", "%m"),
        // Two-digit and full year
        ("y", "%y"),
        ("Y", "%Y"),
        // Unpadded day and month
        ("d", "%-d"),
        ("m", "%-m"),
    ]
});

/// Translate a friendly date-bucket format (e.g. "D-M-Y", "Month Y") into
/// a strftime format string
///
/// Characters outside the wildcard table pass through as literals; "%" is
/// escaped so the result is always a well-formed format string.
pub fn convert_date_format(format: &str) -> String {
    let mut converted = String::with_capacity(format.len() * 2);
    let mut rest = format;

    'scan: while !rest.is_empty() {
        for (token, code) in DATE_WILDCARDS.iter() {
            if let Some(remainder) = rest.strip_prefix(token) {
                converted.push_str(code);
                rest = remainder;
                continue 'scan;
            }
        }
        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            if ch == '%' {
                converted.push_str("%%");
            } else {
                converted.push(ch);
            }
        }
        rest = chars.as_str();
    }

    converted
}
