/// Marker shown in place of a missing value.
pub const UNAVAILABLE: &str = "N/A";

/// Formats an open-interest figure with an `M` / `K` suffix.
pub fn format_magnitude(num: f64) -> String {
    if num >= 1_000_000.0 {
        format!("{:.2}M", num / 1_000_000.0)
    } else if num >= 1_000.0 {
        format!("{:.2}K", num / 1_000.0)
    } else {
        format!("{:.2}", num)
    }
}

pub fn format_change(change: f64) -> String {
    format!("{:.2}", change)
}

/// Case-insensitive substring match of `query` in `symbol`.
pub fn symbol_matches(symbol: &str, query: &str) -> bool {
    symbol.to_uppercase().contains(&query.to_uppercase())
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }

    escaped
}
