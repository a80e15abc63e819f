//! Display helpers shared by both report formats.

/// Formats an integer with `,` thousands separators.
///
/// ```
/// use trending_notifier::format_number;
///
/// assert_eq!(format_number(1234567), "1,234,567");
/// assert_eq!(format_number(42), "42");
/// ```
#[must_use]
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Escapes `& < > " '` as HTML entities.
///
/// `&` is replaced first so the entities introduced for the other characters
/// are not escaped twice.
#[must_use]
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Returns the display form of a language filter.
///
/// `all` in any case and the empty string mean every language; anything else is
/// title cased.
#[must_use]
pub fn display_language(language: &str) -> String {
    if language.is_empty() || language.eq_ignore_ascii_case("all") {
        return "All Languages".to_string();
    }
    title_case(language)
}

/// Returns the display form of a period token. Unknown tokens pass through.
#[must_use]
pub fn display_period(period: &str) -> String {
    match period {
        "daily" => "Past 24 Hours",
        "weekly" => "Past Week",
        "monthly" => "Past Month",
        other => other,
    }
    .to_string()
}

/// Upper-cases the first letter of every word, leaving the rest untouched.
///
/// Word boundaries are characters other than letters, digits and `_`.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_boundary = true;
    for c in s.chars() {
        if at_boundary && c.is_alphabetic() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_boundary = !(c.is_alphanumeric() || c == '_');
    }
    out
}
