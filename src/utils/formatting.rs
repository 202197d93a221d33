//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// `1234567.5` → `"1,234,567.50"`.
pub fn format_amount(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let units = cents / 100;
    let frac = cents % 100;

    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}.{:02}", if negative { "-" } else { "" }, grouped, frac)
}

/// Amount prefixed with the configured currency symbol.
pub fn format_money(value: f64, currency: &str) -> String {
    if currency.is_empty() {
        format_amount(value)
    } else {
        format!("{} {}", currency, format_amount(value))
    }
}

/// Signed delta, e.g. `+1,792.00`.
pub fn format_delta(value: f64) -> String {
    if value > 0.0 {
        format!("+{}", format_amount(value))
    } else {
        format_amount(value)
    }
}
