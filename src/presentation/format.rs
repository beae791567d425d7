//! Number formatting for metric cards and terminal output.

/// `1234567.891` -> `"1,234,567.89"`
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }

    let formatted = format!("{:.2}", value.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}

/// `-1500.0` -> `"-$1,500.00"`
pub fn format_currency(value: f64) -> String {
    let number = format_number(value);
    match number.strip_prefix('-') {
        Some(rest) => format!("-${}", rest),
        None if number == "N/A" => number,
        None => format!("${}", number),
    }
}

/// Currency, or `N/A` when undefined
pub fn format_optional_currency(value: Option<f64>) -> String {
    value.map(format_currency).unwrap_or_else(|| "N/A".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0.00");
        assert_eq!(format_number(999.5), "999.50");
        assert_eq!(format_number(1234567.891), "1,234,567.89");
        assert_eq!(format_number(-1000.0), "-1,000.00");
        assert_eq!(format_number(f64::NAN), "N/A");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(60.0), "$60.00");
        assert_eq!(format_currency(-1500.0), "-$1,500.00");
        assert_eq!(format_optional_currency(None), "N/A");
        assert_eq!(format_optional_currency(Some(10.0)), "$10.00");
    }
}
