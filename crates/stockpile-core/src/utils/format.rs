/// Format a price for display with two decimals and a dollar sign
pub fn format_price(price: f64) -> String {
    if price.is_finite() {
        format!("${:.2}", price)
    } else {
        "-".to_string()
    }
}

/// Truncate a string to a maximum number of characters, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(1.5), "$1.50");
        assert_eq!(format_price(0.0), "$0.00");
        assert_eq!(format_price(9.999), "$10.00");
        assert_eq!(format_price(f64::NAN), "-");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
        assert_eq!(truncate_string("Crème brûlée", 8), "Crème...");
    }
}
