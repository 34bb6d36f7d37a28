//! Price string normalization and formatting.

/// Parse a display price into its numeric value.
///
/// Strips every character except ASCII digits and the decimal point
/// (currency symbols, grouping commas, whitespace), then parses the rest as
/// a float. Returns `None` when nothing parseable remains — such a quote is
/// excluded from best-deal ranking even if the platform marked it available.
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Format a rupee amount with Indian digit grouping: `₹12,34,567`.
///
/// The last three digits form one group, every pair before them another.
pub fn format_inr(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("₹{digits}");
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);

    let mut out = String::from("₹");
    for group in groups.iter().rev() {
        out.push_str(group);
        out.push(',');
    }
    out.push_str(tail);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clean_number_is_identity() {
        assert_eq!(parse_price("1999"), Some(1999.0));
    }

    #[test]
    fn test_parse_strips_rupee_and_commas() {
        assert_eq!(parse_price("₹12,345"), Some(12345.0));
        assert_eq!(parse_price("₹1,23,456"), Some(123456.0));
    }

    #[test]
    fn test_parse_keeps_decimal_point() {
        assert_eq!(parse_price("$19.99"), Some(19.99));
    }

    #[test]
    fn test_parse_tolerates_whitespace() {
        assert_eq!(parse_price(" ₹ 2,499 "), Some(2499.0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_price("call for price"), None);
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("₹"), None);
    }

    #[test]
    fn test_parse_rejects_multiple_decimal_points() {
        assert_eq!(parse_price("1.2.3"), None);
    }

    #[test]
    fn test_format_small_amounts_ungrouped() {
        assert_eq!(format_inr(0), "₹0");
        assert_eq!(format_inr(999), "₹999");
    }

    #[test]
    fn test_format_indian_grouping() {
        assert_eq!(format_inr(1000), "₹1,000");
        assert_eq!(format_inr(12345), "₹12,345");
        assert_eq!(format_inr(123456), "₹1,23,456");
        assert_eq!(format_inr(1234567), "₹12,34,567");
        assert_eq!(format_inr(123456789), "₹12,34,56,789");
    }

    #[test]
    fn test_format_round_trips_through_parse() {
        for amount in [25u64, 500, 1999, 48123, 1234567] {
            assert_eq!(parse_price(&format_inr(amount)), Some(amount as f64));
        }
    }
}
