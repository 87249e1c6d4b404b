//! Number formatting for table cells and stat cards

/// Groups the integer part by thousands with `,`.
pub fn format_thousands(n: i64) -> String {
    let s = n.unsigned_abs().to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    if n < 0 {
        result.push('-');
    }
    result.chars().rev().collect()
}

/// Price with two decimals, e.g. `$12,500.00`.
pub fn format_price(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as i64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, format_thousands(cents / 100), cents % 100)
}

/// Price of a record field; blank when the field holds no number.
pub fn format_price_field(record: &contracts::domain::common::Record, field: &str) -> String {
    record.f64_field(field).map(format_price).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::Record;

    #[test]
    fn thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
        assert_eq!(format_thousands(-12_345), "-12,345");
    }

    #[test]
    fn prices() {
        assert_eq!(format_price(12500.0), "$12,500.00");
        assert_eq!(format_price(0.5), "$0.50");
        assert_eq!(format_price(1234.567), "$1,234.57");
        assert_eq!(format_price(-3.0), "-$3.00");
    }

    #[test]
    fn price_fields() {
        let r = Record::new().with("price", "99.9").with("name", "x");
        assert_eq!(format_price_field(&r, "price"), "$99.90");
        assert_eq!(format_price_field(&r, "name"), "");
    }
}
