//! Number formatting for text reports

/// Whole US dollars with thousands separators, e.g. `-$1,234,568`
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// A fraction rendered as a one-decimal percentage: `0.7` -> `70.0%`
pub fn format_percentage(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.4), "$999");
        assert_eq!(format_currency(1000.0), "$1,000");
        assert_eq!(format_currency(10400600.000000002), "$10,400,600");
        assert_eq!(format_currency(123456.5), "$123,457");
    }

    #[test]
    fn currency_negative_amounts() {
        assert_eq!(format_currency(-2500.0), "-$2,500");
        assert_eq!(format_currency(-0.2), "$0");
    }

    #[test]
    fn percentage_one_decimal() {
        assert_eq!(format_percentage(0.7), "70.0%");
        assert_eq!(format_percentage(0.5049), "50.5%");
        assert_eq!(format_percentage(1.0), "100.0%");
    }
}
