//! Money and percentage formatting

/// Format an amount with a currency prefix, two decimals and Indian digit
/// grouping, e.g. `Rs 1,23,456.50`
pub fn format_money(value: f64, prefix: &str) -> String {
    if !value.is_finite() {
        return format!("{}{}", prefix, value);
    }

    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };

    format!(
        "{}{}{}.{:02}",
        sign,
        prefix,
        group_indian(cents / 100),
        cents % 100
    )
}

/// Group digits as thousands, then lakhs and crores: `12,34,567`
fn group_indian(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    groups.push(rest);
    groups.reverse();

    format!("{},{}", groups.join(","), last_three)
}

/// Format a percentage with precision depending on size
pub fn format_percentage(pct: f64) -> String {
    if pct > 0.0 && pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}
