//! Rupee formatting with Indian digit grouping (en-IN)

/// Group an integer's digits as lakh/crore: last three, then pairs
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    groups.push(rest);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Format an amount with no decimals, e.g. `₹12,34,567`
///
/// Halves round away from zero.
pub fn format_inr(value: f64) -> String {
    if !value.is_finite() {
        return format!("₹{}", value);
    }
    // Integral after rounding, so `{:.0}` prints every digit at any magnitude
    let rounded = value.round();
    let grouped = group_indian(&format!("{:.0}", rounded.abs()));
    if rounded < 0.0 {
        format!("-₹{}", grouped)
    } else {
        format!("₹{}", grouped)
    }
}

/// Format a projected value range, e.g. `₹1,268 - ₹1,300`
pub fn format_range(min: f64, max: f64) -> String {
    format!("{} - {}", format_inr(min), format_inr(max))
}
