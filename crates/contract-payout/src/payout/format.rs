/// Floors a payout to whole currency units. Negative or non-finite values become zero.
///
/// Stays an `f64` so amounts beyond the integer types keep their magnitude.
pub fn floor_payout(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value.floor()
    } else {
        0.0
    }
}

/// Renders a whole, non-negative amount with comma thousands separators.
pub fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", floor_payout(value));
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

/// `900000.7` with suffix `원` renders as `900,000 원`.
pub fn format_payout(value: f64, currency_suffix: &str) -> String {
    let grouped = group_thousands(floor_payout(value));
    if currency_suffix.is_empty() {
        grouped
    } else {
        format!("{grouped} {currency_suffix}")
    }
}
