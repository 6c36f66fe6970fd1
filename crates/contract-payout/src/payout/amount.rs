use serde::{Deserialize, Serialize};

/// Contract amount entered by the user. Always finite and non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct ContractAmount(f64);

impl ContractAmount {
    pub const ZERO: ContractAmount = ContractAmount(0.0);

    /// Accepts any number, falling back to zero for negative or non-finite values.
    pub fn from_number(value: f64) -> Self {
        if value.is_finite() && value > 0.0 {
            Self(value)
        } else {
            Self::ZERO
        }
    }

    /// Parses free-form field input the way the input form does.
    ///
    /// Grouping commas are dropped and the longest leading numeric prefix is used, so
    /// `"1,000,000"` is one million and `"12abc"` is twelve. Empty, non-numeric,
    /// negative, or non-finite input yields zero rather than an error.
    pub fn parse_lenient(raw: &str) -> Self {
        let cleaned: String = raw.trim().chars().filter(|ch| *ch != ',').collect();
        let prefix = numeric_prefix(&cleaned);
        if prefix.is_empty() {
            return Self::ZERO;
        }

        prefix
            .parse::<f64>()
            .map(Self::from_number)
            .unwrap_or(Self::ZERO)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl From<f64> for ContractAmount {
    fn from(value: f64) -> Self {
        Self::from_number(value)
    }
}

impl From<ContractAmount> for f64 {
    fn from(amount: ContractAmount) -> Self {
        amount.0
    }
}

fn numeric_prefix(input: &str) -> &str {
    let bytes = input.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let integer_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - integer_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while fraction_end < bytes.len() && bytes[fraction_end].is_ascii_digit() {
            fraction_end += 1;
        }
        mantissa_digits += fraction_end - fraction_start;
        if mantissa_digits > 0 {
            end = fraction_end;
        }
    }

    if mantissa_digits == 0 {
        return "";
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+') | Some(b'-')) {
            exponent_end += 1;
        }
        let digits_start = exponent_end;
        while exponent_end < bytes.len() && bytes[exponent_end].is_ascii_digit() {
            exponent_end += 1;
        }
        if exponent_end > digits_start {
            end = exponent_end;
        }
    }

    &input[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_grouped_numbers() {
        assert_eq!(ContractAmount::parse_lenient("1000000").value(), 1_000_000.0);
        assert_eq!(ContractAmount::parse_lenient(" 1,000,000 ").value(), 1_000_000.0);
        assert_eq!(ContractAmount::parse_lenient("2500.75").value(), 2500.75);
        assert_eq!(ContractAmount::parse_lenient(".5").value(), 0.5);
        assert_eq!(ContractAmount::parse_lenient("1.5e3").value(), 1500.0);
    }

    #[test]
    fn uses_leading_numeric_prefix() {
        assert_eq!(ContractAmount::parse_lenient("12abc").value(), 12.0);
        assert_eq!(ContractAmount::parse_lenient("3.5.1").value(), 3.5);
        assert_eq!(ContractAmount::parse_lenient("7e").value(), 7.0);
        assert_eq!(ContractAmount::parse_lenient("40원").value(), 40.0);
    }

    #[test]
    fn invalid_input_falls_back_to_zero() {
        for raw in ["", "   ", "abc", ".", "-", "Infinity", "NaN", "-500", "1e999"] {
            assert_eq!(
                ContractAmount::parse_lenient(raw),
                ContractAmount::ZERO,
                "input {raw:?} should fall back to zero"
            );
        }
    }

    #[test]
    fn from_number_rejects_negative_and_non_finite() {
        assert_eq!(ContractAmount::from_number(-1.0), ContractAmount::ZERO);
        assert_eq!(ContractAmount::from_number(f64::NAN), ContractAmount::ZERO);
        assert_eq!(ContractAmount::from_number(f64::INFINITY), ContractAmount::ZERO);
        assert_eq!(ContractAmount::from_number(42.0).value(), 42.0);
    }

    #[test]
    fn deserializing_applies_the_same_fallback() {
        let negative: ContractAmount = serde_json::from_str("-500").expect("number");
        let plain: ContractAmount = serde_json::from_str("1500").expect("number");

        assert_eq!(negative, ContractAmount::ZERO);
        assert_eq!(plain.value(), 1500.0);
        assert_eq!(serde_json::to_string(&plain).expect("encode"), "1500.0");
    }
}
