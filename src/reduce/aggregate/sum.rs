use super::Aggregate;

/// Adds up the numeric value of the field of every record.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Sum {
    total: f64,
}

impl Sum {
    pub fn new() -> Sum {
        Default::default()
    }

    pub fn value(&self) -> f64 {
        self.total
    }
}

impl Aggregate for Sum {
    fn update(&mut self, data: &str) {
        self.total += parse_prefix(data);
    }

    fn reset(&mut self) {
        self.total = 0.0;
    }
}

/// Reads the longest leading part of `text` that is a decimal number, the way
/// `atof` does: leading whitespace, an optional sign, digits with an optional
/// fraction and an optional exponent. `inf`, `infinity` and `nan` are
/// accepted in any case. Text with no numeric prefix is worth zero.
pub fn parse_prefix(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if let Some(b'+') | Some(b'-') = bytes.first() {
        end += 1;
    }

    let rest = &text[end..];

    for word in &["infinity", "inf", "nan"] {
        match rest.get(..word.len()) {
            Some(head) if head.eq_ignore_ascii_case(word) => {
                return text[..end + word.len()].parse().unwrap_or(0.0);
            }
            _ => {}
        }
    }

    let digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let integer = digits(end);
    end += integer;

    let mut fraction = 0;

    if bytes.get(end) == Some(&b'.') {
        fraction = digits(end + 1);

        if integer + fraction > 0 {
            end += 1 + fraction;
        }
    }

    if integer + fraction == 0 {
        return 0.0;
    }

    if let Some(b'e') | Some(b'E') = bytes.get(end) {
        let mut exp = end + 1;

        if let Some(b'+') | Some(b'-') = bytes.get(exp) {
            exp += 1;
        }

        let exp_digits = digits(exp);

        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    text[..end].parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::{parse_prefix, Aggregate, Sum};

    #[test]
    fn test_sum() {
        let mut sum = Sum::new();

        sum.update("3.0");
        sum.update("2");
        sum.update(".5");

        assert_eq!(sum.value(), 5.5);

        sum.reset();

        assert_eq!(sum.value(), 0.0);
    }

    #[test]
    fn test_non_numeric_adds_nothing() {
        let mut sum = Sum::new();

        sum.update("10");
        sum.update("");
        sum.update("n/a");

        assert_eq!(sum.value(), 10.0);
    }

    #[test]
    fn test_parse_prefix() {
        assert_eq!(parse_prefix("42"), 42.0);
        assert_eq!(parse_prefix("  -1.5"), -1.5);
        assert_eq!(parse_prefix("+7."), 7.0);
        assert_eq!(parse_prefix("12abc"), 12.0);
        assert_eq!(parse_prefix("3.25kg"), 3.25);
        assert_eq!(parse_prefix("1e3"), 1000.0);
        assert_eq!(parse_prefix("2E-2x"), 0.02);
        assert_eq!(parse_prefix("5e"), 5.0);
        assert_eq!(parse_prefix("5e+"), 5.0);
        assert_eq!(parse_prefix("."), 0.0);
        assert_eq!(parse_prefix("-"), 0.0);
        assert_eq!(parse_prefix("abc"), 0.0);
        assert_eq!(parse_prefix(""), 0.0);
        assert_eq!(parse_prefix("1,000"), 1.0);
    }

    #[test]
    fn test_parse_special_values() {
        assert_eq!(parse_prefix("inf"), f64::INFINITY);
        assert_eq!(parse_prefix("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_prefix("NaN").is_nan());
    }
}
