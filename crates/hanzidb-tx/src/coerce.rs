use hanzidb_core::Numeric;

/// Parse a trimmed field as a finite float
fn parse_finite(value: &str) -> Option<f64> {
    let raw = value.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Integer coercion: parse as a float, then truncate toward zero
///
/// `"5"` and `"5.0"` give `5`; blank or unparseable text gives `None`, as
/// does a value outside the `i64` range.
pub fn to_int(value: &str) -> Option<i64> {
    parse_finite(value)
        .map(f64::trunc)
        .filter(|n| in_i64_range(*n))
        .map(|n| n as i64)
}

fn in_i64_range(n: f64) -> bool {
    n >= i64::MIN as f64 && n < i64::MAX as f64
}

/// Numeric coercion: whole numbers become integers, others stay fractional
pub fn to_num(value: &str) -> Option<Numeric> {
    let n = parse_finite(value)?;
    if n.fract() == 0.0 && in_i64_range(n) {
        Some(Numeric::Int(n as i64))
    } else {
        Some(Numeric::Float(n))
    }
}

/// Trimmed text, or `None` when nothing is left
pub fn non_empty(value: &str) -> Option<String> {
    let raw = value.trim();
    (!raw.is_empty()).then(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_coercion() {
        assert_eq!(to_int("5"), Some(5));
        assert_eq!(to_int("5.0"), Some(5));
        assert_eq!(to_int(" 7.9 "), Some(7));
        assert_eq!(to_int("-2.5"), Some(-2));
        assert_eq!(to_int(""), None);
        assert_eq!(to_int("   "), None);
        assert_eq!(to_int("abc"), None);
        assert_eq!(to_int("inf"), None);
        assert_eq!(to_int("NaN"), None);
    }

    #[test]
    fn int_coercion_rejects_out_of_range() {
        assert_eq!(to_int("1e19"), None);
        assert_eq!(to_int("-1e30"), None);
        assert_eq!(to_int("9007199254740992"), Some(9_007_199_254_740_992));
        assert_eq!(to_int("-9223372036854775808"), Some(i64::MIN));
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(to_num("10"), Some(Numeric::Int(10)));
        assert_eq!(to_num("10.0"), Some(Numeric::Int(10)));
        assert_eq!(to_num("10.5"), Some(Numeric::Float(10.5)));
        assert_eq!(to_num(""), None);
        assert_eq!(to_num("x9"), None);
    }

    #[test]
    fn numeric_coercion_edges() {
        assert_eq!(to_num("inf"), None);
        assert_eq!(to_num("-inf"), None);
        assert_eq!(to_num("nan"), None);
        assert_eq!(to_num("1e20"), Some(Numeric::Float(1e20)));
        assert_eq!(to_num("-3"), Some(Numeric::Int(-3)));
    }

    #[test]
    fn non_empty_trims() {
        assert_eq!(non_empty("  nǐ "), Some("nǐ".to_string()));
        assert_eq!(non_empty(" \t"), None);
    }
}
