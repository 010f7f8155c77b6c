/// Formats an optional f64 to `precision` decimal places, or "NA" if None or non-finite.
pub fn fmt_opt(v: Option<f64>, precision: usize) -> String {
    match v {
        Some(x) if x.is_finite() => format!("{x:.precision$}"),
        _ => "NA".to_owned(),
    }
}

pub fn fmt_num(v: f64, precision: usize) -> String {
    fmt_opt(Some(v), precision)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_opt() {
        assert_eq!(fmt_opt(Some(0.123_456), 4), "0.1235");
        assert_eq!(fmt_opt(None, 4), "NA");
        assert_eq!(fmt_num(f64::NAN, 2), "NA");
        assert_eq!(fmt_num(3.0, 2), "3.00");
    }
}
