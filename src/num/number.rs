/// `2^63`, the first double past the `i64` range.
const I64_UPPER_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Result of folding the format's single numeric type into Rust numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Integer(i64),
    Float(f64),
}

/// Integral doubles inside the `i64` range collapse to integers; everything
/// else (fractions, NaN, infinities, huge magnitudes) stays a float.
#[inline]
pub fn collapse(value: f64) -> Numeric {
    if value.fract() == 0.0 && (-I64_UPPER_BOUND..I64_UPPER_BOUND).contains(&value) {
        Numeric::Integer(value as i64)
    } else {
        Numeric::Float(value)
    }
}

pub fn format_integer(value: i64) -> String {
    let mut buffer = itoa::Buffer::new();
    buffer.format(value).to_string()
}

/// Shortest round-trip decimal without exponent notation.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let mut buffer = ryu::Buffer::new();
    let raw = buffer.format_finite(value);
    if raw.contains(['e', 'E']) {
        expand_exponent(raw)
    } else {
        trim_fraction(raw.to_string())
    }
}

fn expand_exponent(raw: &str) -> String {
    let (negative, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    let (mantissa, exponent) = unsigned
        .split_once(['e', 'E'])
        .unwrap_or((unsigned, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits = format!("{whole}{fraction}");
    let point = whole.len() as i32 + exponent;

    let mut out = String::with_capacity(digits.len() + point.unsigned_abs() as usize + 3);
    if negative {
        out.push('-');
    }
    if point <= 0 {
        out.push_str("0.");
        out.push_str(&"0".repeat(point.unsigned_abs() as usize));
        out.push_str(&digits);
    } else if point as usize >= digits.len() {
        out.push_str(&digits);
        out.push_str(&"0".repeat(point as usize - digits.len()));
    } else {
        let (head, tail) = digits.split_at(point as usize);
        out.push_str(head);
        out.push('.');
        out.push_str(tail);
    }
    trim_fraction(out)
}

fn trim_fraction(mut value: String) -> String {
    if value.contains('.') {
        let kept = value.trim_end_matches('0').trim_end_matches('.').len();
        value.truncate(kept);
    }
    if value.trim_start_matches('-').bytes().all(|b| b == b'0') {
        return "0".to_string();
    }
    value
}
