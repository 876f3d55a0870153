//! Numeric input parsing and formatting
//!
//! Input fields accept either `.` or `,` as the decimal separator so that
//! values typed with a European locale parse the same way.

/// Parse a decimal number typed into an input field.
///
/// Leading/trailing whitespace is ignored and a single `,` is treated as
/// the decimal separator. Empty or non-numeric input is an error, as are
/// infinities and NaN.
pub fn parse_decimal(input: &str) -> Result<f64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input".to_string());
    }

    let normalized = input.replace(',', ".");
    let value = normalized.parse::<f64>().map_err(|e| e.to_string())?;

    if !value.is_finite() {
        return Err(format!("Not a finite number: {}", input));
    }
    Ok(value)
}

/// Format a value with a fixed number of decimals for an input field.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    // Avoid showing "-0.0" for values that round to zero
    if formatted.starts_with('-') && formatted[1..].chars().all(|c| c == '0' || c == '.') {
        formatted[1..].to_string()
    } else {
        formatted
    }
}
