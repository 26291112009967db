//! Number formatting for exported files.
//!
//! Exported files use the JVM `Double.toString` rendering so they stay
//! byte-compatible with tools that read the evogpj formats: shortest
//! round-trip digits, always at least one fractional digit, and
//! `d.dddE<exp>` notation outside `[1e-3, 1e7)`.

use std::io::{self, Write};

/// Render a double the way the JVM's `Double.toString` does.
///
/// # Example
/// ```
/// use scaled_data::io::format_double;
///
/// assert_eq!(format_double(10.0), "10.0");
/// assert_eq!(format_double(0.5), "0.5");
/// assert_eq!(format_double(1e-5), "1.0E-5");
/// assert_eq!(format_double(f64::NAN), "NaN");
/// ```
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let s = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return s.to_string();
    }

    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        let mut s = format!("{}", value);
        if !s.contains('.') {
            s.push_str(".0");
        }
        return s;
    }

    let sci = format!("{:e}", value);
    match sci.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => {
            format!("{}E{}", mantissa, exponent)
        }
        Some((mantissa, exponent)) => format!("{}.0E{}", mantissa, exponent),
        None => sci,
    }
}

/// Write one normalized row: every value but the last followed by `,`,
/// the last followed by a newline.
pub fn write_row<W: Write + ?Sized>(writer: &mut W, row: &[f64]) -> io::Result<()> {
    if let Some((last, head)) = row.split_last() {
        for &value in head {
            write!(writer, "{},", format_double(value))?;
        }
        writeln!(writer, "{}", format_double(*last))?;
    }
    Ok(())
}

/// Write one `"<min> <max>"` bounds line.
pub fn write_bounds_line<W: Write + ?Sized>(writer: &mut W, min: f64, max: f64) -> io::Result<()> {
    writeln!(writer, "{} {}", format_double(min), format_double(max))
}
