//! Human-readable size formatting.

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count with a decimal unit, rounded to two decimals.
///
/// The value is divided by 1000 while it exceeds 1000, so 1000 itself
/// stays in the smaller unit: `size_label(1000)` is `"1000 B"`.
pub fn size_label(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while unit < UNITS.len() - 1 && value > 1000.0 {
        value /= 1000.0;
        unit += 1;
    }
    format!("{} {}", (value * 100.0).round() / 100.0, UNITS[unit])
}
