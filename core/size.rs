const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Renders a byte count as e.g. `"1.50 KB"`. Values are divided by 1024
/// until they drop below it or GB is reached; GB is never subdivided
/// further, so very large counts simply grow past 1024 GB.
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_index])
}
