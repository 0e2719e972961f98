//! Shared formatting helpers for CLI commands

/// Format a point as `(x, y, z)` with two decimals
pub fn format_point(p: &[f64; 3]) -> String {
    format!("({:.2}, {:.2}, {:.2})", p[0], p[1], p[2])
}

/// Format a point that may lie at infinity
pub fn format_optional_point(p: Option<&[f64; 3]>) -> String {
    match p {
        Some(p) => format_point(p),
        None => "at infinity".to_string(),
    }
}

/// Format a length in millimetres, `∞` for non-finite values
pub fn format_mm(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2} mm", value)
    } else {
        "∞".to_string()
    }
}

/// Format an angle given in radians as degrees
pub fn format_deg(radians: f64) -> String {
    format!("{:.3}°", radians.to_degrees())
}

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
