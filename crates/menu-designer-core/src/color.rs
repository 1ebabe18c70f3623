//! Colour utilities for the mobile panel tint.

/// An sRGB colour read from a computed style.
#[derive(Clone, Debug, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// Convert to a CSS rgba() string with a custom alpha value.
    ///
    /// Useful for creating semi-transparent versions of a color (e.g., the mobile tint).
    pub fn to_css_with_alpha(self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

/// Parse a computed `rgb()` / `rgba()` colour.
///
/// Returns None for empty input, `transparent`, fully transparent black (what
/// browsers report for "no background"), and anything that is not rgb(a).
pub fn parse_rgb(color: &str) -> Option<Rgba> {
    let color = color.trim();
    if color.is_empty() || color == "transparent" || color == "rgba(0, 0, 0, 0)" {
        return None;
    }

    let inner = color
        .strip_prefix("rgba(")
        .or_else(|| color.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let mut parts = inner.split(',').map(str::trim);

    let r = parts.next()?.parse().ok()?;
    let g = parts.next()?.parse().ok()?;
    let b = parts.next()?.parse().ok()?;
    let a = match parts.next() {
        Some(alpha) => alpha.parse().ok()?,
        None => 1.0,
    };
    if parts.next().is_some() {
        return None;
    }

    Some(Rgba { r, g, b, a })
}
