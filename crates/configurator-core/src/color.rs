use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("color {0:?} does not start with '#'")]
    MissingHash(String),
    #[error("color {0:?} must have 3 or 6 hex digits")]
    BadLength(String),
    #[error("color {0:?} contains a non-hex digit")]
    BadDigit(String),
}

/// Parses `#rgb` or `#rrggbb` into sRGB components in \[0, 1\].
pub fn parse_hex_srgb(hex: &str) -> Result<[f32; 3], ColorError> {
    let digits = hex
        .trim()
        .strip_prefix('#')
        .ok_or_else(|| ColorError::MissingHash(hex.to_string()))?;
    // from_str_radix would also take a sign
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::BadDigit(hex.to_string()));
    }
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return Err(ColorError::BadLength(hex.to_string())),
    };
    let mut rgb = [0.0; 3];
    for (i, out) in rgb.iter_mut().enumerate() {
        let byte = u8::from_str_radix(&expanded[i * 2..i * 2 + 2], 16)
            .map_err(|_| ColorError::BadDigit(hex.to_string()))?;
        *out = byte as f32 / 255.0;
    }
    Ok(rgb)
}

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Parses a hex color and converts it to linear RGB for shading.
pub fn parse_hex_linear(hex: &str) -> Result<[f32; 3], ColorError> {
    parse_hex_srgb(hex).map(|c| c.map(srgb_to_linear))
}
