// Color resolution: hex strings and the named color-scale shorthand.

use serde::Serialize;

/// RGB triple in `[0, 1]`, each channel rounded to 3 decimals: the shape
/// the Sheets API expects for every color field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorRgb {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

/// Parse `"#RRGGBB"` (case-insensitive, leading `#` optional) into a
/// normalized triple. Rounding to 3 decimals keeps the output deterministic
/// across calls, which the tests rely on.
pub fn hex_to_rgb(hex: &str) -> Option<ColorRgb> {
    let cleaned = hex.strip_prefix('#').unwrap_or(hex);
    if cleaned.len() != 6 {
        return None;
    }
    let bits = u32::from_str_radix(cleaned, 16).ok()?;

    Some(ColorRgb {
        red: round3(((bits >> 16) & 0xFF) as f64 / 255.0),
        green: round3(((bits >> 8) & 0xFF) as f64 / 255.0),
        blue: round3((bits & 0xFF) as f64 / 255.0),
    })
}

/// Fixed table behind the `--scale` shorthand (`red:yellow:green` etc.).
pub fn named_color(name: &str) -> Option<ColorRgb> {
    let color = match name {
        "red" => ColorRgb { red: 0.918, green: 0.263, blue: 0.208 },
        "green" => ColorRgb { red: 0.204, green: 0.659, blue: 0.325 },
        "yellow" => ColorRgb { red: 0.984, green: 0.737, blue: 0.016 },
        "white" => ColorRgb { red: 1.0, green: 1.0, blue: 1.0 },
        "orange" => ColorRgb { red: 1.0, green: 0.427, blue: 0.004 },
        "blue" => ColorRgb { red: 0.259, green: 0.522, blue: 0.957 },
        _ => return None,
    };
    Some(color)
}

/// Resolve a `:`-separated scale spec into concrete colors. Each token is
/// trimmed, lowercased, looked up in the named table, and otherwise read as
/// hex. Returns `None` if any token resolves to neither; the validator
/// turns that into a user-facing error before any request is built.
pub fn resolve_scale(spec: &str) -> Option<Vec<ColorRgb>> {
    spec.split(':')
        .map(|token| {
            let token = token.trim().to_lowercase();
            named_color(&token).or_else(|| hex_to_rgb(&token))
        })
        .collect()
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
