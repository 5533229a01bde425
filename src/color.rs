use crate::error::{ScreencraftError, ScreencraftResult};

/// Straight-alpha sRGB color as carried by settings hex strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_peniko(self) -> vello_cpu::peniko::Color {
        vello_cpu::peniko::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }

    /// Premultiplied byte quad in pixmap channel order.
    pub fn premul(self) -> [u8; 4] {
        fn mul(c: u8, a: u8) -> u8 {
            ((u16::from(c) * u16::from(a) + 127) / 255) as u8
        }
        [
            mul(self.r, self.a),
            mul(self.g, self.a),
            mul(self.b, self.a),
            self.a,
        ]
    }

    /// Channel-wise lerp in straight sRGB, matching canvas gradient stops.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            let af = f32::from(a);
            let bf = f32::from(b);
            (af + (bf - af) * t).round().clamp(0.0, 255.0) as u8
        };
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

/// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional, case-insensitive).
pub fn parse_hex(s: &str) -> ScreencraftResult<Rgba8> {
    let trimmed = s.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

    fn hex_byte(pair: &str) -> ScreencraftResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| ScreencraftError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    match digits.len() {
        6 => Ok(Rgba8::rgb(
            hex_byte(&digits[0..2])?,
            hex_byte(&digits[2..4])?,
            hex_byte(&digits[4..6])?,
        )),
        8 => Ok(Rgba8::rgba(
            hex_byte(&digits[0..2])?,
            hex_byte(&digits[2..4])?,
            hex_byte(&digits[4..6])?,
            hex_byte(&digits[6..8])?,
        )),
        _ => Err(ScreencraftError::validation(format!(
            "hex color \"{s}\" must be #RRGGBB or #RRGGBBAA"
        ))),
    }
}
