//! Color math for label chips, status dots and column accents.
//!
//! All functions are pure. Two brightness measures live side by side on
//! purpose: [`luminance`] decides light vs. dark text on a label chip, while
//! [`perceived_lightness`] feeds the dark-mode chip styling. They use
//! different coefficients and both are kept exactly.

use serde::Serialize;

use super::models::StatusColor;

/// Color used for labels whose hex cannot be parsed or that are not in the dataset.
pub const FALLBACK_LABEL_COLOR: &str = "6b7280";

/// How much [`LabelStyle`] mixes the label color with white for dark mode borders.
pub const DARK_MODE_BRIGHTEN: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hsl {
    /// Degrees, 0..=359.
    pub h: u16,
    /// Percent, 0..=100.
    pub s: u8,
    /// Percent, 0..=100.
    pub l: u8,
}

impl Rgb {
    /// Parse six hex digits. A leading `#` is tolerated.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let rgb = u32::from_str_radix(hex, 16).ok()?;
        Some(Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
        })
    }

    /// `#rrggbb`, lowercase.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_hsl(self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        let mut h = 0.0;
        let mut s = 0.0;

        if max != min {
            let d = max - min;
            s = if l > 0.5 {
                d / (2.0 - max - min)
            } else {
                d / (max + min)
            };
            h = if max == r {
                ((g - b) / d + if g < b { 6.0 } else { 0.0 }) / 6.0
            } else if max == g {
                ((b - r) / d + 2.0) / 6.0
            } else {
                ((r - g) / d + 4.0) / 6.0
            };
        }

        Hsl {
            h: ((h * 360.0).round() as u16) % 360,
            s: (s * 100.0).round() as u8,
            l: (l * 100.0).round() as u8,
        }
    }

    /// Mix with white by `amount` (0..=1).
    pub fn brighten(self, amount: f64) -> Self {
        let mix = |c: u8| {
            let c = f64::from(c);
            (c + (255.0 - c) * amount).round().clamp(0.0, 255.0) as u8
        };
        Self {
            r: mix(self.r),
            g: mix(self.g),
            b: mix(self.b),
        }
    }

    /// `0.299R + 0.587G + 0.114B`, scaled to 0..=1.
    pub fn luminance(self) -> f64 {
        (0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b))
            / 255.0
    }

    /// sRGB coefficients `0.2126R + 0.7152G + 0.0722B`, scaled to 0..=1.
    pub fn perceived_lightness(self) -> f64 {
        (f64::from(self.r) * 0.2126 + f64::from(self.g) * 0.7152 + f64::from(self.b) * 0.0722)
            / 255.0
    }
}

fn rgb_or_fallback(hex: &str) -> Rgb {
    Rgb::from_hex(hex)
        .or_else(|| Rgb::from_hex(FALLBACK_LABEL_COLOR))
        .unwrap_or(Rgb {
            r: 0x6b,
            g: 0x72,
            b: 0x80,
        })
}

pub fn hex_to_rgb(hex: &str) -> Rgb {
    rgb_or_fallback(hex)
}

pub fn hex_to_hsl(hex: &str) -> Hsl {
    rgb_or_fallback(hex).to_hsl()
}

pub fn luminance(hex: &str) -> f64 {
    rgb_or_fallback(hex).luminance()
}

pub fn perceived_lightness(hex: &str) -> f64 {
    rgb_or_fallback(hex).perceived_lightness()
}

pub fn brighten_color(hex: &str, amount: f64) -> String {
    rgb_or_fallback(hex).brighten(amount).to_hex()
}

/// Deterministic accent color for a string, as a CSS `hsl()` value.
///
/// Hashes UTF-16 code units with `hash = c + (hash << 5) - hash` in 32-bit
/// wrapping arithmetic so the same title always gets the same hue.
pub fn string_to_hsl_color(s: &str, saturation: u8, lightness: u8) -> String {
    let mut hash: i32 = 0;
    for unit in s.encode_utf16() {
        hash = i32::from(unit).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash));
    }
    let hue = (hash % 360).unsigned_abs();
    format!("hsl({}, {}%, {}%)", hue, saturation, lightness)
}

/// Column accent used for milestone headers.
pub fn accent_color(title: &str) -> String {
    string_to_hsl_color(title, 65, 55)
}

/// Display colors for one status color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaletteEntry {
    pub color: StatusColor,
    /// Solid dot / swatch color.
    pub dot: &'static str,
    /// Soft badge background.
    pub background: &'static str,
    /// Badge text color.
    pub text: &'static str,
}

const PALETTE: [PaletteEntry; 8] = [
    PaletteEntry {
        color: StatusColor::Green,
        dot: "#22c55e",
        background: "#dcfce7",
        text: "#166534",
    },
    PaletteEntry {
        color: StatusColor::Yellow,
        dot: "#eab308",
        background: "#fef9c3",
        text: "#854d0e",
    },
    PaletteEntry {
        color: StatusColor::Purple,
        dot: "#a855f7",
        background: "#f3e8ff",
        text: "#6b21a8",
    },
    PaletteEntry {
        color: StatusColor::Blue,
        dot: "#3b82f6",
        background: "#dbeafe",
        text: "#1e40af",
    },
    PaletteEntry {
        color: StatusColor::Orange,
        dot: "#f97316",
        background: "#ffedd5",
        text: "#9a3412",
    },
    PaletteEntry {
        color: StatusColor::Red,
        dot: "#ef4444",
        background: "#fee2e2",
        text: "#991b1b",
    },
    PaletteEntry {
        color: StatusColor::Pink,
        dot: "#ec4899",
        background: "#fce7f3",
        text: "#9d174d",
    },
    PaletteEntry {
        color: StatusColor::Gray,
        dot: "#6b7280",
        background: "#f3f4f6",
        text: "#1f2937",
    },
];

impl StatusColor {
    pub fn palette(self) -> &'static PaletteEntry {
        PALETTE
            .iter()
            .find(|entry| entry.color == self)
            .unwrap_or(&PALETTE[7])
    }
}

/// Everything a markup layer needs to style one label chip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelStyle {
    /// `#rrggbb` of the label itself.
    pub background: String,
    pub rgb: Rgb,
    pub hsl: Hsl,
    /// Rounded to three decimals.
    pub perceived_lightness: f64,
    /// Background is light enough to need dark text.
    pub is_light: bool,
    /// Brightened variant for dark mode text and border.
    pub dark_mode_accent: String,
}

impl LabelStyle {
    pub fn for_hex(hex: &str) -> Self {
        let rgb = rgb_or_fallback(hex);
        Self {
            background: rgb.to_hex(),
            rgb,
            hsl: rgb.to_hsl(),
            perceived_lightness: (rgb.perceived_lightness() * 1000.0).round() / 1000.0,
            is_light: rgb.luminance() > 0.5,
            dark_mode_accent: rgb.brighten(DARK_MODE_BRIGHTEN).to_hex(),
        }
    }
}
