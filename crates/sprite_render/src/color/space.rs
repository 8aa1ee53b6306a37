use std::fmt;

use image::Rgba;

/// 8-bit sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }

    /// Relative luminance in [0, 1].
    pub fn luminance(self) -> f64 {
        let [r, g, b] = [self.r, self.g, self.b].map(|c| srgb_to_linear(f64::from(c) / 255.0));
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// A color as specified in its generating model, with its sRGB rendition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    /// Hue in degrees, saturation and lightness in [0, 1].
    Hsl { hue: f64, saturation: f64, lightness: f64 },
    /// OKLCH lightness in [0, 1], chroma, hue in degrees.
    Oklch { lightness: f64, chroma: f64, hue: f64 },
}

impl Color {
    pub fn hue(&self) -> f64 {
        match *self {
            Color::Hsl { hue, .. } | Color::Oklch { hue, .. } => hue,
        }
    }

    pub fn lightness(&self) -> f64 {
        match *self {
            Color::Hsl { lightness, .. } | Color::Oklch { lightness, .. } => lightness,
        }
    }

    pub fn to_rgb(&self) -> Rgb {
        match *self {
            Color::Hsl { hue, saturation, lightness } => hsl_to_rgb(hue, saturation, lightness),
            Color::Oklch { lightness, chroma, hue } => oklch_to_rgb(lightness, chroma, hue),
        }
    }

    /// CSS color string accepted by canvas-style backends.
    pub fn to_css(&self) -> String {
        match *self {
            Color::Hsl { hue, saturation, lightness } => {
                format!(
                    "hsl({}, {}%, {}%)",
                    css_number(hue),
                    css_number(saturation * 100.0),
                    css_number(lightness * 100.0)
                )
            },
            Color::Oklch { .. } => self.to_rgb().to_string(),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> Rgb {
    let saturation = saturation.clamp(0.0, 1.0);
    let lightness = lightness.clamp(0.0, 1.0);
    let hue = hue.rem_euclid(360.0);

    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;

    Rgb::new(to_byte(r + m), to_byte(g + m), to_byte(b + m))
}

/// Convert OKLCH to sRGB, reducing chroma until the color fits the gamut.
///
/// Lightness and hue are preserved exactly, which keeps tiers of one hue on
/// the same hue line.
fn oklch_to_rgb(lightness: f64, chroma: f64, hue: f64) -> Rgb {
    let lightness = lightness.clamp(0.0, 1.0);
    let chroma = chroma.max(0.0);

    let mut linear = oklch_to_linear(lightness, chroma, hue);
    if !in_gamut(linear) {
        let (mut low, mut high) = (0.0, chroma);
        for _ in 0..32 {
            let mid = (low + high) / 2.0;
            if in_gamut(oklch_to_linear(lightness, mid, hue)) {
                low = mid;
            } else {
                high = mid;
            }
        }
        linear = oklch_to_linear(lightness, low, hue);
    }

    let [r, g, b] = linear.map(|c| to_byte(linear_to_srgb(c.clamp(0.0, 1.0))));
    Rgb::new(r, g, b)
}

fn oklch_to_linear(lightness: f64, chroma: f64, hue: f64) -> [f64; 3] {
    let (sin, cos) = hue.to_radians().sin_cos();
    let (a, b) = (chroma * cos, chroma * sin);

    let l = (lightness + 0.396_337_777_4 * a + 0.215_803_757_3 * b).powi(3);
    let m = (lightness - 0.105_561_345_8 * a - 0.063_854_172_8 * b).powi(3);
    let s = (lightness - 0.089_484_177_5 * a - 1.291_485_548_0 * b).powi(3);

    [
        4.076_741_662_1 * l - 3.307_711_591_3 * m + 0.230_969_929_2 * s,
        -1.268_438_004_6 * l + 2.609_757_401_1 * m - 0.341_319_396_5 * s,
        -0.004_196_086_3 * l - 0.703_418_614_7 * m + 1.707_614_701_0 * s,
    ]
}

fn in_gamut(linear: [f64; 3]) -> bool {
    const EPSILON: f64 = 1e-6;
    linear.iter().all(|c| (-EPSILON..=1.0 + EPSILON).contains(c))
}

fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Round away float noise such as `30.000000000000004`.
fn css_number(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn to_byte(c: f64) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hsl(hue: f64, lightness: f64) -> Color {
        Color::Hsl { hue, saturation: 1.0, lightness }
    }

    #[test]
    fn hsl_primaries() {
        assert_eq!(hsl(0.0, 0.5).to_rgb(), Rgb::new(255, 0, 0));
        assert_eq!(hsl(120.0, 0.5).to_rgb(), Rgb::new(0, 255, 0));
        assert_eq!(hsl(240.0, 0.5).to_rgb(), Rgb::new(0, 0, 255));
        assert_eq!(hsl(0.0, 0.3).to_rgb(), Rgb::new(153, 0, 0));
        assert_eq!(hsl(360.0, 0.5).to_rgb(), Rgb::new(255, 0, 0));
    }

    #[test]
    fn oklch_extremes() {
        let white = Color::Oklch { lightness: 1.0, chroma: 0.0, hue: 0.0 };
        let black = Color::Oklch { lightness: 0.0, chroma: 0.0, hue: 0.0 };
        assert_eq!(white.to_rgb(), Rgb::WHITE);
        assert_eq!(black.to_rgb(), Rgb::new(0, 0, 0));
    }

    #[test]
    fn oklch_out_of_gamut_keeps_lightness_order() {
        for hue in (0..360).step_by(15) {
            let hue = f64::from(hue);
            let main = Color::Oklch { lightness: 0.7, chroma: 0.3, hue }.to_rgb();
            let shadow = Color::Oklch { lightness: 0.5, chroma: 0.2, hue }.to_rgb();
            assert!(shadow.luminance() < main.luminance(), "hue {hue}");
        }
    }

    #[test]
    fn css_strings() {
        assert_eq!(hsl(90.0, 0.3).to_css(), "hsl(90, 100%, 30%)");
        assert_eq!(Rgb::new(1, 2, 3).to_string(), "rgb(1, 2, 3)");
        let white = Color::Oklch { lightness: 1.0, chroma: 0.0, hue: 0.0 };
        assert_eq!(white.to_css(), "rgb(255, 255, 255)");
    }
}
