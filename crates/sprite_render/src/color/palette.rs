use std::cmp::Ordering::Less;

use super::space::Color;
use crate::ConfigError;

/// Main and shadow lightness of one tier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightnessTier {
    pub main: f64,
    pub shadow: f64,
}

impl LightnessTier {
    pub const fn new(main: f64, shadow: f64) -> Self {
        Self { main, shadow }
    }
}

/// Color space the palette is sampled in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ColorModel {
    /// Fully saturated HSL.
    Hsl,
    /// OKLCH with a lower chroma for the shadow color.
    #[default]
    Oklch,
}

impl ColorModel {
    const HSL_TIERS: &'static [LightnessTier] = &[LightnessTier::new(0.5, 0.3)];
    const OKLCH_TIERS: &'static [LightnessTier] = &[
        LightnessTier::new(0.8, 0.7),
        LightnessTier::new(0.7, 0.5),
        LightnessTier::new(0.4, 0.3),
    ];
    const OKLCH_MAIN_CHROMA: f64 = 0.3;
    const OKLCH_SHADOW_CHROMA: f64 = 0.2;

    /// Lightness tiers used when none are given explicitly.
    pub fn default_tiers(self) -> &'static [LightnessTier] {
        match self {
            ColorModel::Hsl => Self::HSL_TIERS,
            ColorModel::Oklch => Self::OKLCH_TIERS,
        }
    }

    fn pair(self, hue: f64, tier: LightnessTier) -> (Color, Color) {
        match self {
            ColorModel::Hsl => (
                Color::Hsl { hue, saturation: 1.0, lightness: tier.main },
                Color::Hsl { hue, saturation: 1.0, lightness: tier.shadow },
            ),
            ColorModel::Oklch => (
                Color::Oklch { lightness: tier.main, chroma: Self::OKLCH_MAIN_CHROMA, hue },
                Color::Oklch { lightness: tier.shadow, chroma: Self::OKLCH_SHADOW_CHROMA, hue },
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorPair {
    pub main: Color,
    pub shadow: Color,
    /// 1-based position in the palette.
    pub index: usize,
}

/// Parameters of a palette run.
#[derive(Clone, Debug, PartialEq)]
pub struct PaletteSpec {
    pub base_hues: usize,
    pub model: ColorModel,
    pub tiers: Vec<LightnessTier>,
}

impl Default for PaletteSpec {
    fn default() -> Self {
        Self::new(64, ColorModel::default())
    }
}

impl PaletteSpec {
    /// Spec using every default tier of `model`.
    pub fn new(base_hues: usize, model: ColorModel) -> Self {
        Self { base_hues, model, tiers: model.default_tiers().to_vec() }
    }

    /// Keep only the first `count` default tiers of the model.
    ///
    /// `count` is capped at the model's preset length (one for HSL, three for
    /// OKLCH). More tiers need explicit [`LightnessTier`]s in `tiers`.
    pub fn with_tier_count(mut self, count: usize) -> Result<Self, ConfigError> {
        let available = self.model.default_tiers();
        if count == 0 || count > available.len() {
            return Err(ConfigError::InvalidPalette(format!(
                "tier count must be between 1 and {} for {:?}, got {count}",
                available.len(),
                self.model
            )));
        }
        self.tiers = available[..count].to_vec();
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.base_hues * self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sample the hue wheel, hue-major and tier-minor.
    pub fn generate(&self) -> Result<Palette, ConfigError> {
        if self.base_hues == 0 {
            return Err(ConfigError::InvalidPalette("base hue count must be positive".into()));
        }
        if self.tiers.is_empty() {
            return Err(ConfigError::InvalidPalette("at least one lightness tier is needed".into()));
        }
        let inverted =
            self.tiers.iter().find(|tier| tier.shadow.partial_cmp(&tier.main) != Some(Less));
        if let Some(tier) = inverted {
            return Err(ConfigError::InvalidPalette(format!(
                "shadow lightness {} must be below main lightness {}",
                tier.shadow, tier.main
            )));
        }

        let mut pairs = Vec::with_capacity(self.len());
        for i in 0..self.base_hues {
            let hue = i as f64 * 360.0 / self.base_hues as f64;
            for &tier in &self.tiers {
                let (main, shadow) = self.model.pair(hue, tier);
                pairs.push(ColorPair { main, shadow, index: pairs.len() + 1 });
            }
        }

        Ok(Palette { pairs })
    }
}

/// Ordered color pairs of one run.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    pairs: Vec<ColorPair>,
}

impl Palette {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[ColorPair] {
        &self.pairs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColorPair> {
        self.pairs.iter()
    }

    /// Pair with the given 1-based index.
    pub fn get(&self, index: usize) -> Option<&ColorPair> {
        index.checked_sub(1).and_then(|i| self.pairs.get(i))
    }
}

impl<'a> IntoIterator for &'a Palette {
    type IntoIter = std::slice::Iter<'a, ColorPair>;
    type Item = &'a ColorPair;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_and_indices() {
        let palette = PaletteSpec::new(64, ColorModel::Oklch).generate().unwrap();
        assert_eq!(palette.len(), 192);
        let indices: Vec<_> = palette.iter().map(|pair| pair.index).collect();
        assert_eq!(indices, (1..=192).collect::<Vec<_>>());
    }

    #[test]
    fn hue_major_tier_minor() {
        let palette = PaletteSpec::new(4, ColorModel::Oklch).generate().unwrap();
        let hues: Vec<_> = palette.iter().map(|pair| pair.main.hue()).collect();
        assert_eq!(hues, [
            0.0, 0.0, 0.0, 90.0, 90.0, 90.0, 180.0, 180.0, 180.0, 270.0, 270.0, 270.0
        ]);

        let lightness: Vec<_> = palette.pairs()[..3].iter().map(|p| p.main.lightness()).collect();
        assert_eq!(lightness, [0.8, 0.7, 0.4]);
    }

    #[test]
    fn shadow_is_darker_at_same_hue() {
        for model in [ColorModel::Hsl, ColorModel::Oklch] {
            let palette = PaletteSpec::new(12, model).generate().unwrap();
            for pair in &palette {
                assert_eq!(pair.main.hue(), pair.shadow.hue());
                assert!(pair.shadow.lightness() < pair.main.lightness());
                assert!(pair.shadow.to_rgb().luminance() < pair.main.to_rgb().luminance());
            }
        }
    }

    #[test]
    fn hsl_matches_rainbow() {
        let palette = PaletteSpec::new(64, ColorModel::Hsl).generate().unwrap();
        assert_eq!(palette.len(), 64);
        let first = palette.get(1).unwrap();
        assert_eq!(first.main.to_css(), "hsl(0, 100%, 50%)");
        assert_eq!(first.shadow.to_css(), "hsl(0, 100%, 30%)");
        assert_eq!(palette.get(2).unwrap().main.to_css(), "hsl(5.625, 100%, 50%)");
        assert!(palette.get(0).is_none());
        assert!(palette.get(65).is_none());
    }

    #[test]
    fn deterministic() {
        let spec = PaletteSpec::default();
        assert_eq!(spec.generate().unwrap(), spec.generate().unwrap());
    }

    #[test]
    fn tier_count() {
        let spec = PaletteSpec::new(2, ColorModel::Oklch).with_tier_count(1).unwrap();
        assert_eq!(spec.generate().unwrap().len(), 2);
        assert!(PaletteSpec::new(2, ColorModel::Hsl).with_tier_count(2).is_err());
        assert!(PaletteSpec::new(2, ColorModel::Oklch).with_tier_count(0).is_err());
        assert!(PaletteSpec::new(2, ColorModel::Oklch).with_tier_count(4).is_err());

        let mut spec = PaletteSpec::new(2, ColorModel::Hsl);
        spec.tiers.push(LightnessTier::new(0.7, 0.5));
        assert_eq!(spec.generate().unwrap().len(), 4);
    }

    #[test]
    fn invalid_specs() {
        assert!(PaletteSpec::new(0, ColorModel::Hsl).generate().is_err());

        let mut spec = PaletteSpec::new(3, ColorModel::Hsl);
        spec.tiers.clear();
        assert!(spec.generate().is_err());

        spec.tiers.push(LightnessTier::new(0.3, 0.3));
        assert!(spec.generate().is_err());
    }
}
