//! # Theme Resolution
//!
//! Resolves the document's theme tokens against the configured defaults and
//! enforces the contrast policy. The validator and the normalizer both call
//! [`ThemePalette::resolve`], so every text color the normalizer replaces has
//! a matching `low_contrast` warning.

use crate::color::{contrast_ratio, extreme_text_on, Rgb};
use crate::config::{ConfigError, PipelineConfig};
use crate::raw::{text, RawTheme};

/// Parsed theme defaults and contrast policy.
#[derive(Debug, Clone)]
pub struct ThemePalette {
    primary: Rgb,
    background: Rgb,
    text: Rgb,
    accent: Rgb,
    font_heading: String,
    font_body: String,
    min_ratio: f64,
    dark_text: Rgb,
    light_text: Rgb,
}

/// A theme color the document supplied but that could not be used.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedColor {
    pub field: &'static str,
    pub value: String,
}

/// Record of a text color replaced for contrast.
#[derive(Debug, Clone, PartialEq)]
pub struct ContrastAdjustment {
    pub ratio: f64,
    pub original: Rgb,
    pub replacement: Rgb,
    pub background: Rgb,
}

/// The effective theme for one document.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTheme {
    pub primary: Rgb,
    pub background: Rgb,
    pub text: Rgb,
    pub accent: Rgb,
    pub font_heading: String,
    pub font_body: String,
    pub rejected: Vec<RejectedColor>,
    pub adjustment: Option<ContrastAdjustment>,
}

impl ThemePalette {
    pub fn from_config(config: &PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let parse = |field: &'static str, value: &str| {
            Rgb::parse_hex(value).ok_or_else(|| ConfigError::InvalidColor {
                field,
                value: value.to_string(),
            })
        };
        Ok(Self {
            primary: parse("theme.primary", &config.theme.primary)?,
            background: parse("theme.background", &config.theme.background)?,
            text: parse("theme.text", &config.theme.text)?,
            accent: parse("theme.accent", &config.theme.accent)?,
            font_heading: config.theme.font_heading.clone(),
            font_body: config.theme.font_body.clone(),
            min_ratio: config.contrast.min_ratio,
            dark_text: parse("contrast.dark_text", &config.contrast.dark_text)?,
            light_text: parse("contrast.light_text", &config.contrast.light_text)?,
        })
    }

    pub fn min_ratio(&self) -> f64 {
        self.min_ratio
    }

    /// Merge `raw` over the defaults and enforce minimum contrast.
    pub fn resolve(&self, raw: Option<&RawTheme>) -> ResolvedTheme {
        let mut rejected = Vec::new();
        let mut pick = |field: &'static str, value: Option<&String>, default: Rgb| {
            let supplied = value.map(|v| v.trim()).filter(|v| !v.is_empty());
            match supplied {
                None => default,
                Some(v) => Rgb::parse_hex(v).unwrap_or_else(|| {
                    rejected.push(RejectedColor {
                        field,
                        value: v.to_string(),
                    });
                    default
                }),
            }
        };

        let primary = pick("primary", raw.and_then(|t| t.primary.as_ref()), self.primary);
        let background = pick(
            "background",
            raw.and_then(|t| t.background.as_ref()),
            self.background,
        );
        let text_color = pick("text", raw.and_then(|t| t.text.as_ref()), self.text);
        let accent = pick("accent", raw.and_then(|t| t.accent.as_ref()), self.accent);

        let ratio = contrast_ratio(text_color, background);
        let (text_color, adjustment) = if ratio < self.min_ratio {
            let replacement = self.readable_text_on(background);
            (
                replacement,
                Some(ContrastAdjustment {
                    ratio,
                    original: text_color,
                    replacement,
                    background,
                }),
            )
        } else {
            (text_color, None)
        };

        let font = |value: Option<&Option<String>>, default: &str| {
            value
                .and_then(text)
                .map_or_else(|| default.to_string(), str::to_string)
        };

        ResolvedTheme {
            primary,
            background,
            text: text_color,
            accent,
            font_heading: font(raw.map(|t| &t.font_heading), &self.font_heading),
            font_body: font(raw.map(|t| &t.font_body), &self.font_body),
            rejected,
            adjustment,
        }
    }

    /// Whichever configured text color reads better on `background`, or
    /// black/white when neither configured color reaches the minimum.
    fn readable_text_on(&self, background: Rgb) -> Rgb {
        let preferred = if contrast_ratio(self.dark_text, background)
            >= contrast_ratio(self.light_text, background)
        {
            self.dark_text
        } else {
            self.light_text
        };
        if contrast_ratio(preferred, background) >= self.min_ratio {
            preferred
        } else {
            extreme_text_on(background)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> ThemePalette {
        ThemePalette::from_config(&PipelineConfig::default()).unwrap()
    }

    fn theme(text: Option<&str>, background: Option<&str>) -> RawTheme {
        RawTheme {
            text: text.map(str::to_string),
            background: background.map(str::to_string),
            ..RawTheme::default()
        }
    }

    #[test]
    fn absent_theme_uses_defaults() {
        let resolved = palette().resolve(None);
        assert_eq!(resolved.primary.to_hex(), "#2563eb");
        assert_eq!(resolved.background, Rgb::WHITE);
        assert_eq!(resolved.text.to_hex(), "#111827");
        assert_eq!(resolved.font_heading, "Inter");
        assert!(resolved.rejected.is_empty());
        assert!(resolved.adjustment.is_none());
    }

    #[test]
    fn low_contrast_text_replaced_with_dark_on_light() {
        let raw = theme(Some("#cccccc"), Some("#ffffff"));
        let resolved = palette().resolve(Some(&raw));
        let adj = resolved.adjustment.expect("should adjust");
        assert!(adj.ratio < 4.5);
        assert_eq!(adj.original.to_hex(), "#cccccc");
        assert_eq!(resolved.text.to_hex(), "#111827");
    }

    #[test]
    fn low_contrast_text_replaced_with_light_on_dark() {
        let raw = theme(Some("#1f2937"), Some("#111827"));
        let resolved = palette().resolve(Some(&raw));
        assert!(resolved.adjustment.is_some());
        assert_eq!(resolved.text, Rgb::WHITE);
    }

    #[test]
    fn dark_background_alone_triggers_adjustment_of_default_text() {
        let raw = theme(None, Some("#000000"));
        let resolved = palette().resolve(Some(&raw));
        assert_eq!(resolved.text, Rgb::WHITE);
    }

    #[test]
    fn invalid_color_falls_back_and_is_reported() {
        let raw = RawTheme {
            primary: Some("tomato".to_string()),
            ..RawTheme::default()
        };
        let resolved = palette().resolve(Some(&raw));
        assert_eq!(resolved.primary.to_hex(), "#2563eb");
        assert_eq!(
            resolved.rejected,
            vec![RejectedColor {
                field: "primary",
                value: "tomato".to_string()
            }]
        );
    }

    #[test]
    fn fonts_are_trimmed_and_defaulted() {
        let raw = RawTheme {
            font_heading: Some("  Fraunces ".to_string()),
            font_body: Some("   ".to_string()),
            ..RawTheme::default()
        };
        let resolved = palette().resolve(Some(&raw));
        assert_eq!(resolved.font_heading, "Fraunces");
        assert_eq!(resolved.font_body, "Inter");
    }

    #[test]
    fn stricter_policy_from_config() {
        let mut config = PipelineConfig::default();
        config.contrast.min_ratio = 4.55;
        let palette = ThemePalette::from_config(&config).unwrap();
        // #767676 on white passes 4.5 but not 4.55.
        let resolved = palette.resolve(Some(&theme(Some("#767676"), None)));
        assert!(resolved.adjustment.is_some());
    }

    #[test]
    fn mid_gray_backgrounds_fall_back_to_black_or_white() {
        let palette = palette();
        for bg in ["#777777", "#808080", "#7a7a7a"] {
            let resolved = palette.resolve(Some(&theme(Some("#888888"), Some(bg))));
            assert!(resolved.adjustment.is_some(), "{bg}");
            let ratio = contrast_ratio(resolved.text, resolved.background);
            assert!(ratio >= 4.5, "{bg}: {} gives {ratio:.3}", resolved.text);
        }
    }

    #[test]
    fn configured_fallback_kept_when_it_suffices() {
        let resolved = palette().resolve(Some(&theme(Some("#888888"), Some("#f0f0f0"))));
        assert_eq!(resolved.text.to_hex(), "#111827");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn hex() -> impl Strategy<Value = String> {
            any::<(u8, u8, u8)>().prop_map(|(r, g, b)| Rgb { r, g, b }.to_hex())
        }

        proptest! {
            #[test]
            fn resolved_text_meets_min_ratio(
                text in hex(),
                background in hex(),
                min_ratio in 1.0f64..=crate::color::GUARANTEED_CONTRAST,
            ) {
                let mut config = PipelineConfig::default();
                config.contrast.min_ratio = min_ratio;
                let palette = ThemePalette::from_config(&config).unwrap();
                let raw = theme(Some(&text), Some(&background));
                let resolved = palette.resolve(Some(&raw));
                prop_assert!(contrast_ratio(resolved.text, resolved.background) >= min_ratio);
            }
        }
    }
}
