use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::{ConfigIssue, DitherError, GlyphRamp, Rgb};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub characters: GlyphRamp,
    /// Glyph font size in pixels.
    pub glyph_size: f64,
    pub color: Rgb,
    /// Grid pitch in pixels.
    pub spacing: f64,
    /// Opacity of the whole overlay in the range [0.0, 1.0].
    #[serde(alias = "opacity")]
    pub overlay_opacity: f32,
    pub font_family: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Preset::Default.config()
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), DitherError> {
        if self.characters.is_empty() {
            return Err(ConfigIssue::EmptyCharacterSet.into());
        }

        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(ConfigIssue::NonPositiveSpacing(self.spacing).into());
        }

        if !(self.glyph_size.is_finite() && self.glyph_size > 0.0) {
            return Err(ConfigIssue::NonPositiveGlyphSize(self.glyph_size).into());
        }

        if !(0.0..=1.0).contains(&self.overlay_opacity) {
            return Err(ConfigIssue::OpacityOutOfRange(self.overlay_opacity).into());
        }

        Ok(())
    }

    /// Clamps the overlay opacity into range, then validates.
    ///
    /// Used for initial configuration only; runtime setters reject instead.
    pub fn normalized(mut self) -> Result<Self, DitherError> {
        let opacity = if self.overlay_opacity.is_nan() {
            1.0
        } else {
            self.overlay_opacity.clamp(0.0, 1.0)
        };
        if opacity != self.overlay_opacity {
            warn!("clamping overlay opacity {} to {opacity}", self.overlay_opacity);
            self.overlay_opacity = opacity;
        }

        self.validate()?;
        Ok(self)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Preset {
    #[default]
    Default,
    Blocks,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::Default, Preset::Blocks];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Default => "default",
            Preset::Blocks => "blocks",
        }
    }

    pub fn config(self) -> RenderConfig {
        match self {
            Preset::Default => RenderConfig {
                characters: GlyphRamp::standard(),
                glyph_size: 8.0,
                color: Rgb::BLACK,
                spacing: 12.0,
                overlay_opacity: 0.3,
                font_family: String::from("monospace"),
            },
            Preset::Blocks => RenderConfig {
                characters: GlyphRamp::blocks(),
                glyph_size: 10.0,
                color: Rgb::new(0x22, 0x22, 0x22),
                spacing: 10.0,
                overlay_opacity: 0.25,
                font_family: String::from("monospace"),
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown preset {s:?}"))
    }
}
