use serde::{Deserialize, Serialize};

use crate::{ConfigIssue, DitherError};

/// Glyph that is never drawn; positions mapping to it stay background.
pub const BLANK_GLYPH: char = ' ';

/// Ordered glyph sequence, sparsest first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RampSource", into = "String")]
pub struct GlyphRamp {
    chars: Vec<char>,
}

impl GlyphRamp {
    pub fn new<I: IntoIterator<Item = char>>(chars: I) -> Result<Self, DitherError> {
        let chars: Vec<char> = chars.into_iter().collect();
        if chars.is_empty() {
            return Err(ConfigIssue::EmptyCharacterSet.into());
        }
        Ok(Self { chars })
    }

    pub fn standard() -> Self {
        Self { chars: " .:;+*#@".chars().collect() }
    }

    pub fn blocks() -> Self {
        Self { chars: " ░▒▓█".chars().collect() }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Highest density glyph, selected at full intensity.
    pub fn densest(&self) -> char {
        self.chars[self.chars.len() - 1]
    }

    pub fn char_at(&self, index: usize) -> char {
        self.chars[index.min(self.chars.len() - 1)]
    }

    pub fn glyph_for(&self, intensity: f64) -> char {
        self.char_at(super::pattern::glyph_index(intensity, self.chars.len()))
    }
}

impl Default for GlyphRamp {
    fn default() -> Self {
        Self::standard()
    }
}

impl From<GlyphRamp> for String {
    fn from(ramp: GlyphRamp) -> Self {
        ramp.chars.into_iter().collect()
    }
}

/// Config files may spell a ramp as one string or as a list of glyphs.
#[derive(Deserialize)]
#[serde(untagged)]
enum RampSource {
    Text(String),
    List(Vec<char>),
}

impl TryFrom<RampSource> for GlyphRamp {
    type Error = DitherError;

    fn try_from(source: RampSource) -> Result<Self, Self::Error> {
        match source {
            RampSource::Text(text) => GlyphRamp::new(text.chars()),
            RampSource::List(list) => GlyphRamp::new(list),
        }
    }
}
