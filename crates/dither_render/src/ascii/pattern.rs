use log::debug;

use super::gradient::BLANK_GLYPH;
use super::grid::{axis, GlyphPlacement};
use crate::surface::Surface;
use crate::{DitherError, RenderConfig, Rgb};

/// Fixed backing fill painted under every pattern.
pub const BACKGROUND: Rgb = Rgb::WHITE;

/// Grid points at or below this intensity are left empty.
pub const INTENSITY_THRESHOLD: f64 = 0.2;

/// Radial density at `(x, y)` on a `width` x `height` surface.
///
/// 1.0 at the center, falling linearly to 0.0 at the distance of the corners.
pub fn intensity_at(x: f64, y: f64, width: f64, height: f64) -> f64 {
    let center_x = width / 2.0;
    let center_y = height / 2.0;
    let max_distance = (center_x * center_x + center_y * center_y).sqrt();
    if max_distance <= 0.0 {
        return 0.0;
    }

    let distance = ((x - center_x).powi(2) + (y - center_y).powi(2)).sqrt();
    (1.0 - distance / max_distance).max(0.0)
}

/// Index into a ramp of `len` glyphs for `intensity`, clamped to the ramp.
pub fn glyph_index(intensity: f64, len: usize) -> usize {
    let max_index = len.saturating_sub(1);
    let index = (intensity * max_index as f64).floor();
    if index.is_nan() || index <= 0.0 {
        0
    } else {
        (index as usize).min(max_index)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PatternRenderer;

impl PatternRenderer {
    /// Draw instructions for a `width` x `height` surface, in row-major order.
    ///
    /// Empty or negative dimensions produce no placements.
    pub fn plan(
        &self,
        width: f64,
        height: f64,
        config: &RenderConfig,
    ) -> Result<Vec<GlyphPlacement>, DitherError> {
        config.validate()?;

        let mut placements = Vec::new();
        if !(width > 0.0 && height > 0.0) {
            return Ok(placements);
        }

        let ramp = &config.characters;
        for y in axis(height, config.spacing) {
            for x in axis(width, config.spacing) {
                let intensity = intensity_at(x, y, width, height);
                if intensity <= INTENSITY_THRESHOLD {
                    continue;
                }

                let glyph = ramp.glyph_for(intensity);
                if glyph == BLANK_GLYPH {
                    continue;
                }

                placements.push(GlyphPlacement::new(glyph, x, y));
            }
        }

        Ok(placements)
    }

    /// Repaints `surface` at its current dimensions, returning the glyph count.
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        config: &RenderConfig,
    ) -> Result<usize, DitherError> {
        let width = f64::from(surface.width());
        let height = f64::from(surface.height());
        let placements = self.plan(width, height, config)?;

        if width <= 0.0 || height <= 0.0 {
            return Ok(0);
        }

        surface.fill_rect(0.0, 0.0, width, height, BACKGROUND);
        surface.set_font(config.glyph_size, &config.font_family);
        surface.set_fill_color(config.color);
        for placement in &placements {
            surface.draw_text(placement.glyph, placement.x, placement.y);
        }

        debug!("rendered {} glyphs on {}x{} surface", placements.len(), width, height);
        Ok(placements.len())
    }
}
