//! Drawing surfaces the pattern can be painted onto.
//!
//! A surface mirrors a 2D canvas: it owns its pixel dimensions and exposes
//! rectangle fills and top-left anchored text. Overlay opacity and visibility
//! apply to the surface as a whole and never affect what was drawn.

pub mod raster;
pub mod recording;
pub mod text;

use crate::Rgb;

pub trait Surface {
    /// Resizes the surface. Existing contents are discarded.
    fn set_dimensions(&mut self, width: u32, height: u32);

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb);

    fn set_font(&mut self, size: f64, family: &str);

    fn set_fill_color(&mut self, color: Rgb);

    /// Draws `glyph` with its top-left corner at `(x, y)` in the current font and fill color.
    fn draw_text(&mut self, glyph: char, x: f64, y: f64);

    fn set_opacity(&mut self, opacity: f32);

    fn set_visible(&mut self, visible: bool);

    fn is_visible(&self) -> bool;
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        (**self).set_dimensions(width, height)
    }

    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb) {
        (**self).fill_rect(x, y, width, height, color)
    }

    fn set_font(&mut self, size: f64, family: &str) {
        (**self).set_font(size, family)
    }

    fn set_fill_color(&mut self, color: Rgb) {
        (**self).set_fill_color(color)
    }

    fn draw_text(&mut self, glyph: char, x: f64, y: f64) {
        (**self).draw_text(glyph, x, y)
    }

    fn set_opacity(&mut self, opacity: f32) {
        (**self).set_opacity(opacity)
    }

    fn set_visible(&mut self, visible: bool) {
        (**self).set_visible(visible)
    }

    fn is_visible(&self) -> bool {
        (**self).is_visible()
    }
}
