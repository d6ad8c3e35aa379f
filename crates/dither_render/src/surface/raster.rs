use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};

use super::Surface;
use crate::{DitherError, Rgb};

/// Pixel surface without a font rasterizer.
///
/// Glyphs are stamped as solid squares centered in their `size` x `size` cell,
/// with an area proportional to the glyph's approximate ink coverage.
#[derive(Clone, Debug)]
pub struct RasterSurface {
    pixels: RgbaImage,
    fill: Rgb,
    glyph_size: f64,
    opacity: f32,
    visible: bool,
}

impl Default for RasterSurface {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
            fill: Rgb::BLACK,
            glyph_size: 10.0,
            opacity: 1.0,
            visible: true,
        }
    }

    /// Raw drawn pixels, before overlay opacity and visibility.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Pixels as the overlay would composite them.
    pub fn to_image(&self) -> RgbaImage {
        let scale = if self.visible { self.opacity.clamp(0.0, 1.0) } else { 0.0 };
        let mut image = self.pixels.clone();
        for pixel in image.pixels_mut() {
            pixel.0[3] = (f32::from(pixel.0[3]) * scale).round() as u8;
        }
        image
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), DitherError> {
        self.to_image().save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }

    fn fill_pixels(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb) {
        let x0 = x.max(0.0).floor() as u32;
        let y0 = y.max(0.0).floor() as u32;
        let x1 = ((x + width).ceil().max(0.0) as u32).min(self.pixels.width());
        let y1 = ((y + height).ceil().max(0.0) as u32).min(self.pixels.height());

        let [r, g, b] = color.to_array();
        for py in y0..y1 {
            for px in x0..x1 {
                self.pixels.put_pixel(px, py, Rgba([r, g, b, 0xff]));
            }
        }
    }
}

/// Rough fraction of a monospace cell covered by `glyph`.
fn ink_coverage(glyph: char) -> f64 {
    match glyph {
        ' ' => 0.0,
        '.' | ',' | '\'' | '`' => 0.06,
        ':' | '-' | '_' => 0.12,
        ';' | '~' | '^' => 0.16,
        '+' | '=' | '*' => 0.24,
        '░' => 0.25,
        '#' | '%' | '&' => 0.45,
        '@' => 0.55,
        '▒' => 0.5,
        '▓' => 0.75,
        '█' => 1.0,
        _ => 0.3,
    }
}

impl Surface for RasterSurface {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.pixels = RgbaImage::new(width, height);
    }

    fn width(&self) -> u32 {
        self.pixels.width()
    }

    fn height(&self) -> u32 {
        self.pixels.height()
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb) {
        self.fill_pixels(x, y, width, height, color);
    }

    fn set_font(&mut self, size: f64, _family: &str) {
        self.glyph_size = size;
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.fill = color;
    }

    fn draw_text(&mut self, glyph: char, x: f64, y: f64) {
        let side = self.glyph_size * ink_coverage(glyph).sqrt();
        if side <= 0.0 {
            return;
        }

        let inset = (self.glyph_size - side) / 2.0;
        self.fill_pixels(x + inset, y + inset, side, side, self.fill);
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}
