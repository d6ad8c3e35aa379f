use serde::Serialize;

use super::Surface;
use crate::{GlyphPlacement, Rgb};

/// A single call received by a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    SetDimensions { width: u32, height: u32 },
    FillRect { x: f64, y: f64, width: f64, height: f64, color: Rgb },
    SetFont { size: f64, family: String },
    SetFillColor { color: Rgb },
    DrawText { glyph: char, x: f64, y: f64 },
    SetOpacity { opacity: f32 },
    SetVisible { visible: bool },
}

/// Surface that draws nothing and logs every call in order.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    opacity: f32,
    visible: bool,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, opacity: 1.0, visible: true, commands: Vec::new() }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Glyphs drawn since the most recent full-surface fill.
    pub fn last_frame(&self) -> Vec<GlyphPlacement> {
        let (width, height) = (f64::from(self.width), f64::from(self.height));
        let start = self
            .commands
            .iter()
            .rposition(|command| {
                matches!(
                    command,
                    DrawCommand::FillRect { x, y, width: w, height: h, .. }
                        if *x <= 0.0 && *y <= 0.0 && *w >= width && *h >= height
                )
            })
            .map_or(0, |index| index + 1);

        self.commands[start..]
            .iter()
            .filter_map(|command| match *command {
                DrawCommand::DrawText { glyph, x, y } => Some(GlyphPlacement::new(glyph, x, y)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.commands.push(DrawCommand::SetDimensions { width, height });
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb) {
        self.commands.push(DrawCommand::FillRect { x, y, width, height, color });
    }

    fn set_font(&mut self, size: f64, family: &str) {
        self.commands.push(DrawCommand::SetFont { size, family: family.to_owned() });
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.commands.push(DrawCommand::SetFillColor { color });
    }

    fn draw_text(&mut self, glyph: char, x: f64, y: f64) {
        self.commands.push(DrawCommand::DrawText { glyph, x, y });
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
        self.commands.push(DrawCommand::SetOpacity { opacity });
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.commands.push(DrawCommand::SetVisible { visible });
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_frame_starts_after_latest_full_fill() {
        let mut surface = RecordingSurface::new(10, 10);
        surface.fill_rect(0.0, 0.0, 10.0, 10.0, Rgb::WHITE);
        surface.draw_text('a', 0.0, 0.0);
        surface.fill_rect(2.0, 2.0, 1.0, 1.0, Rgb::BLACK);
        surface.draw_text('b', 1.0, 0.0);
        assert_eq!(surface.last_frame().len(), 2);

        surface.fill_rect(0.0, 0.0, 10.0, 10.0, Rgb::WHITE);
        surface.draw_text('c', 5.0, 5.0);
        assert_eq!(surface.last_frame(), vec![GlyphPlacement::new('c', 5.0, 5.0)]);
    }
}
