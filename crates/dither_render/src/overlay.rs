use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::surface::Surface;
use crate::{DitherError, GlyphRamp, PatternRenderer, RenderConfig, Rgb};

/// Quiet period [`ResizeDebounce`] waits for before releasing a size.
pub const RESIZE_QUIET_INTERVAL: Duration = Duration::from_millis(120);

/// Radial glyph background bound to one surface.
#[derive(Debug)]
pub struct Overlay<S: Surface> {
    surface: S,
    config: RenderConfig,
    renderer: PatternRenderer,
    drawn: usize,
}

impl<S: Surface> Overlay<S> {
    /// Binds `surface` to `config`. Nothing is drawn until the first resize or redraw.
    pub fn new(mut surface: S, config: RenderConfig) -> Result<Self, DitherError> {
        let config = config.normalized()?;
        surface.set_opacity(config.overlay_opacity);
        surface.set_visible(true);

        Ok(Self { surface, config, renderer: PatternRenderer, drawn: 0 })
    }

    /// Resizes the surface and repaints it, once per notification.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface.set_dimensions(width, height);
        self.redraw();
    }

    pub fn redraw(&mut self) {
        match self.renderer.render(&mut self.surface, &self.config) {
            Ok(drawn) => self.drawn = drawn,
            Err(err) => warn!("failed to render dithering background: {err}"),
        }
    }

    /// Sets the overlay opacity. Values outside [0.0, 1.0] are ignored.
    pub fn set_opacity(&mut self, opacity: f32) -> bool {
        if !(0.0..=1.0).contains(&opacity) {
            debug!("ignoring out of range overlay opacity {opacity}");
            return false;
        }

        self.config.overlay_opacity = opacity;
        self.surface.set_opacity(opacity);
        true
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.config.color = color;
        self.redraw();
    }

    /// Replaces the glyph ramp and repaints. An empty sequence is ignored.
    pub fn set_chars<I: IntoIterator<Item = char>>(&mut self, chars: I) -> bool {
        match GlyphRamp::new(chars) {
            Ok(ramp) => {
                self.config.characters = ramp;
                self.redraw();
                true
            },
            Err(err) => {
                debug!("ignoring character set: {err}");
                false
            },
        }
    }

    /// Flips visibility and returns the new state. Drawn content is kept.
    pub fn toggle(&mut self) -> bool {
        let visible = !self.surface.is_visible();
        self.surface.set_visible(visible);
        visible
    }

    pub fn is_visible(&self) -> bool {
        self.surface.is_visible()
    }

    /// Applies several config changes at once without repainting.
    ///
    /// The change is rolled back if the result fails validation. Call
    /// [`Overlay::redraw`] afterwards to show it.
    pub fn update_config<F>(&mut self, update: F) -> Result<(), DitherError>
    where
        F: FnOnce(&mut RenderConfig),
    {
        let mut config = self.config.clone();
        update(&mut config);
        config.validate()?;

        if config.overlay_opacity != self.config.overlay_opacity {
            self.surface.set_opacity(config.overlay_opacity);
        }
        self.config = config;
        Ok(())
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Glyph count of the last successful paint.
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    /// Tears the overlay down, handing the surface back to the host.
    pub fn into_surface(self) -> S {
        self.surface
    }
}

/// Coalesces bursts of resize notifications into a single size.
#[derive(Debug)]
pub struct ResizeDebounce {
    quiet: Duration,
    pending: Option<(u32, u32)>,
    last_event: Instant,
}

impl Default for ResizeDebounce {
    fn default() -> Self {
        Self::new(RESIZE_QUIET_INTERVAL)
    }
}

impl ResizeDebounce {
    pub fn new(quiet: Duration) -> Self {
        Self { quiet, pending: None, last_event: Instant::now() }
    }

    pub fn request(&mut self, width: u32, height: u32, now: Instant) {
        self.pending = Some((width, height));
        self.last_event = now;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the latest requested size once no request arrived for the quiet period.
    pub fn poll(&mut self, now: Instant) -> Option<(u32, u32)> {
        self.pending?;

        if now.saturating_duration_since(self.last_event) < self.quiet {
            return None;
        }

        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConfigIssue, DrawCommand, GlyphPlacement, RecordingSurface};

    fn overlay() -> Overlay<RecordingSurface> {
        Overlay::new(RecordingSurface::new(0, 0), RenderConfig::default()).unwrap()
    }

    #[test]
    fn new_applies_opacity_without_drawing() {
        let overlay = overlay();
        assert_eq!(overlay.surface().opacity(), 0.3);
        assert!(overlay.surface().last_frame().is_empty());
        assert!(overlay.is_visible());
    }

    #[test]
    fn new_rejects_invalid_spacing() {
        let config = RenderConfig { spacing: -1.0, ..RenderConfig::default() };
        let err = Overlay::new(RecordingSurface::new(0, 0), config).unwrap_err();
        assert!(matches!(
            err,
            DitherError::InvalidConfiguration(ConfigIssue::NonPositiveSpacing(_))
        ));
    }

    #[test]
    fn resize_round_trip_reproduces_frame() {
        let mut overlay = overlay();
        overlay.resize(800, 600);
        let original = overlay.surface().last_frame();
        assert!(!original.is_empty());
        assert_eq!(overlay.drawn(), original.len());

        overlay.resize(400, 300);
        assert_ne!(overlay.surface().last_frame(), original);

        overlay.resize(800, 600);
        assert_eq!(overlay.surface().last_frame(), original);
    }

    #[test]
    fn each_resize_renders_exactly_once() {
        let mut surface = RecordingSurface::new(0, 0);
        let mut overlay = Overlay::new(&mut surface, RenderConfig::default()).unwrap();
        overlay.resize(100, 100);
        overlay.resize(120, 100);
        drop(overlay);

        let fills = surface
            .commands()
            .iter()
            .filter(|command| matches!(command, DrawCommand::FillRect { .. }))
            .count();
        assert_eq!(fills, 2);
    }

    #[test]
    fn set_opacity_rejects_out_of_range() {
        let mut overlay = overlay();
        assert!(overlay.set_opacity(0.8));
        assert!(!overlay.set_opacity(1.2));
        assert!(!overlay.set_opacity(-0.1));
        assert!(!overlay.set_opacity(f32::NAN));
        assert_eq!(overlay.surface().opacity(), 0.8);
        assert_eq!(overlay.config().overlay_opacity, 0.8);
    }

    #[test]
    fn set_color_repaints_with_new_color() {
        let mut overlay = overlay();
        overlay.resize(200, 200);
        let before = overlay.surface().last_frame();

        let red = Rgb::new(0xff, 0, 0);
        overlay.set_color(red);
        assert_eq!(overlay.surface().last_frame(), before);
        assert_eq!(
            overlay.surface().commands().iter().rev().find_map(|command| match command {
                DrawCommand::SetFillColor { color } => Some(*color),
                _ => None,
            }),
            Some(red)
        );
    }

    #[test]
    fn set_chars_replaces_ramp_and_repaints() {
        let mut overlay = overlay();
        overlay.resize(160, 120);
        assert!(overlay.surface().last_frame().len() > 1);

        let commands = overlay.surface().commands().len();
        assert!(overlay.set_chars([' ', 'X']));
        assert!(overlay.surface().commands().len() > commands);
        // 80 is not on the 12px grid, so no point reaches full intensity.
        assert!(overlay.surface().last_frame().is_empty());

        let commands = overlay.surface().commands().len();
        assert!(!overlay.set_chars(std::iter::empty()));
        assert_eq!(overlay.surface().commands().len(), commands);
        assert_eq!(overlay.config().characters.chars(), &[' ', 'X']);
    }

    #[test]
    fn two_glyph_ramp_inks_only_center_grid_point() {
        let config = RenderConfig { spacing: 20.0, ..RenderConfig::default() };
        let mut overlay = Overlay::new(RecordingSurface::new(0, 0), config).unwrap();
        overlay.resize(160, 120);

        overlay.set_chars([' ', 'X']);
        overlay.redraw();
        assert_eq!(overlay.surface().last_frame(), vec![GlyphPlacement::new('X', 80.0, 60.0)]);
    }

    #[test]
    fn toggle_preserves_content() {
        let mut overlay = overlay();
        overlay.resize(300, 200);
        let frame = overlay.surface().last_frame();

        assert!(!overlay.toggle());
        assert!(!overlay.is_visible());
        assert!(overlay.toggle());
        assert_eq!(overlay.surface().last_frame(), frame);
    }

    #[test]
    fn update_config_batches_without_rendering() {
        let mut overlay = overlay();
        overlay.resize(300, 200);
        let fills_before = overlay.surface().commands().len();

        overlay
            .update_config(|config| {
                config.spacing = 6.0;
                config.color = Rgb::new(0x22, 0x22, 0x22);
            })
            .unwrap();
        assert_eq!(overlay.surface().commands().len(), fills_before);

        let err = overlay.update_config(|config| config.spacing = 0.0).unwrap_err();
        assert!(matches!(err, DitherError::InvalidConfiguration(_)));
        assert_eq!(overlay.config().spacing, 6.0);

        overlay.redraw();
        assert!(overlay.surface().last_frame().iter().any(|p| p.x == 6.0 || p.y == 6.0));
    }

    #[test]
    fn debounce_releases_latest_size_after_quiet_period() {
        let start = Instant::now();
        let mut debounce = ResizeDebounce::new(Duration::from_millis(100));
        assert_eq!(debounce.poll(start), None);

        debounce.request(800, 600, start);
        debounce.request(640, 480, start + Duration::from_millis(50));
        assert_eq!(debounce.poll(start + Duration::from_millis(120)), None);
        assert_eq!(debounce.poll(start + Duration::from_millis(150)), Some((640, 480)));
        assert!(!debounce.is_pending());
        assert_eq!(debounce.poll(start + Duration::from_millis(400)), None);
    }
}
