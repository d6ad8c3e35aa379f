use log::{info, warn};

use crate::surface::Surface;
use crate::{DitherError, Overlay, RenderConfig};

/// Reserved identifier of the background surface.
pub const SURFACE_ID: &str = "ascii-dithering-bg";

/// Holds at most one active [`Overlay`] and routes host notifications to it.
#[derive(Debug)]
pub struct Registry<S: Surface> {
    id: &'static str,
    active: Option<Overlay<S>>,
}

impl<S: Surface> Default for Registry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Surface> Registry<S> {
    pub fn new() -> Self {
        Self::with_id(SURFACE_ID)
    }

    pub fn with_id(id: &'static str) -> Self {
        Self { id, active: None }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn is_installed(&self) -> bool {
        self.active.is_some()
    }

    /// Installs an overlay on `surface` and paints it at `width` x `height`.
    ///
    /// When an overlay is already installed this warns and leaves it in place,
    /// returning [`DitherError::AlreadyInitialized`].
    pub fn install(
        &mut self,
        surface: S,
        config: RenderConfig,
        width: u32,
        height: u32,
    ) -> Result<&mut Overlay<S>, DitherError> {
        if self.active.is_some() {
            warn!("ASCII dithering background `{}` already loaded", self.id);
            return Err(DitherError::AlreadyInitialized(self.id));
        }

        let mut overlay = Overlay::new(surface, config)?;
        overlay.resize(width, height);
        info!("ASCII dithering background `{}` loaded", self.id);

        Ok(self.active.insert(overlay))
    }

    pub fn get(&self) -> Option<&Overlay<S>> {
        self.active.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut Overlay<S>> {
        self.active.as_mut()
    }

    /// Forwards a host resize. Returns `false` once the overlay was removed.
    pub fn notify_resize(&mut self, width: u32, height: u32) -> bool {
        match self.active.as_mut() {
            Some(overlay) => {
                overlay.resize(width, height);
                true
            },
            None => false,
        }
    }

    /// Detaches the overlay and returns its surface.
    pub fn remove(&mut self) -> Option<S> {
        let overlay = self.active.take()?;
        info!("ASCII dithering background `{}` removed", self.id);
        Some(overlay.into_surface())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordingSurface;

    #[test]
    fn install_paints_initial_frame() {
        let mut registry = Registry::new();
        let overlay = registry
            .install(RecordingSurface::new(0, 0), RenderConfig::default(), 800, 600)
            .unwrap();
        assert!(!overlay.surface().last_frame().is_empty());
        assert_eq!(registry.id(), SURFACE_ID);
        assert!(registry.is_installed());
    }

    #[test]
    fn second_install_is_a_no_op() {
        let mut registry = Registry::new();
        registry.install(RecordingSurface::new(0, 0), RenderConfig::default(), 800, 600).unwrap();

        let err = registry
            .install(RecordingSurface::new(0, 0), RenderConfig::default(), 10, 10)
            .unwrap_err();
        assert!(matches!(err, DitherError::AlreadyInitialized(SURFACE_ID)));

        let overlay = registry.get().unwrap();
        assert_eq!((overlay.surface().width(), overlay.surface().height()), (800, 600));
    }

    #[test]
    fn invalid_config_leaves_registry_empty() {
        let mut registry = Registry::new();
        let config = RenderConfig { spacing: 0.0, ..RenderConfig::default() };
        assert!(registry.install(RecordingSurface::new(0, 0), config, 800, 600).is_err());
        assert!(!registry.is_installed());
    }

    #[test]
    fn removal_stops_resize_delivery() {
        let mut registry = Registry::new();
        registry.install(RecordingSurface::new(0, 0), RenderConfig::default(), 800, 600).unwrap();
        assert!(registry.notify_resize(400, 300));

        let surface = registry.remove().unwrap();
        assert_eq!((surface.width(), surface.height()), (400, 300));
        assert!(!registry.notify_resize(800, 600));
        assert!(registry.remove().is_none());

        registry.install(surface, RenderConfig::default(), 200, 100).unwrap();
        assert!(registry.is_installed());
    }
}
