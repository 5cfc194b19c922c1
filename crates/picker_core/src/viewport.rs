use std::sync::Arc;

use geo_integration::ViewportRenderer;
use shared::domain::{Coordinates, PlaceType, ViewportFrame};
use tracing::debug;

/// Owns the map center, zoom and marker, and pushes frames to the renderer.
pub struct ViewportController {
    center: Coordinates,
    zoom: u8,
    marker: Option<Coordinates>,
    rendering: bool,
    renderer: Arc<dyn ViewportRenderer>,
}

impl ViewportController {
    pub fn new(
        default_center: Coordinates,
        default_zoom: u8,
        renderer: Arc<dyn ViewportRenderer>,
    ) -> Self {
        Self {
            center: default_center,
            zoom: default_zoom,
            marker: None,
            rendering: false,
            renderer,
        }
    }

    /// Rendering is only enabled for the interactive strategy with a loaded map.
    pub fn set_rendering(&mut self, rendering: bool) {
        self.rendering = rendering;
        self.render();
    }

    pub fn zoom_for(place_type: PlaceType) -> u8 {
        place_type.zoom()
    }

    /// Centers on `coordinates` with an explicit zoom and moves the marker there.
    pub fn focus(&mut self, coordinates: Coordinates, zoom: u8) {
        self.center = coordinates;
        self.zoom = zoom;
        self.marker = Some(coordinates);
        self.render();
    }

    /// Moves center and marker, keeping the current zoom.
    pub fn recenter(&mut self, coordinates: Coordinates) {
        let zoom = self.zoom;
        self.focus(coordinates, zoom);
    }

    pub fn clear_marker(&mut self) {
        if self.marker.take().is_some() {
            self.render();
        }
    }

    pub fn center(&self) -> Coordinates {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn marker(&self) -> Option<Coordinates> {
        self.marker
    }

    pub fn frame(&self) -> ViewportFrame {
        ViewportFrame {
            center: self.center,
            zoom: self.zoom,
            marker: self.marker,
            marker_draggable: self.rendering,
        }
    }

    fn render(&self) {
        if !self.rendering {
            return;
        }
        let frame = self.frame();
        debug!(
            lat = frame.center.lat,
            lng = frame.center.lng,
            zoom = frame.zoom,
            "viewport: render"
        );
        self.renderer.render(&frame);
    }
}
