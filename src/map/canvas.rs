use super::{MapSurface, Marker, SurfaceSnapshot, Viewport};
use crate::domain::GeoPoint;

/// Surface backing the ratatui canvas on the day-detail page. Stores the
/// drawn layers; the page paints them each frame from this state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasSurface {
    markers: Vec<Marker>,
    route: Vec<GeoPoint>,
    viewport: Option<Viewport>,
    placeholder: bool,
}

impl CanvasSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn route_segments(&self) -> impl Iterator<Item = (GeoPoint, GeoPoint)> + '_ {
        self.route.windows(2).map(|pair| (pair[0], pair[1]))
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn placeholder(&self) -> bool {
        self.placeholder
    }
}

impl MapSurface for CanvasSurface {
    fn clear_layers(&mut self) {
        self.markers.clear();
        self.route.clear();
        self.viewport = None;
        self.placeholder = false;
    }

    fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    fn set_route(&mut self, points: Vec<GeoPoint>) {
        self.route = points;
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    fn show_placeholder(&mut self) {
        self.placeholder = true;
    }

    fn snapshot(&self) -> SurfaceSnapshot {
        SurfaceSnapshot {
            marker_count: self.markers.len(),
            has_route: self.route.len() > 1,
            placeholder: self.placeholder,
            viewport: self.viewport,
        }
    }
}
