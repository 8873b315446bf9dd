pub mod canvas;

pub use canvas::CanvasSurface;

use crate::domain::{Activity, GeoPoint};

/// Padding applied around a multi-point route when fitting the viewport,
/// as a fraction of the route's span on each axis.
pub const ROUTE_FIT_PADDING_RATIO: f64 = 0.15;
/// Minimum half-span in degrees so degenerate routes still get a usable
/// viewport.
pub const MIN_HALF_SPAN_DEGREES: f64 = 0.005;
/// Half-span used when centering on a single point (fixed close zoom).
pub const SINGLE_POINT_HALF_SPAN_DEGREES: f64 = 0.025;

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// 1-based position within the locatable subset, in list order.
    pub position: usize,
    pub name: String,
    pub point: GeoPoint,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSnapshot {
    pub marker_count: usize,
    pub has_route: bool,
    pub placeholder: bool,
    pub viewport: Option<Viewport>,
}

/// A persistent drawing surface. One per mounted view; the engine never
/// creates or destroys it, only reconciles its layers.
pub trait MapSurface {
    /// Removes every marker and the route. A no-op on an empty surface.
    fn clear_layers(&mut self);
    fn add_marker(&mut self, marker: Marker);
    fn set_route(&mut self, points: Vec<GeoPoint>);
    fn set_viewport(&mut self, viewport: Viewport);
    fn show_placeholder(&mut self);
    fn snapshot(&self) -> SurfaceSnapshot;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No activity carried a usable coordinate; the placeholder renders
    /// instead. A degraded state, not an error.
    Placeholder,
    Rendered { markers: usize, route: bool },
}

/// Owns one surface for the lifetime of a mounted view. Constructed when
/// the view mounts and dropped on every exit path, so repeated sync calls
/// can never grow a second surface.
#[derive(Debug)]
pub struct MapView<S: MapSurface> {
    surface: S,
}

impl<S: MapSurface> MapView<S> {
    pub fn mount(surface: S) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Reconciles the surface against `activities`. Idempotent for
    /// unchanged input: same marker count, route presence, and viewport.
    pub fn sync(&mut self, activities: &[Activity]) -> SyncOutcome {
        let valid_set: Vec<(&Activity, GeoPoint)> = activities
            .iter()
            .filter_map(|activity| activity.locatable().map(|point| (activity, point)))
            .collect();

        self.surface.clear_layers();

        if valid_set.is_empty() {
            self.surface.show_placeholder();
            return SyncOutcome::Placeholder;
        }

        for (index, (activity, point)) in valid_set.iter().enumerate() {
            self.surface.add_marker(Marker {
                position: index + 1,
                name: activity.name.clone(),
                point: *point,
            });
        }

        let points: Vec<GeoPoint> = valid_set.iter().map(|(_, point)| *point).collect();
        let route = points.len() > 1;
        if route {
            self.surface.set_route(points.clone());
            self.surface.set_viewport(fit_route_viewport(&points));
        } else {
            self.surface.set_viewport(center_viewport(points[0]));
        }

        SyncOutcome::Rendered {
            markers: valid_set.len(),
            route,
        }
    }
}

fn fit_route_viewport(points: &[GeoPoint]) -> Viewport {
    let mut min_lng = f64::INFINITY;
    let mut max_lng = f64::NEG_INFINITY;
    let mut min_lat = f64::INFINITY;
    let mut max_lat = f64::NEG_INFINITY;
    for point in points {
        min_lng = min_lng.min(point.lng);
        max_lng = max_lng.max(point.lng);
        min_lat = min_lat.min(point.lat);
        max_lat = max_lat.max(point.lat);
    }
    let pad_x = ((max_lng - min_lng) * ROUTE_FIT_PADDING_RATIO).max(MIN_HALF_SPAN_DEGREES);
    let pad_y = ((max_lat - min_lat) * ROUTE_FIT_PADDING_RATIO).max(MIN_HALF_SPAN_DEGREES);
    Viewport {
        x_bounds: [min_lng - pad_x, max_lng + pad_x],
        y_bounds: [min_lat - pad_y, max_lat + pad_y],
    }
}

fn center_viewport(point: GeoPoint) -> Viewport {
    Viewport {
        x_bounds: [
            point.lng - SINGLE_POINT_HALF_SPAN_DEGREES,
            point.lng + SINGLE_POINT_HALF_SPAN_DEGREES,
        ],
        y_bounds: [
            point.lat - SINGLE_POINT_HALF_SPAN_DEGREES,
            point.lat + SINGLE_POINT_HALF_SPAN_DEGREES,
        ],
    }
}
