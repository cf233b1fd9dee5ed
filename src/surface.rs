//! The boundary to whatever draws the map and the detail panel.

use crate::error::Failure;
use crate::geo::{Bounds, LatLng};
use crate::place::Place;
use crate::types::MarkerIcon;

/// Identifies a marker created by a `MapSurface`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub usize);

/// A map widget with markers, a detail panel and a way to tell the user about failures.
///
/// The `ViewModel` is the only caller. It calls `render_panel` after every
/// change to the selected place, so implementations can treat it as a
/// projection of the `Place` and keep no state of their own.
pub trait MapSurface {
    /// Centres the map on `position`.
    fn center(&mut self, position: LatLng, zoom: u8);

    fn add_marker(&mut self, position: LatLng, title: &str, icon: MarkerIcon) -> MarkerId;

    fn set_marker_icon(&mut self, marker: MarkerId, icon: MarkerIcon);

    /// Shows or hides a marker.
    fn set_marker_visible(&mut self, marker: MarkerId, visible: bool);

    /// Zooms and pans so that `bounds` fills the view.
    fn fit_bounds(&mut self, bounds: Bounds);

    /// Shows `place` in the detail panel, opening it if needed.
    fn render_panel(&mut self, place: &Place);

    fn close_panel(&mut self);

    /// Reports a failure to the user.
    fn notify(&mut self, failure: &Failure);
}

impl<'a, M: MapSurface + ?Sized> MapSurface for &'a mut M {
    fn center(&mut self, position: LatLng, zoom: u8) {
        (**self).center(position, zoom)
    }

    fn add_marker(&mut self, position: LatLng, title: &str, icon: MarkerIcon) -> MarkerId {
        (**self).add_marker(position, title, icon)
    }

    fn set_marker_icon(&mut self, marker: MarkerId, icon: MarkerIcon) {
        (**self).set_marker_icon(marker, icon)
    }

    fn set_marker_visible(&mut self, marker: MarkerId, visible: bool) {
        (**self).set_marker_visible(marker, visible)
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        (**self).fit_bounds(bounds)
    }

    fn render_panel(&mut self, place: &Place) {
        (**self).render_panel(place)
    }

    fn close_panel(&mut self) {
        (**self).close_panel()
    }

    fn notify(&mut self, failure: &Failure) {
        (**self).notify(failure)
    }
}
