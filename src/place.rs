//! A geocoded place and its lazily resolved street view and venue.

use std::fmt::{self, Display, Formatter};

use crate::adapter::{Panorama, PanoramaService, VenueService};
use crate::error::Failure;
use crate::geo::{self, LatLng};
use crate::surface::{MapSurface, MarkerId};
use crate::types::MarkerIcon;
use crate::venue::{PhotoCursor, PhotoOptions, Venue};

/// Position of a place in its `ViewModel`, assigned once in input order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaceId(pub usize);

/// Camera settings for showing a place from its nearest panorama.
#[derive(Clone, Debug, PartialEq)]
pub struct StreetView {
    pub panorama: Panorama,
    /// Degrees clockwise from north, looking from the panorama at the place.
    pub heading: f64,
    pub pitch: f64,
}

/// A point of interest on the map.
///
/// The street view and the venue are independent facets, each fetched at most
/// once: after a successful `init_*` call, later calls return the stored value
/// without touching the network.
#[derive(Debug)]
pub struct Place {
    id: PlaceId,
    title: String,
    position: LatLng,
    marker: MarkerId,
    selected: bool,
    visible: bool,
    hovered: bool,
    street_view: Option<StreetView>,
    venue: Option<Venue>,
}

impl Place {
    /// A visible, unselected place drawn with `marker`.
    pub fn new(id: PlaceId, title: impl Into<String>, position: LatLng, marker: MarkerId) -> Self {
        Place {
            id,
            title: title.into(),
            position,
            marker,
            selected: false,
            visible: true,
            hovered: false,
            street_view: None,
            venue: None,
        }
    }

    pub fn id(&self) -> PlaceId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn marker(&self) -> MarkerId {
        self.marker
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Whether the place passes the current search filter.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn street_view(&self) -> Option<&StreetView> {
        self.street_view.as_ref()
    }

    pub fn venue(&self) -> Option<&Venue> {
        self.venue.as_ref()
    }

    /// The venue's photo cursor, once the venue is resolved.
    pub fn photos_mut(&mut self) -> Option<&mut PhotoCursor> {
        self.venue.as_mut().map(Venue::photos_mut)
    }

    /// The marker icon for the current state. Selection wins over hovering.
    pub fn icon(&self) -> MarkerIcon {
        if self.selected {
            MarkerIcon::Selected
        } else if self.hovered {
            MarkerIcon::Highlighted
        } else {
            MarkerIcon::Default
        }
    }

    /// Case-insensitive substring match of `filter` against the title.
    /// An empty filter matches every place.
    pub fn matches(&self, filter: &str) -> bool {
        filter.is_empty() || self.title.to_lowercase().contains(&filter.to_lowercase())
    }

    /// Shows or hides the place, and its marker with it, according to `filter`.
    ///
    /// Returns whether the place is visible.
    pub fn apply_search<M>(&mut self, filter: &str, surface: &mut M) -> bool
    where
        M: MapSurface + ?Sized,
    {
        let visible = self.matches(filter);
        if visible != self.visible {
            self.visible = visible;
            surface.set_marker_visible(self.marker, visible);
        }
        visible
    }

    pub fn do_mouse_over<M: MapSurface + ?Sized>(&mut self, surface: &mut M) {
        self.hovered = true;
        self.redraw(surface);
    }

    pub fn do_mouse_out<M: MapSurface + ?Sized>(&mut self, surface: &mut M) {
        self.hovered = false;
        self.redraw(surface);
    }

    pub(crate) fn set_selected<M: MapSurface + ?Sized>(&mut self, selected: bool, surface: &mut M) {
        self.selected = selected;
        self.redraw(surface);
    }

    fn redraw<M: MapSurface + ?Sized>(&self, surface: &mut M) {
        surface.set_marker_icon(self.marker, self.icon());
    }

    /// Finds the nearest panorama within `radius` metres and points the camera at the place.
    pub async fn init_street_view<P>(
        &mut self,
        panoramas: &P,
        radius: f64,
        pitch: f64,
    ) -> Result<&StreetView, Failure>
    where
        P: PanoramaService + ?Sized,
    {
        let street_view = match self.street_view.take() {
            Some(street_view) => {
                tracing::debug!(place = %self, "street view already primed");
                street_view
            }
            None => {
                let panorama = panoramas.panorama_near(self.position, radius).await?;
                let heading = geo::heading(panorama.location, self.position);
                StreetView {
                    panorama,
                    heading,
                    pitch,
                }
            }
        };
        Ok(self.street_view.insert(street_view))
    }

    /// Searches for the venue by title and fetches its details.
    pub async fn init_venue<V>(
        &mut self,
        venues: &V,
        photos: &PhotoOptions,
    ) -> Result<&Venue, Failure>
    where
        V: VenueService + ?Sized,
    {
        let venue = match self.venue.take() {
            Some(venue) => {
                tracing::debug!(place = %self, "venue already resolved");
                venue
            }
            None => {
                let found = venues.search_venue(&self.title).await?;
                let raw = venues
                    .fetch_venue_detail(&found)
                    .await
                    .map_err(|failure| match failure {
                        Failure::VenueResolution { source, .. } => Failure::VenueResolution {
                            name: self.title.clone(),
                            source,
                        },
                        failure => failure,
                    })?;
                Venue::new(raw, photos)
            }
        };
        Ok(self.venue.insert(venue))
    }

    /// Moves the venue's photo cursor back to the first photo.
    ///
    /// Returns `true` if the cursor moved.
    pub fn rewind_photos(&mut self) -> bool {
        self.venue
            .as_mut()
            .map_or(false, |venue| venue.photos_mut().rewind())
    }
}

impl Display for Place {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id.0, self.title)
    }
}
