//! The external services a `ViewModel` depends on.
//!
//! Each method returns a future that resolves exactly once. The crate ships
//! HTTP implementations in [`google`](crate::google) and
//! [`foursquare`](crate::foursquare); tests and other hosts can provide their own.

use futures_util::future::LocalBoxFuture;
use serde::Deserialize;

use crate::error::Failure;
use crate::geo::LatLng;

/// A place name resolved to its best-matching position.
#[derive(Clone, Debug, PartialEq)]
pub struct Geocoded {
    /// The name that was searched for.
    pub name: String,
    pub position: LatLng,
}

/// The panorama nearest to a requested position.
#[derive(Clone, Debug, PartialEq)]
pub struct Panorama {
    /// Opaque handle a display surface uses to show the panorama.
    pub id: Option<String>,
    /// Where the panorama was taken.
    pub location: LatLng,
}

/// A venue search hit.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VenueRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// A full venue record, as returned by the venue detail endpoint.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawVenue {
    pub name: Option<String>,
    pub url: Option<String>,
    pub contact: Contact,
    pub location: Location,
    pub rating: Option<f64>,
    pub rating_color: Option<String>,
    pub photos: Photos,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Contact {
    pub formatted_phone: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Location {
    pub formatted_address: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Photos {
    pub count: usize,
    pub groups: Vec<PhotoGroup>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhotoGroup {
    pub items: Vec<RawPhoto>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawPhoto {
    pub prefix: String,
    pub suffix: String,
    pub visibility: String,
}

/// Turns place names into positions.
pub trait Geocoder {
    /// Resolves `name` within the geocoder's city to a single position.
    ///
    /// Fails with `Failure::Geocode` on any non-success answer.
    fn geocode<'a>(&'a self, name: &'a str) -> LocalBoxFuture<'a, Result<Geocoded, Failure>>;
}

/// Finds street-level imagery.
pub trait PanoramaService {
    /// Finds the panorama nearest to `position`, at most `radius` metres away.
    ///
    /// Fails with `Failure::PanoramaUnavailable` if there is none.
    fn panorama_near(
        &self,
        position: LatLng,
        radius: f64,
    ) -> LocalBoxFuture<'_, Result<Panorama, Failure>>;
}

/// Looks up third-party venue records.
pub trait VenueService {
    /// Finds the single best venue matching `name` in the service's metro area.
    ///
    /// Fails with `Failure::NoVenueFound` if nothing matches.
    fn search_venue<'a>(&'a self, name: &'a str) -> LocalBoxFuture<'a, Result<VenueRef, Failure>>;

    /// Fetches the full record of a venue found by `search_venue`.
    fn fetch_venue_detail<'a>(
        &'a self,
        venue: &'a VenueRef,
    ) -> LocalBoxFuture<'a, Result<RawVenue, Failure>>;
}

impl<'t, T: Geocoder + ?Sized> Geocoder for &'t T {
    fn geocode<'a>(&'a self, name: &'a str) -> LocalBoxFuture<'a, Result<Geocoded, Failure>> {
        (**self).geocode(name)
    }
}

impl<'t, T: PanoramaService + ?Sized> PanoramaService for &'t T {
    fn panorama_near(
        &self,
        position: LatLng,
        radius: f64,
    ) -> LocalBoxFuture<'_, Result<Panorama, Failure>> {
        (**self).panorama_near(position, radius)
    }
}

impl<'t, T: VenueService + ?Sized> VenueService for &'t T {
    fn search_venue<'a>(&'a self, name: &'a str) -> LocalBoxFuture<'a, Result<VenueRef, Failure>> {
        (**self).search_venue(name)
    }

    fn fetch_venue_detail<'a>(
        &'a self,
        venue: &'a VenueRef,
    ) -> LocalBoxFuture<'a, Result<RawVenue, Failure>> {
        (**self).fetch_venue_detail(venue)
    }
}
