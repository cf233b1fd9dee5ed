//! In-memory stand-ins for the map widget and the web services.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use futures_util::future::{self, LocalBoxFuture};

use crate::adapter::{
    Geocoded, Geocoder, Panorama, PanoramaService, PhotoGroup, Photos, RawPhoto, RawVenue,
    VenueRef, VenueService,
};
use crate::error::{BoxError, Failure};
use crate::geo::{Bounds, LatLng};
use crate::place::{Place, PlaceId};
use crate::surface::{MapSurface, MarkerId};
use crate::types::MarkerIcon;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Center(LatLng, u8),
    AddMarker(String),
    Icon(MarkerId, MarkerIcon),
    Visible(MarkerId, bool),
    Fit(Bounds),
    Panel(PlaceId),
    ClosePanel,
    Notify(String),
}

/// A `MapSurface` remembering every call and the resulting marker state.
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<Call>,
    pub titles: Vec<String>,
    pub icons: HashMap<MarkerId, MarkerIcon>,
    pub visible: HashMap<MarkerId, bool>,
    pub panel: Option<PlaceId>,
    pub notices: Vec<String>,
}

impl MapSurface for Recorder {
    fn center(&mut self, position: LatLng, zoom: u8) {
        self.calls.push(Call::Center(position, zoom));
    }

    fn add_marker(&mut self, _: LatLng, title: &str, icon: MarkerIcon) -> MarkerId {
        let id = MarkerId(self.titles.len());
        self.titles.push(title.to_owned());
        self.icons.insert(id, icon);
        self.visible.insert(id, true);
        self.calls.push(Call::AddMarker(title.to_owned()));
        id
    }

    fn set_marker_icon(&mut self, marker: MarkerId, icon: MarkerIcon) {
        self.icons.insert(marker, icon);
        self.calls.push(Call::Icon(marker, icon));
    }

    fn set_marker_visible(&mut self, marker: MarkerId, visible: bool) {
        self.visible.insert(marker, visible);
        self.calls.push(Call::Visible(marker, visible));
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.calls.push(Call::Fit(bounds));
    }

    fn render_panel(&mut self, place: &Place) {
        self.panel = Some(place.id());
        self.calls.push(Call::Panel(place.id()));
    }

    fn close_panel(&mut self) {
        self.panel = None;
        self.calls.push(Call::ClosePanel);
    }

    fn notify(&mut self, failure: &Failure) {
        self.notices.push(failure.to_string());
        self.calls.push(Call::Notify(failure.to_string()));
    }
}

/// Geocodes the names it was built with, and fails for any other.
#[derive(Debug, Default)]
pub struct Geocodes {
    known: HashMap<String, LatLng>,
    pub asked: RefCell<Vec<String>>,
}

impl Geocodes {
    pub fn new(known: &[(&str, LatLng)]) -> Self {
        Geocodes {
            known: known.iter().map(|&(n, p)| (n.to_owned(), p)).collect(),
            asked: RefCell::default(),
        }
    }
}

impl Geocoder for Geocodes {
    fn geocode<'a>(&'a self, name: &'a str) -> LocalBoxFuture<'a, Result<Geocoded, Failure>> {
        self.asked.borrow_mut().push(name.to_owned());
        let result = match self.known.get(name) {
            Some(&position) => Ok(Geocoded {
                name: name.to_owned(),
                position,
            }),
            None => Err(Failure::Geocode {
                name: name.to_owned(),
                source: BoxError::from("ZERO_RESULTS"),
            }),
        };
        Box::pin(future::ready(result))
    }
}

#[derive(Debug)]
enum Coverage {
    At(LatLng),
    Everywhere,
    Nowhere,
    Except(Vec<LatLng>),
}

/// Answers panorama lookups from a fixed coverage map.
#[derive(Debug)]
pub struct Panoramas {
    coverage: Coverage,
    requests: Cell<usize>,
}

impl Panoramas {
    fn new(coverage: Coverage) -> Self {
        Panoramas {
            coverage,
            requests: Cell::new(0),
        }
    }

    /// The same panorama for every position.
    pub fn at(location: LatLng) -> Self {
        Panoramas::new(Coverage::At(location))
    }

    /// A panorama a little south of every position.
    pub fn everywhere() -> Self {
        Panoramas::new(Coverage::Everywhere)
    }

    pub fn none() -> Self {
        Panoramas::new(Coverage::Nowhere)
    }

    pub fn except(missing: &[LatLng]) -> Self {
        Panoramas::new(Coverage::Except(missing.to_vec()))
    }

    pub fn requests(&self) -> usize {
        self.requests.get()
    }
}

impl PanoramaService for Panoramas {
    fn panorama_near(
        &self,
        position: LatLng,
        _: f64,
    ) -> LocalBoxFuture<'_, Result<Panorama, Failure>> {
        self.requests.set(self.requests.get() + 1);
        let south = LatLng::new(position.lat - 0.0001, position.lng);
        let location = match self.coverage {
            Coverage::At(location) => Some(location),
            Coverage::Everywhere => Some(south),
            Coverage::Nowhere => None,
            Coverage::Except(ref missing) => Some(south).filter(|_| !missing.contains(&position)),
        };
        let result = location
            .map(|location| Panorama {
                id: Some(format!("pano-{}", position)),
                location,
            })
            .ok_or_else(|| Failure::PanoramaUnavailable {
                position,
                source: BoxError::from("ZERO_RESULTS"),
            });
        Box::pin(future::ready(result))
    }
}

/// Finds every venue except the `missing` ones, each with `photos` public photos.
#[derive(Debug, Default)]
pub struct Venues {
    photos: usize,
    missing: Vec<String>,
    broken: bool,
    searches: Cell<usize>,
    details: Cell<usize>,
}

impl Venues {
    pub fn with_photos(photos: usize) -> Self {
        Venues {
            photos,
            ..Venues::default()
        }
    }

    pub fn missing(names: &[&str]) -> Self {
        Venues {
            photos: 2,
            missing: names.iter().map(|&n| n.to_owned()).collect(),
            ..Venues::default()
        }
    }

    /// Finds every venue, but fails to fetch any detail record.
    pub fn broken() -> Self {
        Venues {
            broken: true,
            ..Venues::default()
        }
    }

    pub fn searches(&self) -> usize {
        self.searches.get()
    }

    pub fn details(&self) -> usize {
        self.details.get()
    }
}

impl VenueService for Venues {
    fn search_venue<'a>(&'a self, name: &'a str) -> LocalBoxFuture<'a, Result<VenueRef, Failure>> {
        self.searches.set(self.searches.get() + 1);
        let result = if self.missing.iter().any(|m| m == name) {
            Err(Failure::NoVenueFound {
                name: name.to_owned(),
            })
        } else {
            Ok(VenueRef {
                id: format!("id-{}", name),
                name: name.to_owned(),
            })
        };
        Box::pin(future::ready(result))
    }

    fn fetch_venue_detail<'a>(
        &'a self,
        venue: &'a VenueRef,
    ) -> LocalBoxFuture<'a, Result<RawVenue, Failure>> {
        self.details.set(self.details.get() + 1);
        if self.broken {
            return Box::pin(future::ready(Err(Failure::VenueResolution {
                name: String::new(),
                source: BoxError::from("500 Internal Server Error"),
            })));
        }
        let items = (0..self.photos)
            .map(|i| RawPhoto {
                prefix: format!("https://photos.test/{}/", venue.id),
                suffix: format!("/{}.jpg", i),
                visibility: "public".to_owned(),
            })
            .collect();
        let raw = RawVenue {
            name: Some(venue.name.clone()),
            photos: Photos {
                count: self.photos,
                groups: vec![PhotoGroup { items }],
            },
            ..RawVenue::default()
        };
        Box::pin(future::ready(Ok(raw)))
    }
}
