//! The selection controller tying places, services and the map together.

use futures_util::future::join_all;

use crate::adapter::{Geocoded, Geocoder, PanoramaService, VenueService};
use crate::config::{Config, GeocodeMode};
use crate::error::Failure;
use crate::geo::{Bounds, LatLng};
use crate::place::{Place, PlaceId};
use crate::surface::MapSurface;
use crate::types::MarkerIcon;
use crate::venue::PhotoOptions;

/// Everything a `ViewModel` talks to: the map and the three web services.
#[derive(Debug)]
pub struct Context<M, G, P, V> {
    pub surface: M,
    pub geocoder: G,
    pub panoramas: P,
    pub venues: V,
}

/// The outcome of `ViewModel::start`.
#[derive(Debug)]
pub struct Startup {
    /// Where the map was centred.
    pub center: LatLng,
    /// The region the map was fitted to, if any place was found.
    pub bounds: Option<Bounds>,
    /// Names that could not be geocoded, in input order.
    pub failures: Vec<Failure>,
}

/// Owns the places of one map, which of them is selected, and the search filter.
///
/// All methods take `&mut self`, so an enrichment started by `select` runs to
/// completion before another selection can begin.
///
/// # Example
///
/// ```rust,no_run
/// # async fn run<M, G, P, V>(context: date_spots::Context<M, G, P, V>)
/// # where
/// #     M: date_spots::MapSurface,
/// #     G: date_spots::adapter::Geocoder,
/// #     P: date_spots::adapter::PanoramaService,
/// #     V: date_spots::adapter::VenueService,
/// # {
/// use date_spots::{Config, ViewModel};
///
/// let mut view_model = ViewModel::new(context, Config::default());
/// view_model.start().await.unwrap();
/// view_model.prewarm_venues().await;
///
/// view_model.set_filter("hill");
/// view_model.next().await;
/// # }
/// ```
#[derive(Debug)]
pub struct ViewModel<M, G, P, V> {
    context: Context<M, G, P, V>,
    config: Config,
    photos: PhotoOptions,
    places: Vec<Place>,
    current: Option<PlaceId>,
    filter: String,
}

impl<M, G, P, V> ViewModel<M, G, P, V> {
    pub fn new(context: Context<M, G, P, V>, config: Config) -> Self {
        let photos = PhotoOptions {
            max: config.max_photos,
            size: config.photo_size.clone(),
        };
        ViewModel {
            context,
            config,
            photos,
            places: Vec::new(),
            current: None,
            filter: String::new(),
        }
    }

    pub fn context(&self) -> &Context<M, G, P, V> {
        &self.context
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// All places, in navigation order.
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn place(&self, id: PlaceId) -> Option<&Place> {
        self.places.get(id.0)
    }

    /// The selected place.
    pub fn current(&self) -> Option<&Place> {
        self.current.and_then(|id| self.place(id))
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Places passing the search filter, in navigation order.
    pub fn visible_places(&self) -> impl Iterator<Item = &Place> + '_ {
        self.places.iter().filter(|p| p.is_visible())
    }

    pub fn into_context(self) -> Context<M, G, P, V> {
        self.context
    }
}

impl<M, G, P, V> ViewModel<M, G, P, V>
where
    M: MapSurface,
    G: Geocoder,
    P: PanoramaService,
    V: VenueService,
{
    /// Centres the map on the city, creates a marker for every place name that
    /// geocodes, fits the map to them and selects the first one.
    ///
    /// Failing to geocode a place name is reported and skips that place only.
    /// Failing to geocode the city centre is reported and ends startup.
    pub async fn start(&mut self) -> Result<Startup, Failure> {
        let center = match self.context.geocoder.geocode(&self.config.city_center).await {
            Ok(hit) => hit.position,
            Err(failure) => {
                report(&mut self.context.surface, &failure);
                return Err(failure);
            }
        };
        self.context.surface.center(center, self.config.zoom);

        let results = self.geocode_places().await;
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(hit) => self.add_place(hit),
                Err(failure) => {
                    report(&mut self.context.surface, &failure);
                    failures.push(failure);
                }
            }
        }

        let bounds = Bounds::covering(self.places.iter().map(Place::position));
        if let Some(bounds) = bounds {
            self.context.surface.fit_bounds(bounds);
        }
        tracing::info!(
            places = self.places.len(),
            failures = failures.len(),
            "map ready"
        );

        if !self.places.is_empty() {
            self.select(PlaceId(0)).await;
        }

        Ok(Startup {
            center,
            bounds,
            failures,
        })
    }

    async fn geocode_places(&self) -> Vec<Result<Geocoded, Failure>> {
        let geocoder = &self.context.geocoder;
        let names = &self.config.place_names;

        match self.config.geocode_mode {
            GeocodeMode::Concurrent => join_all(names.iter().map(|name| geocoder.geocode(name))).await,
            GeocodeMode::Sequential => {
                let mut results = Vec::with_capacity(names.len());
                for name in names {
                    results.push(geocoder.geocode(name).await);
                }
                results
            }
        }
    }

    fn add_place(&mut self, hit: Geocoded) {
        let id = PlaceId(self.places.len());
        let marker = self
            .context
            .surface
            .add_marker(hit.position, &hit.name, MarkerIcon::Default);
        let mut place = Place::new(id, hit.name, hit.position, marker);
        place.apply_search(&self.filter, &mut self.context.surface);
        self.places.push(place);
    }

    /// Makes `id` the selected place, opens its detail panel, and primes its
    /// street view, then its venue, then rewinds its photos.
    ///
    /// Each step runs only if the one before succeeded; a failure is reported
    /// and leaves the place as it was. Selecting the selected place does nothing.
    ///
    /// Returns `true` if the selection changed.
    pub async fn select(&mut self, id: PlaceId) -> bool {
        if self.current == Some(id) || id.0 >= self.places.len() {
            return false;
        }

        let ViewModel {
            context,
            config,
            photos,
            places,
            current,
            ..
        } = self;
        let surface = &mut context.surface;

        if let Some(previous) = current.take() {
            places[previous.0].set_selected(false, surface);
        }
        let place = &mut places[id.0];
        place.set_selected(true, surface);
        *current = Some(id);
        tracing::debug!(place = %place, "selected");
        surface.render_panel(place);

        let street_view = place
            .init_street_view(
                &context.panoramas,
                config.panorama_radius,
                config.panorama_pitch,
            )
            .await
            .map(drop);
        if let Err(failure) = street_view {
            report(surface, &failure);
            return true;
        }
        surface.render_panel(place);

        let venue = place.init_venue(&context.venues, photos).await.map(drop);
        if let Err(failure) = venue {
            report(surface, &failure);
            return true;
        }
        place.rewind_photos();
        surface.render_panel(place);

        true
    }

    /// Selects the place after the selected one, wrapping around to the first.
    pub async fn next(&mut self) -> bool {
        match self.current {
            Some(PlaceId(k)) => {
                let n = self.places.len();
                self.select(PlaceId((k + 1) % n)).await
            }
            None => false,
        }
    }

    /// Selects the place before the selected one, wrapping around to the last.
    pub async fn previous(&mut self) -> bool {
        match self.current {
            Some(PlaceId(k)) => {
                let n = self.places.len();
                self.select(PlaceId((k + n - 1) % n)).await
            }
            None => false,
        }
    }

    /// Resolves the venue of every place that does not have one yet.
    ///
    /// Failures are logged and returned, not shown to the user.
    pub async fn prewarm_venues(&mut self) -> Vec<Failure> {
        let ViewModel {
            context,
            photos,
            places,
            ..
        } = self;

        let mut failures = Vec::new();
        for place in places.iter_mut().filter(|p| p.venue().is_none()) {
            if let Err(failure) = place.init_venue(&context.venues, photos).await.map(drop) {
                tracing::warn!(place = %place, %failure, "could not prewarm venue");
                failures.push(failure);
            }
        }
        failures
    }
}

impl<M: MapSurface, G, P, V> ViewModel<M, G, P, V> {
    /// Clears the selection and closes the detail panel.
    ///
    /// Returns `true` if a place was selected.
    pub fn deselect(&mut self) -> bool {
        match self.current.take() {
            Some(id) => {
                self.places[id.0].set_selected(false, &mut self.context.surface);
                self.context.surface.close_panel();
                true
            }
            None => false,
        }
    }

    /// Sets the search filter and shows only the places matching it.
    ///
    /// The selection is left alone, even if the selected place gets hidden.
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
        for place in &mut self.places {
            place.apply_search(&self.filter, &mut self.context.surface);
        }
    }

    pub fn hover(&mut self, id: PlaceId) {
        if let Some(place) = self.places.get_mut(id.0) {
            place.do_mouse_over(&mut self.context.surface);
        }
    }

    pub fn unhover(&mut self, id: PlaceId) {
        if let Some(place) = self.places.get_mut(id.0) {
            place.do_mouse_out(&mut self.context.surface);
        }
    }

    /// Shows the selected venue's next photo.
    pub fn next_photo(&mut self) -> bool {
        self.page_photos(|photos| photos.next())
    }

    /// Shows the selected venue's previous photo.
    pub fn previous_photo(&mut self) -> bool {
        self.page_photos(|photos| photos.previous())
    }

    fn page_photos<F>(&mut self, step: F) -> bool
    where
        F: FnOnce(&mut crate::venue::PhotoCursor) -> bool,
    {
        let place = match self.current {
            Some(id) => &mut self.places[id.0],
            None => return false,
        };
        let moved = place.photos_mut().map_or(false, step);
        if moved {
            self.context.surface.render_panel(place);
        }
        moved
    }
}

fn report<M: MapSurface + ?Sized>(surface: &mut M, failure: &Failure) {
    tracing::warn!(%failure, "reporting failure");
    surface.notify(failure);
}
