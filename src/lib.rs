#![doc(html_root_url = "https://docs.rs/date-spots/0.1.0")]

/*!
# Date Spots

A view-model for browsing a curated list of date spots on a map.

Place names are geocoded into markers. One place at a time can be selected,
which opens its detail panel and lazily fetches a Street View panorama facing
it and its Foursquare venue record. A free-text filter hides the markers that
don't match.

The map itself is behind the [`MapSurface`] trait, and each web service is
behind a trait in [`adapter`], so the state machine runs against any widget
and any HTTP client.

## Usage

Add `date-spots` to your dependencies in your project's `Cargo.toml`:

```toml
[dependencies]
date-spots = "0.1"
tokio = { version = "1", features = ["macros", "rt-multi-thread"] }
```

## Overview

```rust,no_run
use date_spots::{Config, MapSurface, Token};

# async fn run<M: MapSurface>(surface: M) {
let token = Token::from_env().unwrap();
let mut view_model = date_spots::hyper::view_model(surface, token.as_ref(), Config::default());

let startup = view_model.start().await.unwrap();
for failure in &startup.failures {
    eprintln!("{}", failure);
}

view_model.next().await;
if let Some(venue) = view_model.current().and_then(|place| place.venue()) {
    println!("{}: {}", venue.name, venue.address);
}
# }
```
*/

#[macro_use]
mod util;

pub mod adapter;
pub mod config;
pub mod error;
pub mod foursquare;
pub mod geo;
pub mod google;
#[cfg(feature = "hyper")]
pub mod hyper;
pub mod place;
pub mod surface;
pub mod types;
pub mod venue;
pub mod view_model;

#[cfg(feature = "gzip")]
mod gzip;
#[cfg(test)]
mod testing;
mod token;

pub use crate::config::{Config, GeocodeMode};
pub use crate::error::{Error, Failure};
pub use crate::foursquare::Foursquare;
pub use crate::geo::{Bounds, LatLng};
pub use crate::google::GoogleMaps;
pub use crate::place::{Place, PlaceId, StreetView};
pub use crate::surface::{MapSurface, MarkerId};
pub use crate::token::{MissingVar, Token};
pub use crate::venue::{PhotoCursor, Venue};
pub use crate::view_model::{Context, Startup, ViewModel};
