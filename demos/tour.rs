// This is free and unencumbered software released into the public domain.
//
// Anyone is free to copy, modify, publish, use, compile, sell, or
// distribute this software, either in source code form or as a compiled
// binary, for any purpose, commercial or non-commercial, and by any
// means.
//
// In jurisdictions that recognize copyright laws, the author or authors
// of this software dedicate any and all copyright interest in the
// software to the public domain. We make this dedication for the benefit
// of the public at large and to the detriment of our heirs and
// successors. We intend this dedication to be an overt act of
// relinquishment in perpetuity of all present and future rights to this
// software under copyright law.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.
// IN NO EVENT SHALL THE AUTHORS BE LIABLE FOR ANY CLAIM, DAMAGES OR
// OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE,
// ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR
// OTHER DEALINGS IN THE SOFTWARE.
//
// For more information, please refer to <http://unlicense.org/>

//! Walks once around the configured places, printing what the map would show.
//!
//! Usage: `cargo run --example tour [config.json]`, with `GOOGLE_MAPS_API_KEY`,
//! `FOURSQUARE_CLIENT_ID` and `FOURSQUARE_CLIENT_SECRET` set.

use std::env;
use std::fs::File;

use date_spots::geo::{Bounds, LatLng};
use date_spots::types::MarkerIcon;
use date_spots::{Config, Failure, MapSurface, MarkerId, Place, Token};
use tracing_subscriber::EnvFilter;

/// Prints every map change to stdout.
#[derive(Default)]
struct Console {
    markers: Vec<String>,
}

impl MapSurface for Console {
    fn center(&mut self, position: LatLng, zoom: u8) {
        println!("map: centre {} at zoom {}", position, zoom);
    }

    fn add_marker(&mut self, position: LatLng, title: &str, _: MarkerIcon) -> MarkerId {
        println!("map: marker {:?} at {}", title, position);
        self.markers.push(title.to_owned());
        MarkerId(self.markers.len() - 1)
    }

    fn set_marker_icon(&mut self, marker: MarkerId, icon: MarkerIcon) {
        println!("map: {:?} -> {}", self.markers[marker.0], icon.url());
    }

    fn set_marker_visible(&mut self, marker: MarkerId, visible: bool) {
        println!("map: {:?} visible={}", self.markers[marker.0], visible);
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        println!(
            "map: fit {},{} .. {},{}",
            bounds.south, bounds.west, bounds.north, bounds.east
        );
    }

    fn render_panel(&mut self, place: &Place) {
        println!("panel: {}", place.title());
        if let Some(view) = place.street_view() {
            println!("  street view: heading {:.0}, pitch {}", view.heading, view.pitch);
        }
        if let Some(venue) = place.venue() {
            println!("  {} ({}), {}", venue.name, venue.rating, venue.address);
            println!("  phone: {}, web: {}", venue.phone, venue.url);
            if let Some(photo) = venue.photos().current() {
                let photos = venue.photos();
                let shown = photos.index().unwrap_or(0) + 1;
                println!("  photo {}/{}: {}", shown, photos.len(), photo);
            }
        }
    }

    fn close_panel(&mut self) {
        println!("panel: closed");
    }

    fn notify(&mut self, failure: &Failure) {
        println!("Error: {}", failure);
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("date_spots=info")),
        )
        .init();

    let token = Token::from_env().unwrap();
    let config = match env::args_os().nth(1) {
        Some(path) => Config::from_reader(File::open(path).unwrap()).unwrap(),
        None => Config::default(),
    };

    let mut view_model = date_spots::hyper::view_model(Console::default(), token.as_ref(), config);

    let startup = view_model.start().await.unwrap();
    println!(
        "{} places, {} not found",
        view_model.places().len(),
        startup.failures.len()
    );

    for failure in view_model.prewarm_venues().await {
        tracing::warn!(%failure, "skipping venue");
    }

    for _ in 1..view_model.places().len() {
        view_model.next().await;
        while view_model.next_photo() {}
    }

    view_model.set_filter("hill");
    let hills: Vec<_> = view_model.visible_places().map(|p| p.title()).collect();
    println!("matching \"hill\": {:?}", hills);
}
