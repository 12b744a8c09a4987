//! Manual camera run: wires a selection store to the controller over a
//! stdout surface and clicks through a few spots, preempting one flight
//! midway.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use camera::{drive, CameraController, MapSurface, SelectionStore};
use spots::{Category, Spot};
use tokio::sync::mpsc::unbounded_channel;
use tokio::time::sleep;

struct StdoutSurface;

#[async_trait]
impl MapSurface for StdoutSurface {
    fn set_viewport(&self, latitude: f64, longitude: f64, zoom: f64) {
        println!("viewport ({latitude}, {longitude}) @ {zoom}");
    }

    async fn fly_to(&self, latitude: f64, longitude: f64, zoom: f64, duration: Duration) {
        println!("fly      ({latitude}, {longitude}) @ {zoom} over {duration:?}");
        sleep(duration).await;
    }

    fn stop(&self) {
        println!("stop");
    }
}

fn spot(name: &str, latitude: f64, longitude: f64) -> Spot {
    let now = Utc::now();
    Spot {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: name.to_string(),
        latitude,
        longitude,
        country: String::new(),
        city: String::new(),
        category: Category::Landmarks,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::main]
async fn main() {
    let (requests, receiver) = unbounded_channel();
    let mut selection = SelectionStore::new(requests);

    let controller = Arc::new(CameraController::new(Arc::new(StdoutSurface)));
    drive(Arc::clone(&controller), receiver);

    println!("-- first click: immediate jump");
    selection.select(spot("Eiffel Tower", 48.8584, 2.2945));
    sleep(Duration::from_millis(100)).await;

    println!("-- second click: full three-phase flight");
    selection.select(spot("Grand Canyon", 36.1064, -112.1129));
    sleep(Duration::from_millis(1200)).await;

    println!("-- third click lands mid-traverse: preempts");
    selection.select(spot("Taj Mahal", 27.1751, 78.0421));
    sleep(Duration::from_secs(4)).await;

    println!("-- done, phase: {:?}", controller.phase());
}
