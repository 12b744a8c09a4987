//! # Camera
//!
//! Map-side state for the travel spots UI: which spot is selected, and how
//! the viewport gets there.
//!
//! The [`SelectionStore`] tracks the selected and previously selected spot
//! and emits a [`TransitionRequest`] per change. The [`CameraController`]
//! consumes those requests and drives a [`MapSurface`] through the fly-to
//! sequence, preempting any transition still in flight. [`drive`] wires the
//! two together over the store's channel.
//!
//! The actual map widget stays behind the [`MapSurface`] trait; nothing in
//! this crate knows about tiles or projections.

pub mod controller;
pub mod focus;
pub mod search;
pub mod selection;

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;

pub use controller::{CameraController, MapSurface, Phase};
pub use focus::{FocusPoint, TransitionRequest, SPOT_ZOOM, WIDE_ZOOM, WORLD_VIEW};
pub use search::QueryDebouncer;
pub use selection::SelectionStore;

/// Forward selection changes to the controller until the store goes away.
pub fn drive<S: MapSurface + 'static>(
    controller: Arc<CameraController<S>>,
    mut requests: UnboundedReceiver<TransitionRequest>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(request) = requests.recv().await {
            controller.focus(request);
        }
    })
}
