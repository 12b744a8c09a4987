//! Selected / previously selected spot, as one explicit store.
//!
//! List clicks and marker clicks both land in [`SelectionStore::select`].
//! Every change is pushed as a [`TransitionRequest`] on an injected channel
//! so the camera controller sees `(previous, current)` pairs without any
//! shared ambient state.

use spots::Spot;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::focus::{FocusPoint, TransitionRequest, WORLD_VIEW};

pub struct SelectionStore {
    selected: Option<Spot>,
    previous: Option<Spot>,
    requests: UnboundedSender<TransitionRequest>,
}

impl SelectionStore {
    pub fn new(requests: UnboundedSender<TransitionRequest>) -> Self {
        Self {
            selected: None,
            previous: None,
            requests,
        }
    }

    /// Make `spot` the current selection.
    ///
    /// `previous` is updated to the pre-call selection only when that
    /// selection existed and is a different spot; re-selecting the same spot
    /// leaves it untouched. Pure state transition, no error conditions.
    pub fn select(&mut self, spot: Spot) {
        let prior = self.selected.take();

        if let Some(prior_spot) = &prior {
            if prior_spot.id != spot.id {
                self.previous = prior.clone();
            }
        }

        debug!(spot = %spot.name, "selection changed");

        let request = TransitionRequest::new(
            prior.as_ref().map(FocusPoint::from),
            Some(FocusPoint::from(&spot)),
        );
        self.selected = Some(spot);

        self.notify(request);
    }

    /// Drop the selection and return the map to the world view.
    pub fn clear(&mut self) {
        if let Some(prior) = self.selected.take() {
            self.previous = Some(prior);
        }

        self.notify(TransitionRequest::jump(WORLD_VIEW));
    }

    pub fn selected(&self) -> Option<&Spot> {
        self.selected.as_ref()
    }

    pub fn previous(&self) -> Option<&Spot> {
        self.previous.as_ref()
    }

    fn notify(&self, request: TransitionRequest) {
        // A torn-down controller just means nobody is listening anymore.
        let _ = self.requests.send(request);
    }
}
