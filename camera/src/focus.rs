use spots::Spot;

/// Zoom used when centering on a single spot.
pub const SPOT_ZOOM: f64 = 8.0;

/// Overview zoom the fly-over phases pass through.
pub const WIDE_ZOOM: f64 = 4.0;

/// Where the map rests when nothing is selected.
pub const WORLD_VIEW: FocusPoint = FocusPoint {
    latitude: 20.0,
    longitude: 0.0,
    zoom: 2.0,
};

/// A coordinate + zoom pair the map should center on. Derived per selection
/// change, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
}

impl FocusPoint {
    pub fn new(latitude: f64, longitude: f64, zoom: f64) -> Self {
        Self {
            latitude,
            longitude,
            zoom,
        }
    }

    /// Same coordinates, zoom ignored.
    pub fn same_location(&self, other: &FocusPoint) -> bool {
        self.latitude == other.latitude && self.longitude == other.longitude
    }
}

impl From<&Spot> for FocusPoint {
    fn from(spot: &Spot) -> Self {
        Self {
            latitude: spot.latitude,
            longitude: spot.longitude,
            zoom: SPOT_ZOOM,
        }
    }
}

/// One selection change, as handed to the controller. Consumed once.
///
/// `previous = None` means there is nothing to fly away from: the viewport
/// jumps straight to `current` with no animation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransitionRequest {
    pub previous: Option<FocusPoint>,
    pub current: Option<FocusPoint>,
}

impl TransitionRequest {
    pub fn new(previous: Option<FocusPoint>, current: Option<FocusPoint>) -> Self {
        Self { previous, current }
    }

    /// First focus after startup: jump to `current` immediately.
    pub fn jump(current: FocusPoint) -> Self {
        Self {
            previous: None,
            current: Some(current),
        }
    }
}
