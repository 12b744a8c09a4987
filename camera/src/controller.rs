//! # Camera transitions
//!
//! Turns a `(previous, current)` focus pair into viewport moves on the map
//! surface, one sequence at a time.
//!
//! A selection with no prior focus jumps straight to its target. With a
//! prior focus, the viewport flies in three phases: recede to the old spot
//! at the overview zoom, traverse to the new spot at the overview zoom,
//! then approach down to the spot zoom. Phases run strictly in order; each
//! one waits for the surface to report completion, bounded by the phase
//! duration.
//!
//! ## Preemption
//! A new request always wins. It halts any in-flight motion and starts over
//! from its own first phase. Every request bumps a generation counter, and
//! each phase boundary re-checks the counter it captured before scheduling
//! the next move, so a stale completion can never resume a superseded
//! sequence. Interruption is the expected behavior here, not an error.

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::debug;

use crate::focus::{FocusPoint, TransitionRequest, WIDE_ZOOM};

pub const RECEDE_DURATION: Duration = Duration::from_millis(1000);
pub const TRAVERSE_DURATION: Duration = Duration::from_millis(1500);
pub const APPROACH_DURATION: Duration = Duration::from_millis(1000);

/// The viewport contract the controller drives. Rendering, tiles, and
/// projection math live behind it.
#[async_trait]
pub trait MapSurface: Send + Sync {
    /// Center the viewport immediately, no animation.
    fn set_viewport(&self, latitude: f64, longitude: f64, zoom: f64);

    /// Animate toward the target over `duration`, resolving when the
    /// surface reports completion. A [`stop`](MapSurface::stop) call must
    /// halt the motion and suppress the pending completion.
    async fn fly_to(&self, latitude: f64, longitude: f64, zoom: f64, duration: Duration);

    /// Halt any in-progress motion.
    fn stop(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Phase {
    Idle = 0,
    Receding = 1,
    Traversing = 2,
    Approaching = 3,
}

impl Phase {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => Phase::Receding,
            2 => Phase::Traversing,
            3 => Phase::Approaching,
            _ => Phase::Idle,
        }
    }
}

pub struct CameraController<S: MapSurface + 'static> {
    surface: Arc<S>,
    generation: Arc<AtomicU64>,
    phase: Arc<AtomicU8>,
    flight: Mutex<Option<JoinHandle<()>>>,
}

impl<S: MapSurface + 'static> CameraController<S> {
    pub fn new(surface: Arc<S>) -> Self {
        Self {
            surface,
            generation: Arc::new(AtomicU64::new(0)),
            phase: Arc::new(AtomicU8::new(Phase::Idle as u8)),
            flight: Mutex::new(None),
        }
    }

    /// Consume one transition request, preempting whatever is in flight.
    pub fn focus(&self, request: TransitionRequest) {
        // Claiming the next generation invalidates every pending phase
        // callback of the sequence being replaced.
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.surface.stop();
        if let Some(flight) = self.flight.lock().unwrap().take() {
            flight.abort();
        }
        self.phase.store(Phase::Idle as u8, Ordering::SeqCst);

        let Some(current) = request.current else {
            debug!("nothing to focus");
            return;
        };

        let Some(previous) = request.previous else {
            debug!(
                latitude = current.latitude,
                longitude = current.longitude,
                zoom = current.zoom,
                "first focus, jumping"
            );
            self.surface
                .set_viewport(current.latitude, current.longitude, current.zoom);
            return;
        };

        let surface = Arc::clone(&self.surface);
        let generation = Arc::clone(&self.generation);
        let phase = Arc::clone(&self.phase);

        let flight = tokio::spawn(async move {
            fly_sequence(surface.as_ref(), &generation, &phase, token, previous, current).await;
        });

        *self.flight.lock().unwrap() = Some(flight);
    }

    pub fn phase(&self) -> Phase {
        Phase::from_u8(self.phase.load(Ordering::SeqCst))
    }

    /// Wait for the in-flight sequence, if any, to finish or be superseded.
    pub async fn settled(&self) {
        let flight = self.flight.lock().unwrap().take();
        if let Some(flight) = flight {
            // Aborted flights are superseded sequences, nothing to report.
            let _ = flight.await;
        }
    }
}

impl<S: MapSurface + 'static> Drop for CameraController<S> {
    fn drop(&mut self) {
        // Invalidate the token first so no phase callback fires after the
        // flight task is gone.
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(flight) = self.flight.lock().unwrap().take() {
            flight.abort();
        }
        self.surface.stop();
    }
}

async fn fly_sequence<S: MapSurface>(
    surface: &S,
    generation: &AtomicU64,
    phase: &AtomicU8,
    token: u64,
    previous: FocusPoint,
    current: FocusPoint,
) {
    // Same coordinates: nothing to fly over, close in directly.
    if !previous.same_location(&current) {
        phase.store(Phase::Receding as u8, Ordering::SeqCst);
        if !fly_phase(
            surface,
            generation,
            token,
            FocusPoint::new(previous.latitude, previous.longitude, WIDE_ZOOM),
            RECEDE_DURATION,
        )
        .await
        {
            return;
        }

        phase.store(Phase::Traversing as u8, Ordering::SeqCst);
        if !fly_phase(
            surface,
            generation,
            token,
            FocusPoint::new(current.latitude, current.longitude, WIDE_ZOOM),
            TRAVERSE_DURATION,
        )
        .await
        {
            return;
        }
    }

    phase.store(Phase::Approaching as u8, Ordering::SeqCst);
    if fly_phase(surface, generation, token, current, APPROACH_DURATION).await {
        phase.store(Phase::Idle as u8, Ordering::SeqCst);
    }
}

/// Run one fly phase. Returns whether the sequence still owns the camera
/// and may schedule the next phase.
async fn fly_phase<S: MapSurface>(
    surface: &S,
    generation: &AtomicU64,
    token: u64,
    target: FocusPoint,
    duration: Duration,
) -> bool {
    if generation.load(Ordering::SeqCst) != token {
        return false;
    }

    // The duration is both the animation length and the longest we wait
    // before treating the phase as complete.
    let _ = timeout(
        duration,
        surface.fly_to(target.latitude, target.longitude, target.zoom, duration),
    )
    .await;

    generation.load(Ordering::SeqCst) == token
}

#[cfg(test)]
mod tests {
    use std::future::pending;

    use tokio::task::yield_now;
    use tokio::time::advance;

    use super::*;
    use crate::focus::SPOT_ZOOM;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Call {
        Set(f64, f64, f64),
        Fly(f64, f64, f64),
        Stop,
    }

    #[derive(Default)]
    struct RecordingSurface {
        calls: Mutex<Vec<Call>>,
    }

    #[async_trait]
    impl MapSurface for RecordingSurface {
        fn set_viewport(&self, latitude: f64, longitude: f64, zoom: f64) {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Set(latitude, longitude, zoom));
        }

        async fn fly_to(&self, latitude: f64, longitude: f64, zoom: f64, _duration: Duration) {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Fly(latitude, longitude, zoom));
            // Never reports completion on its own; the controller's
            // per-phase timeout is the completion proxy.
            pending::<()>().await;
        }

        fn stop(&self) {
            self.calls.lock().unwrap().push(Call::Stop);
        }
    }

    impl RecordingSurface {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn moves(&self) -> Vec<Call> {
            self.calls()
                .into_iter()
                .filter(|call| *call != Call::Stop)
                .collect()
        }
    }

    fn controller() -> (CameraController<RecordingSurface>, Arc<RecordingSurface>) {
        let surface = Arc::new(RecordingSurface::default());
        (CameraController::new(Arc::clone(&surface)), surface)
    }

    const PARIS: FocusPoint = FocusPoint {
        latitude: 48.8584,
        longitude: 2.2945,
        zoom: SPOT_ZOOM,
    };
    const CANYON: FocusPoint = FocusPoint {
        latitude: 36.1064,
        longitude: -112.1129,
        zoom: SPOT_ZOOM,
    };
    const AGRA: FocusPoint = FocusPoint {
        latitude: 27.1751,
        longitude: 78.0421,
        zoom: SPOT_ZOOM,
    };

    #[tokio::test(start_paused = true)]
    async fn test_first_focus_jumps_without_phases() {
        let (controller, surface) = controller();

        controller.focus(TransitionRequest::jump(AGRA));
        controller.settled().await;

        assert_eq!(surface.moves(), vec![Call::Set(27.1751, 78.0421, 8.0)]);
        assert_eq!(controller.phase(), Phase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_distinct_pair_runs_three_phases_in_order() {
        let (controller, surface) = controller();

        controller.focus(TransitionRequest::new(Some(PARIS), Some(CANYON)));
        controller.settled().await;

        assert_eq!(
            surface.moves(),
            vec![
                Call::Fly(48.8584, 2.2945, WIDE_ZOOM),
                Call::Fly(36.1064, -112.1129, WIDE_ZOOM),
                Call::Fly(36.1064, -112.1129, 8.0),
            ]
        );
        assert_eq!(controller.phase(), Phase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_location_approaches_only() {
        let (controller, surface) = controller();
        let wide_canyon = FocusPoint::new(CANYON.latitude, CANYON.longitude, WIDE_ZOOM);

        controller.focus(TransitionRequest::new(Some(wide_canyon), Some(CANYON)));
        controller.settled().await;

        assert_eq!(surface.moves(), vec![Call::Fly(36.1064, -112.1129, 8.0)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_null_current_is_a_noop() {
        let (controller, surface) = controller();

        controller.focus(TransitionRequest::new(Some(PARIS), None));
        controller.settled().await;

        assert_eq!(surface.moves(), vec![]);
        assert_eq!(controller.phase(), Phase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_preemption_mid_traverse_discards_old_sequence() {
        let (controller, surface) = controller();

        controller.focus(TransitionRequest::new(Some(PARIS), Some(CANYON)));
        yield_now().await;
        // Past the recede, inside the traverse.
        advance(RECEDE_DURATION + Duration::from_millis(200)).await;
        yield_now().await;
        assert_eq!(controller.phase(), Phase::Traversing);

        controller.focus(TransitionRequest::new(Some(CANYON), Some(AGRA)));
        controller.settled().await;

        let calls = surface.calls();
        let preempt = calls
            .iter()
            .rposition(|call| *call == Call::Stop)
            .expect("preempting request stops the surface");

        // Only the second request's phases run after the preemption; the
        // first sequence never reaches its approach.
        assert_eq!(
            &calls[preempt + 1..],
            &[
                Call::Fly(36.1064, -112.1129, WIDE_ZOOM),
                Call::Fly(27.1751, 78.0421, WIDE_ZOOM),
                Call::Fly(27.1751, 78.0421, 8.0),
            ]
        );
        assert!(!calls[..preempt].contains(&Call::Fly(36.1064, -112.1129, 8.0)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_request_settles_like_a_single_one() {
        let (controller, surface) = controller();
        let request = TransitionRequest::new(Some(PARIS), Some(CANYON));

        controller.focus(request);
        controller.focus(request);
        controller.settled().await;

        assert_eq!(
            surface.moves().last(),
            Some(&Call::Fly(36.1064, -112.1129, 8.0))
        );
        assert_eq!(controller.phase(), Phase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_null_current_cancels_in_flight_sequence() {
        let (controller, surface) = controller();

        controller.focus(TransitionRequest::new(Some(PARIS), Some(CANYON)));
        yield_now().await;
        advance(Duration::from_millis(300)).await;

        controller.focus(TransitionRequest::default());
        let quiesced = surface.calls().len();

        advance(Duration::from_secs(10)).await;
        assert_eq!(surface.calls().len(), quiesced);
        assert_eq!(controller.phase(), Phase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_halts_flight_and_silences_callbacks() {
        let (controller, surface) = controller();

        controller.focus(TransitionRequest::new(Some(PARIS), Some(CANYON)));
        yield_now().await;
        advance(Duration::from_millis(300)).await;

        drop(controller);
        let quiesced = surface.calls().len();
        assert_eq!(surface.calls().last(), Some(&Call::Stop));

        advance(Duration::from_secs(10)).await;
        yield_now().await;
        assert_eq!(surface.calls().len(), quiesced);
    }
}
