//! Outbound boundary to the transport engine.

use crate::step::TransportStep;

/// Engine-provided control over the particle that produced a step.
pub trait TrackAction {
    /// Irreversibly halts further propagation of the particle.
    ///
    /// Once issued for a step there is no compensating action; the engine
    /// must deliver no further steps for this particle.
    fn terminate(&mut self, step: &TransportStep);
}

/// [`TrackAction`] that ignores termination requests.
///
/// Intended for replaying recorded steps or auditing a dataset, where no
/// live trajectory exists to terminate.
pub struct NoTrackAction;

impl TrackAction for NoTrackAction {
    fn terminate(&mut self, _step: &TransportStep) {}
}
