//! Engine-supplied transport-step attributes.
//!
//! A [`TransportStep`] carries everything the scoring core needs about one
//! discrete propagation segment. All attributes are computed engine-side
//! (including the sensitive-cell index, resolved from the geometric hierarchy
//! of the hit); the core never mutates a step.

/// Reserved species code identifying the optical photon in the engine's
/// species table.
///
/// Negative codes denote entries traveling "backward" in the species table;
/// this one is the photon signal of interest for the scoring pipeline.
pub const OPTICAL_PHOTON: i32 = -22;

/// One discrete segment of simulated particle propagation, as delivered by
/// the transport engine to the scoring core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransportStep {
    /// Identifier of the current simulated event. Monotonically assigned by
    /// the engine, unique within a run.
    pub event_id: u64,
    /// Species/charge-state code from the engine's species table.
    pub species_code: i32,
    /// Kinetic energy of the traversing particle. Positive by the transport
    /// engine's contract; energy units are fixed per run.
    pub kinetic_energy: f64,
    /// Energy deposited in this step. Non-negative.
    pub deposited_energy: f64,
    /// Distance traveled in this step. Zero for chargeless particles by
    /// engine convention.
    pub path_length: f64,
    /// Absolute simulation time at the step's start.
    pub global_time: f64,
    /// Index of the sensitive cell the step occurred in (the replica index
    /// one level above the sensitive leaf).
    pub cell_index: usize,
}

impl TransportStep {
    /// True when the step carries no information of interest for scoring
    /// (nothing deposited, nothing traveled).
    pub fn is_empty(&self) -> bool {
        self.deposited_energy == 0.0 && self.path_length == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step() -> TransportStep {
        TransportStep {
            event_id: 0,
            species_code: OPTICAL_PHOTON,
            kinetic_energy: 3.0e-6,
            deposited_energy: 0.0,
            path_length: 0.0,
            global_time: 0.0,
            cell_index: 0,
        }
    }

    #[test]
    fn test_empty_step() {
        assert!(step().is_empty());
    }

    #[test]
    fn test_deposit_makes_step_non_empty() {
        let mut s = step();
        s.deposited_energy = 1.0e-6;
        assert!(!s.is_empty());
    }

    #[test]
    fn test_path_makes_step_non_empty() {
        let mut s = step();
        s.path_length = 0.3;
        assert!(!s.is_empty());
    }
}
