pub mod dataset;
pub mod engine;
pub mod hits;
pub mod scoring;
pub mod step;

// Prelude
pub use dataset::{DetectionRow, DetectionSink, DetectionTable};
pub use engine::{NoTrackAction, TrackAction};
pub use hits::{HitRecord, HitRegistry};
pub use scoring::{EventScope, ScorerConfig, ScorerStats, StepScorer};
pub use step::{OPTICAL_PHOTON, TransportStep};
